//! Longest-matching-block sequence alignment
//!
//! Finds the longest contiguous run common to both sequences, then recurses
//! on the unmatched regions to its left and right. The resulting matching
//! blocks drive both the similarity ratio and the line/character alignment
//! used for rendering.

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Range;

/// Minimum length of `b` before the popularity heuristic applies
const AUTOJUNK_MIN_LEN: usize = 200;

/// A contiguous run where `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One span of an alignment between two sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentOp {
    pub tag: OpTag,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

impl AlignmentOp {
    fn new(tag: OpTag, a: Range<usize>, b: Range<usize>) -> Self {
        Self { tag, a, b }
    }
}

/// Sequence matcher over any hashable element type.
///
/// Computation is lazy; matching blocks are cached after the first call.
pub struct SequenceMatcher<'a, T: Eq + Hash> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
    popular: HashSet<&'a T>,
    matching_blocks: OnceCell<Vec<Match>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self::with_autojunk(a, b, false)
    }

    /// With `autojunk`, elements of a long `b` that occur in more than 1% of
    /// its positions are not used to anchor matches. Faster on large inputs,
    /// but an input may then no longer fully match itself.
    pub fn with_autojunk(a: &'a [T], b: &'a [T], autojunk: bool) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        let mut popular = HashSet::new();
        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            popular.extend(
                b2j.iter()
                    .filter(|(_, idxs)| idxs.len() > ntest)
                    .map(|(elt, _)| *elt),
            );
            for elt in &popular {
                b2j.remove(elt);
            }
        }

        Self {
            a,
            b,
            b2j,
            popular,
            matching_blocks: OnceCell::new(),
        }
    }

    /// Elements dropped by the popularity heuristic
    pub fn popular_count(&self) -> usize {
        self.popular.len()
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins, and
    /// of those the one starting earliest in `b`. Returns a zero-size match
    /// at `(alo, blo)` if nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending with a[i-1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, elt) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut new_j2len = HashMap::new();
            if let Some(indices) = self.b2j.get(elt) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular elements never anchor a match but may still extend one.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// All non-adjacent matching blocks in increasing order, terminated by
    /// the sentinel `Match { a: len(a), b: len(b), size: 0 }`.
    pub fn matching_blocks(&self) -> &[Match] {
        self.matching_blocks.get_or_init(|| self.compute_matching_blocks())
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }

    /// Alignment ops that turn `a` into `b`, covering both sequences
    /// without gaps.
    pub fn opcodes(&self) -> Vec<AlignmentOp> {
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);

        for m in self.matching_blocks() {
            let tag = match (i < m.a, j < m.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(AlignmentOp::new(tag, i..m.a, j..m.b));
            }
            i = m.a + m.size;
            j = m.b + m.size;
            if m.size > 0 {
                ops.push(AlignmentOp::new(OpTag::Equal, m.a..i, m.b..j));
            }
        }
        ops
    }

    /// Total number of matched elements
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.size).sum()
    }

    /// Similarity in `[0, 1]`: `2M / (len(a) + len(b))`, 1.0 for two empty
    /// sequences.
    pub fn ratio(&self) -> f64 {
        calculate_ratio(self.matched_len(), self.a.len() + self.b.len())
    }

    /// Upper bound on `ratio()` from the multiset intersection
    pub fn quick_ratio(&self) -> f64 {
        let mut avail: HashMap<&T, isize> = HashMap::new();
        for elt in self.b {
            *avail.entry(elt).or_insert(0) += 1;
        }
        let mut matches = 0;
        for elt in self.a {
            let count = avail.entry(elt).or_insert(0);
            if *count > 0 {
                matches += 1;
            }
            *count -= 1;
        }
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on `ratio()` from the lengths alone
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / length as f64
}
