//! Property tests for scoring, rendering and cell comparison

use doccompare::matcher::SequenceMatcher;
use doccompare::render::render;
use doccompare::similarity::similarity;
use doccompare::{compare, CellValue, Grid};
use proptest::prelude::*;

fn small_grid(name: &'static str) -> impl Strategy<Value = Grid> {
    prop::collection::vec(prop::collection::vec(prop::option::of(0i64..4), 0..4), 0..4).prop_map(
        move |rows| {
            Grid::from_rows(
                name,
                rows.into_iter()
                    .map(|row| row.into_iter().map(|v| v.map(CellValue::Int)).collect::<Vec<_>>()),
            )
        },
    )
}

proptest! {
    #[test]
    fn prop_similarity_is_bounded_and_symmetric(a in "[ab \n]{0,30}", b in "[ab \n]{0,30}") {
        let forward = similarity(&a, &b);
        let backward = similarity(&b, &a);
        prop_assert!((0.0..=100.0).contains(&forward));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_similarity_identity(text in "\\PC{0,40}") {
        prop_assert_eq!(similarity(&text, &text), 100.0);
    }

    #[test]
    fn prop_render_reconstructs_both_sides(a in "[abc \n]{0,60}", b in "[abc \n]{0,60}") {
        let doc = render(&a, &b, "a", "b");
        prop_assert_eq!(doc.left_text(), a.clone());
        prop_assert_eq!(doc.right_text(), b.clone());
        prop_assert_eq!(doc.has_changes(), a != b);
    }

    #[test]
    fn prop_ratio_bounded_by_quick_ratios(a in "[abcd]{0,20}", b in "[abcd]{0,20}") {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let matcher = SequenceMatcher::new(&a, &b);
        prop_assert!(matcher.ratio() <= matcher.quick_ratio() + 1e-12);
        prop_assert!(matcher.quick_ratio() <= matcher.real_quick_ratio() + 1e-12);
    }

    #[test]
    fn prop_identical_grids_have_no_highlights(grid in small_grid("Sheet1")) {
        let diff = compare(&grid, &grid);
        prop_assert_eq!(diff.mismatch_count, 0);
        prop_assert_eq!(diff.highlighted.highlight_count(), 0);
        prop_assert!(!diff.had_extra_rows && !diff.had_extra_columns);
    }

    #[test]
    fn prop_mismatches_are_highlighted(a in small_grid("A"), b in small_grid("B")) {
        let before = a.clone();
        let diff = compare(&a, &b);
        prop_assert_eq!(&a, &before);
        prop_assert!(diff.mismatch_count <= diff.highlighted.highlight_count());
        for m in &diff.mismatches {
            prop_assert!(diff.highlighted.is_highlighted(m.row, m.column));
        }
    }
}
