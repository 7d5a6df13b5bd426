//! Property tests for 2048 compaction and grid invariants.

use proptest::prelude::*;

use grid_arcade::core::{compact_left, GridModel};

fn tile() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), (1u32..11).prop_map(|e| 1 << e)]
}

fn row() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(tile(), 1..8)
}

fn grid() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..6, 1usize..6)
        .prop_flat_map(|(w, h)| prop::collection::vec(prop::collection::vec(0u8..3, w), h))
}

proptest! {
    #[test]
    fn compact_keeps_length_and_total(input in row()) {
        let (out, _) = compact_left(&input);
        prop_assert_eq!(out.len(), input.len());
        prop_assert_eq!(out.iter().sum::<u32>(), input.iter().sum::<u32>());
    }

    #[test]
    fn compact_packs_tiles_to_the_left(input in row()) {
        let (out, _) = compact_left(&input);
        let tiles = out.iter().take_while(|&&v| v != 0).count();
        prop_assert!(out[tiles..].iter().all(|&v| v == 0));
        prop_assert!(tiles <= input.iter().filter(|&&v| v != 0).count());
    }

    #[test]
    fn compact_score_is_sum_of_merged_tiles(input in row()) {
        let (out, score) = compact_left(&input);
        let before = input.iter().filter(|&&v| v != 0).count();
        let after = out.iter().filter(|&&v| v != 0).count();
        // Every merge removes one tile and scores at least 4.
        prop_assert!(score >= 4 * (before - after) as u32);
        prop_assert_eq!(score == 0, before == after);
    }

    #[test]
    fn transpose_and_mirror_are_involutions(rows in grid()) {
        let g = GridModel::from_rows(rows).unwrap();
        let t = g.transpose();
        prop_assert_eq!((t.width(), t.height()), (g.height(), g.width()));
        prop_assert_eq!(t.transpose(), g.clone());
        prop_assert_eq!(g.reverse_rows().reverse_rows(), g);
    }

    #[test]
    fn remove_rows_keeps_survivor_order(rows in grid()) {
        let mut g = GridModel::from_rows(rows.clone()).unwrap();
        let full = |row: &[u8]| row.iter().all(|&c| c == 2);
        let removed = g.remove_rows(full, 9);

        let survivors: Vec<Vec<u8>> = rows.iter().filter(|r| !full(r.as_slice())).cloned().collect();
        prop_assert_eq!(removed.len(), rows.len() - survivors.len());
        prop_assert_eq!(g.height() as usize, rows.len());

        let after: Vec<Vec<u8>> = g.rows().map(|r| r.to_vec()).collect();
        let (top, bottom) = after.split_at(removed.len());
        prop_assert!(top.iter().all(|r| r.iter().all(|&c| c == 9)));
        prop_assert_eq!(bottom.to_vec(), survivors);
    }
}
