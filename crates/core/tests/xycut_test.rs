//! Tests for the split scorer and the recursive partitioner.

use std::collections::BTreeSet;

use gutterline_core::error::LayoutError;
use gutterline_core::geometry::{Axis, BBox, Interval};
use gutterline_core::model::{Component, PageDim};
use gutterline_core::params::XyCutParams;
use gutterline_core::partition::{NodeId, RegionTree, best_split, split_on_gutter, xy_cut};

const PAGE: PageDim = PageDim::new(25.0, 25.0);

fn comp(id: &str, bbox: [f64; 4]) -> Component {
    Component::new(id, "text", BBox::from(bbox))
}

fn four_blocks() -> Vec<Component> {
    vec![
        comp("comp1", [1.0, 5.0, 12.0, 11.0]),
        comp("comp2", [1.0, 13.0, 7.0, 18.0]),
        comp("comp3", [9.0, 13.0, 16.0, 23.0]),
        comp("comp4", [19.0, 13.0, 20.0, 23.0]),
    ]
}

fn params(min_gap: f64) -> XyCutParams {
    XyCutParams::new(min_gap, 0.3).unwrap()
}

fn leaf_ids(tree: &RegionTree) -> Vec<Vec<String>> {
    tree.leaves()
        .into_iter()
        .map(|id| {
            tree.node(id)
                .component_ids
                .iter()
                .map(|c| c.to_string())
                .collect()
        })
        .collect()
}

fn assert_bbox_near(actual: BBox, expected: [f64; 4]) {
    let got: [f64; 4] = actual.into();
    for (a, e) in got.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{got:?} != {expected:?}");
    }
}

/// The gutters are given in 1/25ths of a unit region.
fn scaled(gutters: &[[f64; 2]]) -> Vec<Interval> {
    gutters
        .iter()
        .map(|[a, b]| Interval::new(a / 25.0, b / 25.0))
        .collect()
}

// ============================================================================
// best_split
// ============================================================================

const UNIT: BBox = BBox::new(0.0, 0.0, 1.0, 1.0);

#[test]
fn test_best_split_picks_largest_vertical_gutter() {
    let v = scaled(&[[2.0, 3.0], [21.0, 24.0]]);
    let h = scaled(&[[11.0, 13.0]]);
    let choice = best_split(UNIT, &v, &h, 0.0).unwrap();
    assert_eq!((choice.axis, choice.index), (Axis::X, 1));
}

#[test]
fn test_best_split_picks_largest_horizontal_gutter() {
    let v = scaled(&[[11.0, 13.0]]);
    let h = scaled(&[[21.0, 24.0], [2.0, 3.0]]);
    let choice = best_split(UNIT, &v, &h, 0.0).unwrap();
    assert_eq!((choice.axis, choice.index), (Axis::Y, 0));
}

#[test]
fn test_best_split_full_centrality_prefers_central_horizontal() {
    let v = scaled(&[[2.0, 3.0], [21.0, 24.0]]);
    let h = scaled(&[[11.0, 13.0]]);
    let choice = best_split(UNIT, &v, &h, 1.0).unwrap();
    assert_eq!((choice.axis, choice.index), (Axis::Y, 0));
}

#[test]
fn test_best_split_full_centrality_prefers_central_vertical() {
    let v = scaled(&[[11.0, 13.0]]);
    let h = scaled(&[[21.0, 24.0], [2.0, 3.0]]);
    let choice = best_split(UNIT, &v, &h, 1.0).unwrap();
    assert_eq!((choice.axis, choice.index), (Axis::X, 0));
}

#[test]
fn test_best_split_tie_goes_to_first_candidate() {
    // Mirror-image gutters on both axes score identically.
    let v = scaled(&[[5.0, 7.0], [18.0, 20.0]]);
    let h = scaled(&[[5.0, 7.0]]);
    let choice = best_split(UNIT, &v, &h, 0.3).unwrap();
    assert_eq!((choice.axis, choice.index), (Axis::X, 0));

    let choice = best_split(UNIT, &[], &scaled(&[[5.0, 7.0], [18.0, 20.0]]), 0.3).unwrap();
    assert_eq!((choice.axis, choice.index), (Axis::Y, 0));
}

#[test]
fn test_best_split_without_candidates() {
    assert_eq!(
        best_split(UNIT, &[], &[], 0.3),
        Err(LayoutError::NoCandidateGutters)
    );
}

#[test]
fn test_best_split_rejects_bad_weight() {
    let v = scaled(&[[11.0, 13.0]]);
    assert!(best_split(UNIT, &v, &[], -0.1).is_err());
}

// ============================================================================
// split_on_gutter
// ============================================================================

#[test]
fn test_split_on_vertical_gutter() {
    let [left, right] = split_on_gutter(
        Axis::X,
        Interval::new(16.0, 18.0),
        BBox::new(0.0, 0.0, 25.0, 25.0),
        &four_blocks(),
    );
    assert_eq!(left.region, BBox::new(0.0, 0.0, 17.0, 25.0));
    assert_eq!(right.region, BBox::new(17.0, 0.0, 25.0, 25.0));
    assert_eq!(left.component_ids, ["comp1", "comp2", "comp3"]);
    assert_eq!(right.component_ids, ["comp4"]);
}

#[test]
fn test_split_on_horizontal_gutter() {
    let [top, bottom] = split_on_gutter(
        Axis::Y,
        Interval::new(11.0, 13.0),
        BBox::new(0.0, 0.0, 25.0, 25.0),
        &four_blocks(),
    );
    assert_eq!(top.region, BBox::new(0.0, 0.0, 25.0, 12.0));
    assert_eq!(bottom.region, BBox::new(0.0, 12.0, 25.0, 25.0));
    assert_eq!(top.component_ids, ["comp1"]);
    assert_eq!(bottom.component_ids, ["comp2", "comp3", "comp4"]);
}

// ============================================================================
// xy_cut scenarios
// ============================================================================

#[test]
fn test_four_blocks_min_gap_one() {
    let tree = xy_cut(&four_blocks(), PAGE, &params(1.0)).unwrap();
    insta::assert_debug_snapshot!(leaf_ids(&tree), @r#"
    [
        [
            "comp1",
        ],
        [
            "comp2",
        ],
        [
            "comp3",
        ],
        [
            "comp4",
        ],
    ]
    "#);

    let root = tree.root();
    assert_bbox_near(root.region, [1.0, 5.0, 20.0, 23.0]);
    let split = root.split.unwrap();
    assert_eq!(split.axis, Axis::X);
    assert!((split.cut - 17.5).abs() < 1e-9);

    let [left, right] = tree.children(NodeId::ROOT).unwrap();
    assert_eq!(left.component_ids, ["comp1", "comp2", "comp3"]);
    assert_eq!(right.component_ids, ["comp4"]);
    assert_bbox_near(left.region, [1.0, 5.0, 17.5, 23.0]);
    assert_bbox_near(right.region, [17.5, 5.0, 20.0, 23.0]);

    let left_split = left.split.unwrap();
    assert_eq!(left_split.axis, Axis::Y);
    assert!((left_split.cut - 12.0).abs() < 1e-9);
    let [top, bottom] = left_split.children.map(|id| tree.node(id));
    assert_eq!(top.component_ids, ["comp1"]);
    assert_eq!(bottom.component_ids, ["comp2", "comp3"]);
    assert!(tree.children(left_split.children[0]).is_none());

    let bottom_split = bottom.split.unwrap();
    assert_eq!(bottom_split.axis, Axis::X);
    assert!((bottom_split.cut - 8.0).abs() < 1e-9);
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.depth(), 3);
}

#[test]
fn test_four_blocks_min_gap_large() {
    let tree = xy_cut(&four_blocks(), PAGE, &params(2.4)).unwrap();
    assert_eq!(
        leaf_ids(&tree),
        vec![vec!["comp1", "comp2", "comp3"], vec!["comp4"]]
    );
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root().split.unwrap().axis, Axis::X);
}

#[test]
fn test_no_cut_below_min_gap() {
    let comps = vec![
        comp("a", [0.0, 0.0, 10.0, 10.0]),
        comp("b", [10.5, 0.0, 20.0, 10.0]),
    ];
    let tree = xy_cut(&comps, PAGE, &params(1.0)).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().component_ids, ["a", "b"]);
}

// ============================================================================
// Invariants
// ============================================================================

fn scattered() -> Vec<Component> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 10_000) as f64 / 10_000.0
    };
    (0..40)
        .map(|i| {
            let x = next() * 550.0;
            let y = next() * 780.0;
            let w = 5.0 + next() * 40.0;
            let h = 4.0 + next() * 12.0;
            comp(&format!("b{i}"), [x, y, x + w, y + h])
        })
        .collect()
}

#[test]
fn test_leaves_partition_the_input() {
    let comps = scattered();
    let tree = xy_cut(&comps, PageDim::new(612.0, 792.0), &params(2.0)).unwrap();

    let mut seen = BTreeSet::new();
    for ids in leaf_ids(&tree) {
        for id in ids {
            assert!(seen.insert(id.clone()), "{id} is in two leaves");
        }
    }
    let all: BTreeSet<String> = comps.iter().map(|c| c.id.to_string()).collect();
    assert_eq!(seen, all);
}

#[test]
fn test_children_partition_their_parent() {
    let tree = xy_cut(&scattered(), PageDim::new(612.0, 792.0), &params(2.0)).unwrap();
    for (_, node) in tree.iter() {
        let Some(split) = node.split else { continue };
        let [a, b] = split.children.map(|id| tree.node(id));
        let mut joined: Vec<_> = a.component_ids.iter().chain(&b.component_ids).collect();
        joined.sort();
        let mut parent: Vec<_> = node.component_ids.iter().collect();
        parent.sort();
        assert_eq!(joined, parent);
        assert!(node.region.contains(&a.region));
        assert!(node.region.contains(&b.region));
    }
}

#[test]
fn test_larger_min_gap_never_adds_leaves() {
    let comps = four_blocks();
    let counts: Vec<usize> = [0.5, 1.0, 2.0, 2.4, 3.0, 3.5]
        .into_iter()
        .map(|gap| xy_cut(&comps, PAGE, &params(gap)).unwrap().leaves().len())
        .collect();
    assert_eq!(counts, vec![4, 4, 4, 2, 2, 1]);
    assert!(counts.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_partition_is_deterministic() {
    let comps = scattered();
    let page = PageDim::new(612.0, 792.0);
    let first = xy_cut(&comps, page, &params(2.0)).unwrap();
    for _ in 0..5 {
        assert_eq!(xy_cut(&comps, page, &params(2.0)).unwrap(), first);
    }
}

#[test]
fn test_duplicate_ids_rejected() {
    let comps = vec![
        comp("a", [0.0, 0.0, 5.0, 5.0]),
        comp("a", [10.0, 0.0, 15.0, 5.0]),
    ];
    assert_eq!(
        xy_cut(&comps, PAGE, &params(1.0)),
        Err(LayoutError::DuplicateId("a".into()))
    );
}

#[test]
fn test_invalid_page_rejected() {
    assert!(matches!(
        xy_cut(&four_blocks(), PageDim::new(0.0, 25.0), &params(1.0)),
        Err(LayoutError::InvalidPage { .. })
    ));
}

#[test]
fn test_tree_serializes_as_flat_nodes() {
    let tree = xy_cut(&four_blocks(), PAGE, &params(2.4)).unwrap();
    let value = serde_json::to_value(&tree).unwrap();
    let nodes = value["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["split"]["axis"], "X");
    assert_eq!(nodes[0]["split"]["children"], serde_json::json!([1, 2]));
    assert!(nodes[1]["split"].is_null());
}
