//! Small closed-form fixtures with hand-checked statistic values.

extern crate ergm;
use ergm::test_utilities::*;
use ergm::*;

#[test]
fn test_complete_bipartite_exactly_one_neighbour() {
    // Four mode-A nodes all tied to both mode-B nodes, both flagged.
    let mut graph = complete_bipartite(4, 2, TwoPathCacheKind::Hash);
    let mut attributes = Attributes::new();
    attributes.binary.push(AttributeColumn::new(
        "flag".to_string(),
        vec![None, None, None, None, Some(true), Some(true)],
    ));
    graph.set_attributes(attributes).unwrap();
    let term = Term::BipartiteExactlyOneNeighbourA { attribute: 0 };
    assert_eq!(term.evaluate(&graph), 0.0);
    graph.remove_edge(0, 4);
    assert_eq!(term.evaluate(&graph), 1.0);
    // The change statistic agrees: re-adding the edge undoes the count.
    assert_eq!(term.change(&graph, 0, 4), -1.0);
}

#[test]
fn test_four_cycle_fixture() {
    let graph = cycle_graph(4, TwoPathCacheKind::Hash);
    assert_eq!(Term::FourCycles.evaluate(&graph), 1.0);
    assert_eq!(graph.two_path(0, 2), 2);
    assert_eq!(graph.two_path(1, 3), 2);
    // No adjacent pair shares a neighbour, so no alternating triangles.
    assert_eq!(Term::AltKTriangles { decay: 2.0 }.evaluate(&graph), 0.0);
    assert_eq!(brute_force_four_cycles(&graph), 1);
}

#[test]
fn test_directed_three_cycle_fixture() {
    let graph = directed_cycle(3, TwoPathCacheKind::Hash);
    assert_eq!(Term::Reciprocity.evaluate(&graph), 0.0);
    // Every node has in- and out-degree one: 3 * (1 - (-1/2)) = 4.5.
    let expected = 3.0 * (1.0 - (-0.5f64).powi(1));
    assert!((Term::AltInStars { decay: 2.0 }.evaluate(&graph) - expected).abs() < 1e-12);
    assert!((Term::AltOutStars { decay: 2.0 }.evaluate(&graph) - expected).abs() < 1e-12);
    assert!((expected - 4.5).abs() < 1e-12);
    // Each arc is closed into a cycle by exactly one mixed two-path.
    assert_eq!(
        Term::AltKTrianglesC { decay: 2.0 }.evaluate(&graph),
        3.0 * (1.0 - (-0.5f64).powi(1))
    );
    assert_eq!(Term::AltKTrianglesT { decay: 2.0 }.evaluate(&graph), 0.0);
}

#[test]
fn test_path_two_path_total() {
    let graph = path_graph(5, TwoPathCacheKind::Dense);
    assert_eq!(Term::TwoStars.evaluate(&graph), 3.0);
    assert_eq!(graph.two_path(0, 2), 1);
    assert_eq!(graph.two_path(1, 3), 1);
    assert_eq!(graph.two_path(2, 4), 1);
    assert_eq!(graph.two_path(0, 4), 0);
}

#[test]
fn test_complete_bipartite_four_cycles() {
    // K_{3,3}: choose two of each mode, 3 * 3 = 9 cycles.
    let graph = complete_bipartite(3, 3, TwoPathCacheKind::Hash);
    assert_eq!(Term::FourCycles.evaluate(&graph), 9.0);
    assert_eq!(brute_force_four_cycles(&graph), 9);
}
