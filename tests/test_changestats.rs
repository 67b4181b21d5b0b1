//! Delta consistency, the summation identity and representation
//! invariance for every statistic in the registry.

extern crate ergm;
use ergm::test_utilities::*;
use ergm::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const EPS: f64 = 1e-9;
const CACHES: [TwoPathCacheKind; 3] = [
    TwoPathCacheKind::None,
    TwoPathCacheKind::Dense,
    TwoPathCacheKind::Hash,
];

fn undirected_terms() -> Vec<Term> {
    vec![
        Term::Edges,
        Term::TwoStars,
        Term::ThreeStars,
        Term::Triangles,
        Term::FourCycles,
        Term::IsolatesUndirected,
        Term::AltKStars { decay: 2.0 },
        Term::AltKStars { decay: 3.5 },
        Term::AltTwoPaths { decay: 2.0 },
        Term::AltKTriangles { decay: 2.0 },
        Term::AltKTriangles { decay: 1.5 },
        Term::FourCyclesNodePower { decay: 2.0 },
    ]
}

fn directed_terms() -> Vec<Term> {
    vec![
        Term::Edges,
        Term::Reciprocity,
        Term::In2Stars,
        Term::Out2Stars,
        Term::TwoPaths,
        Term::IsolatesDirected,
        Term::Sink,
        Term::Source,
        Term::AltInStars { decay: 2.0 },
        Term::AltOutStars { decay: 2.0 },
        Term::AltKTrianglesT { decay: 2.0 },
        Term::AltKTrianglesC { decay: 2.0 },
        Term::AltTwoPathsT { decay: 2.0 },
        Term::AltTwoPathsU { decay: 2.0 },
        Term::AltTwoPathsD { decay: 2.0 },
        Term::AltTwoPathsTD { decay: 2.0 },
    ]
}

fn bipartite_terms() -> Vec<Term> {
    vec![
        Term::Edges,
        Term::FourCycles,
        Term::BipartiteAltStarsA { decay: 2.0 },
        Term::BipartiteAltStarsB { decay: 2.0 },
        Term::BipartiteAltKCyclesA { decay: 2.0 },
        Term::BipartiteAltKCyclesB { decay: 2.0 },
        Term::BipartiteTwoStarsA,
        Term::BipartiteTwoStarsB,
        Term::FourCyclesNodePower { decay: 2.0 },
    ]
}

/// For a sample of non-edges, the change statistic must equal the direct
/// statistic difference across the insertion.
fn assert_delta_consistency(graph: &Graph, terms: &[Term], rng: &mut SmallRng) {
    for _ in 0..60 {
        let (src, dst) = random_dyad(graph, rng);
        if graph.has_edge(src, dst) {
            continue;
        }
        let before: Vec<f64> = terms.iter().map(|term| term.evaluate(graph)).collect();
        let changes: Vec<f64> = terms
            .iter()
            .map(|term| term.change(graph, src, dst))
            .collect();
        let mut toggled = graph.clone();
        toggled.insert_edge(src, dst);
        for ((term, change), before) in terms.iter().zip(changes.iter()).zip(before.iter()) {
            let after = term.evaluate(&toggled);
            assert!(
                (change - (after - before)).abs() < EPS,
                "{:?}: change {} but evaluation moved {} -> {} on toggle ({}, {})",
                term,
                change,
                before,
                after,
                src,
                dst
            );
        }
    }
}

/// Inserting the whole edge list from empty must reproduce the direct
/// statistics net of the empty-graph values.
fn assert_summation_identity(graph: &Graph, terms: &[Term]) {
    let mut empty = graph.clone();
    let edges: Vec<(NodeT, NodeT)> = graph.iter_edges().collect();
    for &(src, dst) in edges.iter() {
        empty.remove_edge(src, dst);
    }
    let mut summed = vec![0.0; terms.len()];
    for &(src, dst) in edges.iter() {
        for (accumulated, term) in summed.iter_mut().zip(terms.iter()) {
            *accumulated += term.change(&empty, src, dst);
        }
        empty.insert_edge(src, dst);
    }
    for ((term, summed), original) in terms
        .iter()
        .zip(summed.iter())
        .zip(terms.iter().map(|term| term.evaluate(graph)))
    {
        let expected = original - term.baseline(graph);
        assert!(
            (summed - expected).abs() < 1e-6 * (1.0 + expected.abs()),
            "{:?}: summed changes {} but direct evaluation {}",
            term,
            summed,
            expected
        );
    }
}

#[test]
fn test_undirected_delta_consistency() {
    let mut rng = SmallRng::seed_from_u64(11);
    for &cache in CACHES.iter() {
        let graph = random_graph(24, 60, false, None, cache, 5);
        assert_delta_consistency(&graph, &undirected_terms(), &mut rng);
        assert_summation_identity(&graph, &undirected_terms());
    }
}

#[test]
fn test_directed_delta_consistency() {
    let mut rng = SmallRng::seed_from_u64(13);
    for &cache in CACHES.iter() {
        let graph = random_graph(20, 70, true, None, cache, 17);
        assert_delta_consistency(&graph, &directed_terms(), &mut rng);
        assert_summation_identity(&graph, &directed_terms());
    }
}

#[test]
fn test_bipartite_delta_consistency() {
    let mut rng = SmallRng::seed_from_u64(19);
    for &cache in CACHES.iter() {
        let graph = random_graph(22, 50, false, Some(12), cache, 23);
        assert_delta_consistency(&graph, &bipartite_terms(), &mut rng);
        assert_summation_identity(&graph, &bipartite_terms());
    }
}

fn attach_attributes(graph: &mut Graph, seed: u64) {
    let n = graph.get_nodes_number() as usize;
    let mut rng = SmallRng::seed_from_u64(seed);
    let binary = (0..n)
        .map(|_| match rng.gen_range(0, 4) {
            0 => None,
            odds => Some(odds % 2 == 1),
        })
        .collect();
    let categorical = (0..n)
        .map(|_| match rng.gen_range(0, 5) {
            0 => None,
            category => Some(category as CategoryT % 3),
        })
        .collect();
    let x = (0..n)
        .map(|_| {
            if rng.gen_range(0, 6) == 0 {
                None
            } else {
                Some(rng.gen::<f64>() * 10.0 - 5.0)
            }
        })
        .collect();
    let y = (0..n).map(|_| Some(rng.gen::<f64>())).collect();
    let mut attributes = Attributes::new();
    attributes
        .binary
        .push(AttributeColumn::new("flag".to_string(), binary));
    attributes
        .categorical
        .push(AttributeColumn::new("group".to_string(), categorical));
    attributes
        .continuous
        .push(AttributeColumn::new("x".to_string(), x));
    attributes
        .continuous
        .push(AttributeColumn::new("y".to_string(), y));
    graph.set_attributes(attributes).unwrap();
}

#[test]
fn test_attribute_terms_undirected() {
    let mut rng = SmallRng::seed_from_u64(29);
    let terms = vec![
        Term::Activity { attribute: 0 },
        Term::Interaction { attribute: 0 },
        Term::Matching { attribute: 0 },
        Term::Mismatching { attribute: 0 },
        Term::ContinuousSum { attribute: 0 },
        Term::Diff { attribute: 0 },
        Term::EuclideanDistance { coordinates: vec![0, 1] },
    ];
    for &cache in CACHES.iter() {
        let mut graph = random_graph(18, 40, false, None, cache, 31);
        attach_attributes(&mut graph, 37);
        assert_delta_consistency(&graph, &terms, &mut rng);
        assert_summation_identity(&graph, &terms);
    }
}

#[test]
fn test_attribute_terms_directed() {
    let mut rng = SmallRng::seed_from_u64(41);
    let terms = vec![
        Term::Sender { attribute: 0 },
        Term::Receiver { attribute: 0 },
        Term::Interaction { attribute: 0 },
        Term::Matching { attribute: 0 },
        Term::MatchingReciprocity { attribute: 0 },
        Term::ContinuousSender { attribute: 0 },
        Term::ContinuousReceiver { attribute: 0 },
        Term::Diff { attribute: 0 },
    ];
    for &cache in CACHES.iter() {
        let mut graph = random_graph(16, 60, true, None, cache, 43);
        attach_attributes(&mut graph, 47);
        assert_delta_consistency(&graph, &terms, &mut rng);
        assert_summation_identity(&graph, &terms);
    }
}

#[test]
fn test_bipartite_attribute_terms() {
    let mut rng = SmallRng::seed_from_u64(53);
    let terms = vec![
        Term::BipartiteActivityA { attribute: 0 },
        Term::BipartiteActivityB { attribute: 0 },
        Term::BipartiteExactlyOneNeighbourA { attribute: 0 },
        Term::BipartiteExactlyOneNeighbourB { attribute: 0 },
        Term::BipartiteNodematchAlphaA { attribute: 0, exponent: 0.5 },
        Term::BipartiteNodematchAlphaB { attribute: 0, exponent: 0.5 },
        Term::BipartiteNodematchBetaA { attribute: 0, exponent: 0.5 },
        Term::BipartiteNodematchBetaB { attribute: 0, exponent: 1.0 },
        Term::Interaction { attribute: 0 },
    ];
    for &cache in CACHES.iter() {
        let mut graph = random_graph(20, 45, false, Some(11), cache, 59);
        attach_attributes(&mut graph, 61);
        assert_delta_consistency(&graph, &terms, &mut rng);
        assert_summation_identity(&graph, &terms);
    }
}

#[test]
fn test_change_values_identical_across_representations() {
    let terms = undirected_terms();
    let graphs: Vec<Graph> = CACHES
        .iter()
        .map(|&cache| random_graph(24, 70, false, None, cache, 67))
        .collect();
    let mut rng = SmallRng::seed_from_u64(71);
    for _ in 0..80 {
        let (src, dst) = random_dyad(&graphs[0], &mut rng);
        if graphs[0].has_edge(src, dst) {
            continue;
        }
        for term in terms.iter() {
            let reference = term.change(&graphs[0], src, dst);
            for graph in graphs.iter().skip(1) {
                assert!(
                    (term.change(graph, src, dst) - reference).abs() < 1e-6,
                    "{:?} differs across cache representations",
                    term
                );
            }
        }
    }
}

#[test]
fn test_closed_forms_against_brute_force() {
    let graph = random_graph(18, 45, false, None, TwoPathCacheKind::Hash, 73);
    assert_eq!(
        Term::Triangles.evaluate(&graph),
        brute_force_triangles(&graph) as f64
    );
    assert_eq!(
        Term::FourCycles.evaluate(&graph),
        brute_force_four_cycles(&graph) as f64
    );
    // The alternating star statistic straight from the degree sequence.
    let lambda: f64 = 2.0;
    let direct: f64 = (0..graph.get_nodes_number())
        .map(|node| 1.0 - (-1.0 / lambda).powi(graph.get_node_degree(node) as i32))
        .sum();
    assert!((Term::AltKStars { decay: lambda }.evaluate(&graph) - direct).abs() < EPS);
}

#[test]
fn test_na_suppresses_contribution() {
    let mut graph = Graph::new(4, false, None, TwoPathCacheKind::Hash).unwrap();
    let mut attributes = Attributes::new();
    attributes.binary.push(AttributeColumn::new(
        "flag".to_string(),
        vec![Some(true), None, Some(true), Some(false)],
    ));
    attributes.continuous.push(AttributeColumn::new(
        "x".to_string(),
        vec![Some(1.0), None, Some(3.0), Some(4.0)],
    ));
    graph.set_attributes(attributes).unwrap();
    // Node 1 is NA on both columns: any pair through it contributes zero.
    assert_eq!(Term::Activity { attribute: 0 }.change(&graph, 0, 1), 0.0);
    assert_eq!(Term::Diff { attribute: 0 }.change(&graph, 0, 1), 0.0);
    assert_eq!(Term::Activity { attribute: 0 }.change(&graph, 0, 2), 2.0);
    assert_eq!(Term::Diff { attribute: 0 }.change(&graph, 0, 2), 2.0);
}
