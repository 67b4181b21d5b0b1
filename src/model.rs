//! The term registry: maps user-visible term names to statistics and
//! dispatches change and whole-graph evaluation over a sum type, one
//! variant per statistic.

use crate::changestats::{attribute, bipartite, directed, undirected};
use crate::graph::Graph;
use crate::types::*;
use lazy_static::lazy_static;
use regex::Regex;

/// Which parameter family a term belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermKind {
    Structural,
    BinaryAttribute,
    CategoricalAttribute,
    ContinuousAttribute,
    DyadicCovariate,
    AttributePair,
}

/// One model term. Alternating variants carry their decay, attribute
/// variants the index of the column they read.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    // Mode-independent.
    Edges,
    // Undirected one-mode.
    TwoStars,
    ThreeStars,
    Triangles,
    FourCycles,
    IsolatesUndirected,
    AltKStars { decay: f64 },
    AltTwoPaths { decay: f64 },
    AltKTriangles { decay: f64 },
    FourCyclesNodePower { decay: f64 },
    // Directed.
    Reciprocity,
    In2Stars,
    Out2Stars,
    TwoPaths,
    IsolatesDirected,
    Sink,
    Source,
    AltInStars { decay: f64 },
    AltOutStars { decay: f64 },
    AltKTrianglesT { decay: f64 },
    AltKTrianglesC { decay: f64 },
    AltTwoPathsT { decay: f64 },
    AltTwoPathsU { decay: f64 },
    AltTwoPathsD { decay: f64 },
    AltTwoPathsTD { decay: f64 },
    // Bipartite.
    BipartiteAltStarsA { decay: f64 },
    BipartiteAltStarsB { decay: f64 },
    BipartiteAltKCyclesA { decay: f64 },
    BipartiteAltKCyclesB { decay: f64 },
    BipartiteTwoStarsA,
    BipartiteTwoStarsB,
    BipartiteActivityA { attribute: usize },
    BipartiteActivityB { attribute: usize },
    BipartiteExactlyOneNeighbourA { attribute: usize },
    BipartiteExactlyOneNeighbourB { attribute: usize },
    BipartiteNodematchAlphaA { attribute: usize, exponent: f64 },
    BipartiteNodematchAlphaB { attribute: usize, exponent: f64 },
    BipartiteNodematchBetaA { attribute: usize, exponent: f64 },
    BipartiteNodematchBetaB { attribute: usize, exponent: f64 },
    // Attribute terms.
    Activity { attribute: usize },
    Interaction { attribute: usize },
    Sender { attribute: usize },
    Receiver { attribute: usize },
    Matching { attribute: usize },
    Mismatching { attribute: usize },
    MatchingReciprocity { attribute: usize },
    ContinuousSum { attribute: usize },
    ContinuousSender { attribute: usize },
    ContinuousReceiver { attribute: usize },
    Diff { attribute: usize },
    EuclideanDistance { coordinates: Vec<usize> },
}

impl Term {
    pub fn kind(&self) -> TermKind {
        use Term::*;
        match self {
            Edges | TwoStars | ThreeStars | Triangles | FourCycles | IsolatesUndirected
            | AltKStars { .. } | AltTwoPaths { .. } | AltKTriangles { .. }
            | FourCyclesNodePower { .. } | Reciprocity | In2Stars | Out2Stars | TwoPaths
            | IsolatesDirected | Sink | Source | AltInStars { .. } | AltOutStars { .. }
            | AltKTrianglesT { .. } | AltKTrianglesC { .. } | AltTwoPathsT { .. }
            | AltTwoPathsU { .. } | AltTwoPathsD { .. } | AltTwoPathsTD { .. }
            | BipartiteAltStarsA { .. } | BipartiteAltStarsB { .. }
            | BipartiteAltKCyclesA { .. } | BipartiteAltKCyclesB { .. } | BipartiteTwoStarsA
            | BipartiteTwoStarsB => TermKind::Structural,
            BipartiteActivityA { .. } | BipartiteActivityB { .. }
            | BipartiteExactlyOneNeighbourA { .. } | BipartiteExactlyOneNeighbourB { .. }
            | Activity { .. } | Interaction { .. } | Sender { .. } | Receiver { .. } => {
                TermKind::BinaryAttribute
            }
            Matching { .. } | Mismatching { .. } | MatchingReciprocity { .. } => {
                TermKind::CategoricalAttribute
            }
            ContinuousSum { .. } | ContinuousSender { .. } | ContinuousReceiver { .. }
            | Diff { .. } => TermKind::ContinuousAttribute,
            EuclideanDistance { .. } => TermKind::DyadicCovariate,
            BipartiteNodematchAlphaA { .. } | BipartiteNodematchAlphaB { .. }
            | BipartiteNodematchBetaA { .. } | BipartiteNodematchBetaB { .. } => {
                TermKind::AttributePair
            }
        }
    }

    /// Change of this statistic under insertion of the currently absent
    /// edge `(src, dst)`. For bipartite graphs the endpoints are
    /// normalised so mode A comes first.
    pub fn change(&self, graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
        use Term::*;
        let (src, dst) = if graph.is_bipartite() && !graph.is_mode_a(src) {
            (dst, src)
        } else {
            (src, dst)
        };
        match self {
            Edges => undirected::change_edges(graph, src, dst),
            TwoStars => undirected::change_two_stars(graph, src, dst),
            ThreeStars => undirected::change_three_stars(graph, src, dst),
            Triangles => undirected::change_triangles(graph, src, dst),
            FourCycles => undirected::change_four_cycles(graph, src, dst),
            IsolatesUndirected => undirected::change_isolates(graph, src, dst),
            AltKStars { decay } => undirected::change_alt_k_stars(graph, src, dst, *decay),
            AltTwoPaths { decay } => undirected::change_alt_two_paths(graph, src, dst, *decay),
            AltKTriangles { decay } => {
                undirected::change_alt_k_triangles(graph, src, dst, *decay)
            }
            FourCyclesNodePower { decay } => {
                undirected::change_four_cycles_node_power(graph, src, dst, *decay)
            }
            Reciprocity => directed::change_reciprocity(graph, src, dst),
            In2Stars => directed::change_in_two_stars(graph, src, dst),
            Out2Stars => directed::change_out_two_stars(graph, src, dst),
            TwoPaths => directed::change_two_paths(graph, src, dst),
            IsolatesDirected => directed::change_isolates(graph, src, dst),
            Sink => directed::change_sink(graph, src, dst),
            Source => directed::change_source(graph, src, dst),
            AltInStars { decay } => directed::change_alt_in_stars(graph, src, dst, *decay),
            AltOutStars { decay } => directed::change_alt_out_stars(graph, src, dst, *decay),
            AltKTrianglesT { decay } => {
                directed::change_alt_k_triangles_t(graph, src, dst, *decay)
            }
            AltKTrianglesC { decay } => {
                directed::change_alt_k_triangles_c(graph, src, dst, *decay)
            }
            AltTwoPathsT { decay } => directed::change_alt_two_paths_t(graph, src, dst, *decay),
            AltTwoPathsU { decay } => directed::change_alt_two_paths_u(graph, src, dst, *decay),
            AltTwoPathsD { decay } => directed::change_alt_two_paths_d(graph, src, dst, *decay),
            AltTwoPathsTD { decay } => {
                directed::change_alt_two_paths_td(graph, src, dst, *decay)
            }
            BipartiteAltStarsA { decay } => {
                bipartite::change_alt_stars_a(graph, src, dst, *decay)
            }
            BipartiteAltStarsB { decay } => {
                bipartite::change_alt_stars_b(graph, src, dst, *decay)
            }
            BipartiteAltKCyclesA { decay } => {
                bipartite::change_alt_k_cycles_a(graph, src, dst, *decay)
            }
            BipartiteAltKCyclesB { decay } => {
                bipartite::change_alt_k_cycles_b(graph, src, dst, *decay)
            }
            BipartiteTwoStarsA => bipartite::change_two_stars_a(graph, src, dst),
            BipartiteTwoStarsB => bipartite::change_two_stars_b(graph, src, dst),
            BipartiteActivityA { attribute } => {
                bipartite::change_activity_a(graph, src, dst, *attribute)
            }
            BipartiteActivityB { attribute } => {
                bipartite::change_activity_b(graph, src, dst, *attribute)
            }
            BipartiteExactlyOneNeighbourA { attribute } => {
                bipartite::change_exactly_one_neighbour_a(graph, src, dst, *attribute)
            }
            BipartiteExactlyOneNeighbourB { attribute } => {
                bipartite::change_exactly_one_neighbour_b(graph, src, dst, *attribute)
            }
            BipartiteNodematchAlphaA { attribute, exponent } => {
                bipartite::change_nodematch_alpha_a(graph, src, dst, *attribute, *exponent)
            }
            BipartiteNodematchAlphaB { attribute, exponent } => {
                bipartite::change_nodematch_alpha_b(graph, src, dst, *attribute, *exponent)
            }
            BipartiteNodematchBetaA { attribute, exponent } => {
                bipartite::change_nodematch_beta_a(graph, src, dst, *attribute, *exponent)
            }
            BipartiteNodematchBetaB { attribute, exponent } => {
                bipartite::change_nodematch_beta_b(graph, src, dst, *attribute, *exponent)
            }
            Activity { attribute } => attribute::change_activity(graph, src, dst, *attribute),
            Interaction { attribute } => {
                attribute::change_interaction(graph, src, dst, *attribute)
            }
            Sender { attribute } => attribute::change_sender(graph, src, dst, *attribute),
            Receiver { attribute } => attribute::change_receiver(graph, src, dst, *attribute),
            Matching { attribute } => attribute::change_matching(graph, src, dst, *attribute),
            Mismatching { attribute } => {
                attribute::change_mismatching(graph, src, dst, *attribute)
            }
            MatchingReciprocity { attribute } => {
                attribute::change_matching_reciprocity(graph, src, dst, *attribute)
            }
            ContinuousSum { attribute } => {
                attribute::change_continuous_sum(graph, src, dst, *attribute)
            }
            ContinuousSender { attribute } => {
                attribute::change_continuous_sender(graph, src, dst, *attribute)
            }
            ContinuousReceiver { attribute } => {
                attribute::change_continuous_receiver(graph, src, dst, *attribute)
            }
            Diff { attribute } => attribute::change_diff(graph, src, dst, *attribute),
            EuclideanDistance { coordinates } => {
                attribute::change_euclidean_distance(graph, src, dst, coordinates)
            }
        }
    }

    /// Direct whole-graph evaluation of the statistic.
    pub fn evaluate(&self, graph: &Graph) -> f64 {
        use Term::*;
        match self {
            Edges => undirected::stat_edges(graph),
            TwoStars => undirected::stat_two_stars(graph),
            ThreeStars => undirected::stat_three_stars(graph),
            Triangles => undirected::stat_triangles(graph),
            FourCycles => undirected::stat_four_cycles(graph),
            IsolatesUndirected => undirected::stat_isolates(graph),
            AltKStars { decay } => undirected::stat_alt_k_stars(graph, *decay),
            AltTwoPaths { decay } => undirected::stat_alt_two_paths(graph, *decay),
            AltKTriangles { decay } => undirected::stat_alt_k_triangles(graph, *decay),
            FourCyclesNodePower { decay } => {
                undirected::stat_four_cycles_node_power(graph, *decay)
            }
            Reciprocity => directed::stat_reciprocity(graph),
            In2Stars => directed::stat_in_two_stars(graph),
            Out2Stars => directed::stat_out_two_stars(graph),
            TwoPaths => directed::stat_two_paths(graph),
            IsolatesDirected => directed::stat_isolates(graph),
            Sink => directed::stat_sink(graph),
            Source => directed::stat_source(graph),
            AltInStars { decay } => directed::stat_alt_in_stars(graph, *decay),
            AltOutStars { decay } => directed::stat_alt_out_stars(graph, *decay),
            AltKTrianglesT { decay } => directed::stat_alt_k_triangles_t(graph, *decay),
            AltKTrianglesC { decay } => directed::stat_alt_k_triangles_c(graph, *decay),
            AltTwoPathsT { decay } => directed::stat_alt_two_paths_t(graph, *decay),
            AltTwoPathsU { decay } => directed::stat_alt_two_paths_u(graph, *decay),
            AltTwoPathsD { decay } => directed::stat_alt_two_paths_d(graph, *decay),
            AltTwoPathsTD { decay } => directed::stat_alt_two_paths_td(graph, *decay),
            BipartiteAltStarsA { decay } => bipartite::stat_alt_stars_a(graph, *decay),
            BipartiteAltStarsB { decay } => bipartite::stat_alt_stars_b(graph, *decay),
            BipartiteAltKCyclesA { decay } => bipartite::stat_alt_k_cycles_a(graph, *decay),
            BipartiteAltKCyclesB { decay } => bipartite::stat_alt_k_cycles_b(graph, *decay),
            BipartiteTwoStarsA => bipartite::stat_two_stars_a(graph),
            BipartiteTwoStarsB => bipartite::stat_two_stars_b(graph),
            BipartiteActivityA { attribute } => bipartite::stat_activity_a(graph, *attribute),
            BipartiteActivityB { attribute } => bipartite::stat_activity_b(graph, *attribute),
            BipartiteExactlyOneNeighbourA { attribute } => {
                bipartite::stat_exactly_one_neighbour_a(graph, *attribute)
            }
            BipartiteExactlyOneNeighbourB { attribute } => {
                bipartite::stat_exactly_one_neighbour_b(graph, *attribute)
            }
            BipartiteNodematchAlphaA { attribute, exponent } => {
                bipartite::stat_nodematch_alpha_a(graph, *attribute, *exponent)
            }
            BipartiteNodematchAlphaB { attribute, exponent } => {
                bipartite::stat_nodematch_alpha_b(graph, *attribute, *exponent)
            }
            BipartiteNodematchBetaA { attribute, exponent } => {
                bipartite::stat_nodematch_beta_a(graph, *attribute, *exponent)
            }
            BipartiteNodematchBetaB { attribute, exponent } => {
                bipartite::stat_nodematch_beta_b(graph, *attribute, *exponent)
            }
            Activity { attribute } => attribute::stat_activity(graph, *attribute),
            Interaction { attribute } => attribute::stat_interaction(graph, *attribute),
            Sender { attribute } => attribute::stat_sender(graph, *attribute),
            Receiver { attribute } => attribute::stat_receiver(graph, *attribute),
            Matching { attribute } => attribute::stat_matching(graph, *attribute),
            Mismatching { attribute } => attribute::stat_mismatching(graph, *attribute),
            MatchingReciprocity { attribute } => {
                attribute::stat_matching_reciprocity(graph, *attribute)
            }
            ContinuousSum { attribute } => attribute::stat_continuous_sum(graph, *attribute),
            ContinuousSender { attribute } => {
                attribute::stat_continuous_sender(graph, *attribute)
            }
            ContinuousReceiver { attribute } => {
                attribute::stat_continuous_receiver(graph, *attribute)
            }
            Diff { attribute } => attribute::stat_diff(graph, *attribute),
            EuclideanDistance { coordinates } => {
                attribute::stat_euclidean_distance(graph, coordinates)
            }
        }
    }

    /// Value of the statistic on the empty graph with the same nodes. The
    /// summation identity accumulates `evaluate - baseline`, which is
    /// non-zero only for the isolate counts.
    pub fn baseline(&self, graph: &Graph) -> f64 {
        match self {
            Term::IsolatesUndirected | Term::IsolatesDirected => {
                graph.get_nodes_number() as f64
            }
            _ => 0.0,
        }
    }

    /// Whether this term applies to the given graph mode.
    fn admissible(&self, directed: bool, is_bipartite: bool) -> bool {
        use Term::*;
        match self {
            Edges => true,
            TwoStars | ThreeStars | Triangles | IsolatesUndirected | AltKStars { .. }
            | AltTwoPaths { .. } | AltKTriangles { .. } => !directed && !is_bipartite,
            FourCycles | FourCyclesNodePower { .. } => !directed,
            Reciprocity | In2Stars | Out2Stars | TwoPaths | IsolatesDirected | Sink | Source
            | AltInStars { .. } | AltOutStars { .. } | AltKTrianglesT { .. }
            | AltKTrianglesC { .. } | AltTwoPathsT { .. } | AltTwoPathsU { .. }
            | AltTwoPathsD { .. } | AltTwoPathsTD { .. } | Sender { .. } | Receiver { .. }
            | MatchingReciprocity { .. } | ContinuousSender { .. }
            | ContinuousReceiver { .. } => directed,
            BipartiteAltStarsA { .. } | BipartiteAltStarsB { .. }
            | BipartiteAltKCyclesA { .. } | BipartiteAltKCyclesB { .. } | BipartiteTwoStarsA
            | BipartiteTwoStarsB | BipartiteActivityA { .. } | BipartiteActivityB { .. }
            | BipartiteExactlyOneNeighbourA { .. } | BipartiteExactlyOneNeighbourB { .. }
            | BipartiteNodematchAlphaA { .. } | BipartiteNodematchAlphaB { .. }
            | BipartiteNodematchBetaA { .. } | BipartiteNodematchBetaB { .. } => is_bipartite,
            Activity { .. } | ContinuousSum { .. } => !directed,
            Interaction { .. } | Diff { .. } | Matching { .. } | Mismatching { .. }
            | EuclideanDistance { .. } => true,
        }
    }
}

lazy_static! {
    static ref TERM_EXPRESSION: Regex =
        Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*(?:\(\s*([^)]*)\s*\))?\s*$").unwrap();
}

/// Parse one term expression such as `AltKTriangles(2.0)` or
/// `Activity(smoker)` against the attribute tables of the graph.
pub fn parse_term(expression: &str, graph: &Graph) -> Result<Term> {
    let captures = TERM_EXPRESSION
        .captures(expression)
        .ok_or_else(|| format!("Cannot parse the term expression {}.", expression))?;
    let name = captures.get(1).unwrap().as_str().to_lowercase();
    let arguments: Vec<String> = match captures.get(2) {
        Some(list) if !list.as_str().trim().is_empty() => list
            .as_str()
            .split(',')
            .map(|argument| argument.trim().to_string())
            .collect(),
        _ => Vec::new(),
    };

    let decay = |default: f64| -> Result<f64> {
        match arguments.len() {
            0 => Ok(default),
            1 => {
                let decay: f64 = arguments[0]
                    .parse()
                    .map_err(|e| format!("Invalid decay in {}: {}.", expression, e))?;
                if decay <= 1.0 {
                    return Err(format!(
                        "The decay of {} must exceed 1, got {}.",
                        expression, decay
                    ));
                }
                Ok(decay)
            }
            _ => Err(format!("{} takes at most one decay argument.", expression)),
        }
    };
    let binary = |position: usize| -> Result<usize> {
        let name = arguments
            .get(position)
            .ok_or_else(|| format!("{} needs a binary attribute name.", expression))?;
        graph
            .attributes
            .binary_index(name)
            .ok_or_else(|| format!("Unknown binary attribute {} in {}.", name, expression))
    };
    let categorical = |position: usize| -> Result<usize> {
        let name = arguments
            .get(position)
            .ok_or_else(|| format!("{} needs a categorical attribute name.", expression))?;
        graph
            .attributes
            .categorical_index(name)
            .ok_or_else(|| format!("Unknown categorical attribute {} in {}.", name, expression))
    };
    let continuous = |position: usize| -> Result<usize> {
        let name = arguments
            .get(position)
            .ok_or_else(|| format!("{} needs a continuous attribute name.", expression))?;
        graph
            .attributes
            .continuous_index(name)
            .ok_or_else(|| format!("Unknown continuous attribute {} in {}.", name, expression))
    };
    let exponent = |position: usize| -> Result<f64> {
        match arguments.get(position) {
            None => Ok(0.5),
            Some(argument) => {
                let exponent: f64 = argument
                    .parse()
                    .map_err(|e| format!("Invalid exponent in {}: {}.", expression, e))?;
                if exponent <= 0.0 || exponent > 1.0 {
                    return Err(format!(
                        "The exponent of {} must lie in (0, 1], got {}.",
                        expression, exponent
                    ));
                }
                Ok(exponent)
            }
        }
    };

    let term = match name.as_str() {
        "edges" | "edge" | "arc" | "arcs" => Term::Edges,
        "twostars" | "star2" => Term::TwoStars,
        "threestars" | "star3" => Term::ThreeStars,
        "triangles" | "triangle" => Term::Triangles,
        "fourcycles" | "bipartitefourcycles" => Term::FourCycles,
        "isolates" => {
            if graph.is_directed() {
                Term::IsolatesDirected
            } else {
                Term::IsolatesUndirected
            }
        }
        "altkstars" | "altstars" => Term::AltKStars { decay: decay(2.0)? },
        "alttwopaths" | "altktwopaths" => Term::AltTwoPaths { decay: decay(2.0)? },
        "altktriangles" => Term::AltKTriangles { decay: decay(2.0)? },
        "fourcyclesnodepower" | "bipartitefourcyclesnodepower" => {
            Term::FourCyclesNodePower { decay: decay(2.0)? }
        }
        "reciprocity" => Term::Reciprocity,
        "in2stars" => Term::In2Stars,
        "out2stars" => Term::Out2Stars,
        "twopaths" | "twopath" => Term::TwoPaths,
        "sink" => Term::Sink,
        "source" => Term::Source,
        "altinstars" => Term::AltInStars { decay: decay(2.0)? },
        "altoutstars" => Term::AltOutStars { decay: decay(2.0)? },
        "altktrianglest" => Term::AltKTrianglesT { decay: decay(2.0)? },
        "altktrianglesc" => Term::AltKTrianglesC { decay: decay(2.0)? },
        "alttwopathst" => Term::AltTwoPathsT { decay: decay(2.0)? },
        "alttwopathsu" => Term::AltTwoPathsU { decay: decay(2.0)? },
        "alttwopathsd" => Term::AltTwoPathsD { decay: decay(2.0)? },
        "alttwopathstd" => Term::AltTwoPathsTD { decay: decay(2.0)? },
        "bipartitealtstarsa" => Term::BipartiteAltStarsA { decay: decay(2.0)? },
        "bipartitealtstarsb" => Term::BipartiteAltStarsB { decay: decay(2.0)? },
        "bipartitealtkcyclesa" => Term::BipartiteAltKCyclesA { decay: decay(2.0)? },
        "bipartitealtkcyclesb" => Term::BipartiteAltKCyclesB { decay: decay(2.0)? },
        "bipartitetwostarsa" => Term::BipartiteTwoStarsA,
        "bipartitetwostarsb" => Term::BipartiteTwoStarsB,
        "bipartiteactivitya" => Term::BipartiteActivityA { attribute: binary(0)? },
        "bipartiteactivityb" => Term::BipartiteActivityB { attribute: binary(0)? },
        "bipartiteexactlyoneneighboura" => {
            Term::BipartiteExactlyOneNeighbourA { attribute: binary(0)? }
        }
        "bipartiteexactlyoneneighbourb" => {
            Term::BipartiteExactlyOneNeighbourB { attribute: binary(0)? }
        }
        "bipartitenodematchalphaa" => Term::BipartiteNodematchAlphaA {
            attribute: categorical(0)?,
            exponent: exponent(1)?,
        },
        "bipartitenodematchalphab" => Term::BipartiteNodematchAlphaB {
            attribute: categorical(0)?,
            exponent: exponent(1)?,
        },
        "bipartitenodematchbetaa" => Term::BipartiteNodematchBetaA {
            attribute: categorical(0)?,
            exponent: exponent(1)?,
        },
        "bipartitenodematchbetab" => Term::BipartiteNodematchBetaB {
            attribute: categorical(0)?,
            exponent: exponent(1)?,
        },
        "activity" => Term::Activity { attribute: binary(0)? },
        "interaction" => Term::Interaction { attribute: binary(0)? },
        "sender" => Term::Sender { attribute: binary(0)? },
        "receiver" => Term::Receiver { attribute: binary(0)? },
        "matching" => Term::Matching { attribute: categorical(0)? },
        "mismatching" => Term::Mismatching { attribute: categorical(0)? },
        "matchingreciprocity" => Term::MatchingReciprocity { attribute: categorical(0)? },
        "continuoussum" | "sum" => Term::ContinuousSum { attribute: continuous(0)? },
        "continuoussender" => Term::ContinuousSender { attribute: continuous(0)? },
        "continuousreceiver" => Term::ContinuousReceiver { attribute: continuous(0)? },
        "diff" => Term::Diff { attribute: continuous(0)? },
        "euclideandistance" => {
            if arguments.len() < 2 || arguments.len() > 3 {
                return Err(format!(
                    "{} takes two or three continuous coordinate attributes.",
                    expression
                ));
            }
            Term::EuclideanDistance {
                coordinates: (0..arguments.len())
                    .map(continuous)
                    .collect::<Result<Vec<usize>>>()?,
            }
        }
        _ => return Err(format!("Unknown term name {}.", expression.trim())),
    };
    if !term.admissible(graph.is_directed(), graph.is_bipartite()) {
        return Err(format!(
            "The term {} does not apply to this graph ({}, {}).",
            expression.trim(),
            if graph.is_directed() {
                "directed"
            } else {
                "undirected"
            },
            if graph.is_bipartite() {
                "bipartite"
            } else {
                "one-mode"
            }
        ));
    }
    Ok(term)
}

/// An ordered model: terms plus their user-visible labels.
#[derive(Clone, Debug)]
pub struct Model {
    pub terms: Vec<Term>,
    pub labels: Vec<String>,
}

impl Model {
    pub fn new(terms: Vec<Term>, labels: Vec<String>) -> Model {
        debug_assert_eq!(terms.len(), labels.len());
        Model { terms, labels }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Fill `changes` with the change vector of inserting `(src, dst)`.
    #[inline]
    pub fn change_vector(&self, graph: &Graph, src: NodeT, dst: NodeT, changes: &mut [f64]) {
        debug_assert_eq!(changes.len(), self.terms.len());
        for (change, term) in changes.iter_mut().zip(self.terms.iter()) {
            *change = term.change(graph, src, dst);
        }
    }

    /// Direct evaluation of every statistic.
    pub fn evaluate(&self, graph: &Graph) -> Vec<f64> {
        self.terms.iter().map(|term| term.evaluate(graph)).collect()
    }

    /// Per-term empty-graph values.
    pub fn baseline(&self, graph: &Graph) -> Vec<f64> {
        self.terms.iter().map(|term| term.baseline(graph)).collect()
    }
}
