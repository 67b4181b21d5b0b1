//! Configuration parsing and model resolution.

extern crate ergm;
use ergm::test_utilities::*;
use ergm::*;

fn parse(text: &str) -> Result<Config> {
    Config::parse(text, "test.cfg")
}

#[test]
fn test_full_configuration() {
    let config = parse(
        "# estimation settings\n\
         isDirected = true\n\
         numNodes = 50\n\
         useTNTsampler = TRUE\n\
         samplerSteps = 2000\n\
         Ssteps = 10\n\
         EEsteps = 20 # trailing comment\n\
         EEinnerSteps = 2\n\
         ACA_S = 0.05\n\
         compC = 0.02\n\
         outputFilePrefix = run\n\
         twoPathCache = dense\n\
         structParams = {Arc, Reciprocity, AltInStars(2.0),\n\
                         AltOutStars(2.0)}\n",
    )
    .unwrap();
    assert!(config.is_directed);
    assert_eq!(config.num_nodes, Some(50));
    assert!(config.use_tnt_sampler);
    assert_eq!(config.sampler_steps, 2000);
    assert_eq!(config.s_steps, 10);
    assert_eq!(config.ee_steps, 20);
    assert_eq!(config.ee_inner_steps, 2);
    assert!((config.aca_s - 0.05).abs() < 1e-12);
    assert!((config.comp_c - 0.02).abs() < 1e-12);
    assert_eq!(config.output_file_prefix, "run");
    assert_eq!(config.two_path_cache, TwoPathCacheKind::Dense);
    assert_eq!(config.struct_params.len(), 4);
    assert_eq!(config.struct_params[2].expression, "AltInStars(2.0)");
}

#[test]
fn test_defaults() {
    let config = parse("numNodes = 10\nstructParams = {Edges}\n").unwrap();
    assert!(!config.is_directed);
    assert!(!config.use_tnt_sampler);
    assert!(config.use_borisenko_update);
    assert_eq!(config.sampler_steps, 1000);
    assert!((config.aca_ee - 1e-9).abs() < 1e-21);
    assert!((config.ifd_k - 0.1).abs() < 1e-12);
    assert_eq!(config.two_path_cache, TwoPathCacheKind::Hash);
}

#[test]
fn test_unknown_and_duplicate_keys() {
    let message = parse("numNodes = 10\nnoSuchKey = 1\nstructParams = {Edges}\n").unwrap_err();
    assert!(message.contains("unknown key nosuchkey"), "{}", message);
    let message = parse("numNodes = 10\nnumNodes = 20\nstructParams = {Edges}\n").unwrap_err();
    assert!(message.contains("duplicate key"), "{}", message);
}

#[test]
fn test_sampler_exclusivity_and_modes() {
    let message = parse(
        "numNodes = 10\nuseTNTsampler = true\nuseIFDsampler = true\nstructParams = {Edges}\n",
    )
    .unwrap_err();
    assert!(message.contains("mutually exclusive"), "{}", message);
    let message = parse(
        "numNodes = 10\nisDirected = true\nisBipartite = true\nstructParams = {Edges}\n",
    )
    .unwrap_err();
    assert!(message.contains("undirected"), "{}", message);
    let message =
        parse("numNodes = 10\ncitationERGM = true\nstructParams = {Edges}\n").unwrap_err();
    assert!(message.contains("directed"), "{}", message);
}

#[test]
fn test_term_values_for_simulation() {
    let config = parse(
        "isDirected = true\nnumNodes = 20\n\
         structParams = {Arc = -2.0, Reciprocity = 1.0}\n",
    )
    .unwrap();
    assert!(config.theta_fully_specified());
    assert_eq!(config.struct_params[0].value, Some(-2.0));
    let config = parse(
        "isDirected = true\nnumNodes = 20\nstructParams = {Arc = -2.0, Reciprocity}\n",
    )
    .unwrap();
    assert!(!config.theta_fully_specified());
}

#[test]
fn test_model_resolution() {
    let config = parse(
        "isDirected = true\nnumNodes = 12\n\
         structParams = {Arc, AltInStars(3.0)}\n",
    )
    .unwrap();
    let (graph, _) = config.build_graph().unwrap();
    let (model, theta) = config.build_model(&graph).unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.terms[0], Term::Edges);
    assert_eq!(model.terms[1], Term::AltInStars { decay: 3.0 });
    assert_eq!(theta, vec![0.0, 0.0]);
}

#[test]
fn test_model_kind_enforcement() {
    let config = parse(
        "isDirected = true\nnumNodes = 12\nattrParams = {Reciprocity}\n",
    )
    .unwrap();
    let (graph, _) = config.build_graph().unwrap();
    let message = config.build_model(&graph).unwrap_err();
    assert!(message.contains("structParams"), "{}", message);
}

#[test]
fn test_unknown_term_and_attribute() {
    let config = parse("numNodes = 12\nstructParams = {NoSuchTerm}\n").unwrap();
    let (graph, _) = config.build_graph().unwrap();
    assert!(config.build_model(&graph).unwrap_err().contains("Unknown term"));

    let config = parse("numNodes = 12\nattrParams = {Activity(ghost)}\n").unwrap();
    let (graph, _) = config.build_graph().unwrap();
    let message = config.build_model(&graph).unwrap_err();
    assert!(message.contains("Unknown binary attribute"), "{}", message);
}

#[test]
fn test_term_mode_enforcement() {
    let config = parse("numNodes = 12\nstructParams = {Reciprocity}\n").unwrap();
    let (graph, _) = config.build_graph().unwrap();
    let message = config.build_model(&graph).unwrap_err();
    assert!(message.contains("does not apply"), "{}", message);
}

#[test]
fn test_decay_validation() {
    let config = parse("numNodes = 12\nstructParams = {AltKStars(0.5)}\n").unwrap();
    let (graph, _) = config.build_graph().unwrap();
    let message = config.build_model(&graph).unwrap_err();
    assert!(message.contains("must exceed 1"), "{}", message);
}

#[test]
fn test_bipartite_configuration_with_attributes() {
    let binattr = temp_path("config_bin.txt");
    std::fs::write(&binattr, "flag\n1\n0\nNA\n1\n0\n1\n").unwrap();
    let config = Config::parse(
        &format!(
            "isBipartite = true\nnumNodes = 6\nnumNodesA = 4\n\
             binattrFile = {}\n\
             structParams = {{BipartiteAltStarsA(2.0), BipartiteAltKCyclesB(2.0)}}\n\
             attrParams = {{BipartiteActivityA(flag)}}\n",
            binattr
        ),
        "test.cfg",
    )
    .unwrap();
    let (graph, edges) = config.build_graph().unwrap();
    assert!(edges.is_empty());
    assert!(graph.is_bipartite());
    let (model, _) = config.build_model(&graph).unwrap();
    assert_eq!(model.len(), 3);
    assert_eq!(
        model.terms[2],
        Term::BipartiteActivityA { attribute: 0 }
    );
    std::fs::remove_file(&binattr).unwrap();
}
