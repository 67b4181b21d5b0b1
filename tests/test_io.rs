//! Readers and writers: Pajek round trips, attribute tables, malformed
//! inputs.

extern crate ergm;
use ergm::test_utilities::*;
use ergm::*;
use std::fs;

#[test]
fn test_pajek_round_trip_undirected() {
    let graph = random_graph(15, 30, false, None, TwoPathCacheKind::Hash, 2);
    let path = temp_path("round_trip.net");
    write_pajek(&graph, &path).unwrap();
    let network = read_pajek(&path).unwrap();
    assert_eq!(network.nodes_number, 15);
    assert!(!network.directed);
    assert_eq!(network.edges.len(), 30);
    let mut reloaded = Graph::new(15, false, None, TwoPathCacheKind::Hash).unwrap();
    insert_edge_list(&mut reloaded, &network.edges, |_, _, _| {}).unwrap();
    for (src, dst) in graph.iter_edges() {
        assert!(reloaded.has_edge(src, dst));
    }
    assert_eq!(reloaded.get_edges_number(), 30);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_pajek_round_trip_bipartite() {
    let graph = random_graph(12, 20, false, Some(7), TwoPathCacheKind::Hash, 4);
    let path = temp_path("round_trip_bipartite.net");
    write_pajek(&graph, &path).unwrap();
    let network = read_pajek(&path).unwrap();
    assert_eq!(network.mode_a_number, Some(7));
    assert_eq!(network.edges.len(), 20);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_pajek_drops_self_loops_and_duplicates() {
    let path = temp_path("loops.net");
    fs::write(
        &path,
        "*vertices 4\n1 \"a\"\n2 \"b\"\n*edges\n1 2\n2 2\n2 1\n3 4\n1 2\n",
    )
    .unwrap();
    let network = read_pajek(&path).unwrap();
    // The self-loop is gone at parse time.
    assert_eq!(network.edges.len(), 4);
    let mut graph = Graph::new(4, false, None, TwoPathCacheKind::Hash).unwrap();
    let mut callbacks = 0;
    insert_edge_list(&mut graph, &network.edges, |_, _, _| callbacks += 1).unwrap();
    // (2,1) and the second (1,2) duplicate the first edge.
    assert_eq!(graph.get_edges_number(), 2);
    assert_eq!(callbacks, 2);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_pajek_arcs_are_directed() {
    let path = temp_path("arcs.net");
    fs::write(&path, "*vertices 3\n*arcs\n1 2\n2 1\n3 1\n").unwrap();
    let network = read_pajek(&path).unwrap();
    assert!(network.directed);
    assert_eq!(network.edges, vec![(0, 1), (1, 0), (2, 0)]);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_pajek_errors_carry_line_numbers() {
    let path = temp_path("bad_header.net");
    fs::write(&path, "*vertices\n*edges\n1 2\n").unwrap();
    let message = read_pajek(&path).unwrap_err();
    assert!(message.contains(":1:"), "unexpected message {}", message);

    fs::write(&path, "*vertices 3\n*edges\n1 9\n").unwrap();
    let message = read_pajek(&path).unwrap_err();
    assert!(message.contains(":3:"), "unexpected message {}", message);

    fs::write(&path, "*vertices 3\n1 \"a\"\n").unwrap();
    let message = read_pajek(&path).unwrap_err();
    assert!(message.contains("*edges"), "unexpected message {}", message);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_binary_attribute_reading() {
    let path = temp_path("binary.txt");
    fs::write(&path, "smoker urban\n1 0\nNA 1\n0 0\n1 NA\n").unwrap();
    let columns = read_binary_attributes(&path, 4).unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name, "smoker");
    assert_eq!(
        columns[0].values,
        vec![Some(true), None, Some(false), Some(true)]
    );
    assert_eq!(columns[1].values[3], None);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_attribute_errors() {
    let path = temp_path("bad_attr.txt");
    fs::write(&path, "flag\n1\n2\n").unwrap();
    let message = read_binary_attributes(&path, 2).unwrap_err();
    assert!(message.contains(":3:"), "unexpected message {}", message);

    fs::write(&path, "flag\n1\n").unwrap();
    let message = read_binary_attributes(&path, 3).unwrap_err();
    assert!(message.contains("1 attribute rows"), "unexpected message {}", message);

    fs::write(&path, "flag other\n1\n").unwrap();
    let message = read_binary_attributes(&path, 1).unwrap_err();
    assert!(message.contains(":2:"), "unexpected message {}", message);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_categorical_and_continuous_reading() {
    let categorical_path = temp_path("categorical.txt");
    fs::write(&categorical_path, "group\n0\n2\nNA\n").unwrap();
    let columns = read_categorical_attributes(&categorical_path, 3).unwrap();
    assert_eq!(columns[0].values, vec![Some(0), Some(2), None]);
    fs::remove_file(&categorical_path).unwrap();

    let continuous_path = temp_path("continuous.txt");
    fs::write(&continuous_path, "x y\n0.5 -1.25\nNA 3.0\n").unwrap();
    let columns = read_continuous_attributes(&continuous_path, 2).unwrap();
    assert_eq!(columns[1].values, vec![Some(-1.25), Some(3.0)]);
    assert_eq!(columns[0].values[1], None);
    fs::remove_file(&continuous_path).unwrap();
}

#[test]
fn test_period_and_fixed_node_reading() {
    let period_path = temp_path("periods.txt");
    fs::write(&period_path, "period\n2\n1\n0\n").unwrap();
    assert_eq!(read_periods(&period_path, 3).unwrap(), vec![2, 1, 0]);
    fs::write(&period_path, "period\nNA\n1\n0\n").unwrap();
    assert!(read_periods(&period_path, 3).is_err());
    fs::remove_file(&period_path).unwrap();

    let fixed_path = temp_path("fixed.txt");
    fs::write(&fixed_path, "1\n3\n").unwrap();
    assert_eq!(read_fixed_nodes(&fixed_path, 5).unwrap(), vec![0, 2]);
    fs::write(&fixed_path, "9\n").unwrap();
    assert!(read_fixed_nodes(&fixed_path, 5).is_err());
    fs::remove_file(&fixed_path).unwrap();
}
