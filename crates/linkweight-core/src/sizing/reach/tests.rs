use super::*;
use crate::config::SizingConfig;
use crate::graph::LinkGraph;
use crate::note::NodeMetadata;

fn config(max_depth: u32) -> SizingConfig {
    SizingConfig {
        max_depth,
        ..Default::default()
    }
}

fn graph_of(nodes: &[&str], edges: &[(&str, &str)]) -> LinkGraph {
    let mut graph = LinkGraph::new();
    for key in nodes {
        graph = graph.with_node(key);
    }
    for (from, to) in edges {
        graph = graph.with_link(from, to);
    }
    graph
}

fn weight(graph: &LinkGraph, root: &str, config: &SizingConfig) -> u64 {
    let policy = SizingPolicy::new(config);
    reach_weight(graph, root, &policy)
}

#[test]
fn test_diamond_counts_each_node_once() {
    let graph = graph_of(
        &["A", "B", "C"],
        &[("A", "B"), ("B", "C"), ("A", "C")],
    );
    assert_eq!(weight(&graph, "A", &config(3)), 3);
}

#[test]
fn test_depth_one_boundary() {
    let graph = graph_of(
        &["A", "B", "C"],
        &[("A", "B"), ("B", "C"), ("A", "C")],
    );
    let cfg = config(1);
    assert_eq!(weight(&graph, "A", &cfg), 3);
    assert_eq!(weight(&graph, "B", &cfg), 2);
}

#[test]
fn test_depth_cap_counts_but_does_not_expand() {
    // A -> B -> C -> D
    let graph = graph_of(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("C", "D")],
    );
    assert_eq!(weight(&graph, "A", &config(1)), 2);
    assert_eq!(weight(&graph, "A", &config(2)), 3);
    assert_eq!(weight(&graph, "A", &config(3)), 4);
    assert_eq!(weight(&graph, "A", &config(10)), 4);

    let policy_cfg = config(2);
    let policy = SizingPolicy::new(&policy_cfg);
    let result = reach(&graph, "A", &policy);
    assert_eq!(result.depth_capped, 1);
}

#[test]
fn test_cycle_through_root_terminates() {
    let graph = graph_of(
        &["A", "B", "C"],
        &[("A", "B"), ("B", "C"), ("C", "A")],
    );
    assert_eq!(weight(&graph, "A", &config(20)), 3);
    assert_eq!(weight(&graph, "B", &config(20)), 3);
}

#[test]
fn test_self_loop() {
    let graph = graph_of(&["A"], &[("A", "A")]);
    assert_eq!(weight(&graph, "A", &config(3)), 1);
}

#[test]
fn test_isolated_node() {
    let graph = graph_of(&["A"], &[]);
    assert_eq!(weight(&graph, "A", &config(3)), 1);
}

#[test]
fn test_missing_root_is_zero() {
    let graph = graph_of(&["A"], &[]);
    assert_eq!(weight(&graph, "nope", &config(3)), 0);

    let cfg = SizingConfig {
        count_unresolved_links: true,
        ..config(3)
    };
    assert_eq!(weight(&graph, "nope", &cfg), 0);
}

#[test]
fn test_unresolved_link_policy() {
    let graph = graph_of(&["A", "B"], &[("A", "B"), ("A", "ghost")]);
    assert_eq!(weight(&graph, "A", &config(3)), 2);

    let cfg = SizingConfig {
        count_unresolved_links: true,
        ..config(3)
    };
    assert_eq!(weight(&graph, "A", &cfg), 3);

    let policy = SizingPolicy::new(&cfg);
    assert_eq!(reach(&graph, "A", &policy).unresolved, 1);
}

#[test]
fn test_excluded_node_blocks_its_subtree() {
    let graph = graph_of(
        &["A", "Archive/B", "C"],
        &[("A", "Archive/B"), ("Archive/B", "C")],
    );
    let cfg = SizingConfig {
        exclude_folders: vec!["Archive".to_string()],
        ..config(5)
    };
    assert_eq!(weight(&graph, "A", &cfg), 1);

    let policy = SizingPolicy::new(&cfg);
    let result = reach(&graph, "A", &policy);
    assert_eq!(result.excluded, 1);
    assert_eq!(result.visited, 2);
}

#[test]
fn test_excluded_root_is_zero() {
    let graph = graph_of(&["Archive/A", "B"], &[("Archive/A", "B")]);
    let cfg = SizingConfig {
        exclude_folders: vec!["Archive".to_string()],
        ..config(3)
    };
    assert_eq!(weight(&graph, "Archive/A", &cfg), 0);
}

#[test]
fn test_tag_exclusion_during_traversal() {
    let hidden: NodeMetadata = serde_yaml::from_str("tags: [private]").unwrap();
    let graph = LinkGraph::new()
        .with_node("A")
        .with_metadata("B", hidden)
        .with_node("C")
        .with_link("A", "B")
        .with_link("A", "C");
    let cfg = SizingConfig {
        exclude_tags: vec!["private".to_string()],
        ..config(3)
    };
    assert_eq!(weight(&graph, "A", &cfg), 2);
}

#[test]
fn test_incoming_links_are_not_followed() {
    let graph = graph_of(&["A", "B", "C"], &[("B", "A"), ("C", "A")]);
    assert_eq!(weight(&graph, "A", &config(3)), 1);
    assert_eq!(weight(&graph, "B", &config(3)), 2);
}

#[test]
fn test_shorter_path_wins_regardless_of_link_order() {
    // A reaches D both directly and through B -> C -> D. With max_depth 2 the
    // long path reaches D only at the cap; the direct link must still expand
    // D so that E (depth 2) is counted.
    let nodes = ["A", "B", "C", "D", "E"];
    let forward = graph_of(
        &nodes,
        &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D"), ("D", "E")],
    );
    let reversed = graph_of(
        &nodes,
        &[("A", "D"), ("D", "E"), ("A", "B"), ("B", "C"), ("C", "D")],
    );
    let cfg = config(2);
    assert_eq!(weight(&forward, "A", &cfg), 5);
    assert_eq!(weight(&reversed, "A", &cfg), 5);
}

/// Reference: distinct keys within `max_depth` hops by level expansion
fn reference_weight(edges: &[(usize, usize)], n: usize, root: usize, max_depth: u32) -> u64 {
    let mut seen = vec![false; n];
    seen[root] = true;
    let mut frontier = vec![root];
    let mut count = 1;
    for _ in 0..max_depth {
        let mut next = Vec::new();
        for &from in &frontier {
            for &(a, b) in edges {
                if a == from && !seen[b] {
                    seen[b] = true;
                    count += 1;
                    next.push(b);
                }
            }
        }
        frontier = next;
    }
    count
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, u32)> {
        (2usize..14).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..n * 3),
                1u32..5,
            )
        })
    }

    fn build(keys: &[String], edges: &[(usize, usize)]) -> LinkGraph {
        let mut graph = LinkGraph::new();
        for key in keys {
            graph = graph.with_node(key);
        }
        for &(a, b) in edges {
            graph.add_link(&keys[a], &keys[b]);
        }
        graph
    }

    proptest! {
        #[test]
        fn weight_matches_level_expansion((n, edges, max_depth) in arb_graph()) {
            let keys: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
            let graph = build(&keys, &edges);
            let cfg = config(max_depth);

            for root in 0..n {
                prop_assert_eq!(
                    weight(&graph, &keys[root], &cfg),
                    reference_weight(&edges, n, root, max_depth)
                );
            }
        }

        #[test]
        fn weight_ignores_link_order(
            (n, edges, shuffled, max_depth) in arb_graph().prop_flat_map(|(n, edges, max_depth)| {
                (Just(n), Just(edges.clone()), Just(edges).prop_shuffle(), Just(max_depth))
            }),
        ) {
            let keys: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
            let cfg = config(max_depth);

            let original = build(&keys, &edges);
            let reordered = build(&keys, &shuffled);
            for key in &keys {
                prop_assert_eq!(weight(&original, key, &cfg), weight(&reordered, key, &cfg));
            }
        }
    }
}
