//! Structural metrics over a proximity graph
//!
//! Everything a topology case reports comes out of [`analyze`]:
//!
//! - Degree sequence and mean degree
//! - Local clustering coefficients and their mean
//! - Maximal cliques (Bron–Kerbosch with pivoting)
//! - Connected components (union-find over the edge set)
//! - All-pairs weighted shortest paths (Dijkstra from every source)
//!
//! Clique enumeration is exponential in the worst case. The swarm
//! snapshots this runs on stay in the tens-to-hundreds of nodes with
//! sparse connectivity, which keeps it tractable; larger inputs would
//! need a bounded or approximate enumeration.

use crate::ProximityGraph;
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Per-case bundle of structural statistics. Serializable so a case can
/// persist it as JSON next to the rendered artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub node_count: usize,
    pub edge_count: usize,
    /// None when the graph has no nodes.
    pub mean_degree: Option<f64>,
    pub degrees: Vec<usize>,
    /// None when the graph has no nodes.
    pub mean_clustering: Option<f64>,
    pub clustering: Vec<f64>,
    pub clique_count: usize,
    pub clique_sizes: Vec<usize>,
    pub component_count: usize,
    pub component_sizes: Vec<usize>,
    /// Count of reachable ordered (source, target) pairs, sources
    /// reaching themselves at weight 0 included.
    pub path_count: usize,
    /// Mean shortest-path weight over reachable pairs, in m² (edge
    /// weights are squared distances). None when there are no paths.
    pub mean_path_weight: Option<f64>,
    pub path_weights: Vec<f64>,
}

/// Compute the full metrics bundle for a graph.
pub fn analyze(graph: &ProximityGraph) -> MetricsReport {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let degrees = degree_sequence(graph);
    let mean_degree = if node_count > 0 {
        Some(degrees.iter().sum::<usize>() as f64 / node_count as f64)
    } else {
        None
    };

    let clustering = local_clustering(graph);
    let mean_clustering = if node_count > 0 {
        Some(clustering.iter().sum::<f64>() / node_count as f64)
    } else {
        None
    };

    let cliques = maximal_cliques(graph);
    let clique_sizes: Vec<usize> = cliques.iter().map(|c| c.len()).collect();

    let components = connected_components(graph);
    let component_sizes: Vec<usize> = components.iter().map(|c| c.len()).collect();

    let path_weights = shortest_path_weights(graph);
    let path_count = path_weights.len();
    let mean_path_weight = if path_count > 0 {
        Some(path_weights.iter().sum::<f64>() / path_count as f64)
    } else {
        None
    };

    debug!(
        node_count,
        edge_count,
        cliques = clique_sizes.len(),
        components = component_sizes.len(),
        paths = path_count,
        "computed metrics"
    );

    MetricsReport {
        node_count,
        edge_count,
        mean_degree,
        degrees,
        mean_clustering,
        clustering,
        clique_count: clique_sizes.len(),
        clique_sizes,
        component_count: component_sizes.len(),
        component_sizes,
        path_count,
        mean_path_weight,
        path_weights,
    }
}

/// Degrees in row order.
pub fn degree_sequence(graph: &ProximityGraph) -> Vec<usize> {
    (0..graph.node_count()).map(|v| graph.degree(v)).collect()
}

/// Local clustering coefficient per node: the fraction of a node's
/// neighbor pairs that are themselves connected. Nodes with fewer than
/// two neighbors contribute 0.
pub fn local_clustering(graph: &ProximityGraph) -> Vec<f64> {
    (0..graph.node_count())
        .map(|v| {
            let neighbors: Vec<usize> = graph.neighbors(v).collect();
            let k = neighbors.len();
            if k < 2 {
                return 0.0;
            }
            let mut closed = 0usize;
            for a in 0..k {
                for b in (a + 1)..k {
                    if graph.has_edge(neighbors[a], neighbors[b]) {
                        closed += 1;
                    }
                }
            }
            2.0 * closed as f64 / (k * (k - 1)) as f64
        })
        .collect()
}

/// Enumerate all maximal cliques via Bron–Kerbosch with pivoting.
///
/// Isolated nodes come back as singleton cliques. Cliques and their
/// members are in no particular order.
pub fn maximal_cliques(graph: &ProximityGraph) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    if n == 0 {
        // The recursion's base case would otherwise report the empty
        // set as a clique.
        return Vec::new();
    }
    let adjacency: Vec<HashSet<usize>> =
        (0..n).map(|v| graph.neighbors(v).collect()).collect();

    let mut cliques = Vec::new();
    let mut current = Vec::new();
    let candidates: HashSet<usize> = (0..n).collect();
    bron_kerbosch(
        &adjacency,
        &mut current,
        candidates,
        HashSet::new(),
        &mut cliques,
    );
    cliques
}

fn bron_kerbosch(
    adjacency: &[HashSet<usize>],
    current: &mut Vec<usize>,
    mut candidates: HashSet<usize>,
    mut excluded: HashSet<usize>,
    cliques: &mut Vec<Vec<usize>>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        cliques.push(current.clone());
        return;
    }

    // Pivot on the node covering the most candidates; only candidates
    // outside its neighborhood need expanding.
    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| adjacency[u].intersection(&candidates).count())
        .unwrap();
    let expand: Vec<usize> = candidates
        .difference(&adjacency[pivot])
        .copied()
        .collect();

    for v in expand {
        current.push(v);
        let next_candidates = candidates.intersection(&adjacency[v]).copied().collect();
        let next_excluded = excluded.intersection(&adjacency[v]).copied().collect();
        bron_kerbosch(adjacency, current, next_candidates, next_excluded, cliques);
        current.pop();
        candidates.remove(&v);
        excluded.insert(v);
    }
}

/// Partition the node set into connected components. Each component's
/// members are in ascending row order; components are ordered by their
/// smallest member.
pub fn connected_components(graph: &ProximityGraph) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let mut sets: UnionFind<usize> = UnionFind::new(n);
    for (i, j, _) in graph.edges() {
        sets.union(i, j);
    }

    let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
    for v in 0..n {
        groups.entry(sets.find(v)).or_default().push(v);
    }

    let mut components: Vec<Vec<usize>> = groups.into_values().collect();
    components.sort_by_key(|c| c[0]);
    components
}

/// Shortest-path weights (sums of squared-distance edge weights) for
/// every reachable ordered pair, Dijkstra from each source in turn.
/// Each source reaches itself at weight 0; unreachable pairs are simply
/// absent. Results come back in (source, target) row order.
pub fn shortest_path_weights(graph: &ProximityGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut weights = Vec::new();
    for source in 0..n {
        let reached = dijkstra(
            graph.inner(),
            NodeIndex::new(source),
            None,
            |e| *e.weight(),
        );
        for target in 0..n {
            if let Some(weight) = reached.get(&NodeIndex::new(target)) {
                weights.push(*weight);
            }
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SwarmPoint;

    fn create_test_graph() -> ProximityGraph {
        // Triangle at the origin plus one satellite far out of range.
        let points = vec![
            SwarmPoint::new(0.0, 0.0, 0.0),
            SwarmPoint::new(1.0, 0.0, 0.0),
            SwarmPoint::new(0.0, 1.0, 0.0),
            SwarmPoint::new(10.0, 10.0, 10.0),
        ];
        ProximityGraph::build(&points, 1.5).unwrap()
    }

    fn create_sparse_graph() -> ProximityGraph {
        // Same layout but a range that keeps the diagonal pair apart.
        let points = vec![
            SwarmPoint::new(0.0, 0.0, 0.0),
            SwarmPoint::new(1.0, 0.0, 0.0),
            SwarmPoint::new(0.0, 1.0, 0.0),
            SwarmPoint::new(10.0, 10.0, 10.0),
        ];
        ProximityGraph::build(&points, 1.2).unwrap()
    }

    fn empty_graph() -> ProximityGraph {
        ProximityGraph::build(&[], 1.0).unwrap()
    }

    #[test]
    fn test_mean_degree_matches_edge_count() {
        let graph = create_sparse_graph();
        let report = analyze(&graph);

        // Degrees: 2, 1, 1, 0 over 4 nodes.
        assert_eq!(report.degrees, vec![2, 1, 1, 0]);
        assert_eq!(report.mean_degree, Some(1.0));
        assert_eq!(
            report.mean_degree.unwrap(),
            2.0 * report.edge_count as f64 / report.node_count as f64
        );
    }

    #[test]
    fn test_clustering_on_triangle() {
        let graph = create_test_graph();
        let clustering = local_clustering(&graph);

        // Triangle members each have both neighbors connected.
        assert_eq!(clustering[0], 1.0);
        assert_eq!(clustering[1], 1.0);
        assert_eq!(clustering[2], 1.0);
        // Isolated node contributes 0.
        assert_eq!(clustering[3], 0.0);

        let report = analyze(&graph);
        assert_eq!(report.mean_clustering, Some(0.75));
    }

    #[test]
    fn test_clustering_zero_on_open_wedge() {
        let graph = create_sparse_graph();
        let clustering = local_clustering(&graph);

        // Node 0's two neighbors are not connected to each other.
        assert_eq!(clustering[0], 0.0);
        assert_eq!(clustering[1], 0.0);
    }

    #[test]
    fn test_maximal_cliques_triangle_and_singleton() {
        let graph = create_test_graph();
        let mut cliques = maximal_cliques(&graph);
        for clique in &mut cliques {
            clique.sort_unstable();
        }
        cliques.sort();

        assert_eq!(cliques, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn test_cliques_are_complete_and_maximal() {
        let graph = create_sparse_graph();
        let cliques = maximal_cliques(&graph);

        for clique in &cliques {
            // Complete: every pair inside is connected.
            for a in 0..clique.len() {
                for b in (a + 1)..clique.len() {
                    assert!(graph.has_edge(clique[a], clique[b]));
                }
            }
            // Maximal: no outside node connects to every member.
            for v in 0..graph.node_count() {
                if clique.contains(&v) {
                    continue;
                }
                let extends = clique.iter().all(|&m| graph.has_edge(v, m));
                assert!(!extends);
            }
        }
    }

    #[test]
    fn test_components_partition_nodes() {
        let graph = create_test_graph();
        let components = connected_components(&graph);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0], vec![0, 1, 2]);
        assert_eq!(components[1], vec![3]);

        let mut seen: Vec<usize> = components.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_range_makes_every_node_a_component() {
        let points = vec![
            SwarmPoint::new(0.0, 0.0, 0.0),
            SwarmPoint::new(1.0, 0.0, 0.0),
            SwarmPoint::new(0.0, 1.0, 0.0),
        ];
        let graph = ProximityGraph::build(&points, 0.0).unwrap();
        let report = analyze(&graph);

        assert_eq!(report.edge_count, 0);
        assert_eq!(report.component_count, 3);
        assert_eq!(report.mean_clustering, Some(0.0));
        assert_eq!(report.clique_sizes, vec![1, 1, 1]);
    }

    #[test]
    fn test_shortest_paths_symmetric_and_nonnegative() {
        let graph = create_test_graph();
        let n = graph.node_count();

        let mut table = vec![vec![None; n]; n];
        for source in 0..n {
            let reached = dijkstra(
                graph.inner(),
                NodeIndex::new(source),
                None,
                |e| *e.weight(),
            );
            for target in 0..n {
                table[source][target] =
                    reached.get(&NodeIndex::new(target)).copied();
            }
        }

        for i in 0..n {
            for j in 0..n {
                assert_eq!(table[i][j], table[j][i]);
                if let Some(w) = table[i][j] {
                    assert!(w >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_unreachable_pairs_excluded() {
        let graph = create_sparse_graph();
        let report = analyze(&graph);

        // Component {0,1,2} contributes 9 ordered pairs (self included),
        // the isolated node just its own. Node 3 never pairs with the rest.
        assert_eq!(report.path_count, 10);

        // Weighted detour: 1 -> 0 -> 2 costs 1 + 1 = 2 in squared meters.
        let detour = report
            .path_weights
            .iter()
            .any(|&w| (w - 2.0).abs() < 1e-9);
        assert!(detour);
    }

    #[test]
    fn test_dijkstra_prefers_lighter_weighted_route() {
        // Chain 0-1-2 plus a long direct 0-2 edge: two short hops of
        // squared weight 1 beat one hop of squared weight ~3.9.
        let points = vec![
            SwarmPoint::new(0.0, 0.0, 0.0),
            SwarmPoint::new(1.0, 0.0, 0.0),
            SwarmPoint::new(1.975, 0.0, 0.0),
        ];
        let graph = ProximityGraph::build(&points, 2.0).unwrap();
        assert!(graph.has_edge(0, 2));

        let reached = dijkstra(graph.inner(), NodeIndex::new(0), None, |e| *e.weight());
        let to_end = reached[&NodeIndex::new(2)];
        let two_hop = 1.0 + 0.975 * 0.975;
        assert!((to_end - two_hop).abs() < 1e-9);
    }

    #[test]
    fn test_no_cliques_in_empty_graph() {
        let cliques = maximal_cliques(&empty_graph());
        assert!(cliques.is_empty());
    }

    #[test]
    fn test_empty_graph_degrades_gracefully() {
        let report = analyze(&empty_graph());

        assert_eq!(report.node_count, 0);
        assert_eq!(report.mean_degree, None);
        assert_eq!(report.mean_clustering, None);
        assert_eq!(report.mean_path_weight, None);
        assert_eq!(report.clique_count, 0);
        assert_eq!(report.component_count, 0);
        assert_eq!(report.path_count, 0);
    }
}
