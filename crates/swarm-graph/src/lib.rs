//! Swarm Graph - proximity topology for satellite swarms
//!
//! Builds undirected communication graphs over 3D satellite positions:
//!
//! - One node per satellite, indexed by its row in the source snapshot
//! - An edge wherever two satellites sit within communication range
//! - Edge weights carry the squared inter-satellite distance
//! - Structural metrics (degree, clustering, cliques, components, paths)
//!   live in [`metrics`]

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod metrics;

pub use metrics::{analyze, MetricsReport};

/// Swarm graph errors
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Non-finite coordinate at row {0}")]
    NonFiniteCoordinate(usize),
    #[error("Negative communication range: {0}")]
    NegativeRange(f64),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// A satellite position in meters. Identity is the row index in the
/// source snapshot; positions never change after loading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwarmPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SwarmPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another satellite, in meters.
    pub fn distance_to(&self, other: &SwarmPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Undirected proximity graph over a swarm snapshot for one
/// communication range. Built once per (density, range) case and never
/// mutated afterwards.
#[derive(Debug)]
pub struct ProximityGraph {
    graph: UnGraph<SwarmPoint, f64>,
    range_m: f64,
}

impl ProximityGraph {
    /// Build the graph for the given range in meters.
    ///
    /// Every unordered pair (i, j) with i < j is checked once; an edge
    /// is added when the distance is at most `range_m`, weighted by the
    /// squared distance. Satellites with no neighbor in range stay in
    /// the graph with degree 0. Pairwise scan is O(n²), which is fine
    /// at the tens-to-hundreds of satellites these snapshots hold.
    pub fn build(points: &[SwarmPoint], range_m: f64) -> Result<Self> {
        if range_m < 0.0 || !range_m.is_finite() {
            return Err(GraphError::NegativeRange(range_m));
        }
        for (row, point) in points.iter().enumerate() {
            if !point.is_finite() {
                return Err(GraphError::NonFiniteCoordinate(row));
            }
        }

        let mut graph = UnGraph::with_capacity(points.len(), 0);
        for point in points {
            graph.add_node(*point);
        }

        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let distance = points[i].distance_to(&points[j]);
                if distance <= range_m {
                    graph.add_edge(
                        NodeIndex::new(i),
                        NodeIndex::new(j),
                        distance * distance,
                    );
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            range_m,
            "built proximity graph"
        );

        Ok(Self { graph, range_m })
    }

    pub fn range_m(&self) -> f64 {
        self.range_m
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Position of the satellite at the given row index.
    pub fn position(&self, index: usize) -> Option<&SwarmPoint> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    /// Positions in row order.
    pub fn positions(&self) -> impl Iterator<Item = &SwarmPoint> {
        self.graph.node_weights()
    }

    /// Number of neighbors of the satellite at the given row index.
    pub fn degree(&self, index: usize) -> usize {
        self.graph.neighbors(NodeIndex::new(index)).count()
    }

    pub fn is_isolated(&self, index: usize) -> bool {
        self.degree(index) == 0
    }

    /// Neighbor row indices of a satellite.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(index))
            .map(|n| n.index())
    }

    /// Edges as (i, j, squared-distance weight) with i < j.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph.edge_references().map(|e| {
            let a = e.source().index();
            let b = e.target().index();
            (a.min(b), a.max(b), *e.weight())
        })
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.graph
            .find_edge(NodeIndex::new(i), NodeIndex::new(j))
            .is_some()
    }

    pub(crate) fn inner(&self) -> &UnGraph<SwarmPoint, f64> {
        &self.graph
    }
}
