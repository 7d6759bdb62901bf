use std::error;
use std::fmt;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;

use crate::units::{EdgesCount, NodesCount};
use crate::utils;
use crate::utils::FnvHashMap;

/// Caller assigned vertex name. Uniqueness within one graph is the only property relied upon.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct VertexId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid position of a vertex, fixed when the vertex is added.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub row: usize,
    pub column: usize,
}

impl Coordinate {
    pub fn new(row: usize, column: usize) -> Coordinate {
        Coordinate { row, column }
    }

    pub fn manhattan_distance(&self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

/// An undirected edge. Which endpoint comes first carries no meaning.
pub type Edge = (VertexId, VertexId);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GraphError {
    UnknownVertex(VertexId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GraphError::UnknownVertex(v) => write!(f, "vertex {} is not in the graph", v),
        }
    }
}

impl error::Error for GraphError {}

/// Undirected graph of grid cells.
///
/// Vertices live in an arena keyed by their `VertexId`; adjacency is a set of identifiers per
/// vertex so there are never references between vertices. Edges are not stored anywhere else,
/// `edges` and `edge_count` always derive them from the adjacency sets.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: UnGraphMap<VertexId, ()>,
    coordinates: FnvHashMap<VertexId, Coordinate>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn with_capacity(nodes: NodesCount, edges: EdgesCount) -> Graph {
        Graph {
            adjacency: UnGraphMap::with_capacity(nodes.0, edges.0),
            coordinates: utils::fnv_hashmap(nodes.0),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.node_count()
    }

    /// Each edge is seen from both of its endpoints, hence the halving.
    pub fn edge_count(&self) -> usize {
        let adjacency_entries: usize = self.adjacency
            .nodes()
            .map(|v| self.adjacency.neighbors(v).count())
            .sum();
        adjacency_entries / 2
    }

    pub fn degree(&self, v: VertexId) -> Result<usize, GraphError> {
        self.check_vertex(v)?;
        Ok(self.adjacency.neighbors(v).count())
    }

    pub fn coordinate_of(&self, v: VertexId) -> Result<Coordinate, GraphError> {
        self.coordinates.get(&v).cloned().ok_or(GraphError::UnknownVertex(v))
    }

    /// Are the two vertices one step apart horizontally or vertically on the grid?
    /// Purely geometric, an edge between them need not exist.
    pub fn is_grid_adjacent(&self, v: VertexId, w: VertexId) -> Result<bool, GraphError> {
        let v_coord = self.coordinate_of(v)?;
        let w_coord = self.coordinate_of(w)?;
        Ok(v_coord.manhattan_distance(w_coord) == 1)
    }

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.adjacency.contains_node(v)
    }

    #[inline]
    pub fn contains_edge(&self, s: VertexId, d: VertexId) -> bool {
        self.adjacency.contains_edge(s, d)
    }

    /// Add a vertex with no neighbours.
    /// Adding an identifier that is already present changes nothing, including its coordinate.
    /// Returns true if the vertex was inserted.
    pub fn add_vertex(&mut self, v: VertexId, row: usize, column: usize) -> bool {
        if self.contains_vertex(v) {
            return false;
        }
        self.adjacency.add_node(v);
        self.coordinates.insert(v, Coordinate::new(row, column));
        true
    }

    /// Link two vertices.
    ///
    /// Silently ignored when either endpoint is missing or both endpoints are the same vertex.
    /// Returns true if a new edge was created.
    pub fn add_edge(&mut self, s: VertexId, d: VertexId) -> bool {
        if s == d || !self.contains_vertex(s) || !self.contains_vertex(d) {
            return false;
        }
        self.adjacency.add_edge(s, d, ()).is_none()
    }

    /// Unlink two vertices. Returns true if an edge existed and was removed.
    pub fn remove_edge(&mut self, s: VertexId, d: VertexId) -> Result<bool, GraphError> {
        self.check_vertex(s)?;
        self.check_vertex(d)?;
        Ok(self.adjacency.remove_edge(s, d).is_some())
    }

    /// Remove a vertex together with every edge touching it.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.adjacency.remove_node(v);
        self.coordinates.remove(&v);
        Ok(())
    }

    /// Vertex identifiers in insertion order (until a vertex is removed).
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.nodes()
    }

    /// Every undirected edge exactly once, in the orientation it was first met.
    pub fn edges(&self) -> Vec<Edge> {
        let mut emitted = utils::fnv_hashset(self.vertex_count() * 2);
        let mut edges = Vec::new();
        for v in self.vertices() {
            for n in self.adjacency.neighbors(v) {
                if !emitted.contains(&(n, v)) {
                    emitted.insert((v, n));
                    edges.push((v, n));
                }
            }
        }
        edges
    }

    pub fn neighbors(&self, v: VertexId) -> Result<impl Iterator<Item = VertexId> + '_, GraphError> {
        self.check_vertex(v)?;
        Ok(self.adjacency.neighbors(v))
    }

    #[inline]
    fn check_vertex(&self, v: VertexId) -> Result<(), GraphError> {
        if self.contains_vertex(v) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(v))
        }
    }
}

/// Plain listing: `"<vertices> <edges>"`, then the vertex names, then one adjacency line per vertex.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} {}", self.vertex_count(), self.edge_count())?;
        writeln!(f, "{}", self.vertices().join(" "))?;
        for v in self.vertices() {
            writeln!(f, "{}: {}", v, self.adjacency.neighbors(v).join(" "))?;
        }
        Ok(())
    }
}
