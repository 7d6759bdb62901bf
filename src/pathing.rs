use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::graph::{Graph, GraphError, VertexId};
use crate::utils;
use crate::utils::FnvHashMap;


/// Breadth first distances from one start vertex to everything reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start: VertexId,
    distances: FnvHashMap<VertexId, usize>,
    max_distance: usize,
    last_visited: VertexId,
}

impl Distances {
    /// Run a single breadth first sweep from `start`.
    ///
    /// Each vertex is queued the first time it is seen, which is also when its distance is
    /// written, so the distance map doubles as the visited set and no vertex is processed twice.
    pub fn for_graph(graph: &Graph, start: VertexId) -> Result<Distances, GraphError> {

        let mut distances = utils::fnv_hashmap(graph.vertex_count());
        distances.insert(start, 0);

        let mut queue = VecDeque::new();
        queue.push_back(start);

        let mut max = 0;
        let mut last_visited = start;

        while let Some(current) = queue.pop_front() {
            let distance_to_current = distances[&current];
            if distance_to_current > max {
                max = distance_to_current;
            }

            for neighbour in graph.neighbors(current)? {
                if !distances.contains_key(&neighbour) {
                    distances.insert(neighbour, distance_to_current + 1);
                    queue.push_back(neighbour);
                }
            }
            last_visited = current;
        }

        tracing::debug!(start = %start,
                        reached = distances.len(),
                        max_distance = max,
                        last = %last_visited,
                        "breadth first sweep");

        Ok(Distances {
            start,
            distances,
            max_distance: max,
            last_visited,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> VertexId {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> usize {
        self.max_distance
    }

    /// The vertex taken off the queue last, one of the vertices at `max` distance.
    #[inline(always)]
    pub fn last_visited(&self) -> VertexId {
        self.last_visited
    }

    /// Number of vertices reached, the start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, v: VertexId) -> Option<usize> {
        self.distances.get(&v).cloned()
    }

    /// Every reached vertex at the maximum distance, in no particular order.
    pub fn furthest_vertices(&self) -> SmallVec<[VertexId; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(v, _)| *v)
            .collect()
    }
}

/// Exit placement: the vertex a breadth first search from `start` visits last.
///
/// This is a single sweep from a fixed start, so the result is as far as possible from
/// `start` but is not necessarily an endpoint of the graph's longest path.
pub fn farthest_vertex(graph: &Graph, start: VertexId) -> Result<VertexId, GraphError> {
    Distances::for_graph(graph, start).map(|distances| distances.last_visited())
}
