use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use smallvec::SmallVec;

use crate::graph::{Graph, GraphError, VertexId};
use crate::units::{EdgesCount, NodesCount};
use crate::utils;
use crate::utils::FnvHashMap;

/// Random source for maze generation.
/// A fixed seed reproduces a maze exactly, otherwise the generator is seeded from the OS on every call.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Result of a depth first traversal: the tree of discovery edges plus the DFS clock readings.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    start: VertexId,
    tree: Graph,
    discovered: FnvHashMap<VertexId, usize>,
    finished: FnvHashMap<VertexId, usize>,
}

impl SpanningTree {
    #[inline]
    pub fn start(&self) -> VertexId {
        self.start
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.tree
    }

    pub fn into_graph(self) -> Graph {
        self.tree
    }

    pub fn discovery_time(&self, v: VertexId) -> Option<usize> {
        self.discovered.get(&v).cloned()
    }

    pub fn finish_time(&self, v: VertexId) -> Option<usize> {
        self.finished.get(&v).cloned()
    }
}

/// Carve a maze out of a fully linked grid graph with a randomized depth first search.
///
/// The traversal keeps an explicit stack. When the vertex on top of the stack is seen for the
/// first time it is joined to the vertex that last pushed it, and all of its undiscovered
/// neighbours are pushed in a random order. A vertex met again on top of the stack is finished
/// and popped; a vertex pushed by several parents is simply popped again later.
///
/// `graph` is left untouched. The returned tree holds every vertex reachable from `start`
/// with exactly one fewer edge than vertices.
pub fn randomized_depth_first<R>(graph: &Graph,
                                 start: VertexId,
                                 rng: &mut R)
                                 -> Result<SpanningTree, GraphError>
    where R: Rng + ?Sized
{
    let start_coord = graph.coordinate_of(start)?;
    let capacity = graph.vertex_count();

    let mut tree = Graph::with_capacity(NodesCount(capacity),
                                        EdgesCount(capacity.saturating_sub(1)));
    tree.add_vertex(start, start_coord.row, start_coord.column);

    let mut parents: FnvHashMap<VertexId, VertexId> = utils::fnv_hashmap(capacity);
    let mut discovered: FnvHashMap<VertexId, usize> = utils::fnv_hashmap(capacity);
    let mut finished: FnvHashMap<VertexId, usize> = utils::fnv_hashmap(capacity);
    let mut clock = 1;

    let mut stack = vec![start];
    while let Some(&top) = stack.last() {

        if !discovered.contains_key(&top) {
            discovered.insert(top, clock);
            clock += 1;

            if top != start {
                if let Some(&parent) = parents.get(&top) {
                    tree.add_edge(parent, top);
                }
            }

            let mut unvisited: SmallVec<[VertexId; 4]> = SmallVec::new();
            for n in graph.neighbors(top)? {
                if !discovered.contains_key(&n) {
                    let coord = graph.coordinate_of(n)?;
                    parents.insert(n, top);
                    tree.add_vertex(n, coord.row, coord.column);
                    unvisited.push(n);
                }
            }
            unvisited.shuffle(rng);

            tracing::trace!(vertex = %top, pushed = unvisited.len(), "discovered");
            stack.extend(unvisited);

        } else {
            if !finished.contains_key(&top) {
                finished.insert(top, clock);
                clock += 1;
            }
            stack.pop();
        }
    }

    tracing::debug!(start = %start,
                    vertices = tree.vertex_count(),
                    edges = tree.edge_count(),
                    "generated spanning tree");

    Ok(SpanningTree {
        start,
        tree,
        discovered,
        finished,
    })
}

/// Generate a maze from the grid graph, returning just the tree.
pub fn recursive_backtracker(graph: &Graph,
                             start: VertexId,
                             seed: Option<u64>)
                             -> Result<Graph, GraphError> {
    let mut rng = seeded_rng(seed);
    tracing::debug!(?seed, "recursive backtracker");
    randomized_depth_first(graph, start, &mut rng).map(SpanningTree::into_graph)
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::quickcheck;

    use super::*;
    use crate::graph::Edge;
    use crate::grids::{rect_grid_graph, RectGridDimensions};
    use crate::pathing::Distances;
    use crate::units::{ColumnsCount, RowsCount};

    fn grid(rows: usize, columns: usize) -> Graph {
        rect_grid_graph(RectGridDimensions::new(RowsCount(rows), ColumnsCount(columns)))
    }

    fn normalised_edges(g: &Graph) -> Vec<Edge> {
        g.edges()
            .into_iter()
            .map(|(s, d)| if s < d { (s, d) } else { (d, s) })
            .sorted()
            .collect()
    }

    fn is_spanning_tree_of(tree: &Graph, g: &Graph, start: VertexId) -> bool {
        let reachable = Distances::for_graph(g, start).unwrap().len();
        let reachable_in_tree = Distances::for_graph(tree, start).unwrap().len();
        tree.vertex_count() == reachable &&
        reachable_in_tree == reachable &&
        tree.edge_count() + 1 == reachable &&
        tree.edges().iter().all(|&(s, d)| g.contains_edge(s, d))
    }

    #[test]
    fn single_cell_maze() {
        let g = grid(1, 1);
        let maze = recursive_backtracker(&g, VertexId(0), None).unwrap();
        assert_eq!(maze.vertex_count(), 1);
        assert_eq!(maze.edge_count(), 0);
    }

    #[test]
    fn two_cell_maze_is_the_grid() {
        let g = grid(2, 1);
        let maze = recursive_backtracker(&g, VertexId(0), None).unwrap();
        assert_eq!(maze.vertex_count(), 2);
        assert_eq!(normalised_edges(&maze), normalised_edges(&g));
    }

    #[test]
    fn three_by_three_maze_has_eight_edges() {
        let g = grid(3, 3);
        for seed in 0..50 {
            let maze = recursive_backtracker(&g, VertexId(0), Some(seed)).unwrap();
            assert_eq!(maze.vertex_count(), 9);
            assert_eq!(maze.edge_count(), 8);
            assert!(is_spanning_tree_of(&maze, &g, VertexId(0)));
        }
    }

    #[test]
    fn coordinates_are_copied_from_the_grid() {
        let g = grid(4, 6);
        let maze = recursive_backtracker(&g, VertexId(7), Some(3)).unwrap();
        for v in g.vertices() {
            assert_eq!(maze.coordinate_of(v), g.coordinate_of(v));
        }
    }

    #[test]
    fn grid_is_not_mutated() {
        let g = grid(5, 5);
        let before = normalised_edges(&g);
        let _ = recursive_backtracker(&g, VertexId(0), None).unwrap();
        assert_eq!(g.vertex_count(), 25);
        assert_eq!(normalised_edges(&g), before);
    }

    #[test]
    fn fixed_seed_reproduces_the_maze() {
        let g = grid(8, 8);
        let a = recursive_backtracker(&g, VertexId(0), Some(1234)).unwrap();
        let b = recursive_backtracker(&g, VertexId(0), Some(1234)).unwrap();
        assert_eq!(normalised_edges(&a), normalised_edges(&b));
    }

    #[test]
    fn unseeded_mazes_differ() {
        let g = grid(3, 3);
        let mazes = (0..20)
            .map(|_| normalised_edges(&recursive_backtracker(&g, VertexId(0), None).unwrap()))
            .unique()
            .count();
        assert!(mazes > 1);
    }

    #[test]
    fn every_vertex_discovered_and_finished_once() {
        let g = grid(6, 4);
        let mut rng = seeded_rng(Some(99));
        let traversal = randomized_depth_first(&g, VertexId(0), &mut rng).unwrap();
        assert_eq!(traversal.start(), VertexId(0));

        let mut clock_readings = vec![];
        for v in g.vertices() {
            let discovered = traversal.discovery_time(v).expect("vertex never discovered");
            let finished = traversal.finish_time(v).expect("vertex never finished");
            assert!(discovered < finished);
            clock_readings.push(discovered);
            clock_readings.push(finished);
        }
        clock_readings.sort();
        assert_eq!(clock_readings, (1..=48).collect::<Vec<_>>());

        // The start is discovered first and finished last
        assert_eq!(traversal.discovery_time(VertexId(0)), Some(1));
        assert_eq!(traversal.finish_time(VertexId(0)), Some(48));
    }

    #[test]
    fn parents_enclose_children() {
        // A tree edge joins a parent to a child whose DFS interval nests inside the parent's
        let g = grid(5, 5);
        let mut rng = seeded_rng(Some(7));
        let traversal = randomized_depth_first(&g, VertexId(12), &mut rng).unwrap();
        for (s, d) in traversal.graph().edges() {
            let (parent, child) = if traversal.discovery_time(s) < traversal.discovery_time(d) {
                (s, d)
            } else {
                (d, s)
            };
            assert!(traversal.discovery_time(parent) < traversal.discovery_time(child));
            assert!(traversal.finish_time(child) < traversal.finish_time(parent));
        }
    }

    #[test]
    fn isolated_start() {
        let mut g = Graph::new();
        g.add_vertex(VertexId(0), 0, 0);
        g.add_vertex(VertexId(1), 0, 1);
        let maze = recursive_backtracker(&g, VertexId(0), None).unwrap();
        assert_eq!(maze.vertices().collect::<Vec<_>>(), vec![VertexId(0)]);
        assert_eq!(maze.edge_count(), 0);
    }

    #[test]
    fn only_the_reachable_component_is_spanned() {
        let mut g = grid(2, 3);
        // cut the right hand column off from the rest
        g.remove_edge(VertexId(1), VertexId(2)).unwrap();
        g.remove_edge(VertexId(4), VertexId(5)).unwrap();

        let maze = recursive_backtracker(&g, VertexId(0), Some(5)).unwrap();
        assert_eq!(maze.vertices().sorted().collect::<Vec<_>>(),
                   vec![VertexId(0), VertexId(1), VertexId(3), VertexId(4)]);
        assert_eq!(maze.edge_count(), 3);
    }

    #[test]
    fn unknown_start_vertex() {
        let g = grid(2, 2);
        let result = recursive_backtracker(&g, VertexId(10), None);
        assert_eq!(result.unwrap_err(), GraphError::UnknownVertex(VertexId(10)));
    }

    #[test]
    fn quickcheck_mazes_are_spanning_trees() {
        fn p(rows: u8, columns: u8, start: u8, seed: u64) -> bool {
            let (rows, columns) = (rows as usize % 9 + 1, columns as usize % 9 + 1);
            let g = grid(rows, columns);
            let start = VertexId(start as usize % (rows * columns));
            let maze = recursive_backtracker(&g, start, Some(seed)).unwrap();
            is_spanning_tree_of(&maze, &g, start)
        }
        quickcheck(p as fn(u8, u8, u8, u64) -> bool)
    }
}
