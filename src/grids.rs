use crate::graph::{Coordinate, Graph, VertexId};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl RectGridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> RectGridDimensions {
        RectGridDimensions { rows, columns }
    }

    /// Dimensions of a maze that is allowed to be built: both sides non zero and no more than
    /// `max_cells` cells in total.
    pub fn checked_new(rows: RowsCount,
                       columns: ColumnsCount,
                       max_cells: NodesCount)
                       -> Option<RectGridDimensions> {
        if rows.0 == 0 || columns.0 == 0 {
            return None;
        }
        match rows.0.checked_mul(columns.0) {
            Some(cells) if cells <= max_cells.0 => Some(RectGridDimensions::new(rows, columns)),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    /// Vertex and edge counts of the fully linked grid: every cell joined to its 4 neighbours.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let RowsCount(rows) = self.rows;
        let ColumnsCount(columns) = self.columns;
        if rows == 0 || columns == 0 {
            return (NodesCount(0), EdgesCount(0));
        }
        let horizontal_links = rows * (columns - 1);
        let vertical_links = columns * (rows - 1);
        (self.size(), EdgesCount(horizontal_links + vertical_links))
    }

    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.row < self.rows.0 && coord.column < self.columns.0
    }
}

/// Row major vertex name of a grid cell: `columns * row + column`.
#[inline]
pub fn vertex_at(coord: Coordinate, columns: ColumnsCount) -> VertexId {
    VertexId(columns.0 * coord.row + coord.column)
}

/// Inverse of `vertex_at`. None for a grid with no columns.
pub fn coordinate_at(v: VertexId, columns: ColumnsCount) -> Option<Coordinate> {
    if columns.0 == 0 {
        None
    } else {
        Some(Coordinate::new(v.0 / columns.0, v.0 % columns.0))
    }
}

/// Build the fully linked rows x columns grid graph.
///
/// Cells are added in a row major scan, named with `vertex_at`, and each new cell is linked to
/// the already added cells before it in its row and above it in its column when they are
/// geometrically adjacent.
pub fn rect_grid_graph(dimensions: RectGridDimensions) -> Graph {
    let (nodes, edges) = dimensions.graph_size();
    let mut graph = Graph::with_capacity(nodes, edges);
    let columns = dimensions.columns();

    for row in 0..dimensions.rows().0 {
        for column in 0..columns.0 {
            let v = vertex_at(Coordinate::new(row, column), columns);
            graph.add_vertex(v, row, column);

            // The cell before v in scan order is the end of the previous row when v starts a
            // row, which the adjacency test rules out.
            let earlier = [v.0.checked_sub(1), v.0.checked_sub(columns.0)];
            for candidate in earlier.iter().flatten().map(|&n| VertexId(n)) {
                if let Ok(true) = graph.is_grid_adjacent(v, candidate) {
                    graph.add_edge(v, candidate);
                }
            }
        }
    }

    tracing::debug!(rows = dimensions.rows().0,
                    columns = columns.0,
                    vertices = graph.vertex_count(),
                    edges = edges.0,
                    "built grid graph");
    graph
}
