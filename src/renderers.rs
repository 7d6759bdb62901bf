use crate::displays::{CellDisplay, LayeredDisplay, StartExitDisplay};
use crate::graph::{Coordinate, Graph, GraphError, VertexId};
use crate::grids::RectGridDimensions;

pub const DEFAULT_WALL: char = 'X';
pub const DEFAULT_OPEN: char = ' ';

pub struct RenderOptions<'a> {
    wall: char,
    open: char,
    cell_display: Option<&'a dyn CellDisplay>,
}

pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}

impl<'a> RenderOptionsBuilder<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder {
            options: RenderOptions {
                wall: DEFAULT_WALL,
                open: DEFAULT_OPEN,
                cell_display: None,
            },
        }
    }

    pub fn wall(mut self, glyph: char) -> RenderOptionsBuilder<'a> {
        self.options.wall = glyph;
        self
    }

    pub fn open(mut self, glyph: char) -> RenderOptionsBuilder<'a> {
        self.options.open = glyph;
        self
    }

    pub fn cell_display(mut self, display: Option<&'a dyn CellDisplay>) -> RenderOptionsBuilder<'a> {
        self.options.cell_display = display;
        self
    }

    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

impl<'a> Default for RenderOptionsBuilder<'a> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// A glyph given as text must be exactly one character.
pub fn parse_glyph(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) => Some(glyph),
        _ => None,
    }
}

/// Draw a maze as text at double resolution.
///
/// The character grid is `2 * rows + 1` by `2 * columns + 1`, walls everywhere to begin with.
/// Cell `(r, c)` sits at `(2r + 1, 2c + 1)` and the wall slot between two linked neighbours is
/// opened. Every glyph is followed by a space and every grid row ends the line.
///
/// Vertices or edges that do not fit the grid dimensions are skipped.
pub fn render_text_maze(maze: &Graph,
                        dimensions: RectGridDimensions,
                        options: &RenderOptions)
                        -> Result<String, GraphError> {

    let text_rows = 2 * dimensions.rows().0 + 1;
    let text_columns = 2 * dimensions.columns().0 + 1;
    let mut canvas = vec![vec![options.wall; text_columns]; text_rows];

    for v in maze.vertices() {
        let coord = maze.coordinate_of(v)?;
        if !dimensions.is_valid_coordinate(coord) {
            tracing::warn!(vertex = %v, ?coord, "vertex lies outside the grid, not drawn");
            continue;
        }
        let body = options.cell_display
            .and_then(|display| display.render_cell_body(v))
            .unwrap_or(options.open);
        canvas[2 * coord.row + 1][2 * coord.column + 1] = body;
    }

    for (s, d) in maze.edges() {
        if let Some((row, column)) = passage_slot(maze.coordinate_of(s)?,
                                                  maze.coordinate_of(d)?,
                                                  dimensions) {
            canvas[row][column] = options.open;
        } else {
            tracing::warn!(from = %s, to = %d, "edge is not between neighbouring cells, not drawn");
        }
    }

    let mut output = String::with_capacity(text_rows * (text_columns * 2 + 1));
    for line in &canvas {
        for glyph in line {
            output.push(*glyph);
            output.push(' ');
        }
        output.push('\n');
    }
    Ok(output)
}

/// Canvas position of the wall between two cells, when they are grid neighbours inside the grid.
fn passage_slot(a: Coordinate,
                b: Coordinate,
                dimensions: RectGridDimensions)
                -> Option<(usize, usize)> {
    if a.manhattan_distance(b) != 1 || !dimensions.is_valid_coordinate(a) ||
       !dimensions.is_valid_coordinate(b) {
        return None;
    }
    let upper_left = if a < b { a } else { b };
    if a.row == b.row {
        Some((2 * upper_left.row + 1, 2 * upper_left.column + 2))
    } else {
        Some((2 * upper_left.row + 2, 2 * upper_left.column + 1))
    }
}

/// Vertex markers for a finished maze: start and exit over an optional extra display.
pub fn render_maze_with_markers(maze: &Graph,
                                dimensions: RectGridDimensions,
                                start: VertexId,
                                exit: VertexId,
                                options: RenderOptionsBuilder)
                                -> Result<String, GraphError> {
    // Both markers must name vertices of the maze
    maze.coordinate_of(start)?;
    maze.coordinate_of(exit)?;

    let markers = StartExitDisplay::new(start, exit);
    let mut layers: Vec<&dyn CellDisplay> = vec![&markers];
    if let Some(extra) = options.options.cell_display {
        layers.push(extra);
    }
    let layered = LayeredDisplay::new(layers);
    let options = options.cell_display(Some(&layered as &dyn CellDisplay)).build();
    render_text_maze(maze, dimensions, &options)
}
