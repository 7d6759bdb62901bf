use crate::graph::VertexId;
use crate::pathing::Distances;

pub trait CellDisplay {
    /// Glyph drawn in the body of a maze cell.
    /// None leaves the renderer's open glyph in place.
    fn render_cell_body(&self, _: VertexId) -> Option<char> {
        None
    }
}

/// Distances from the start as base 36 digits, wrapping after `z`.
impl CellDisplay for Distances {
    fn render_cell_body(&self, v: VertexId) -> Option<char> {
        self.distance_from_start_to(v)
            .and_then(|d| char::from_digit((d % 36) as u32, 36))
    }
}

#[derive(Debug)]
pub struct StartExitDisplay {
    start: VertexId,
    exit: VertexId,
    start_marker: char,
    exit_marker: char,
}

impl StartExitDisplay {
    pub fn new(start: VertexId, exit: VertexId) -> StartExitDisplay {
        StartExitDisplay {
            start,
            exit,
            start_marker: 'S',
            exit_marker: '?',
        }
    }

    pub fn with_markers(mut self, start_marker: char, exit_marker: char) -> StartExitDisplay {
        self.start_marker = start_marker;
        self.exit_marker = exit_marker;
        self
    }
}

impl CellDisplay for StartExitDisplay {
    fn render_cell_body(&self, v: VertexId) -> Option<char> {
        // For a one cell maze the start wins
        if v == self.start {
            Some(self.start_marker)
        } else if v == self.exit {
            Some(self.exit_marker)
        } else {
            None
        }
    }
}

/// Displays stacked front to back: the first one with something to say about a cell wins.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn CellDisplay>,
}

impl<'a> LayeredDisplay<'a> {
    pub fn new(layers: Vec<&'a dyn CellDisplay>) -> LayeredDisplay<'a> {
        LayeredDisplay { layers }
    }
}

impl<'a> CellDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, v: VertexId) -> Option<char> {
        self.layers.iter().find_map(|display| display.render_cell_body(v))
    }
}
