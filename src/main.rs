use docopt::Docopt;
use error_chain::{bail, quick_main};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};
use tracing_subscriber::EnvFilter;
use treemaze::{
    displays::CellDisplay,
    generators,
    graph::{Graph, VertexId},
    grids::{self, RectGridDimensions},
    pathing,
    renderers::{self, RenderOptionsBuilder},
    units::{ColumnsCount, NodesCount, RowsCount},
};

const USAGE: &str = "Tree mazes

Usage:
    treemaze -h | --help
    treemaze [--rows=<n> --columns=<m>] [--max-cells=<n>] [--seed=<s>] [--text-out=<path>] [--show-distances] [--dump-graph] [--wall=<c>] [--open=<c>]

Options:
    -h --help              Show this screen.
    --rows=<n>             Number of maze rows. Asked for on stdin when rows or columns is missing.
    --columns=<m>          Number of maze columns.
    --max-cells=<n>        Largest allowed rows * columns [default: 1000].
    --seed=<s>             Seed for the random generator, repeat a seed to repeat a maze.
    --text-out=<path>      Output file path for the textual rendering of the maze.
    --show-distances       Show the distance from the start to every open cell, in base 36.
    --dump-graph           Print the maze graph: vertex and edge counts, vertices, adjacency lists.
    --wall=<c>             Wall glyph, defaults to X.
    --open=<c>             Open passage glyph, defaults to a space.

The maze is printed one grid row per line: rows run down the screen, columns across.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: Option<usize>,
    flag_columns: Option<usize>,
    flag_max_cells: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_show_distances: bool,
    flag_dump_graph: bool,
    flag_wall: Option<String>,
    flag_open: Option<String>,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            ParseInt(::std::num::ParseIntError);
            Graph(::treemaze::graph::GraphError);
        }
    }
}
use crate::errors::*;

quick_main!(run);

fn run() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (rows, columns) = match (args.flag_rows, args.flag_columns) {
        (Some(rows), Some(columns)) => (rows, columns),
        _ => prompt_for_dimensions(args.flag_max_cells)?,
    };
    let dimensions = RectGridDimensions::checked_new(RowsCount(rows),
                                                     ColumnsCount(columns),
                                                     NodesCount(args.flag_max_cells))
        .ok_or_else(|| {
            format!("Both maze dimensions must be greater than 0 and their product at most {}, \
                     got {} x {}.",
                    args.flag_max_cells,
                    rows,
                    columns)
        })?;
    let grid = grids::rect_grid_graph(dimensions);

    let start = VertexId(0);
    let maze = generators::recursive_backtracker(&grid, start, args.flag_seed)?;
    let exit = pathing::farthest_vertex(&maze, start)?;
    tracing::info!(%exit, edges = maze.edge_count(), "maze ready");

    if args.flag_dump_graph {
        print!("{}", maze);
    }

    let distances = if args.flag_show_distances {
        Some(pathing::Distances::for_graph(&maze, start)?)
    } else {
        None
    };

    let wall = glyph_arg(&args.flag_wall, renderers::DEFAULT_WALL)?;
    let open = glyph_arg(&args.flag_open, renderers::DEFAULT_OPEN)?;
    let render_options = RenderOptionsBuilder::new()
        .wall(wall)
        .open(open)
        .cell_display(distances.as_ref().map(|d| d as &dyn CellDisplay));

    let text = renderers::render_maze_with_markers(&maze, dimensions, start, exit, render_options)?;
    write_maze(&maze, &text, &args.flag_text_out)
}

fn prompt_for_dimensions(max_cells: usize) -> Result<(usize, usize)> {
    println!("Enter dimensions for maze (both numbers must be greater than 0, and their product \
              should be at most {}): ",
             max_cells);

    let stdin = io::stdin();
    let mut numbers = Vec::with_capacity(2);
    for line in stdin.lock().lines() {
        let line = line?;
        for word in line.split_whitespace() {
            numbers.push(word.parse::<usize>()?);
        }
        if numbers.len() >= 2 {
            break;
        }
    }

    match numbers[..] {
        [rows, columns, ..] => Ok((rows, columns)),
        _ => bail!("Expected two maze dimensions on stdin."),
    }
}

fn glyph_arg(arg: &Option<String>, default: char) -> Result<char> {
    match arg {
        None => Ok(default),
        Some(text) => renderers::parse_glyph(text)
            .ok_or_else(|| format!("Maze glyphs must be a single character, got {:?}.", text).into()),
    }
}

fn write_maze(maze: &Graph, text: &str, text_out: &str) -> Result<()> {
    let banner = "Start at the S and find your way to the question mark.";
    if text_out.is_empty() {
        println!("{}", banner);
        print!("{}", text);
    } else {
        write_text_to_file(text, text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", text_out))?;
        tracing::info!(path = text_out, cells = maze.vertex_count(), "maze written");
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
