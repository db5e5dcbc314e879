use docopt::Docopt;
use mazes3d::{
    cells::CoordinateSmallVec,
    generation::{self, SolvedMaze},
    generators,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    pathing::Distances,
    units::{AttemptsCount, CellsCount, Depth, Height, Width},
};
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
    rc::Rc
};

const USAGE: &str = "Mazes3d

Usage:
    mazes3d_driver -h | --help
    mazes3d_driver [--grid-width=<w>] [--grid-height=<h>] [--grid-depth=<d>] [--max-attempts=<n>] [--extra-openings=<c>] [--seed=<s>] [render text [--text-out=<path>] [--show-path|--show-distances|--mark-start-end]]

Options:
    -h --help             Show this screen.
    --grid-width=<w>      The grid width in cells along the x axis [default: 9].
    --grid-height=<h>     The grid height in cells along the y axis [default: 9].
    --grid-depth=<d>      The grid depth in layers along the z axis [default: 5].
    --max-attempts=<n>    Carve and solve attempts before giving up [default: 10].
    --extra-openings=<c>  Breach this many extra random cells after carving. Defaults to min(5, cells / 20).
    --seed=<s>            Seed the random generator for reproducible mazes.
    --text-out=<path>     Output file path for a textual rendering of the maze layers.
    --show-path           Mark the shortest route between the corner cells on the rendering.
    --show-distances      Show each open cell's step distance from the start corner.
    --mark-start-end      Draw an 'S' (start) and 'E' (end) on the corner cells.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_grid_depth: usize,
    flag_max_attempts: usize,
    flag_extra_openings: Option<usize>,
    flag_seed: Option<u32>,
    cmd_render: bool,
    cmd_text: bool,
    flag_text_out: String,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_mark_start_end: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height, depth) = (Width(args.flag_grid_width),
                                  Height(args.flag_grid_height),
                                  Depth(args.flag_grid_depth));
    let cells = CellsCount(args.flag_grid_width * args.flag_grid_height * args.flag_grid_depth);
    let extra_openings = args.flag_extra_openings
                             .map(CellsCount)
                             .unwrap_or_else(|| generators::default_extra_openings(cells));

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::from_seed([seed, 0x9e37_79b9, 0x6a09_e667, 0xb7e1_5162]),
        None => rand::weak_rng(),
    };

    let mut solved = generation::solvable_maze(width,
                                               height,
                                               depth,
                                               AttemptsCount(args.flag_max_attempts),
                                               extra_openings,
                                               &mut rng)
        .chain_err(|| "could not produce a solvable maze")?;

    println!("Solved a {}x{}x{} maze on attempt {} of {}.",
             args.flag_grid_width,
             args.flag_grid_height,
             args.flag_grid_depth,
             solved.attempts.0,
             args.flag_max_attempts);
    println!("Shortest route from corner to corner: {} steps.",
             solved.path.len().saturating_sub(1));

    if args.cmd_text {
        set_maze_griddisplay(&mut solved, &args);

        if args.flag_text_out.is_empty() {
            println!("{}", solved.field);
        } else {
            write_text_to_file(&format!("{}", solved.field), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    Ok(())
}

/// Decide how the open cells of the solved maze are displayed as text:
/// - Nothing in the cells
/// - The shortest route between the corners
/// - Distances from the start corner to every open cell
/// - Start and End corner markers
fn set_maze_griddisplay(solved: &mut SolvedMaze, maze_args: &MazeArgs) {

    if maze_args.flag_show_path {

        let display_path = Rc::new(PathDisplay::new(&solved.path));
        solved.field.set_grid_display(Some(display_path as Rc<GridDisplay>));

    } else if maze_args.flag_show_distances {

        if let Some(distances) = Distances::<u32>::for_field(&solved.field,
                                                             solved.field.start()) {
            solved.field.set_grid_display(Some(Rc::new(distances) as Rc<GridDisplay>));
        }

    } else if maze_args.flag_mark_start_end {

        let start_points = [solved.field.start()]
            .iter()
            .cloned()
            .collect::<CoordinateSmallVec>();
        let end_points = [solved.field.end()]
            .iter()
            .cloned()
            .collect::<CoordinateSmallVec>();
        let display_start_end_points = Rc::new(StartEndPointsDisplay::new(start_points,
                                                                          end_points));
        solved.field.set_grid_display(Some(display_start_end_points as Rc<GridDisplay>));
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
