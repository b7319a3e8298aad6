#![cfg_attr(feature="clippy", feature(plugin))]
#![cfg_attr(feature="clippy", plugin(clippy))]

use docopt::Docopt;
use serde_derive::Deserialize;
use mazegen::{
    cells::Side,
    displays::{self, TextAnimator},
    generators::{self, Algorithm},
    grid::MazeGrid,
    renderers::{self, GifRecorder},
    units::{Height, Scale, Width},
};
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver [options]
    mazegen_driver -h | --help

Options:
    -h --help           Show this screen.
    --width=<w>         Maze width in cells [default: 10].
    --height=<h>        Maze height in cells [default: 10].
    --start=<side>      Side of the maze to start on, one of t|b|l|r [default: t].
    --function=<name>   Generation function, one of dfs|bfs|prim [default: dfs].
    --seed=<n>          Random seed. Defaults to the current unix time, so pass one for a reproducible maze.
    --scale=<n>         Pixels per lattice cell in image output [default: 1].
    --output=<type>     Animation medium when --animate is set, image|text [default: image].
    --animate           Animate the generation process.
    --image-out=<path>  Output file path for the finished maze image [default: maze.png].
    --gif-out=<path>    Output file path for the recorded animation [default: maze.gif].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_start: String,
    flag_function: String,
    flag_seed: Option<u64>,
    flag_scale: usize,
    flag_output: String,
    flag_animate: bool,
    flag_image_out: String,
    flag_gif_out: String,
}

// We'll put our errors in an `errors` module; `error_chain!` creates the
// Error, ErrorKind, ResultExt and Result types and the From conversions
// that let ? work for our `Error`.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let seed = args.flag_seed.unwrap_or_else(unix_time_seed);
    let mut rng = generators::seeded_rng(seed);

    let start_side = args.flag_start.parse::<Side>()?;
    let algorithm = args.flag_function.parse::<Algorithm>()?;

    let mut grid = MazeGrid::new(Width(args.flag_width),
                                 Height(args.flag_height),
                                 start_side,
                                 &mut rng)?;

    if args.flag_animate {
        if args.flag_output == "text" {
            let stdout = io::stdout();
            let mut animator = TextAnimator::new(stdout.lock(), &grid);
            generators::generate(&mut grid, algorithm, &mut rng, Some(&mut animator));
            animator.finish()?;
        } else {
            let mut recorder = GifRecorder::new(&grid, Scale(args.flag_scale));
            generators::generate(&mut grid, algorithm, &mut rng, Some(&mut recorder));
            recorder.save(&args.flag_gif_out)?;
        }
    } else {
        generators::generate(&mut grid, algorithm, &mut rng, None);
    }

    // The finished maze always goes to the terminal and to the image file,
    // whatever the animation settings were.
    let lattice = grid.lattice(None);
    {
        let stdout = io::stdout();
        displays::paint_lattice(&mut stdout.lock(), &lattice, false)?;
    }
    renderers::write_png(&lattice, Scale(args.flag_scale), &args.flag_image_out)?;

    Ok(())
}

fn unix_time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
