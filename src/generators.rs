use rand::{Rng, SeedableRng, XorShiftRng};
use std::collections::VecDeque;
use std::str::FromStr;

use crate::errors::*;
use crate::grid::MazeGrid;
use crate::lattice::Lattice;

/// The closed set of maze generation strategies.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
    Frontier,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        match s {
            "dfs" => Ok(Algorithm::DepthFirst),
            "bfs" => Ok(Algorithm::BreadthFirst),
            "prim" => Ok(Algorithm::Frontier),
            _ => Err(ErrorKind::UnknownAlgorithm(s.to_owned()).into()),
        }
    }
}

/// Expand a 64 bit seed into the 128 bit xorshift state. The mixing constants
/// keep at least one state word non-zero for every input, which `XorShiftRng`
/// requires.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    XorShiftRng::from_seed([low, high, low ^ 0x9e37_79b9, high ^ 0x85eb_ca6b])
}

/// Per-step observer of a running generation, fed one freshly rendered
/// lattice snapshot per carve/backtrack/frontier pick. Implemented by the
/// terminal animator and the gif recorder; generation is fully usable
/// without one.
pub trait FrameSink {
    fn frame(&mut self, lattice: &Lattice);
}

/// Run `algorithm` over the grid to completion, invoking the sink (when
/// given) once for the seeded start cell and once after every step.
///
/// Generation cannot fail on a constructed grid: each strategy only ever
/// visits unvisited in-bounds neighbours and the visited flag is monotonic,
/// so it terminates in at most `width * height` visitations.
pub fn generate(grid: &mut MazeGrid,
                algorithm: Algorithm,
                rng: &mut XorShiftRng,
                mut sink: Option<&mut dyn FrameSink>) {

    let mut strategy = Strategy::start(algorithm, grid);
    if let Some(observer) = sink.as_mut() {
        observer.frame(&grid.lattice(Some(grid.start())));
    }
    while let Some(cursor) = strategy.step(grid, rng) {
        if let Some(observer) = sink.as_mut() {
            observer.frame(&grid.lattice(Some(cursor)));
        }
    }
}

/// Strategy-specific generation state. All three strategies share the same
/// step contract: mutate the grid by one carve/backtrack/pick and report the
/// cell the cursor rests on, or `None` once no reachable unvisited cell is
/// left.
enum Strategy {
    DepthFirst { cursor: usize, finished: bool },
    BreadthFirst { queue: VecDeque<usize>, finished: bool },
    Frontier { frontier: Vec<usize> },
}

impl Strategy {
    fn start(algorithm: Algorithm, grid: &mut MazeGrid) -> Strategy {
        let start = grid.start();
        grid.mark_visited(start);
        match algorithm {
            Algorithm::DepthFirst => {
                Strategy::DepthFirst {
                    cursor: start,
                    finished: false,
                }
            }
            Algorithm::BreadthFirst => {
                let mut queue = VecDeque::new();
                queue.push_back(start);
                Strategy::BreadthFirst {
                    queue,
                    finished: false,
                }
            }
            Algorithm::Frontier => Strategy::Frontier { frontier: vec![start] },
        }
    }

    fn step(&mut self, grid: &mut MazeGrid, rng: &mut XorShiftRng) -> Option<usize> {
        match *self {
            Strategy::DepthFirst { ref mut cursor, ref mut finished } => {
                depth_first_step(grid, rng, cursor, finished)
            }
            Strategy::BreadthFirst { ref mut queue, ref mut finished } => {
                breadth_first_step(grid, rng, queue, finished)
            }
            Strategy::Frontier { ref mut frontier } => frontier_step(grid, frontier),
        }
    }
}

/// One transition of the depth-first carver.
///
/// Carve a random available neighbour and move onto it; with nothing
/// available, retreat to the parent, and finish once the exhausted cursor is
/// the parentless start. Landing on the end cell does not carve onwards:
/// the cursor steps straight back to the end's parent and exploration
/// resumes from there.
fn depth_first_step(grid: &mut MazeGrid,
                    rng: &mut XorShiftRng,
                    cursor: &mut usize,
                    finished: &mut bool)
                    -> Option<usize> {
    if *finished {
        return None;
    }

    if grid.node(*cursor).is_end() {
        *cursor = grid.node(*cursor)
                      .parent()
                      .expect("the end cell was reached without being carved from a parent");
        return Some(*cursor);
    }

    let available = grid.available_neighbours(*cursor);
    if available.is_empty() {
        match grid.node(*cursor).parent() {
            Some(parent) => {
                *cursor = parent;
                Some(parent)
            }
            None => {
                *finished = true;
                None
            }
        }
    } else {
        let next = available[rng.gen::<usize>() % available.len()];
        grid.carve(next, *cursor);
        *cursor = next;
        Some(next)
    }
}

/// One transition of the breadth-first carver.
///
/// The front cell carves a random number of its shuffled available
/// neighbours; a draw of zero is floored to one whenever neighbours exist so
/// the walk cannot stall. The strategy is kept as found in its source design:
/// it favours long straight corridors and may finish with unvisited pockets.
fn breadth_first_step(grid: &mut MazeGrid,
                      rng: &mut XorShiftRng,
                      queue: &mut VecDeque<usize>,
                      finished: &mut bool)
                      -> Option<usize> {
    if *finished {
        return None;
    }

    let current = *queue.front().expect("the queue drained before generation finished");

    let mut available = grid.available_neighbours(current);
    rng.shuffle(&mut available);
    let mut take = rng.gen::<usize>() % (available.len() + 1);
    if take == 0 && !available.is_empty() {
        take = 1;
    }
    for &next in available.iter().take(take) {
        grid.carve(next, current);
        queue.push_back(next);
    }

    if queue.len() == 1 {
        *finished = true;
    } else {
        queue.pop_front();
    }
    Some(current)
}

/// One transition of the frontier (Prim style) carver.
///
/// Scan the frontier in insertion order, dropping members with no available
/// neighbour, and carve the globally minimum-weight (frontier, neighbour)
/// edge; an equal weight never displaces an earlier scanned pair, so ties
/// resolve by scan order rather than by a fresh random draw.
fn frontier_step(grid: &mut MazeGrid, frontier: &mut Vec<usize>) -> Option<usize> {
    let mut best: Option<(usize, usize, f64)> = None;

    frontier.retain(|&member| {
        let available = grid.available_neighbours(member);
        if available.is_empty() {
            return false;
        }
        for &neighbour in available.iter() {
            let weight = grid.edge_weight(member, neighbour);
            let improves = match best {
                Some((_, _, best_weight)) => weight < best_weight,
                None => true,
            };
            if improves {
                best = Some((member, neighbour, weight));
            }
        }
        true
    });

    if frontier.is_empty() {
        return None;
    }

    let (parent, next, _) = best.expect("a non-empty frontier must offer a candidate edge");
    grid.carve(next, parent);
    frontier.push(next);
    Some(parent)
}
