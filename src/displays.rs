use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::generators::FrameSink;
use crate::grid::MazeGrid;
use crate::lattice::{Lattice, LatticeCell};

// Background colours for the two-spaces-per-cell block rendering: walls
// white, passages black, the active cell red while animating.
const WHITE_BG: &str = "\x1b[47m";
const BLACK_BG: &str = "\x1b[40m";
const RED_BG: &str = "\x1b[41m";
const RESET: &str = "\x1b[0m";

const ALT_BUFFER: &str = "\x1b[?1049h";
const ORIGINAL_BUFFER: &str = "\x1b[?1049l";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

const FRAME_PAUSE: Duration = Duration::from_millis(100);

/// Plain character rendering: `X` for walls, a space for passages, `0` for
/// the cursor, cells joined by single spaces. Mostly useful for debugging
/// and for byte-comparing mazes in tests.
impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row_index, row) in self.rows().enumerate() {
            if row_index > 0 {
                f.write_str("\n")?;
            }
            for (cell_index, cell) in row.iter().enumerate() {
                if cell_index > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(match *cell {
                    LatticeCell::Wall => "X",
                    LatticeCell::Passage => " ",
                    LatticeCell::Cursor => "0",
                })?;
            }
        }
        Ok(())
    }
}

/// Write the lattice as background-coloured double-space blocks, one line
/// per lattice row. The cursor is painted red only when `colour_cursor` is
/// set; the final still of a finished maze paints it like any passage.
pub fn paint_lattice<W: Write>(out: &mut W, lattice: &Lattice, colour_cursor: bool) -> io::Result<()> {
    for row in lattice.rows() {
        for &cell in row {
            let background = match cell {
                LatticeCell::Wall => WHITE_BG,
                LatticeCell::Passage => BLACK_BG,
                LatticeCell::Cursor => {
                    if colour_cursor {
                        RED_BG
                    } else {
                        BLACK_BG
                    }
                }
            };
            write!(out, "{}  {}", background, RESET)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Per-step sink that repaints the maze in place in the terminal.
///
/// The first frame switches to the alternate screen buffer and hides the
/// cursor; later frames move the cursor back up over the previous paint.
/// Callers must `finish()` to restore the terminal once generation is done.
pub struct TextAnimator<W: Write> {
    out: W,
    lattice_rows: usize,
    frame_pause: Duration,
    started: bool,
}

impl<W: Write> TextAnimator<W> {
    pub fn new(out: W, grid: &MazeGrid) -> TextAnimator<W> {
        TextAnimator::with_pause(out, grid, FRAME_PAUSE)
    }

    pub fn with_pause(out: W, grid: &MazeGrid, frame_pause: Duration) -> TextAnimator<W> {
        TextAnimator {
            out,
            lattice_rows: 2 * grid.height() + 1,
            frame_pause,
            started: false,
        }
    }

    /// Leave the alternate screen buffer and show the cursor again.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.started {
            write!(self.out, "{}{}", ORIGINAL_BUFFER, SHOW_CURSOR)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn paint_frame(&mut self, lattice: &Lattice) -> io::Result<()> {
        if self.started {
            write!(self.out, "\x1b[{}A", self.lattice_rows)?;
        } else {
            write!(self.out, "{}{}", ALT_BUFFER, HIDE_CURSOR)?;
            self.started = true;
        }
        thread::sleep(self.frame_pause);
        paint_lattice(&mut self.out, lattice, true)?;
        self.out.flush()
    }
}

impl<W: Write> FrameSink for TextAnimator<W> {
    fn frame(&mut self, lattice: &Lattice) {
        // A failed frame paint is reported but never interrupts generation.
        if let Err(err) = self.paint_frame(lattice) {
            eprintln!("error painting frame: {}", err);
        }
    }
}
