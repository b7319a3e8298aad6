use std::fs::File;
use std::path::Path;

use gif::{Encoder, Frame, Repeat, SetParameter};
use image;

use crate::errors::*;
use crate::generators::FrameSink;
use crate::grid::MazeGrid;
use crate::lattice::{Lattice, LatticeCell};
use crate::units::Scale;

// Image colours invert the terminal scheme: walls black, passages white,
// the active cell red in animation frames.
const PALETTE: [u8; 9] = [0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0xff, 0x00, 0x00];
const WHITE: u8 = 0;
const BLACK: u8 = 1;
const RED: u8 = 2;

fn palette_index(cell: LatticeCell, colour_cursor: bool) -> u8 {
    match cell {
        LatticeCell::Wall => BLACK,
        LatticeCell::Passage => WHITE,
        LatticeCell::Cursor => {
            if colour_cursor {
                RED
            } else {
                WHITE
            }
        }
    }
}

/// Expand each lattice cell to a `scale` x `scale` block of palette indices,
/// row major.
fn indexed_pixels(lattice: &Lattice, scale: usize, colour_cursor: bool) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(lattice.width() * lattice.height() * scale * scale);
    for row in lattice.rows() {
        for _ in 0..scale {
            for &cell in row {
                let index = palette_index(cell, colour_cursor);
                for _ in 0..scale {
                    pixels.push(index);
                }
            }
        }
    }
    pixels
}

/// Expand each lattice cell to a `scale` x `scale` block of RGB bytes.
pub fn rgb_pixels(lattice: &Lattice, scale: Scale, colour_cursor: bool) -> Vec<u8> {
    let Scale(scale) = scale;
    indexed_pixels(lattice, scale, colour_cursor)
        .into_iter()
        .flat_map(|index| {
            let base = index as usize * 3;
            vec![PALETTE[base], PALETTE[base + 1], PALETTE[base + 2]]
        })
        .collect()
}

/// Save the lattice as a PNG, the cursor painted like any other passage.
pub fn write_png<P: AsRef<Path>>(lattice: &Lattice, scale: Scale, path: P) -> Result<()> {
    let Scale(pixels_per_cell) = scale;
    let width = (lattice.width() * pixels_per_cell) as u32;
    let height = (lattice.height() * pixels_per_cell) as u32;
    let pixels = rgb_pixels(lattice, scale, false);
    image::save_buffer(path, &pixels, width, height, image::ColorType::RGB(8))?;
    Ok(())
}

/// Per-step sink that collects one palette-indexed frame per generation step
/// for encoding as an animated gif.
pub struct GifRecorder {
    frame_width: usize,
    frame_height: usize,
    scale: usize,
    frames: Vec<Vec<u8>>,
}

impl GifRecorder {
    pub fn new(grid: &MazeGrid, scale: Scale) -> GifRecorder {
        let Scale(pixels_per_cell) = scale;
        GifRecorder {
            frame_width: 2 * grid.width() + 1,
            frame_height: 2 * grid.height() + 1,
            scale: pixels_per_cell,
            frames: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Encode all recorded frames, looping forever with no inter-frame
    /// delay.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let width = self.frame_width * self.scale;
        let height = self.frame_height * self.scale;
        if width > u16::max_value() as usize || height > u16::max_value() as usize {
            return Err(format!("gif frame size {}x{} exceeds the format's 65535 pixel limit",
                               width,
                               height)
                               .into());
        }

        let file = File::create(path)?;
        let mut encoder = Encoder::new(file, width as u16, height as u16, &PALETTE)?;
        encoder.set(Repeat::Infinite)?;
        for pixels in &self.frames {
            let frame = Frame::from_indexed_pixels(width as u16, height as u16, pixels, None);
            encoder.write_frame(&frame)?;
        }
        Ok(())
    }
}

impl FrameSink for GifRecorder {
    fn frame(&mut self, lattice: &Lattice) {
        self.frames.push(indexed_pixels(lattice, self.scale, true));
    }
}
