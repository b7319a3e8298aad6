use crate::cells::GridDirection;
use crate::grid::MazeGrid;

/// One cell of the rendered lattice.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum LatticeCell {
    Wall,
    Passage,
    /// The generation algorithm's active cell, only distinguished while a
    /// snapshot is taken mid-generation.
    Cursor,
}

/// A `(2*height+1) x (2*width+1)` wall/passage view of a `MazeGrid`.
///
/// Grid cell `(x, y)` maps to lattice cell `(2x+1, 2y+1)`; the odd/even cells
/// between and around them are walls unless breached by a carved corridor or
/// by the entrance/exit openings in the boundary.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Lattice {
    width: usize,
    height: usize,
    cells: Vec<LatticeCell>,
}

impl Lattice {
    /// Derive the lattice for the grid's current state. A pure query: calling
    /// it mid-generation (for animation frames) and after completion runs the
    /// identical logic, and repeated calls on an unchanged grid are equal.
    ///
    /// `cursor` is the row-major index of the algorithm's active cell, if any.
    pub fn snapshot(grid: &MazeGrid, cursor: Option<usize>) -> Lattice {
        let mut lattice = Lattice::filled_with_walls(grid.width(), grid.height());

        for (index, node) in grid.nodes().iter().enumerate() {
            if !node.visited() && !node.is_start() && !node.is_end() {
                continue;
            }
            let coord = node.coordinate();
            let (lx, ly) = (2 * coord.x as usize + 1, 2 * coord.y as usize + 1);

            if cursor == Some(index) {
                lattice.set(lx, ly, LatticeCell::Cursor);
            } else {
                lattice.set(lx, ly, LatticeCell::Passage);
            }

            // Entrance and exit are breached through the boundary wall.
            if node.is_start() {
                lattice.breach(lx, ly, grid.start_side().outward());
            } else if node.is_end() {
                lattice.breach(lx, ly, grid.start_side().opposite().outward());
            }

            // The wall cell between a carved node and its parent becomes the
            // corridor that makes the spanning tree visible.
            if let Some(parent) = node.parent() {
                let parent_coord = grid.node(parent).coordinate();
                if parent_coord.x == coord.x {
                    if parent_coord.y < coord.y {
                        lattice.set(lx, ly - 1, LatticeCell::Passage);
                    } else {
                        lattice.set(lx, ly + 1, LatticeCell::Passage);
                    }
                } else if parent_coord.x < coord.x {
                    lattice.set(lx - 1, ly, LatticeCell::Passage);
                } else {
                    lattice.set(lx + 1, ly, LatticeCell::Passage);
                }
            }
        }

        lattice
    }

    fn filled_with_walls(grid_width: usize, grid_height: usize) -> Lattice {
        let width = 2 * grid_width + 1;
        let height = 2 * grid_height + 1;
        Lattice {
            width,
            height,
            cells: vec![LatticeCell::Wall; width * height],
        }
    }

    fn breach(&mut self, lx: usize, ly: usize, outward: GridDirection) {
        match outward {
            GridDirection::West => self.set(lx - 1, ly, LatticeCell::Passage),
            GridDirection::East => self.set(lx + 1, ly, LatticeCell::Passage),
            GridDirection::North => self.set(lx, ly - 1, LatticeCell::Passage),
            GridDirection::South => self.set(lx, ly + 1, LatticeCell::Passage),
        }
    }

    /// Lattice width, `2 * grid width + 1`.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lattice height, `2 * grid height + 1`.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> LatticeCell {
        self.cells[y * self.width + x]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, cell: LatticeCell) {
        self.cells[y * self.width + x] = cell;
    }

    /// Iterate the lattice one row at a time, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[LatticeCell]> {
        self.cells.chunks(self.width)
    }
}

impl MazeGrid {
    /// Render the current grid state, see `Lattice::snapshot`.
    pub fn lattice(&self, cursor: Option<usize>) -> Lattice {
        Lattice::snapshot(self, cursor)
    }
}
