use rand::{Rng, XorShiftRng};
use smallvec::SmallVec;

use crate::cells::{offset_coordinate, GridCoordinate, GridDirection, Side};
use crate::errors::*;
use crate::units::{Height, Width};
use crate::utils::{self, FnvHashMap};

pub type NodeIndexSmallVec = SmallVec<[usize; 4]>;

/// A single grid cell. The coordinate and the start/end flags are fixed at
/// grid construction; `visited` and `parent` are written during generation.
/// `parent` is the row-major index of the cell this one was carved from, so
/// the parent links of all visited cells form a spanning tree rooted at the
/// start cell.
#[derive(Debug, Clone)]
pub struct Node {
    coord: GridCoordinate,
    visited: bool,
    is_start: bool,
    is_end: bool,
    parent: Option<usize>,
}

impl Node {
    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// A rectangular grid of `Node`s stored in one row-major vector.
///
/// The start cell sits on a random cell of the configured side, the end cell
/// on a random cell of the opposite side. Every orthogonal edge between two
/// cells carries a random weight in [0, 1), drawn once at construction and
/// identical in both directions; only the frontier strategy reads them.
#[derive(Debug)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    start_side: Side,
    nodes: Vec<Node>,
    start: usize,
    end: usize,
    weights: FnvHashMap<(usize, usize), f64>,
}

impl MazeGrid {
    pub fn new(width: Width, height: Height, start_side: Side, rng: &mut XorShiftRng) -> Result<MazeGrid> {

        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            return Err(ErrorKind::InvalidDimensions(w, h).into());
        }

        let (start_coord, end_coord) = endpoint_coordinates(w, h, start_side, rng);
        let start = (start_coord.y as usize * w) + start_coord.x as usize;
        let end = (end_coord.y as usize * w) + end_coord.x as usize;

        let mut nodes = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let index = y * w + x;
                nodes.push(Node {
                    coord: GridCoordinate::new(x as u32, y as u32),
                    visited: false,
                    is_start: index == start,
                    // When both endpoint draws land on the same cell (possible
                    // only when a dimension is 1) the cell stays a plain start
                    // and the grid has no distinct end.
                    is_end: index == end && index != start,
                    parent: None,
                });
            }
        }

        let mut grid = MazeGrid {
            width: w,
            height: h,
            start_side,
            nodes,
            start,
            end,
            weights: utils::fnv_hashmap(2 * w * h),
        };
        grid.assign_edge_weights(rng);
        Ok(grid)
    }

    // One weight per orthogonal edge: scan every node and draw for the edge to
    // the node above, then the node to the left, which covers the whole grid.
    fn assign_edge_weights(&mut self, rng: &mut XorShiftRng) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                if y > 0 {
                    let above = index - self.width;
                    let weight = rng.gen::<f64>();
                    self.weights.insert(edge_key(index, above), weight);
                }
                if x > 0 {
                    let left = index - 1;
                    let weight = rng.gen::<f64>();
                    self.weights.insert(edge_key(index, left), weight);
                }
            }
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn start_side(&self) -> Side {
        self.start_side
    }

    /// Row-major index of the start cell.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Row-major index of the end cell. Equals `start()` in the degenerate
    /// overlap case, where no node carries the end flag.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn index_of(&self, coord: GridCoordinate) -> usize {
        (coord.y as usize * self.width) + coord.x as usize
    }

    /// The in-bounds, not yet visited orthogonal neighbours of a cell, in the
    /// fixed scan order left, right, up, down.
    ///
    /// This is a pure query of the current grid state. Callers must not cache
    /// the result across a visitation change.
    pub fn available_neighbours(&self, index: usize) -> NodeIndexSmallVec {
        const SCAN_ORDER: [GridDirection; 4] = [GridDirection::West,
                                                GridDirection::East,
                                                GridDirection::North,
                                                GridDirection::South];

        let coord = self.nodes[index].coord;
        SCAN_ORDER.iter()
                  .filter_map(|&dir| {
                      offset_coordinate(coord, dir, Width(self.width), Height(self.height))
                  })
                  .map(|neighbour_coord| self.index_of(neighbour_coord))
                  .filter(|&neighbour| !self.nodes[neighbour].visited)
                  .collect()
    }

    /// Carve a passage: record which cell `index` was reached from and mark it
    /// visited. The visited flag is monotonic and the parent link is written
    /// once, so a carved cell is never re-carved.
    pub fn carve(&mut self, index: usize, parent: usize) {
        self.nodes[index].parent = Some(parent);
        self.nodes[index].visited = true;
    }

    #[inline]
    pub fn mark_visited(&mut self, index: usize) {
        self.nodes[index].visited = true;
    }

    /// The weight of the edge between two adjacent cells, identical whichever
    /// way round the cells are given.
    pub fn edge_weight(&self, a: usize, b: usize) -> f64 {
        *self.weights
             .get(&edge_key(a, b))
             .expect("no edge weight between cells that are not orthogonal neighbours")
    }
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

fn endpoint_coordinates(w: usize,
                        h: usize,
                        start_side: Side,
                        rng: &mut XorShiftRng)
                        -> (GridCoordinate, GridCoordinate) {
    match start_side {
        Side::Left => {
            (GridCoordinate::new(0, (rng.gen::<usize>() % h) as u32),
             GridCoordinate::new(w as u32 - 1, (rng.gen::<usize>() % h) as u32))
        }
        Side::Right => {
            (GridCoordinate::new(w as u32 - 1, (rng.gen::<usize>() % h) as u32),
             GridCoordinate::new(0, (rng.gen::<usize>() % h) as u32))
        }
        Side::Top => {
            (GridCoordinate::new((rng.gen::<usize>() % w) as u32, 0),
             GridCoordinate::new((rng.gen::<usize>() % w) as u32, h as u32 - 1))
        }
        Side::Bottom => {
            (GridCoordinate::new((rng.gen::<usize>() % w) as u32, h as u32 - 1),
             GridCoordinate::new((rng.gen::<usize>() % w) as u32, 0))
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::seeded_rng;

    fn grid(w: usize, h: usize, side: Side, seed: u64) -> MazeGrid {
        let mut rng = seeded_rng(seed);
        MazeGrid::new(Width(w), Height(h), side, &mut rng).unwrap()
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut rng = seeded_rng(1);
        for &(w, h) in &[(0, 5), (5, 0), (0, 0)] {
            let err = MazeGrid::new(Width(w), Height(h), Side::Top, &mut rng).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidDimensions(ew, eh) => assert_eq!((ew, eh), (w, h)),
                ref other => panic!("unexpected error kind: {:?}", other),
            }
        }
    }

    #[test]
    fn endpoints_sit_on_the_configured_sides() {
        for seed in 0..20 {
            let g = grid(6, 4, Side::Top, seed);
            assert_eq!(g.node(g.start()).coordinate().y, 0);
            assert_eq!(g.node(g.end()).coordinate().y, 3);

            let g = grid(6, 4, Side::Bottom, seed);
            assert_eq!(g.node(g.start()).coordinate().y, 3);
            assert_eq!(g.node(g.end()).coordinate().y, 0);

            let g = grid(6, 4, Side::Left, seed);
            assert_eq!(g.node(g.start()).coordinate().x, 0);
            assert_eq!(g.node(g.end()).coordinate().x, 5);

            let g = grid(6, 4, Side::Right, seed);
            assert_eq!(g.node(g.start()).coordinate().x, 5);
            assert_eq!(g.node(g.end()).coordinate().x, 0);
        }
    }

    #[test]
    fn endpoint_flags_are_exclusive() {
        let g = grid(5, 5, Side::Top, 3);
        let starts = g.nodes().iter().filter(|n| n.is_start()).count();
        let ends = g.nodes().iter().filter(|n| n.is_end()).count();
        assert_eq!(starts, 1);
        assert_eq!(ends, 1);
        assert!(g.start() != g.end());
        assert!(!g.node(g.start()).is_end());
        assert!(!g.node(g.end()).is_start());
    }

    #[test]
    fn one_by_one_grid_keeps_only_the_start_flag() {
        let g = grid(1, 1, Side::Top, 7);
        assert_eq!(g.start(), 0);
        assert_eq!(g.end(), 0);
        assert!(g.node(0).is_start());
        assert!(!g.node(0).is_end());
    }

    #[test]
    fn available_neighbours_scan_left_right_up_down() {
        let g = grid(3, 3, Side::Top, 11);
        let centre = g.index_of(GridCoordinate::new(1, 1));
        assert_eq!(&*g.available_neighbours(centre), &[3, 5, 1, 7]);

        let corner = g.index_of(GridCoordinate::new(0, 0));
        assert_eq!(&*g.available_neighbours(corner), &[1, 3]);
    }

    #[test]
    fn available_neighbours_skip_visited_cells() {
        let mut g = grid(3, 3, Side::Top, 11);
        let centre = g.index_of(GridCoordinate::new(1, 1));

        g.mark_visited(3); // west of centre
        g.mark_visited(1); // north of centre
        assert_eq!(&*g.available_neighbours(centre), &[5, 7]);

        g.mark_visited(5);
        g.mark_visited(7);
        assert!(g.available_neighbours(centre).is_empty());
    }

    #[test]
    fn carving_links_to_the_parent_and_visits() {
        let mut g = grid(2, 2, Side::Left, 5);
        assert!(!g.node(1).visited());
        assert_eq!(g.node(1).parent(), None);

        g.carve(1, 0);
        assert!(g.node(1).visited());
        assert_eq!(g.node(1).parent(), Some(0));
    }

    #[test]
    fn every_orthogonal_edge_has_a_symmetric_weight() {
        let (w, h) = (4, 3);
        let g = grid(w, h, Side::Top, 13);

        let mut edges = 0;
        for y in 0..h {
            for x in 0..w {
                let index = y * w + x;
                if x > 0 {
                    let weight = g.edge_weight(index, index - 1);
                    assert!(weight >= 0.0 && weight < 1.0);
                    assert_eq!(weight, g.edge_weight(index - 1, index));
                    edges += 1;
                }
                if y > 0 {
                    let weight = g.edge_weight(index, index - w);
                    assert!(weight >= 0.0 && weight < 1.0);
                    assert_eq!(weight, g.edge_weight(index - w, index));
                    edges += 1;
                }
            }
        }
        assert_eq!(edges, 2 * w * h - w - h);
    }

    #[test]
    #[should_panic(expected = "no edge weight")]
    fn non_adjacent_cells_have_no_weight() {
        let g = grid(3, 3, Side::Top, 17);
        g.edge_weight(0, 8);
    }
}
