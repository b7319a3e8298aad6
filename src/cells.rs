use crate::errors::*;
use crate::units::{Height, Width};
use std::convert::From;
use std::str::FromStr;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridDirection {
    North,
    South,
    East,
    West,
}

/// Creates a new `GridCoordinate` offset 1 cell away in the given direction.
/// Returns None when the neighbouring coordinate falls outside the grid.
pub fn offset_coordinate(coord: GridCoordinate,
                         dir: GridDirection,
                         width: Width,
                         height: Height)
                         -> Option<GridCoordinate> {

    let (x, y) = (coord.x, coord.y);
    let (Width(w), Height(h)) = (width, height);
    match dir {
        GridDirection::North => {
            if y > 0 {
                Some(GridCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        GridDirection::South => {
            if (y as usize) < h - 1 {
                Some(GridCoordinate { x, y: y + 1 })
            } else {
                None
            }
        }
        GridDirection::East => {
            if (x as usize) < w - 1 {
                Some(GridCoordinate { x: x + 1, y })
            } else {
                None
            }
        }
        GridDirection::West => {
            if x > 0 {
                Some(GridCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// The edge of the grid that the maze entrance is breached through. The exit
/// is always breached through the opposite edge.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The compass direction pointing out of the grid from this side.
    pub fn outward(self) -> GridDirection {
        match self {
            Side::Top => GridDirection::North,
            Side::Bottom => GridDirection::South,
            Side::Left => GridDirection::West,
            Side::Right => GridDirection::East,
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Side> {
        match s {
            "t" | "top" => Ok(Side::Top),
            "b" | "bottom" => Ok(Side::Bottom),
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            _ => Err(ErrorKind::UnknownSide(s.to_owned()).into()),
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_respect_grid_bounds() {
        let (w, h) = (Width(3), Height(2));
        let gc = |x, y| GridCoordinate::new(x, y);

        assert_eq!(offset_coordinate(gc(0, 0), GridDirection::North, w, h), None);
        assert_eq!(offset_coordinate(gc(0, 0), GridDirection::West, w, h), None);
        assert_eq!(offset_coordinate(gc(0, 0), GridDirection::East, w, h), Some(gc(1, 0)));
        assert_eq!(offset_coordinate(gc(0, 0), GridDirection::South, w, h), Some(gc(0, 1)));

        assert_eq!(offset_coordinate(gc(2, 1), GridDirection::East, w, h), None);
        assert_eq!(offset_coordinate(gc(2, 1), GridDirection::South, w, h), None);
        assert_eq!(offset_coordinate(gc(2, 1), GridDirection::West, w, h), Some(gc(1, 1)));
        assert_eq!(offset_coordinate(gc(2, 1), GridDirection::North, w, h), Some(gc(2, 0)));
    }

    #[test]
    fn side_parsing() {
        assert_eq!("t".parse::<Side>().unwrap(), Side::Top);
        assert_eq!("top".parse::<Side>().unwrap(), Side::Top);
        assert_eq!("b".parse::<Side>().unwrap(), Side::Bottom);
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("r".parse::<Side>().unwrap(), Side::Right);
        assert!("north".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn side_opposites_and_outward() {
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Bottom.opposite(), Side::Top);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);

        assert_eq!(Side::Top.outward(), GridDirection::North);
        assert_eq!(Side::Bottom.outward(), GridDirection::South);
        assert_eq!(Side::Left.outward(), GridDirection::West);
        assert_eq!(Side::Right.outward(), GridDirection::East);
    }
}
