//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their four rotation states laid out on the
//! SRS (Super Rotation System) bounding boxes. Rows grow downward.

use crate::error::{Error, Result};
use ratatui::style::Color;

/// A (row, col) pair, either relative to a block's bounding box or absolute
/// on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate by another position used as an offset
    pub fn offset_by(self, offset: Position) -> Position {
        Position::new(self.row + offset.row, self.col + offset.col)
    }
}

/// The 7 tetromino kinds. The discriminant is the value stored in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockKind {
    I = 1, // Cyan - long bar
    J,     // Blue
    L,     // Orange
    O,     // Yellow - square
    S,     // Green
    T,     // Purple
    Z,     // Red
}

type Shape = [Position; 4];

const fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

// Indexed by [kind ordinal - 1][rotation index].
const SHAPES: [[Shape; 4]; 7] = [
    // I
    [
        [p(1, 0), p(1, 1), p(1, 2), p(1, 3)],
        [p(0, 2), p(1, 2), p(2, 2), p(3, 2)],
        [p(2, 0), p(2, 1), p(2, 2), p(2, 3)],
        [p(0, 1), p(1, 1), p(2, 1), p(3, 1)],
    ],
    // J
    [
        [p(0, 0), p(1, 0), p(1, 1), p(1, 2)],
        [p(0, 1), p(0, 2), p(1, 1), p(2, 1)],
        [p(1, 0), p(1, 1), p(1, 2), p(2, 2)],
        [p(0, 1), p(1, 1), p(2, 0), p(2, 1)],
    ],
    // L
    [
        [p(0, 2), p(1, 0), p(1, 1), p(1, 2)],
        [p(0, 1), p(1, 1), p(2, 1), p(2, 2)],
        [p(1, 0), p(1, 1), p(1, 2), p(2, 0)],
        [p(0, 0), p(0, 1), p(1, 1), p(2, 1)],
    ],
    // O doesn't rotate
    [
        [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
        [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
        [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
        [p(0, 0), p(0, 1), p(1, 0), p(1, 1)],
    ],
    // S
    // North: .SS    East: S.    South: ...   West: S.
    //        SS.          SS           .SS        SS
    //                     .S           SS.        .S
    [
        [p(0, 1), p(0, 2), p(1, 0), p(1, 1)],
        [p(0, 1), p(1, 1), p(1, 2), p(2, 2)],
        [p(1, 1), p(1, 2), p(2, 0), p(2, 1)],
        [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
    ],
    // T
    [
        [p(0, 1), p(1, 0), p(1, 1), p(1, 2)],
        [p(0, 1), p(1, 1), p(1, 2), p(2, 1)],
        [p(1, 0), p(1, 1), p(1, 2), p(2, 1)],
        [p(0, 1), p(1, 0), p(1, 1), p(2, 1)],
    ],
    // Z
    [
        [p(0, 0), p(0, 1), p(1, 1), p(1, 2)],
        [p(0, 2), p(1, 1), p(1, 2), p(2, 1)],
        [p(1, 0), p(1, 1), p(2, 1), p(2, 2)],
        [p(0, 1), p(1, 0), p(1, 1), p(2, 0)],
    ],
];

impl BlockKind {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            BlockKind::I => Color::Cyan,
            BlockKind::J => Color::Blue,
            BlockKind::L => Color::Rgb(255, 165, 0), // Orange
            BlockKind::O => Color::Yellow,
            BlockKind::S => Color::Green,
            BlockKind::T => Color::Magenta,
            BlockKind::Z => Color::Red,
        }
    }

    /// Get all kinds in ordinal order, the contents of one bag
    pub fn all() -> [BlockKind; 7] {
        [
            BlockKind::I,
            BlockKind::J,
            BlockKind::L,
            BlockKind::O,
            BlockKind::S,
            BlockKind::T,
            BlockKind::Z,
        ]
    }

    /// The nonzero value this kind leaves in a grid cell
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`BlockKind::ordinal`]
    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        match ordinal {
            1..=7 => Ok(Self::all()[usize::from(ordinal) - 1]),
            _ => Err(Error::InvalidArgument(format!(
                "invalid block kind ordinal {ordinal}"
            ))),
        }
    }

    /// Get the 4 relative (row, col) tiles for this kind at a given rotation
    pub fn shape(&self, rotation: Rotation) -> [Position; 4] {
        SHAPES[usize::from(self.ordinal()) - 1][rotation.index()]
    }

    /// Spawn column: the 4-wide I box starts one column further left so
    /// every kind ends up horizontally centred on a 10-wide grid.
    pub fn spawn_col(&self) -> i32 {
        match self {
            BlockKind::I => 3,
            _ => 4,
        }
    }

    /// Two-letter label used by text renderers
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::I => "II",
            BlockKind::J => "JJ",
            BlockKind::L => "LL",
            BlockKind::O => "OO",
            BlockKind::S => "SS",
            BlockKind::T => "TT",
            BlockKind::Z => "ZZ",
        }
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation index in 0..4
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// One tetromino: a fixed kind plus its current rotation state.
///
/// Cheap to copy, so candidate rotations are explored on a copy and the
/// original is only replaced once the candidate is known to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    rotation: Rotation,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = self.rotation.cw();
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation = self.rotation.ccw();
    }

    pub fn rotate(&mut self, direction: RotationDirection) {
        match direction {
            RotationDirection::Clockwise => self.rotate_clockwise(),
            RotationDirection::CounterClockwise => self.rotate_counter_clockwise(),
        }
    }

    /// The 4 tiles of the current rotation, relative to the bounding box
    pub fn tile_positions(&self) -> [Position; 4] {
        self.kind.shape(self.rotation)
    }
}
