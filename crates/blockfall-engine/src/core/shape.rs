use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest side length of any shape matrix in the catalog (the I-shape).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Display color of a shape and of the cells it leaves behind when locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Square 0/1 matrix describing the occupied cells of a shape.
///
/// The matrix is stored inline (no heap allocation), so every copy is an
/// independent value: rotating the active piece's matrix can never touch the
/// catalog's canonical one.
///
/// Only the top-left `size × size` region is meaningful; rotation happens
/// within that region so bounds never grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Builds a matrix from rows of `#` (occupied) and `.` (empty).
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const) if the rows are not square
    /// or exceed [`MAX_SHAPE_SIZE`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const N: usize>(rows: [&str; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < N {
            let row = rows[y].as_bytes();
            assert!(row.len() == N, "shape matrix must be square");
            let mut x = 0;
            while x < N {
                cells[y][x] = row[x] == b'#';
                x += 1;
            }
            y += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        usize::from(self.size)
    }

    /// Returns whether the local cell `(x, y)` is occupied.
    ///
    /// Cells outside the matrix are reported as empty.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.cells[y][x]
    }

    /// Iterates over the local `(x, y)` coordinates of every occupied cell,
    /// row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        self.cells[..size]
            .iter()
            .enumerate()
            .flat_map(move |(y, row)| {
                row[..size]
                    .iter()
                    .enumerate()
                    .filter(|&(_, occupied)| *occupied)
                    .map(move |(x, _)| (x, y))
            })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// Computed as a transpose followed by reversing every row.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let size = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells[..size].iter_mut().enumerate() {
            for (x, cell) in row[..size].iter_mut().enumerate() {
                *cell = self.cells[size - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Returns the indices of rows that contain at least one occupied cell.
    pub fn occupied_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).filter(|&y| self.cells[y].iter().any(|c| *c))
    }

    /// Returns the indices of columns that contain at least one occupied cell.
    pub fn occupied_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).filter(|&x| self.cells.iter().any(|row| row[x]))
    }
}

/// Identifies one of the seven catalog shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    I = 0,
    J = 1,
    L = 2,
    O = 3,
    S = 4,
    T = 5,
    Z = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shapes in the catalog.
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Returns the catalog entry for this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        CATALOG[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.shape().color
    }

    /// Returns the spawn-orientation matrix.
    #[must_use]
    pub const fn matrix(self) -> ShapeMatrix {
        self.shape().matrix
    }

    /// Returns the single character name of this shape.
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::T => 'T',
            ShapeKind::Z => 'Z',
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A catalog entry: name, display color and spawn-orientation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
    pub matrix: ShapeMatrix,
}

/// The fixed shape catalog, indexed by `ShapeKind as usize`.
pub const CATALOG: [Shape; ShapeKind::LEN] = [
    Shape {
        kind: ShapeKind::I,
        color: Color::rgb(80, 227, 230),
        matrix: ShapeMatrix::from_rows([".#..", ".#..", ".#..", ".#.."]),
    },
    Shape {
        kind: ShapeKind::J,
        color: Color::rgb(36, 95, 223),
        matrix: ShapeMatrix::from_rows([".#.", ".#.", "##."]),
    },
    Shape {
        kind: ShapeKind::L,
        color: Color::rgb(223, 173, 36),
        matrix: ShapeMatrix::from_rows([".#.", ".#.", ".##"]),
    },
    Shape {
        kind: ShapeKind::O,
        color: Color::rgb(223, 217, 36),
        matrix: ShapeMatrix::from_rows(["##", "##"]),
    },
    Shape {
        kind: ShapeKind::S,
        color: Color::rgb(48, 211, 56),
        matrix: ShapeMatrix::from_rows([".##", "##.", "..."]),
    },
    Shape {
        kind: ShapeKind::T,
        color: Color::rgb(132, 61, 198),
        matrix: ShapeMatrix::from_rows(["...", "###", ".#."]),
    },
    Shape {
        kind: ShapeKind::Z,
        color: Color::rgb(227, 78, 78),
        matrix: ShapeMatrix::from_rows(["##.", ".##", "..."]),
    },
];

/// Picks a catalog shape uniformly at random.
pub fn random_shape<R>(rng: &mut R) -> Shape
where
    R: Rng + ?Sized,
{
    rng.random::<ShapeKind>().shape()
}
