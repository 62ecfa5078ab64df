//! Board coordinates: files, ranks, squares, and direction offsets.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a square from algebraic text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("expected 2 characters, got {0}")]
    BadLength(usize),

    #[error("file '{0}' is outside a-h")]
    FileOutOfDomain(char),

    #[error("rank '{0}' is outside 1-8")]
    RankOutOfDomain(char),
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Shifts the file by `delta`, returning `None` if the result leaves a-h.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let idx = self as u8 as i8 + delta;
        if idx < 0 {
            None
        } else {
            File::from_index(idx as u8)
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Shifts the rank by `delta`, returning `None` if the result leaves 1-8.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let idx = self as u8 as i8 + delta;
        if idx < 0 {
            None
        } else {
            Rank::from_index(idx as u8)
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A direction vector, measured in files and ranks.
///
/// Used for the sliding-piece walker and the fixed knight/king step tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub file: i8,
    pub rank: i8,
}

impl Offset {
    /// Creates a new offset.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Offset { file, rank }
    }
}

/// A square on the chess board, an ordered (file, rank) pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// Creates a square from index (0-63), a1 = 0 .. h8 = 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            match (File::from_index(index % 8), Rank::from_index(index / 8)) {
                (Some(file), Some(rank)) => Some(Square { file, rank }),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let mut chars = s.chars();
        let (fc, rc) = match (chars.next(), chars.next(), chars.next()) {
            (Some(fc), Some(rc), None) => (fc, rc),
            _ => return Err(SquareError::BadLength(s.chars().count())),
        };
        let file = File::from_char(fc).ok_or(SquareError::FileOutOfDomain(fc))?;
        let rank = Rank::from_char(rc).ok_or(SquareError::RankOutOfDomain(rc))?;
        Ok(Square { file, rank })
    }

    /// Returns the index (0-63) in little-endian rank-file order.
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank.index() * 8 + self.file.index()) as usize
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Returns the square reached by moving along `offset`, or `None` if
    /// that leaves the board.
    #[inline]
    pub const fn offset(self, offset: Offset) -> Option<Self> {
        match (self.file.offset(offset.file), self.rank.offset(offset.rank)) {
            (Some(file), Some(rank)) => Some(Square { file, rank }),
            _ => None,
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file, self.rank)
    }

    /// Returns true if this square is light-colored.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.file.index() + self.rank.index()) % 2 == 1
    }

    // Squares involved in castling.
    pub const A1: Square = Square::new(File::A, Rank::R1);
    pub const C1: Square = Square::new(File::C, Rank::R1);
    pub const D1: Square = Square::new(File::D, Rank::R1);
    pub const E1: Square = Square::new(File::E, Rank::R1);
    pub const F1: Square = Square::new(File::F, Rank::R1);
    pub const G1: Square = Square::new(File::G, Rank::R1);
    pub const H1: Square = Square::new(File::H, Rank::R1);
    pub const A8: Square = Square::new(File::A, Rank::R8);
    pub const C8: Square = Square::new(File::C, Rank::R8);
    pub const D8: Square = Square::new(File::D, Rank::R8);
    pub const E8: Square = Square::new(File::E, Rank::R8);
    pub const F8: Square = Square::new(File::F, Rank::R8);
    pub const G8: Square = Square::new(File::G, Rank::R8);
    pub const H8: Square = Square::new(File::H, Rank::R8);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}
