//! Board coordinates.
//!
//! Rank 0 is the top of the board (Black's back rank), rank 7 the bottom
//! (White's back rank), matching the top-to-bottom walk of a FEN placement
//! field. File 0 is the a-file.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;

/// A validated board coordinate. Any held `Square` is in range, so lookups
/// never need to re-check bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Build a square, or `None` if either coordinate is off the board.
    pub const fn new(rank: u8, file: u8) -> Option<Square> {
        if rank < 8 && file < 8 {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Build a square from coordinates known to be in range.
    ///
    /// Panics if either coordinate is out of `[0,8)`.
    pub const fn at(rank: u8, file: u8) -> Square {
        assert!(rank < 8 && file < 8, "square coordinate out of range");
        Square { rank, file }
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    pub const fn file(self) -> u8 {
        self.file
    }

    /// The square `dr` ranks and `df` files away, or `None` past the edge.
    pub fn offset(self, dr: i8, df: i8) -> Option<Square> {
        Square::from_signed(self.rank as i8 + dr, self.file as i8 + df)
    }

    pub(crate) fn from_signed(rank: i8, file: i8) -> Option<Square> {
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Parse algebraic notation (`"e4"`). `None` for anything else.
    pub fn parse(text: &str) -> Option<Square> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = b'8'.checked_sub(bytes[1])?;
        Square::new(rank, file)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'8' - self.rank) as char
        )
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            rank: u8,
            file: u8,
        }

        let raw = Raw::deserialize(deserializer)?;
        Square::new(raw.rank, raw.file)
            .ok_or_else(|| de::Error::custom("square coordinate out of range"))
    }
}
