// Two coordinate systems live side by side:
//   - `File`/`Rank`/`Location` are board labels ("a1", "A9", "i-1"). They are anchored at the
//     canonical 8x8 frame but extend in every direction.
//   - `Coord` is a (row, col) index into the grid. Row 0 is the top-most row.

use std::cmp;
use std::fmt;
use std::ops;
use std::str::FromStr;

use derive_new::new;
use serde::{Deserialize, Serialize};


pub const NUM_CANONICAL_ROWS: i32 = 8;
pub const NUM_CANONICAL_COLS: i32 = 8;


// File 'a' has index 0. Files to the right continue with lowercase letters ('i', 'j', ...),
// files to the left of 'a' are uppercase letters counted backwards: 'A' is -1, 'B' is -2, etc.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct File {
    idx: i32,
}

impl File {
    pub const A: File = File::from_zero_based(0);
    pub const H: File = File::from_zero_based(NUM_CANONICAL_COLS - 1);

    pub const fn from_zero_based(idx: i32) -> Self { Self { idx } }
    pub const fn to_zero_based(self) -> i32 { self.idx }

    pub fn from_label(ch: char) -> Option<Self> {
        let code = ch as i32;
        if code >= 'a' as i32 {
            Some(Self::from_zero_based(code - 'a' as i32))
        } else if code >= 'A' as i32 {
            Some(Self::from_zero_based(-(code - '@' as i32)))
        } else {
            None
        }
    }

    pub fn to_label(self) -> char {
        let code = if self.idx < 0 {
            '@' as i64 + (self.idx as i64).abs()
        } else {
            'a' as i64 + self.idx as i64
        };
        u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn is_canonical(self) -> bool { (0..NUM_CANONICAL_COLS).contains(&self.idx) }
}

impl ops::Add<i32> for File {
    type Output = Self;
    fn add(self, other: i32) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub<i32> for File {
    type Output = Self;
    fn sub(self, other: i32) -> Self::Output { Self::from_zero_based(self.idx - other) }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.to_label()) }
}


// Rank number as written in a location: 1 to 8 on a classic board, but can be zero, negative or
// above 8 once the board grows.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank {
    value: i32,
}

impl Rank {
    pub const FIRST: Rank = Rank::from_one_based(1);
    pub const EIGHTH: Rank = Rank::from_one_based(NUM_CANONICAL_ROWS);

    pub const fn from_one_based(value: i32) -> Self { Self { value } }
    pub const fn to_one_based(self) -> i32 { self.value }

    pub fn is_canonical(self) -> bool { (1..=NUM_CANONICAL_ROWS).contains(&self.value) }
}

impl ops::Add<i32> for Rank {
    type Output = Self;
    fn add(self, other: i32) -> Self::Output { Self::from_one_based(self.value + other) }
}

impl ops::Sub<i32> for Rank {
    type Output = Self;
    fn sub(self, other: i32) -> Self::Output { Self::from_one_based(self.value - other) }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.value) }
}


// Locations are ordered the way they appear on the board: top rank first, then left to right.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    pub file: File,
    pub rank: Rank,
}

impl Location {
    // Only the canonical spelling is accepted: "a8", but not "a08", "a+8" or "a-0".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = File::from_label(chars.next()?)?;
        let rank = Rank::from_one_based(chars.as_str().parse().ok()?);
        let location = Location { file, rank };
        (location.to_string() == s).then_some(location)
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        other.rank.cmp(&self.rank).then_with(|| self.file.cmp(&other.file))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for Location {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::from_algebraic(s).ok_or_else(|| format!("invalid location: {s}"))
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self { location.to_string() }
}

impl TryFrom<String> for Location {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, new, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    // Shifts the coord, returning `None` if it would leave the non-negative quadrant.
    // Whether the result fits into a particular grid is up to the caller.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Coord {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl ops::Sub for Coord {
    // (row delta, col delta)
    type Output = (isize, isize);
    fn sub(self, other: Self) -> Self::Output {
        (
            self.row as isize - other.row as isize,
            self.col as isize - other.col as isize,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_file_labels() {
        assert_eq!(File::A.to_label(), 'a');
        assert_eq!(File::H.to_label(), 'h');
        assert_eq!((File::H + 1).to_label(), 'i');
        assert_eq!((File::A - 1).to_label(), 'A');
        assert_eq!((File::A - 3).to_label(), 'C');
        assert_eq!(File::from_label('B'), Some(File::from_zero_based(-2)));
        assert_eq!(File::from_label('j'), Some(File::from_zero_based(9)));
        assert_eq!(File::from_label('3'), None);
    }

    #[test]
    fn locations() {
        let loc = Location::from_algebraic("A10").unwrap();
        assert_eq!(loc.file, File::from_zero_based(-1));
        assert_eq!(loc.rank, Rank::from_one_based(10));
        assert_eq!(loc.to_string(), "A10");

        let loc: Location = "i-1".parse().unwrap();
        assert_eq!(loc.rank, Rank::from_one_based(-1));
        assert_eq!(loc.to_string(), "i-1");
        assert!(loc.file > File::H);
        assert!(!loc.rank.is_canonical());

        assert_eq!(Location::from_algebraic(""), None);
        assert_eq!(Location::from_algebraic("a"), None);
        assert_eq!(Location::from_algebraic("a+1"), None);
        assert_eq!(Location::from_algebraic("a08"), None);
        assert_eq!(Location::from_algebraic("a-0"), None);
        assert_eq!(Location::from_algebraic("a-05"), None);
        assert_eq!(Location::from_algebraic("a0"), Some(Location::new(File::A, Rank::FIRST - 1)));
        assert_eq!(Location::from_algebraic("i-12").unwrap().to_string(), "i-12");
        assert_eq!(Location::from_algebraic("a1x"), None);
    }

    #[test]
    fn locations_in_board_order() {
        let mut locations = ["a1", "A9", "b8", "a8", "i-1", "h1"]
            .map(|s| Location::from_algebraic(s).unwrap());
        locations.sort();
        assert_eq!(locations.map(|l| l.to_string()), ["A9", "a8", "b8", "a1", "h1", "i-1"]);
    }

    #[test]
    fn coord_offset() {
        let c = Coord::new(1, 1);
        assert_eq!(c.offset(-1, 1), Some(Coord::new(0, 2)));
        assert_eq!(c.offset(-2, 0), None);
        assert_eq!(Coord::new(3, 0) - Coord::new(1, 2), (2, -2));
    }
}
