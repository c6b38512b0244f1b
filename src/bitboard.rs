//! Bit-packed cell sets over a runtime-sized rectangular box.
//!
//! A [`Bitboard`] is an unsigned 128-bit word where bit `z + D*y + D*H*x` represents
//! whether cell `(x,y,z)` is occupied. 128 bits covers every box this crate targets
//! (5*5*5 = 125 bits) without reaching for a bignum dependency.

use std::fmt;

/// The dimensions of the box a [`Bitboard`] is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Space {
    pub w: i32,
    pub h: i32,
    pub d: i32,
}

impl Space {
    pub const fn new(w: i32, h: i32, d: i32) -> Self {
        Space { w, h, d }
    }

    pub const fn volume(&self) -> u32 {
        (self.w * self.h * self.d) as u32
    }

    /// Bitboard with every in-box cell set.
    pub fn full_mask(&self) -> Bitboard {
        let mut mask = Bitboard::EMPTY;
        for x in 0..self.w {
            for y in 0..self.h {
                for z in 0..self.d {
                    mask = mask.union(self.l2b(x, y, z).unwrap());
                }
            }
        }
        mask
    }

    /// Maps a cell to its bit, failing if the cell is out of the box.
    pub fn l2b(&self, x: i32, y: i32, z: i32) -> Option<Bitboard> {
        if x < 0 || y < 0 || z < 0 || x >= self.w || y >= self.h || z >= self.d {
            return None;
        }
        let index = z + self.d * y + self.d * self.h * x;
        Some(Bitboard(1u128 << index))
    }

    /// Inverse of `l2b` for a single-bit board. Returns `None` for an empty or
    /// multi-bit board.
    pub fn b2l(&self, bit: Bitboard) -> Option<(i32, i32, i32)> {
        if bit.0.count_ones() != 1 {
            return None;
        }
        let index = bit.0.trailing_zeros() as i32;
        let x = index / (self.d * self.h);
        let rem = index % (self.d * self.h);
        let y = rem / self.d;
        let z = rem % self.d;
        Some((x, y, z))
    }

    /// Every in-box cell, in `l2b` iteration order (x outermost, z innermost).
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        (0..self.w).flat_map(move |x| {
            (0..self.h).flat_map(move |y| (0..self.d).map(move |z| (x, y, z)))
        })
    }
}

/// A set of unit cells, packed into a 128-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bitboard(pub u128);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const fn union(self, other: Bitboard) -> Bitboard {
        Bitboard(self.0 | other.0)
    }

    pub const fn intersection(self, other: Bitboard) -> Bitboard {
        Bitboard(self.0 & other.0)
    }

    /// Complement within `mask` (cells in `mask` but not in `self`).
    pub const fn complement(self, mask: Bitboard) -> Bitboard {
        Bitboard(!self.0 & mask.0)
    }

    pub const fn is_disjoint(self, other: Bitboard) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn is_subset_of(self, other: Bitboard) -> bool {
        self.0 & other.0 == self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Cells set in `self`, lowest bit first.
    pub fn iter_cells(self, space: &Space) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        let mut remaining = self;
        std::iter::from_fn(move || {
            if remaining.is_empty() {
                return None;
            }
            let lowest = Bitboard(1u128 << remaining.0.trailing_zeros());
            remaining = Bitboard(remaining.0 & !lowest.0);
            space.b2l(lowest)
        })
    }

    /// A human-readable z-slice grid, one line per row, blank line between slices.
    pub fn render(&self, space: &Space) -> String {
        let mut out = String::new();
        for z in 0..space.d {
            for y in 0..space.h {
                for x in 0..space.w {
                    let set = space
                        .l2b(x, y, z)
                        .map(|b| !self.is_disjoint(b))
                        .unwrap_or(false);
                    out.push(if set { '#' } else { '.' });
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#034x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2b_matches_index_formula() {
        let space = Space::new(5, 5, 5);
        assert_eq!(space.l2b(0, 0, 0).unwrap(), Bitboard(1));
        assert_eq!(space.l2b(0, 0, 1).unwrap(), Bitboard(2));
        assert_eq!(space.l2b(1, 0, 0).unwrap(), Bitboard(1 << (5 * 5)));
    }

    #[test]
    fn l2b_rejects_out_of_bounds() {
        let space = Space::new(3, 3, 3);
        assert!(space.l2b(-1, 0, 0).is_none());
        assert!(space.l2b(3, 0, 0).is_none());
    }

    #[test]
    fn full_mask_has_volume_popcount() {
        let space = Space::new(3, 3, 3);
        assert_eq!(space.full_mask().popcount(), 27);
        let space = Space::new(5, 5, 5);
        assert_eq!(space.full_mask().popcount(), 125);
    }

    #[test]
    fn b2l_roundtrips_through_l2b() {
        let space = Space::new(4, 4, 4);
        for (x, y, z) in space.cells() {
            let bit = space.l2b(x, y, z).unwrap();
            assert_eq!(space.b2l(bit), Some((x, y, z)));
        }
    }
}
