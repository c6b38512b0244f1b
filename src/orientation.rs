//! Exhaustive orientation enumeration: every distinct in-box placement of a piece.

use rustc_hash::FxHashSet;

use crate::bitboard::{Bitboard, Space};
use crate::transforms::{rotate, shift, Axis};

/// Guards against a pathological piece producing an unbounded orientation list.
/// Mirrors the original solver's orientation cap.
pub const ORIENTATION_LIMIT: usize = 1024;

#[derive(Debug)]
pub struct OrientationOverflow {
    pub cap: usize,
}

/// Enumerates every distinct bitboard placement of `piece` inside `space`: all
/// combinations of axis, quarter turn, and translation, deduplicated.
///
/// Iteration order is deterministic (axis outermost, then rotation, then dx, dy,
/// dz), which in turn makes solver output order deterministic. This intentionally
/// over-generates before deduplicating — three axes times four turns does not map
/// one-to-one onto the 24-element rotation group, and relying on exhaustive
/// try-then-dedup is simpler and no less correct than hand-picking a minimal
/// generator set.
pub fn enumerate(piece: Bitboard, space: &Space) -> Result<Vec<Bitboard>, OrientationOverflow> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();

    for axis in [Axis::X, Axis::Y, Axis::Z] {
        for turns in 0..4u8 {
            let rotated = rotate(piece, space, axis, turns);
            for dx in -(space.w - 1)..space.w {
                for dy in -(space.h - 1)..space.h {
                    for dz in -(space.d - 1)..space.d {
                        let placed = shift(rotated, space, dx, dy, dz);
                        if placed.is_empty() {
                            continue;
                        }
                        if seen.insert(placed) {
                            if out.len() >= ORIENTATION_LIMIT {
                                return Err(OrientationOverflow {
                                    cap: ORIENTATION_LIMIT,
                                });
                            }
                            out.push(placed);
                        }
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(space: &Space, x: i32, y: i32, z: i32) -> Bitboard {
        space.l2b(x, y, z).unwrap()
    }

    #[test]
    fn l_pentomino_has_24_orientations_in_a_3_cube() {
        let space = Space::new(3, 3, 3);
        let l_piece = cell(&space, 0, 0, 0)
            .union(cell(&space, 1, 0, 0))
            .union(cell(&space, 2, 0, 0))
            .union(cell(&space, 0, 0, 1))
            .union(cell(&space, 0, 0, 2));
        let orientations = enumerate(l_piece, &space).unwrap();
        assert_eq!(orientations.len(), 24);
        assert!(orientations.contains(&l_piece));
    }

    #[test]
    fn every_orientation_matches_piece_popcount_and_fits_box() {
        let space = Space::new(3, 3, 3);
        let piece = cell(&space, 0, 0, 0).union(cell(&space, 1, 0, 0));
        let full = space.full_mask();
        for orientation in enumerate(piece, &space).unwrap() {
            assert_eq!(orientation.popcount(), piece.popcount());
            assert!(orientation.is_subset_of(full));
        }
    }

    #[test]
    fn orientation_list_has_no_duplicates() {
        let space = Space::new(3, 3, 3);
        let piece = cell(&space, 0, 0, 0).union(cell(&space, 1, 0, 0));
        let orientations = enumerate(piece, &space).unwrap();
        let unique: FxHashSet<_> = orientations.iter().copied().collect();
        assert_eq!(unique.len(), orientations.len());
    }
}
