//! Pruning oracles consulted between descents of the backtracking solver.

use crate::bitboard::{Bitboard, Space};

/// `SPACE_WILL_BE_FULL`: true iff the union of `fill` and every still-available
/// orientation covers the whole box. When a problem's pieces sum exactly to the
/// box volume, every cell must eventually be covered by some piece; if a cell is
/// unreachable by any remaining candidate, the branch can never complete.
pub fn reachable(fill: Bitboard, remaining_orientations: &[Bitboard], full_mask: Bitboard) -> bool {
    let mut potential = fill;
    for &orientation in remaining_orientations {
        potential = potential.union(orientation);
        if potential == full_mask {
            return true;
        }
    }
    potential == full_mask
}

/// `are_empty_spaces_factors`: every face-connected component of empty cells must
/// have a cell count divisible by `piece_size`. A component whose size isn't a
/// multiple of `piece_size` can never be exactly tiled by pieces of that size, no
/// matter how the remaining pieces are arranged.
pub fn divisible_components(fill: Bitboard, space: &Space, piece_size: u32) -> bool {
    if piece_size == 0 {
        return true;
    }
    let full = space.full_mask();
    let empty = fill.complement(full);
    let mut visited = Bitboard::EMPTY;

    for (x, y, z) in space.cells() {
        let cell = space.l2b(x, y, z).unwrap();
        if cell.is_disjoint(empty) || !visited.is_disjoint(cell) {
            continue;
        }
        let count = flood_fill_count(cell, empty, space, &mut visited);
        if count % piece_size != 0 {
            return false;
        }
    }
    true
}

fn flood_fill_count(start: Bitboard, empty: Bitboard, space: &Space, visited: &mut Bitboard) -> u32 {
    let mut stack = vec![start];
    let mut count = 0u32;
    *visited = visited.union(start);

    while let Some(cell) = stack.pop() {
        count += 1;
        let (x, y, z) = space.b2l(cell).expect("flood fill stack holds single-bit boards");
        for (nx, ny, nz) in [
            (x - 1, y, z),
            (x + 1, y, z),
            (x, y - 1, z),
            (x, y + 1, z),
            (x, y, z - 1),
            (x, y, z + 1),
        ] {
            let Some(neighbor) = space.l2b(nx, ny, nz) else {
                continue;
            };
            if neighbor.is_disjoint(empty) || !visited.is_disjoint(neighbor) {
                continue;
            }
            *visited = visited.union(neighbor);
            stack.push(neighbor);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_covered_space_is_reachable() {
        let space = Space::new(2, 2, 2);
        let full = space.full_mask();
        assert!(reachable(full, &[], full));
    }

    #[test]
    fn unreachable_cell_fails() {
        let space = Space::new(2, 2, 2);
        let full = space.full_mask();
        let one_cell = space.l2b(0, 0, 0).unwrap();
        // fill covers everything except one cell, and no remaining orientation
        // covers that cell.
        let partial_fill = Bitboard(full.0 & !one_cell.0);
        assert!(!reachable(partial_fill, &[], full));
        assert!(reachable(partial_fill, &[one_cell], full));
    }

    #[test]
    fn even_split_space_is_divisible_by_two() {
        let space = Space::new(4, 1, 1);
        assert!(divisible_components(Bitboard::EMPTY, &space, 2));
    }

    #[test]
    fn odd_isolated_component_fails_divisibility() {
        // A 3x1x1 strip split by a single filled cell into components of size 1
        // and 1, neither divisible by 3.
        let space = Space::new(3, 1, 1);
        let middle = space.l2b(1, 0, 0).unwrap();
        assert!(!divisible_components(middle, &space, 3));
    }
}
