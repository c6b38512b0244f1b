//! Rendering a solved (or partial) placement as text.

use crate::bitboard::Space;
use crate::piece::Problem;
use crate::solver::Solution;

/// Renders a solution as DIM z-slices side by side (x grows down, y grows
/// right within a slice), one glyph per piece, '.' for empty. Glyphs are
/// 0-9 then A-Z, matching up to 36 pieces.
pub fn format_solution(problem: &Problem, solution: &Solution) -> String {
    let space = &problem.space;
    let mut grid = vec![None; space.volume() as usize];
    for &(piece_id, orientation) in solution {
        for (x, y, z) in orientation.iter_cells(space) {
            grid[cell_index(space, x, y, z)] = Some(piece_id);
        }
    }

    let mut out = String::new();
    for z in 0..space.d {
        if z > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("z={:<width$}", z, width = space.w as usize));
    }
    out.push('\n');

    for y in (0..space.h).rev() {
        for z in 0..space.d {
            if z > 0 {
                out.push_str("  ");
            }
            for x in 0..space.w {
                out.push(match grid[cell_index(space, x, y, z)] {
                    Some(id) => glyph(id),
                    None => '.',
                });
            }
        }
        out.push('\n');
    }
    out
}

/// Renders a solution with each piece in its own ANSI 24-bit color, suitable
/// for a terminal. Falls back to `format_solution`'s glyphs for the piece
/// identity; color only decorates.
pub fn format_solution_colored(problem: &Problem, solution: &Solution) -> String {
    let space = &problem.space;
    let mut grid = vec![None; space.volume() as usize];
    for &(piece_id, orientation) in solution {
        for (x, y, z) in orientation.iter_cells(space) {
            grid[cell_index(space, x, y, z)] = Some(piece_id);
        }
    }
    const RESET: &str = "\x1b[0m";

    let mut out = String::new();
    for y in (0..space.h).rev() {
        for z in 0..space.d {
            if z > 0 {
                out.push_str("  ");
            }
            for x in 0..space.w {
                match grid[cell_index(space, x, y, z)] {
                    Some(id) => {
                        let color = problem.pieces[id].color;
                        out.push_str(&color.ansi_fg());
                        out.push(glyph(id));
                        out.push_str(RESET);
                    }
                    None => out.push('.'),
                }
            }
        }
        out.push('\n');
    }
    out
}

fn cell_index(space: &Space, x: i32, y: i32, z: i32) -> usize {
    (z + space.d * y + space.d * space.h * x) as usize
}

fn glyph(piece_id: usize) -> char {
    if piece_id < 10 {
        char::from(b'0' + piece_id as u8)
    } else if piece_id < 36 {
        char::from(b'A' + (piece_id - 10) as u8)
    } else {
        '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Color, Piece};

    #[test]
    fn single_piece_full_box_renders_one_glyph_kind() {
        let space = Space::new(1, 1, 2);
        let piece = Piece::new(0, "pair", Color(0, 0, 0), vec![(0, 0, 0), (0, 0, 1)]);
        let problem = Problem::new(space, vec![piece]);
        let full = space.full_mask();
        let solution: Solution = vec![(0, full)];
        let rendered = format_solution(&problem, &solution);
        let glyphs: std::collections::HashSet<char> =
            rendered.chars().filter(|c| *c != '.' && !c.is_whitespace() && *c != '=').collect();
        assert!(glyphs.contains(&'0'));
    }

    #[test]
    fn empty_cells_render_as_dots() {
        let space = Space::new(2, 1, 1);
        let piece = Piece::new(0, "single", Color(0, 0, 0), vec![(0, 0, 0)]);
        let problem = Problem::new(space, vec![piece]);
        let bit = space.l2b(0, 0, 0).unwrap();
        let solution: Solution = vec![(0, bit)];
        let rendered = format_solution(&problem, &solution);
        assert!(rendered.contains('.'));
    }
}
