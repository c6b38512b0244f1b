//! File I/O for saving and loading finished solution lists.
//!
//! Binary format for `solutions.bin` (little endian):
//! - 4 bytes: magic (`BLKR`)
//! - u8: format version
//! - u8, u8, u8: box width, height, depth
//! - u8: piece count
//! - u32: solution count
//! - repeat per solution:
//!   - u32: piece count
//!   - repeat per piece:
//!     - u32: piece id (0-based)
//!     - u32: cube count
//!     - repeat per cube: 3 bytes (x, y, z)
//!
//! This only ever stores *finished* solutions, never a mid-search frame stack:
//! resuming an interrupted search from disk is out of scope.

use std::fs::File;
use std::io::{Read, Write};

use crate::bitboard::Space;
use crate::piece::Problem;
use crate::render::format_solution;
use crate::solver::Solution;

const SOLUTIONS_BIN: &str = "solutions.bin";
const SOLUTIONS_TXT: &str = "solutions.txt";
const FILE_MAGIC: [u8; 4] = *b"BLKR";
const FILE_VERSION: u8 = 1;

/// Saves solutions to both binary and text files.
pub fn save(problem: &Problem, solutions: &[Solution]) -> std::io::Result<()> {
    save_text(problem, solutions)?;
    save_binary(problem, solutions)?;
    Ok(())
}

fn save_text(problem: &Problem, solutions: &[Solution]) -> std::io::Result<()> {
    let mut file = File::create(SOLUTIONS_TXT)?;
    writeln!(file, "Found {} solutions:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(file, "Solution {}:", i + 1)?;
        write!(file, "{}", format_solution(problem, solution))?;
        writeln!(file)?;
    }
    Ok(())
}

fn save_binary(problem: &Problem, solutions: &[Solution]) -> std::io::Result<()> {
    let mut file = File::create(SOLUTIONS_BIN)?;
    file.write_all(&FILE_MAGIC)?;
    file.write_all(&[
        FILE_VERSION,
        problem.space.w as u8,
        problem.space.h as u8,
        problem.space.d as u8,
    ])?;
    file.write_all(&(problem.pieces.len() as u32).to_le_bytes())?;

    file.write_all(&(solutions.len() as u32).to_le_bytes())?;
    for solution in solutions {
        file.write_all(&(solution.len() as u32).to_le_bytes())?;
        for (piece_id, orientation) in solution {
            let cells: Vec<(i32, i32, i32)> = orientation.iter_cells(&problem.space).collect();
            file.write_all(&(*piece_id as u32).to_le_bytes())?;
            file.write_all(&(cells.len() as u32).to_le_bytes())?;
            for (x, y, z) in cells {
                file.write_all(&[x as u8, y as u8, z as u8])?;
            }
        }
    }
    Ok(())
}

#[inline]
fn read_u32<R: Read>(reader: &mut R) -> Option<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer).ok()?;
    Some(u32::from_le_bytes(buffer))
}

fn parse_solutions(
    file: &mut File,
    space: &Space,
    num_pieces: usize,
    solution_count: usize,
) -> Option<Vec<Solution>> {
    let mut solutions = Vec::with_capacity(solution_count);
    for _ in 0..solution_count {
        let piece_count = read_u32(file)? as usize;
        if piece_count != num_pieces {
            return None;
        }
        let mut seen_pieces = vec![false; num_pieces];
        let mut solution: Solution = Vec::with_capacity(piece_count);
        for _ in 0..piece_count {
            let piece_id = read_u32(file)? as usize;
            if piece_id >= num_pieces || seen_pieces[piece_id] {
                return None;
            }
            seen_pieces[piece_id] = true;

            let cube_count = read_u32(file)?;
            let mut bitboard = crate::bitboard::Bitboard::EMPTY;
            for _ in 0..cube_count {
                let mut coord_buffer = [0u8; 3];
                file.read_exact(&mut coord_buffer).ok()?;
                let (x, y, z) = (
                    coord_buffer[0] as i32,
                    coord_buffer[1] as i32,
                    coord_buffer[2] as i32,
                );
                let cell = space.l2b(x, y, z)?;
                bitboard = bitboard.union(cell);
            }
            solution.push((piece_id, bitboard));
        }
        if !seen_pieces.iter().all(|&seen| seen) {
            return None;
        }
        solutions.push(solution);
    }
    Some(solutions)
}

fn read_header(file: &mut File, problem: &Problem) -> Option<usize> {
    let mut prefix = [0u8; 4];
    file.read_exact(&mut prefix).ok()?;
    if prefix != FILE_MAGIC {
        return None;
    }
    let mut metadata = [0u8; 4];
    file.read_exact(&mut metadata).ok()?;
    let [version, w, h, d] = metadata;
    if version != FILE_VERSION
        || w as i32 != problem.space.w
        || h as i32 != problem.space.h
        || d as i32 != problem.space.d
    {
        return None;
    }
    let piece_count = read_u32(file)? as usize;
    if piece_count != problem.pieces.len() {
        return None;
    }
    Some(piece_count)
}

/// Loads every solution from the binary file, validating it matches `problem`.
pub fn load_all(problem: &Problem) -> Option<Vec<Solution>> {
    let mut file = File::open(SOLUTIONS_BIN).ok()?;
    let piece_count = read_header(&mut file, problem)?;
    let solution_count = read_u32(&mut file)? as usize;
    parse_solutions(&mut file, &problem.space, piece_count, solution_count)
}

/// Returns the number of saved solutions without loading their contents.
pub fn count(problem: &Problem) -> Option<usize> {
    let mut file = File::open(SOLUTIONS_BIN).ok()?;
    read_header(&mut file, problem)?;
    Some(read_u32(&mut file)? as usize)
}
