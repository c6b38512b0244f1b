//! Block Puzzle Solver Library
//!
//! Exact-cover solver for 3D cube packing puzzles (Soma, Bedlam, pentominoid
//! cubes, and arbitrary box/piece combinations described at runtime).

pub mod bitboard;
pub mod orientation;
pub mod persistence;
pub mod piece;
pub mod pruning;
pub mod render;
pub mod signals;
pub mod solver;
pub mod transforms;

#[cfg(feature = "viz")]
pub mod visualization;

use piece::Problem;
use signals::SearchFlags;
use solver::{SolveReport, SolverConfig, SolverError, Solution, StatusSnapshot};

/// A small facade so the CLI drives a `Problem` without reaching into every
/// module by hand. Earlier const-generic puzzle families needed a trait object
/// here to erase `DIM`/`GRID_SIZE`/`NUM_PIECES`; `Problem` is already a single
/// runtime-parameterized type, so these are just inherent convenience methods.
impl Problem {
    pub fn solve(
        &self,
        config: &SolverConfig,
        flags: &SearchFlags,
        on_status: impl FnMut(&StatusSnapshot),
    ) -> Result<SolveReport, SolverError> {
        solver::solve(self, config, flags, on_status)
    }

    pub fn save_solutions(&self, solutions: &[Solution]) -> std::io::Result<()> {
        persistence::save(self, solutions)
    }

    pub fn load_solutions(&self) -> Option<Vec<Solution>> {
        persistence::load_all(self)
    }

    pub fn count_solutions(&self) -> Option<usize> {
        persistence::count(self)
    }

    pub fn format_solution(&self, solution: &Solution) -> String {
        render::format_solution(self, solution)
    }
}
