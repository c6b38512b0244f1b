//! Iterative depth-first backtracking solver.
//!
//! The search never recurses: state at each depth lives in an explicit
//! [`Frame`] on a `Vec`-backed stack, so cancellation and status polling only
//! need to happen once per outer loop iteration.

use crate::bitboard::Bitboard;
use crate::orientation::{self, OrientationOverflow};
use crate::piece::Problem;
use crate::pruning;
use crate::signals::SearchFlags;

/// A completed placement: each piece's id paired with the orientation it was
/// placed in, in the order pieces were committed during the search.
pub type Solution = Vec<(usize, Bitboard)>;

#[derive(Debug)]
pub enum SolverError {
    OrientationOverflow { piece_id: usize, cap: usize },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::OrientationOverflow { piece_id, cap } => {
                write!(f, "piece {piece_id} exceeded the orientation cap of {cap}")
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Tunable search behavior. Not part of the problem definition: two runs of the
/// same problem with different configs can report different outcomes (e.g.
/// stopping at the first solution vs. enumerating all of them).
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Stop and return as soon as one solution is found.
    pub stop_at_first_solution: bool,
    /// Stop once this many solutions have been collected (ignored when
    /// `stop_at_first_solution` is set, since that already implies a cap of 1).
    pub max_solutions: Option<usize>,
    /// When set, invoke the status callback automatically every N outer-loop
    /// iterations, independent of `SearchFlags::request_status`.
    pub report_every: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            stop_at_first_solution: true,
            max_solutions: None,
            report_every: None,
        }
    }
}

/// A snapshot of solver progress, handed to the status callback.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub depth: usize,
    pub placed_piece_ids: Vec<usize>,
    pub iterations: u64,
    pub solutions_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Exhausted,
    StoppedAtFirstSolution,
    ReachedSolutionCap,
    Cancelled { depth: usize },
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solutions: Vec<Solution>,
    pub outcome: SolveOutcome,
}

/// One level of the search stack: the piece chosen to try at this depth, the
/// orientation index currently on trial, the fill before this depth's
/// placement, and the candidate table of every still-unplaced piece (including
/// `piece_id` itself) as filtered by the time the search reached this depth.
struct Frame {
    fill_before: Bitboard,
    piece_id: usize,
    orientation_idx: usize,
    table: Vec<(usize, Vec<Bitboard>)>,
}

impl Frame {
    fn current_orientations(&self) -> &[Bitboard] {
        &self
            .table
            .iter()
            .find(|(id, _)| *id == self.piece_id)
            .expect("frame's chosen piece always has a table entry")
            .1
    }
}

fn choose_next_piece(table: &[(usize, Vec<Bitboard>)]) -> Option<usize> {
    table
        .iter()
        .min_by_key(|(id, orientations)| (orientations.len(), *id))
        .map(|(id, _)| *id)
}

fn snapshot_solution(stack: &[Frame]) -> Solution {
    stack
        .iter()
        .map(|frame| (frame.piece_id, frame.current_orientations()[frame.orientation_idx]))
        .collect()
}

/// Runs the backtracking search for `problem` under `config`, polling `flags`
/// once per outer-loop iteration and invoking `on_status` whenever a status
/// snapshot is due (an explicit `SearchFlags::request_status` or a
/// `config.report_every` tick).
pub fn solve(
    problem: &Problem,
    config: &SolverConfig,
    flags: &SearchFlags,
    mut on_status: impl FnMut(&StatusSnapshot),
) -> Result<SolveReport, SolverError> {
    let space = &problem.space;
    let full_mask = space.full_mask();
    let exact_cover = problem.is_exact_cover();
    let common_size = problem.common_piece_size();

    let mut orientations_by_piece = Vec::with_capacity(problem.pieces.len());
    for piece in &problem.pieces {
        let template = piece.template(space);
        let list = orientation::enumerate(template, space).map_err(|OrientationOverflow { cap }| {
            SolverError::OrientationOverflow {
                piece_id: piece.id,
                cap,
            }
        })?;
        orientations_by_piece.push((piece.id, list));
    }

    let mut solutions: Vec<Solution> = Vec::new();
    let mut iterations: u64 = 0;

    let Some(start_piece) = choose_next_piece(&orientations_by_piece) else {
        return Ok(SolveReport {
            solutions,
            outcome: SolveOutcome::Exhausted,
        });
    };
    let mut stack = vec![Frame {
        fill_before: Bitboard::EMPTY,
        piece_id: start_piece,
        orientation_idx: 0,
        table: orientations_by_piece,
    }];

    loop {
        iterations += 1;

        if !flags.should_keep_running() {
            return Ok(SolveReport {
                solutions,
                outcome: SolveOutcome::Cancelled { depth: stack.len() },
            });
        }
        let due_by_schedule = config
            .report_every
            .map(|n| n > 0 && iterations % n == 0)
            .unwrap_or(false);
        if flags.take_status_request() || due_by_schedule {
            on_status(&StatusSnapshot {
                depth: stack.len(),
                placed_piece_ids: stack.iter().map(|f| f.piece_id).collect(),
                iterations,
                solutions_found: solutions.len(),
            });
        }

        let Some(frame) = stack.last_mut() else {
            return Ok(SolveReport {
                solutions,
                outcome: SolveOutcome::Exhausted,
            });
        };

        if frame.orientation_idx >= frame.current_orientations().len() {
            stack.pop();
            if let Some(parent) = stack.last_mut() {
                parent.orientation_idx += 1;
            }
            continue;
        }

        let orientation = frame.current_orientations()[frame.orientation_idx];
        let fill_next = frame.fill_before.union(orientation);
        let piece_id = frame.piece_id;

        let mut next_table = Vec::with_capacity(frame.table.len().saturating_sub(1));
        let mut potential = fill_next;
        let mut starved = false;
        for (id, list) in &frame.table {
            if *id == piece_id {
                continue;
            }
            let filtered: Vec<Bitboard> = list
                .iter()
                .copied()
                .filter(|candidate| candidate.is_disjoint(fill_next))
                .collect();
            if filtered.is_empty() {
                starved = true;
            }
            for &candidate in &filtered {
                potential = potential.union(candidate);
            }
            next_table.push((*id, filtered));
        }

        if starved {
            stack.last_mut().unwrap().orientation_idx += 1;
            continue;
        }
        if exact_cover && potential != full_mask {
            stack.last_mut().unwrap().orientation_idx += 1;
            continue;
        }
        if let Some(k) = common_size {
            if !pruning::divisible_components(fill_next, space, k) {
                stack.last_mut().unwrap().orientation_idx += 1;
                continue;
            }
        }

        if next_table.is_empty() {
            let solution = snapshot_solution(&stack);
            solutions.push(solution);

            let reached_cap = config
                .max_solutions
                .map(|cap| solutions.len() >= cap)
                .unwrap_or(false);
            if config.stop_at_first_solution {
                return Ok(SolveReport {
                    solutions,
                    outcome: SolveOutcome::StoppedAtFirstSolution,
                });
            }
            if reached_cap {
                return Ok(SolveReport {
                    solutions,
                    outcome: SolveOutcome::ReachedSolutionCap,
                });
            }
            stack.last_mut().unwrap().orientation_idx += 1;
            continue;
        }

        let next_piece = choose_next_piece(&next_table).expect("next_table is non-empty");
        stack.push(Frame {
            fill_before: fill_next,
            piece_id: next_piece,
            orientation_idx: 0,
            table: next_table,
        });
    }
}
