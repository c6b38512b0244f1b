//! Block Puzzle Solver CLI
//!
//! Drives the solver against one of three shipped problems (the Soma cube, the
//! Bedlam cube, or the canonical 25-piece pentominoid cube), wires SIGINT/SIGUSR1
//! into the cooperative flags the solver polls, and renders, saves, or displays
//! the result.

use clap::{Parser, Subcommand, ValueEnum};
use signal_hook::consts::{SIGINT, SIGUSR1};
use signal_hook::iterator::Signals;

use blocker::piece::{self, Problem};
use blocker::signals::SearchFlags;
use blocker::solver::{SolveOutcome, SolverConfig, StatusSnapshot};

#[derive(Parser)]
#[command(name = "blocker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which shipped problem to solve.
    #[arg(long, value_enum, global = true, default_value = "pentominoid")]
    problem: ProblemArg,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProblemArg {
    /// The 7-piece Soma cube, 3x3x3.
    Soma,
    /// The 13-piece Bedlam cube, 4x4x4.
    Bedlam,
    /// The 25-piece pentominoid cube, 5x5x5.
    Pentominoid,
}

impl ProblemArg {
    fn build(self) -> Problem {
        match self {
            ProblemArg::Soma => piece::soma(),
            ProblemArg::Bedlam => piece::bedlam(),
            ProblemArg::Pentominoid => piece::pentominoid_cube(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Solve the problem and save solutions to disk.
    Solve {
        /// Keep searching for every solution instead of stopping at the first.
        #[arg(long)]
        all: bool,
        /// Stop once this many solutions have been found.
        #[arg(long)]
        max_solutions: Option<usize>,
    },
    /// Display saved solutions in an interactive 3D viewer.
    Display,
    /// Show the number of saved solutions.
    Count,
    /// Export solutions as a JavaScript array.
    ExportJs,
}

fn main() {
    let cli = Cli::parse();
    let problem = cli.problem.build();

    if let Err(e) = problem.validate() {
        eprintln!("invalid problem: {e}");
        std::process::exit(2);
    }

    let code = match cli.command {
        Some(Command::Solve { all, max_solutions }) => {
            run_solve(&problem, all, max_solutions, true)
        }
        Some(Command::Display) => run_display(&problem),
        Some(Command::Count) => run_count(&problem),
        Some(Command::ExportJs) => run_export_js(&problem),
        None => {
            let code = run_solve(&problem, false, None, true);
            if code == 0 {
                if let Some(solutions) = problem.load_solutions() {
                    show_solutions(problem, solutions);
                }
            }
            code
        }
    };
    std::process::exit(code);
}

/// Registers SIGINT/SIGUSR1 on a background thread that flips `flags`. The
/// solver itself never touches `signal`/`sigaction`; it only polls `flags`
/// once per outer-loop iteration (the contract `SearchFlags` documents).
fn install_signal_handling(flags: SearchFlags) {
    let mut signals =
        Signals::new([SIGINT, SIGUSR1]).expect("failed to register SIGINT/SIGUSR1 handlers");
    std::thread::spawn(move || {
        for signal in signals.forever() {
            match signal {
                SIGINT => flags.request_stop(),
                SIGUSR1 => flags.request_status(),
                _ => unreachable!("only SIGINT and SIGUSR1 were registered"),
            }
        }
    });
}

fn report_status(snapshot: &StatusSnapshot) {
    eprintln!(
        "status: depth={} pieces={:?} iterations={} solutions_found={}",
        snapshot.depth, snapshot.placed_piece_ids, snapshot.iterations, snapshot.solutions_found
    );
}

/// Solves `problem`, saves the result, and returns a process exit code per
/// §6: 0 on solution found (or completed enumeration), 1 on no solution, 2 on
/// a solver error, 130 on a signal-requested stop.
fn run_solve(problem: &Problem, all: bool, max_solutions: Option<usize>, announce: bool) -> i32 {
    let config = SolverConfig {
        stop_at_first_solution: !all && max_solutions.is_none(),
        max_solutions,
        report_every: None,
    };
    let flags = SearchFlags::new();
    install_signal_handling(flags.clone());

    let report = match problem.solve(&config, &flags, report_status) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("solver error: {e}");
            return 2;
        }
    };

    if let SolveOutcome::Cancelled { depth } = report.outcome {
        eprintln!("search cancelled at depth {depth}");
        return 130;
    }

    if let Err(e) = problem.save_solutions(&report.solutions) {
        eprintln!("failed to save solutions: {e}");
    } else if announce {
        println!("Found {} solutions", report.solutions.len());
        println!("Wrote solutions.txt and solutions.bin");
    }

    if report.solutions.is_empty() {
        1
    } else {
        0
    }
}

fn run_display(problem: &Problem) -> i32 {
    match problem.load_solutions() {
        Some(solutions) => {
            println!("Loaded {} solutions", solutions.len());
            show_solutions(problem.clone(), solutions);
            0
        }
        None => {
            eprintln!("No solutions.bin found. Run 'blocker solve' first.");
            1
        }
    }
}

#[cfg(feature = "viz")]
fn show_solutions(problem: Problem, solutions: Vec<blocker::solver::Solution>) {
    println!("Controls: Left/Right navigate, W/S explode, R reset");
    blocker::visualization::display(problem, solutions);
}

#[cfg(not(feature = "viz"))]
fn show_solutions(problem: Problem, solutions: Vec<blocker::solver::Solution>) {
    if let Some(first) = solutions.first() {
        println!("{}", problem.format_solution(first));
    }
}

fn run_count(problem: &Problem) -> i32 {
    match problem.count_solutions() {
        Some(count) => {
            println!("{count} solutions");
            0
        }
        None => {
            eprintln!("No solutions.bin found. Run 'blocker solve' first.");
            1
        }
    }
}

/// Exports every solution as a JavaScript array literal, for the pentominoid
/// website the original source's `main()` supported via the same format.
fn run_export_js(problem: &Problem) -> i32 {
    let config = SolverConfig {
        stop_at_first_solution: false,
        max_solutions: None,
        report_every: None,
    };
    let flags = SearchFlags::new();
    install_signal_handling(flags.clone());

    let report = match problem.solve(&config, &flags, report_status) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("solver error: {e}");
            return 2;
        }
    };

    println!("const SOLUTIONS = [");
    let num_solutions = report.solutions.len();
    for (i, solution) in report.solutions.iter().enumerate() {
        print!("  [");
        let num_pieces = solution.len();
        for (j, (piece_id, orientation)) in solution.iter().enumerate() {
            print!("[{piece_id}, [");
            let cells: Vec<(i32, i32, i32)> = orientation.iter_cells(&problem.space).collect();
            let num_cells = cells.len();
            for (k, (x, y, z)) in cells.iter().enumerate() {
                print!("[{x},{y},{z}]");
                if k + 1 < num_cells {
                    print!(",");
                }
            }
            print!("]]");
            if j + 1 < num_pieces {
                print!(", ");
            }
        }
        print!("]");
        if i + 1 < num_solutions {
            println!(",");
        } else {
            println!();
        }
    }
    println!("];");

    if report.solutions.is_empty() {
        1
    } else {
        0
    }
}
