//! Command-line interface for the `linkwise` binary.
//!
//! `solve` reads one `x,y,z` point per line, joins every pair by squared
//! distance, then answers two questions on independent copies of the graph:
//! how large the biggest circuits are after wiring the cheapest edges, and
//! which edge finally connects everything.

mod commands;

pub use commands::{
    Cli, CliError, Command, DEFAULT_EDGES, DEFAULT_LARGEST, SolveCommand, SolveSummary,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
