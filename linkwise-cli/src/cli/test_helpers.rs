//! Input files and runners shared by the CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, SolveCommand};

/// The twenty junction boxes from the worked example.
pub(super) const JUNCTION_BOXES: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_input(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn solve(path: PathBuf, edges: usize) -> SolveCommand {
    SolveCommand {
        path,
        edges,
        largest: 3,
    }
}

pub(super) fn run_command_expecting_error(command: SolveCommand, panic_msg: &str) -> CliError {
    match run_command(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
