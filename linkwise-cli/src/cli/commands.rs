//! Argument parsing and the `solve` pipeline.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use linkwise_core::{
    CheapestLinks, FinalLink, GraphBuilder, GraphError, IncrementalGraph, LinkageError,
    ParsePointError, Point3, link_cheapest, link_until_connected, squared_distance,
};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

/// Default number of cheapest edges wired before measuring circuits.
pub const DEFAULT_EDGES: usize = 1000;
/// Default number of circuit sizes multiplied together.
pub const DEFAULT_LARGEST: usize = 3;

type PointGraph = IncrementalGraph<Point3, i128>;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "linkwise", about = "Wire up points by distance and report circuits.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Link the points in a file and report both answers.
    Solve(SolveCommand),
}

/// Options accepted by the `solve` command.
#[derive(Debug, Args, Clone)]
pub struct SolveCommand {
    /// File with one `x,y,z` point per line.
    pub path: PathBuf,

    /// Number of cheapest edges to wire before measuring circuits.
    #[arg(long, default_value_t = DEFAULT_EDGES)]
    pub edges: usize,

    /// Number of largest circuit sizes to multiply.
    #[arg(long, default_value_t = DEFAULT_LARGEST)]
    pub largest: usize,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line did not hold a valid point.
    #[error("`{path}` line {line}: {source}")]
    Parse {
        /// Input file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Why the line was rejected.
        #[source]
        source: ParsePointError,
    },
    /// The points could not be assembled into a graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A linkage procedure failed.
    #[error(transparent)]
    Linkage(#[from] LinkageError),
}

impl CliError {
    /// Stable code of the underlying library failure, if there was one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Graph(err) => Some(err.code().as_str()),
            Self::Linkage(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Parse { .. } => None,
        }
    }
}

/// Both answers produced by `solve`.
#[derive(Debug, Clone)]
pub struct SolveSummary {
    /// Number of points read.
    pub points: usize,
    /// How many sizes `product` multiplies.
    pub largest: usize,
    /// Circuits after wiring the cheapest edges.
    pub cheapest: CheapestLinks,
    /// The edge that connected every point; `None` for a single point.
    pub final_link: Option<FinalLink<Point3, i128>>,
}

impl SolveSummary {
    /// Product of the largest circuit sizes.
    #[must_use]
    pub fn product(&self) -> u64 {
        self.cheapest.product_of_largest(self.largest)
    }

    /// Product of the x coordinates of the final edge's endpoints.
    #[must_use]
    pub fn final_x_product(&self) -> Option<i128> {
        self.final_link.as_ref().map(|link| {
            let edge = link.edge();
            i128::from(edge.source().x()) * i128::from(edge.target().x())
        })
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be read or linked.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use linkwise_cli::cli::{Cli, Command, SolveCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0,0\n1,0,0\n10,0,0\n")?;
/// let cli = Cli {
///     command: Command::Solve(SolveCommand {
///         path: file.path().to_path_buf(),
///         edges: 1,
///         largest: 2,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.product(), 2);
/// assert_eq!(summary.final_x_product(), Some(10));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<SolveSummary, CliError> {
    match cli.command {
        Command::Solve(solve) => {
            Span::current().record("command", field::display("solve"));
            run_command(solve)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        path = field::Empty,
        edges = command.edges,
        largest = command.largest,
        points = field::Empty,
    ),
)]
pub(super) fn run_command(command: SolveCommand) -> Result<SolveSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));

    let points = load_points(&command.path)?;
    span.record("points", points.len());

    let mut cheapest_graph = build_graph(points)?;
    let points = cheapest_graph.vertex_count();
    let mut connected_graph = cheapest_graph.clone();

    let cheapest = link_cheapest(&mut cheapest_graph, command.edges)?;
    let final_link = link_until_connected(&mut connected_graph)?;

    let summary = SolveSummary {
        points,
        largest: command.largest,
        cheapest,
        final_link,
    };
    info!(
        product = summary.product(),
        final_x_product = summary.final_x_product().map(field::display),
        "solve completed"
    );
    Ok(summary)
}

/// Reads one point per non-blank line.
#[instrument(name = "cli.load_points", err, skip(path), fields(path = %path.display(), points = field::Empty))]
pub(super) fn load_points(path: &Path) -> Result<Vec<Point3>, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let point = line.parse::<Point3>().map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        points.push(point);
    }
    Span::current().record("points", points.len());
    debug!(points = points.len(), "points loaded");
    Ok(points)
}

pub(super) fn build_graph(points: Vec<Point3>) -> Result<PointGraph, CliError> {
    GraphBuilder::new(squared_distance as fn(&Point3, &Point3) -> i128)
        .with_vertices(points)
        .with_autojoin(true)
        .with_union_find(true)
        .build()
        .map_err(CliError::from)
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use linkwise_cli::cli::{Cli, Command, SolveCommand, render_summary, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "5,5,5\n")?;
/// let summary = run_cli(Cli {
///     command: Command::Solve(SolveCommand {
///         path: file.path().to_path_buf(),
///         edges: 10,
///         largest: 3,
///     }),
/// })?;
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("final link: none\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &SolveSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "points: {}", summary.points)?;
    writeln!(writer, "edges wired: {}", summary.cheapest.activated())?;
    writeln!(writer, "circuits: {}", summary.cheapest.component_count())?;
    let sizes: Vec<String> = summary
        .cheapest
        .largest(summary.largest)
        .iter()
        .map(ToString::to_string)
        .collect();
    writeln!(writer, "largest: {}", sizes.join(" "))?;
    writeln!(writer, "product: {}", summary.product())?;
    match (&summary.final_link, summary.final_x_product()) {
        (Some(link), Some(x_product)) => {
            writeln!(writer, "final link: {link}")?;
            writeln!(writer, "x product: {x_product}")
        }
        _ => writeln!(writer, "final link: none"),
    }
}
