//! Webrank CLI — PageRank of a tab-separated edge list
//!
//! Reads `<source>\t<destination>` records, ranks every page, and writes
//! `<page>\t<rank>` lines in first-seen order.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;
use webrank::io::format_rank;
use webrank::{IndexOrder, RankConfig, RankFormat, RankPipeline, RankedGraph};

#[derive(Parser)]
#[command(
    name = "webrank",
    version,
    about = "Calculate the PageRank of every page in a graph file"
)]
struct Cli {
    /// Tab-separated edge list, or `-` for stdin
    input: PathBuf,

    /// Output file [default: stdout]
    output: Option<PathBuf>,

    /// Probability of a random jump instead of following a link [default: 0.2]
    #[arg(short = 't', long, allow_negative_numbers = true)]
    teleportation_rate: Option<f64>,

    /// Convergence threshold on the L1 distance between iterations [default: 1e-4]
    #[arg(short = 'e', long, allow_negative_numbers = true)]
    epsilon: Option<f64>,

    /// Iteration cap [default: 300]
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Order in which pages are numbered (and therefore written)
    #[arg(long, value_enum)]
    index_order: Option<IndexOrderArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Comment marker; lines starting with it are skipped [default: #]
    #[arg(long)]
    comment: Option<char>,

    /// YAML config file; flags given on the command line override it
    #[arg(long, env = "WEBRANK_CONFIG")]
    config: Option<PathBuf>,

    /// Reject a teleportation rate outside [0, 1] or a non-positive epsilon
    #[arg(long)]
    strict: bool,

    /// Spread the matrix-vector product over all cores
    #[arg(long)]
    parallel: bool,

    /// Log progress to stderr (-v info, -vv per-iteration debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tsv,
    Json,
    Csv,
    Table,
}

impl OutputFormat {
    fn rank_format(self) -> Option<RankFormat> {
        match self {
            OutputFormat::Tsv => Some(RankFormat::Tsv),
            OutputFormat::Json => Some(RankFormat::Json),
            OutputFormat::Csv => Some(RankFormat::Csv),
            OutputFormat::Table => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum IndexOrderArg {
    SourcesFirst,
    FirstSeen,
}

impl From<IndexOrderArg> for IndexOrder {
    fn from(arg: IndexOrderArg) -> Self {
        match arg {
            IndexOrderArg::SourcesFirst => IndexOrder::SourcesFirst,
            IndexOrderArg::FirstSeen => IndexOrder::FirstSeen,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let pipeline = RankPipeline::new(build_config(cli)?);

    let ranked = if cli.input == Path::new("-") {
        pipeline.rank_reader(io::stdin().lock())?
    } else {
        pipeline.rank_file(&cli.input)?
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            emit(&ranked, cli.format, file)
        }
        None => emit(&ranked, cli.format, io::stdout().lock()),
    }
}

fn build_config(cli: &Cli) -> Result<RankConfig> {
    let mut config = match &cli.config {
        Some(path) => RankConfig::from_yaml_file(path)?,
        None => RankConfig::default(),
    };

    if let Some(rate) = cli.teleportation_rate {
        config.teleportation_rate = rate;
    }
    if let Some(epsilon) = cli.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(order) = cli.index_order {
        config.index_order = order.into();
    }
    if let Some(comment) = cli.comment {
        config.comment = comment;
    }
    config.strict |= cli.strict;
    config.parallel |= cli.parallel;

    Ok(config)
}

fn emit<W: Write>(ranked: &RankedGraph, format: OutputFormat, mut writer: W) -> Result<()> {
    match format.rank_format() {
        Some(rank_format) => ranked.write(writer, rank_format)?,
        None => {
            writeln!(writer, "{}", render_table(ranked))?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_table(ranked: &RankedGraph) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["page", "rank"]);

    for (page, rank) in ranked.iter() {
        table.add_row(vec![page.to_string(), format_rank(rank)]);
    }

    let status = if ranked.converged() {
        "converged"
    } else {
        "stopped at iteration cap"
    };
    format!(
        "{}\n{} page(s), {} after {} iteration(s)",
        table,
        ranked.len(),
        status,
        ranked.run.iterations
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Cursor;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["webrank", "graph.txt"]);
        assert_eq!(cli.output, None);
        assert_eq!(cli.format, OutputFormat::Tsv);

        let config = build_config(&cli).unwrap();
        assert_eq!(config, RankConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "webrank",
            "-t",
            "0.15",
            "-e",
            "1e-8",
            "--max-iterations",
            "50",
            "--index-order",
            "first-seen",
            "--comment",
            "%",
            "--strict",
            "graph.txt",
            "ranks.txt",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("ranks.txt")));

        let config = build_config(&cli).unwrap();
        assert_eq!(config.teleportation_rate, 0.15);
        assert_eq!(config.epsilon, 1e-8);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.index_order, IndexOrder::FirstSeen);
        assert_eq!(config.comment, '%');
        assert!(config.strict);
        assert!(!config.parallel);
    }

    #[test]
    fn test_negative_rate_is_passed_through() {
        let cli = parse(&["webrank", "-t", "-0.5", "graph.txt"]);
        assert_eq!(build_config(&cli).unwrap().teleportation_rate, -0.5);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rank.yaml");
        std::fs::write(&path, "teleportation_rate: 0.3\nepsilon: 1.0e-6\nparallel: true\n").unwrap();

        let cli = parse(&[
            "webrank",
            "--config",
            path.to_str().unwrap(),
            "-e",
            "0.01",
            "graph.txt",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.teleportation_rate, 0.3);
        assert_eq!(config.epsilon, 0.01);
        assert!(config.parallel);
    }

    #[test]
    fn test_table_output() {
        let ranked = RankPipeline::default()
            .rank_reader(Cursor::new("a\tb\nb\ta\n"))
            .unwrap();
        let mut out = Vec::new();
        emit(&ranked, OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("page"));
        assert!(text.contains("0.5"));
        assert!(text.contains("2 page(s), converged after"));
    }
}
