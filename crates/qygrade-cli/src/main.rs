use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use qygrade_core::{parse_jsonl, GradeReport, Grader, GraderConfig, TaskKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "qygrade", about = "Grade model outputs against reference labels")]
struct Cli {
	/// Log every incorrect answer with its parsed units
	#[arg(short, long, global = true, action = ArgAction::SetTrue)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Grade a JSONL file of samples and print a summary table
	Run(RunArgs),
	/// Grade a single model output and print the score
	Score(ScoreArgs),
}

#[derive(Debug, Clone, Parser)]
struct RunArgs {
	/// JSONL file with lines: { "id"?: string, "data_source": string, "model_output": string, "extra_info": { "label": string } }
	#[arg(long)]
	data: PathBuf,

	/// YAML or JSON grader config (custom markers, ignored sentences)
	#[arg(long)]
	config: Option<PathBuf>,

	/// Output JSON report to a file
	#[arg(long)]
	json_out: Option<PathBuf>,

	/// Exit with an error when the average score is below this value
	#[arg(long)]
	min_avg_score: Option<f64>,
}

#[derive(Debug, Clone, Parser)]
struct ScoreArgs {
	/// typos, connections or unscrambling
	#[arg(long)]
	data_source: String,

	/// Reference label
	#[arg(long)]
	label: String,

	/// Model output text
	#[arg(long, conflicts_with = "output_file")]
	output: Option<String>,

	/// Read the model output from a file instead
	#[arg(long)]
	output_file: Option<PathBuf>,

	/// YAML or JSON grader config
	#[arg(long)]
	config: Option<PathBuf>,

	/// Print the score details as JSON
	#[arg(long, action = ArgAction::SetTrue)]
	details: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);
	match cli.command {
		Commands::Run(args) => run(args).await?,
		Commands::Score(args) => score(args).await?,
	}
	Ok(())
}

fn init_logging(verbose: bool) {
	let debug_env = std::env::var("QYGRADE_DEBUG").is_ok_and(|v| v == "1");
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose || debug_env {
			EnvFilter::new("qygrade_core=debug,info")
		} else {
			EnvFilter::new("qygrade_core=info,warn")
		}
	});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn load_grader(config: Option<&PathBuf>) -> Result<Grader> {
	let config = match config {
		Some(path) => GraderConfig::load(path)?,
		None => GraderConfig::default(),
	};
	Ok(Grader::from_config(&config))
}

async fn run(args: RunArgs) -> Result<()> {
	let grader = load_grader(args.config.as_ref())?;
	let content = tokio::fs::read_to_string(&args.data)
		.await
		.with_context(|| format!("Failed to read {:?}", args.data))?;
	let samples = parse_jsonl(&content).with_context(|| format!("Invalid samples in {:?}", args.data))?;
	tracing::info!(count = samples.len(), "grading samples");

	let report = GradeReport::new(grader.grade_all(samples));
	println!("{}", report.summary_table());

	if let Some(path) = args.json_out {
		let json = serde_json::to_string_pretty(&report)?;
		tokio::fs::write(&path, json)
			.await
			.with_context(|| format!("Failed to write {:?}", path))?;
	}

	if let Some(min) = args.min_avg_score {
		qygrade_core::testing::assert_report_avg_score(&report, min)?;
	}
	Ok(())
}

async fn score(args: ScoreArgs) -> Result<()> {
	let grader = load_grader(args.config.as_ref())?;
	let kind: TaskKind = args.data_source.parse()?;
	let model_output = match (args.output, args.output_file) {
		(Some(text), _) => text,
		(None, Some(path)) => tokio::fs::read_to_string(&path)
			.await
			.with_context(|| format!("Failed to read {:?}", path))?,
		(None, None) => anyhow::bail!("one of --output or --output-file is required"),
	};

	let score = grader.score(kind, &args.label, &model_output);
	if args.details {
		println!("{}", serde_json::to_string_pretty(&score)?);
	} else {
		println!("{}", score.value);
	}
	Ok(())
}
