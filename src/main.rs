use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use tez_log_parser::report::DEFAULT_OUTPUT_DIR;
use tez_log_parser::{ParsedLog, ParserConfig, ReportWriter, parse_log_files};

/// Extract query, task and DAG counter summaries from Hive on Tez logs
#[derive(Parser, Debug)]
#[command(name = "tez-log-parser")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log files to parse
    #[arg(value_name = "LOG_FILE", required = true)]
    log_files: Vec<PathBuf>,

    /// Directory that receives Summaries/ and ParserLogs/
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log level marker that prefixes every line of interest
    #[arg(long, default_value = "INFO")]
    marker: String,

    /// Parse and report to the console without writing files
    #[arg(long)]
    no_save: bool,

    /// Remove previously written reports and exit
    #[arg(long)]
    clean: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 返回 false 表示至少有一个文件解析失败
fn run(args: Args) -> Result<bool> {
    let multiple = args.log_files.len() > 1;

    if args.clean {
        for path in &args.log_files {
            writer_for(&args.output_dir, path, multiple)
                .delete()
                .with_context(|| format!("cleaning reports for {}", path.display()))?;
        }
        info!(output_dir = %args.output_dir.display(), "previous reports removed");
        return Ok(true);
    }

    let config = ParserConfig::with_marker(args.marker.as_str());
    let results = parse_log_files(&args.log_files, &config);

    let mut all_ok = true;
    for (path, result) in args.log_files.iter().zip(results) {
        match result {
            Ok(parsed) => {
                report(path, &parsed);
                if !args.no_save {
                    writer_for(&args.output_dir, path, multiple)
                        .save(&parsed)
                        .with_context(|| format!("saving reports for {}", path.display()))?;
                }
            }
            Err(e) => {
                error!(file = %path.display(), "{e}");
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

/// 多个文件时每个文件写到以文件名命名的子目录
fn writer_for(output_dir: &Path, log_file: &Path, multiple: bool) -> ReportWriter {
    match log_file.file_stem().filter(|_| multiple) {
        Some(stem) => ReportWriter::new(output_dir.join(stem)),
        None => ReportWriter::new(output_dir),
    }
}

fn report(path: &Path, parsed: &ParsedLog) {
    for warning in &parsed.warnings {
        warn!(file = %path.display(), "{warning}");
    }

    let count = |section: Option<usize>| section.map_or_else(|| "missing".to_string(), |n| n.to_string());
    info!(
        file = %path.display(),
        operations = %count(parsed.query.as_ref().map(|r| r.data.len())),
        vertices = %count(parsed.task.as_ref().map(|r| r.data.len())),
        categories = %count(parsed.detailed.as_ref().map(|r| r.data.len())),
        errors = parsed.error_count(),
        "parsed"
    );
}
