use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ktour::search::{EngineConfig, solve};
use ktour::parser;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "ktour")]
#[command(about = "ktour - parallel shortest-knight-tour solver")]
#[command(version)]
struct Args {
    /// Puzzle file to solve, or a directory of puzzle files
    input: PathBuf,

    /// Number of search workers (defaults to the CPU count)
    #[arg(long)]
    workers: Option<usize>,

    /// Expander threads per worker
    #[arg(long)]
    threads: Option<usize>,

    /// Minimum task-pool size before dispatch starts
    #[arg(long)]
    min_pool: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = EngineConfig::default();
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(min_pool) = args.min_pool {
        config = config.with_min_pool(min_pool);
    }

    if let Err(err) = run(&args.input, &config) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(input: &Path, config: &EngineConfig) -> Result<(), Box<dyn Error>> {
    for path in collect_inputs(input)? {
        let puzzle = parser::parse_file(&path)?;
        let report = solve(&puzzle, config)?;
        println!("{}", report.render(&puzzle, &path.display().to_string()));
    }
    Ok(())
}

/// A file argument is solved as-is; a directory argument means every
/// regular file directly inside it, dot-files skipped, in name order.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(format!("no puzzle files in {}", input.display()).into());
    }
    Ok(paths)
}
