use anyhow::{bail, Context};
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use u_bitea::bitea::{BitEaConfig, BitEaResult, BitEaRunner};
use u_bitea::io::{load_instance, write_coloring};

const TABLE_HEADER: &str =
    "|  graph name   | target color | k time | k | cost | uncolored | total time |";

/// Batch benchmark runner for BitEA
#[derive(Parser)]
#[command(name = "bitea-bench")]
#[command(about = "Run BitEA over a list of DIMACS graphs and record a summary table", long_about = None)]
struct Cli {
    /// Test list: `size target_color iterations population test_count graph weights result` per line
    test_list: PathBuf,
    /// Summary file; rows are appended
    summary: PathBuf,
    /// Generator workers per run (defaults to available parallelism)
    #[arg(long)]
    workers: Option<usize>,
    /// Base seed; run `i` of a case uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,
}

struct TestCase {
    size: usize,
    target_color: usize,
    iterations: usize,
    population: usize,
    test_count: usize,
    graph: PathBuf,
    weights: Option<PathBuf>,
    result: PathBuf,
}

impl TestCase {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 8 {
            bail!("expected 8 fields, got {}", fields.len());
        }
        let number = |i: usize, name: &str| -> anyhow::Result<usize> {
            fields[i]
                .parse()
                .with_context(|| format!("invalid {name} {:?}", fields[i]))
        };
        Ok(Self {
            size: number(0, "size")?,
            target_color: number(1, "target_color")?,
            iterations: number(2, "iterations")?,
            population: number(3, "population")?,
            test_count: number(4, "test_count")?,
            graph: PathBuf::from(fields[5]),
            weights: (fields[6] != "null").then(|| PathBuf::from(fields[6])),
            result: PathBuf::from(fields[7]),
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let list = File::open(&cli.test_list)
        .with_context(|| format!("opening test list {}", cli.test_list.display()))?;
    let mut summary = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.summary)
        .with_context(|| format!("opening summary {}", cli.summary.display()))?;

    println!("{TABLE_HEADER}");

    for (idx, line) in BufReader::new(list).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let case = match TestCase::parse(line) {
            Ok(case) => case,
            Err(e) => {
                log::error!("line {}: {e:#}", idx + 1);
                continue;
            }
        };
        if let Err(e) = run_case(&case, &cli, &mut summary) {
            log::error!("line {} ({}): {e:#}", idx + 1, case.graph.display());
        }
    }

    Ok(())
}

fn run_case(case: &TestCase, cli: &Cli, summary: &mut File) -> anyhow::Result<()> {
    let graph = load_instance(&case.graph, case.weights.as_deref())
        .with_context(|| format!("loading {}", case.graph.display()))?;
    if graph.size() != case.size {
        bail!(
            "graph has {} vertices, test list says {}",
            graph.size(),
            case.size
        );
    }

    let mut config = BitEaConfig::new(case.target_color)
        .with_population_size(case.population)
        .with_max_generations(case.iterations);
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }

    let mut best_fitness = u64::MAX;
    for run in 0..case.test_count {
        if let Some(seed) = cli.seed {
            config = config.with_seed(seed.wrapping_add(run as u64));
        }

        let started = Instant::now();
        let result = BitEaRunner::run(&graph, &config)?;
        let total = started.elapsed().as_secs_f64();

        if result.best_fitness == 0 && !result.best.is_proper(&graph) {
            log::error!(
                "{}: zero fitness but {} conflicting edges",
                case.graph.display(),
                result.best.conflicting_edges(&graph).len()
            );
        }

        let row = table_row(&case.graph, case.target_color, &result, total);
        println!("{row}");
        writeln!(summary, "{row}")?;
        summary.flush()?;

        if result.best_fitness < best_fitness {
            best_fitness = result.best_fitness;
            write_result(&case.result, &row, &result)?;
        }
    }
    Ok(())
}

fn table_row(graph: &Path, target: usize, result: &BitEaResult, total_secs: f64) -> String {
    format!(
        "|{}|{:3}|{:10.6}|{:3}|{:5}|{:3}|{:10.6}|",
        graph.display(),
        target,
        result.best_solution_secs(),
        result.color_count,
        result.best_fitness,
        result.uncolored,
        total_secs
    )
}

fn write_result(path: &Path, row: &str, result: &BitEaResult) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating result {}", path.display()))?;
    write_coloring(
        BufWriter::new(file),
        &format!("{TABLE_HEADER}\n{row}"),
        &result.best,
    )?;
    log::info!("wrote coloring to {}", path.display());
    Ok(())
}
