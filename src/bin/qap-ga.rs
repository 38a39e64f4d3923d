use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qap_ga::archive::extract_tar_gz;
use qap_ga::batch::{run_directory, InstanceReport};
use qap_ga::ga::GaConfig;
use qap_ga::{solve_with_config, GapReport, Instance, ReferenceSolution};
use std::path::PathBuf;
use std::time::Instant;

/// qap-ga: genetic algorithm for the Quadratic Assignment Problem
///
/// Reads QAPLIB instances (`.dat`) and, when available, their reference
/// solutions (`.sln`) to report the gap to the best known cost.
#[derive(Parser, Debug)]
#[command(name = "qap-ga")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every generation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a single instance.
    Solve {
        /// QAPLIB instance file
        instance: PathBuf,

        /// Reference solution file for gap reporting
        #[arg(short, long)]
        solution: Option<PathBuf>,

        #[command(flatten)]
        ga: GaArgs,
    },

    /// Solve every `.dat` file of a directory and print a summary.
    Batch {
        /// Directory with instance files
        #[arg(long, default_value = "qapdata")]
        data_dir: PathBuf,

        /// Directory with `.sln` files named after the instances
        #[arg(long, default_value = "qapsoln")]
        solution_dir: PathBuf,

        /// Unpack this `.tar.gz` into the data directory first
        #[arg(long)]
        data_archive: Option<PathBuf>,

        /// Unpack this `.tar.gz` into the solution directory first
        #[arg(long)]
        solution_archive: Option<PathBuf>,

        #[command(flatten)]
        ga: GaArgs,
    },
}

#[derive(Args, Debug)]
struct GaArgs {
    /// Number of generations
    #[arg(short, long, default_value_t = 100)]
    generations: usize,

    /// Population size
    #[arg(short, long, default_value_t = 100)]
    population: usize,

    /// Individuals carried unchanged into the next generation
    #[arg(short, long, default_value_t = 20)]
    elite: usize,

    /// Probability of mutating a child
    #[arg(short, long, default_value_t = 0.1)]
    mutation_rate: f64,

    /// Tournament size
    #[arg(short, long, default_value_t = 3)]
    tournament_size: usize,

    /// Random seed (default: drawn from the OS, printed for replay)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many milliseconds (checked between generations)
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Evaluate offspring in parallel (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

impl GaArgs {
    fn to_config(&self) -> Result<GaConfig> {
        let config = GaConfig {
            population_size: self.population,
            max_generations: self.generations,
            elite_count: self.elite,
            mutation_rate: self.mutation_rate,
            parallel: self.parallel,
            seed: self.seed,
            time_limit_ms: self.time_limit_ms,
            ..GaConfig::default()
        }
        .with_tournament_size(self.tournament_size);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    match cli.command {
        Commands::Solve {
            instance,
            solution,
            ga,
        } => solve_one(instance, solution, &ga.to_config()?),
        Commands::Batch {
            data_dir,
            solution_dir,
            data_archive,
            solution_archive,
            ga,
        } => {
            let config = ga.to_config()?;
            for (archive, dest) in [(data_archive, &data_dir), (solution_archive, &solution_dir)] {
                if let Some(archive) = archive {
                    extract_tar_gz(&archive, dest)
                        .with_context(|| format!("Failed to unpack {}", archive.display()))?;
                }
            }
            solve_all(data_dir, solution_dir, &config)
        }
    }
}

fn solve_one(instance_path: PathBuf, solution_path: Option<PathBuf>, config: &GaConfig) -> Result<()> {
    let instance = Instance::from_file(&instance_path)
        .with_context(|| format!("Failed to load instance {}", instance_path.display()))?;

    let optimal = match solution_path {
        Some(path) => ReferenceSolution::load_optional(&path)
            .with_context(|| format!("Failed to load solution {}", path.display()))?
            .map(|r| r.optimal_cost),
        None => None,
    };

    let started = Instant::now();
    let solution = solve_with_config(&instance, config)?;
    let elapsed = started.elapsed().as_secs_f64();

    println!("Instance:    {} (n = {})", instance_path.display(), instance.size());
    println!("Seed:        {}", solution.seed);
    println!("Generations: {}{}", solution.generations, if solution.stopped_early { " (stopped early)" } else { "" });
    println!("Permutation: {:?}", solution.permutation);
    println!("Result:      {}", GapReport::new(solution.cost, optimal));
    println!("Time:        {elapsed:.2}s");
    Ok(())
}

fn solve_all(data_dir: PathBuf, solution_dir: PathBuf, config: &GaConfig) -> Result<()> {
    let reports = run_directory(&data_dir, &solution_dir, config)
        .with_context(|| format!("Batch over {} failed", data_dir.display()))?;

    println!("\nSummary:");
    for report in &reports {
        println!("{report}");
    }
    print_totals(&reports);
    Ok(())
}

fn print_totals(reports: &[InstanceReport]) {
    let gaps: Vec<f64> = reports.iter().filter_map(|r| r.gap.gap_percent).collect();
    let total_time: f64 = reports.iter().map(|r| r.elapsed_secs).sum();
    println!(
        "\n{} instances, {} with reference, total time {:.2}s",
        reports.len(),
        gaps.len(),
        total_time
    );
    if !gaps.is_empty() {
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        println!("Mean gap: {mean:.2}%");
    }
}
