use anyhow::{Context, Result};
use clap::Parser;
use densesolve::debug::{format_f64_mat, format_f64_vec};
use densesolve::{load_config, save_report, Method, PartialOpt, Report};
use std::path::PathBuf;
use std::time::Instant;

/// Solves dense linear systems Ax = b.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The configuration file
    #[arg(required = true)]
    config: PathBuf,

    /// Result file
    #[arg(short, long, default_value = "result.txt")]
    output: PathBuf,

    /// Solution method (overrides the configuration file).
    #[arg(short, long)]
    solver: Option<Method>,

    /// Convergence tolerance.
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Maximum number of iterations.
    #[arg(short, long = "max-iter")]
    max_iter: Option<usize>,

    /// SOR relaxation factor. Default value is 1.5.
    #[arg(short = 'w', long)]
    omega: Option<f64>,

    /// Only report errors.
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,

    /// Show diagnostic output.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_level(false)
        .format_target(false)
        .format_timestamp(None)
        .init();

    match execute(&cli) {
        Ok(_) => {
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let config = load_config(&cli.config)?;
    log::debug!("A: {}", format_f64_mat(&config.matrix));
    log::debug!("b: {}", format_f64_vec(&config.rhs));

    let overrides = PartialOpt {
        method: cli.solver,
        tolerance: cli.tolerance,
        max_iterations: cli.max_iter,
        omega: cli.omega,
    };
    let opt = overrides.or(config.opt).resolve()?;
    log::debug!(
        "method: {}, tolerance: {}, max iterations: {}",
        opt.method,
        opt.tolerance,
        opt.max_iterations
    );

    let system = opt.system(config.matrix, config.rhs)?;
    let solver = opt.solver();

    let mut x = vec![0.0; system.size()];
    let t0 = Instant::now();
    let iterations = solver
        .run(&system, &mut x)
        .with_context(|| format!("{} solver failed", opt.method))?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    log::info!("solve time: {:.3}ms", elapsed_ms);
    log::debug!("x: {}", format_f64_vec(&x));

    let report = Report {
        method: opt.method,
        tolerance: opt.tolerance,
        max_iterations: opt.max_iterations,
        iterations,
        elapsed_ms,
        matrix: system.matrix(),
        rhs: system.rhs(),
        solution: &x,
    };
    save_report(&cli.output, &report)?;

    if !cli.quiet {
        println!("results written to {}", cli.output.display());
    }
    log::debug!("total time: {:.3}ms", start.elapsed().as_secs_f64() * 1e3);

    Ok(())
}
