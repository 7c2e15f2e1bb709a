use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mazesolver::{config::parse_color, solve_file, SolverConfig};

/// Find the shortest path through a maze image and draw it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Maze image, black pixels are walls
    input: PathBuf,

    /// Where to write the solved image
    #[arg(default_value = "solution.png")]
    output: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path color as R,G,B (overrides the configuration file)
    #[arg(long, value_parser = parse_color)]
    color: Option<[u8; 3]>,

    /// Largest accepted width * height (overrides the configuration file)
    #[arg(long)]
    max_pixels: Option<u64>,
}

fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let mut config = match &cli.config {
        Some(path) => SolverConfig::from_file(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(color) = cli.color {
        config.highlight = color;
    }
    if let Some(max_pixels) = cli.max_pixels {
        config.max_pixels = max_pixels;
    }

    let result = solve_file(&cli.input, &cli.output, &config)
        .with_context(|| format!("could not solve {}", cli.input.display()))?;

    println!(
        "{} -> {}: {} steps, saved to {}",
        result.start,
        result.goal,
        result.hops,
        cli.output.display()
    );

    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(Cli::parse())
}
