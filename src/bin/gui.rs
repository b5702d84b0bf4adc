use clap::Parser;
use mandelbrot_explorer::{EvaluatorPreference, PixelsPresenterFactory, RunGuiCommand};

/// Interactive Mandelbrot explorer.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Render on the calling thread instead of a rayon pool.
    #[arg(long, conflicts_with = "threads")]
    serial: bool,

    /// Worker threads for the rayon pool. Defaults to the available parallelism.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let evaluator = if cli.serial {
        EvaluatorPreference::Serial
    } else {
        EvaluatorPreference::Parallel { threads: cli.threads }
    };

    RunGuiCommand::new(PixelsPresenterFactory::new())
        .with_evaluator(evaluator)
        .execute()?;

    Ok(())
}
