use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mandelbrot_explorer::{
    ColourMapKind, ComplexPoint, EvaluatorPreference, PpmFilePresenter, RenderImageController, RenderImageError,
    RenderImageSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColourMapArg {
    Rainbow,
    Fire,
}

impl From<ColourMapArg> for ColourMapKind {
    fn from(arg: ColourMapArg) -> Self {
        match arg {
            ColourMapArg::Rainbow => ColourMapKind::RainbowBands,
            ColourMapArg::Fire => ColourMapKind::FireGradient,
        }
    }
}

/// Renders one view of the Mandelbrot set to a PPM image.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(long, default_value_t = 256)]
    iterations: u32,

    /// Real part of the image centre.
    #[arg(long, default_value_t = -0.75, allow_negative_numbers = true)]
    center_re: f64,

    /// Imaginary part of the image centre.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_im: f64,

    /// Magnification relative to the view that fits the whole set.
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    #[arg(long, value_enum, default_value_t = ColourMapArg::Rainbow)]
    colour_map: ColourMapArg,

    /// Render on the calling thread instead of a rayon pool.
    #[arg(long)]
    serial: bool,

    #[arg(long, short, default_value = "output/mandelbrot.ppm")]
    output: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Render(#[from] RenderImageError),
    #[error("cannot create {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Cli {
    fn settings(&self) -> RenderImageSettings {
        RenderImageSettings {
            width: self.width,
            height: self.height,
            max_iterations: self.iterations,
            center: ComplexPoint::new(self.center_re, self.center_im),
            zoom: self.zoom,
            colour_map: self.colour_map.into(),
            evaluator: if self.serial {
                EvaluatorPreference::Serial
            } else {
                EvaluatorPreference::default()
            },
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(parent) = cli.output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CliError::OutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut controller = RenderImageController::new(PpmFilePresenter::new());

    controller.generate(&cli.settings())?;
    controller.write(&cli.output)?;

    tracing::info!(path = %cli.output.display(), "image written");

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    run(&Cli::parse())?;

    Ok(())
}
