//! Execution backends for escape-count evaluation.
//!
//! Both backends run the same per-pixel algorithm and produce bit-identical,
//! row-major output. The rayon backend owns a dedicated pool so frame work
//! never competes with whatever else uses the global one.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorKind {
    Serial,
    Rayon { threads: usize },
}

impl std::fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serial => f.write_str("serial"),
            Self::Rayon { threads } => write!(f, "rayon ({threads} threads)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorPreference {
    Serial,
    /// `None` sizes the pool to the available parallelism.
    Parallel { threads: Option<usize> },
}

impl Default for EvaluatorPreference {
    fn default() -> Self {
        Self::Parallel { threads: None }
    }
}

pub trait FrameEvaluator: Send + Sync {
    fn kind(&self) -> EvaluatorKind;

    fn escape_counts(
        &self,
        algorithm: &MandelbrotAlgorithm,
        cancel: &dyn CancelToken,
    ) -> Result<Vec<f64>, Cancelled>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerialEvaluator;

impl FrameEvaluator for SerialEvaluator {
    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::Serial
    }

    fn escape_counts(
        &self,
        algorithm: &MandelbrotAlgorithm,
        cancel: &dyn CancelToken,
    ) -> Result<Vec<f64>, Cancelled> {
        generate_fractal_serial(algorithm, cancel)
    }
}

#[derive(Debug)]
pub struct RayonEvaluator {
    pool: ThreadPool,
}

impl RayonEvaluator {
    pub fn new(threads: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let threads = threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("mandelbrot-eval-{index}"))
            .build()?;

        Ok(Self { pool })
    }
}

impl FrameEvaluator for RayonEvaluator {
    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::Rayon {
            threads: self.pool.current_num_threads(),
        }
    }

    fn escape_counts(
        &self,
        algorithm: &MandelbrotAlgorithm,
        cancel: &dyn CancelToken,
    ) -> Result<Vec<f64>, Cancelled> {
        self.pool
            .install(|| generate_fractal_parallel_rayon(algorithm, cancel))
    }
}

/// Builds the preferred backend, falling back to serial evaluation when the
/// thread pool cannot be created.
#[must_use]
pub fn select_evaluator(preference: EvaluatorPreference) -> Box<dyn FrameEvaluator> {
    match preference {
        EvaluatorPreference::Serial => {
            tracing::info!("using serial evaluator");
            Box::new(SerialEvaluator)
        }
        EvaluatorPreference::Parallel { threads } => match RayonEvaluator::new(threads) {
            Ok(evaluator) => {
                tracing::info!(kind = %evaluator.kind(), "using rayon evaluator");
                Box::new(evaluator)
            }
            Err(err) => {
                tracing::warn!(error = %err, "thread pool unavailable, falling back to serial evaluator");
                Box::new(SerialEvaluator)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::canvas_size::CanvasSize;
    use crate::core::data::frame_params::FrameParams;
    use crate::core::view::viewport::ViewportState;

    fn algorithm() -> MandelbrotAlgorithm {
        MandelbrotAlgorithm::new(FrameParams {
            view: ViewportState {
                cx: -0.75,
                cy: 0.1,
                scale: 3.5 / 64.0,
            },
            size: CanvasSize::new(64, 48).unwrap(),
            max_iterations: 200,
        })
        .unwrap()
    }

    #[test]
    fn serial_and_rayon_are_identical() {
        let rayon = RayonEvaluator::new(Some(3)).unwrap();

        let serial_counts = SerialEvaluator.escape_counts(&algorithm(), &NeverCancel).unwrap();
        let rayon_counts = rayon.escape_counts(&algorithm(), &NeverCancel).unwrap();

        assert_eq!(serial_counts.len(), 64 * 48);
        assert!(
            serial_counts
                .iter()
                .zip(&rayon_counts)
                .all(|(a, b)| a.to_bits() == b.to_bits())
        );
    }

    #[test]
    fn rayon_reports_its_thread_count() {
        let rayon = RayonEvaluator::new(Some(2)).unwrap();

        assert_eq!(rayon.kind(), EvaluatorKind::Rayon { threads: 2 });
    }

    #[test]
    fn select_honours_serial_preference() {
        assert_eq!(select_evaluator(EvaluatorPreference::Serial).kind(), EvaluatorKind::Serial);
    }

    #[test]
    fn select_builds_rayon_when_available() {
        let evaluator = select_evaluator(EvaluatorPreference::Parallel { threads: Some(2) });

        assert_eq!(evaluator.kind(), EvaluatorKind::Rayon { threads: 2 });
    }

    #[test]
    fn evaluators_observe_cancellation() {
        let cancelled = || true;

        assert_eq!(SerialEvaluator.escape_counts(&algorithm(), &cancelled), Err(Cancelled));
        assert_eq!(
            RayonEvaluator::new(Some(2))
                .unwrap()
                .escape_counts(&algorithm(), &cancelled),
            Err(Cancelled)
        );
    }
}
