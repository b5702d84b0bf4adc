use rayon::prelude::*;

use crate::core::actions::cancellation::{check_cancelled, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;

/// Generates fractal data with rows spread over the current rayon pool.
///
/// Each row checks for cancellation at its start and every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`](crate::core::actions::cancellation::CANCEL_CHECK_INTERVAL_PIXELS)
/// pixels within it. Output is row-major, identical to
/// [`generate_fractal_serial`](super::generate_fractal_serial::generate_fractal_serial).
pub fn generate_fractal_parallel_rayon<Alg, C>(
    algorithm: &Alg,
    cancel: &C,
) -> Result<Vec<Alg::Output>, Cancelled>
where
    Alg: FractalAlgorithm,
    C: CancelToken + ?Sized,
{
    let size = algorithm.size();
    let row_width = size.width() as usize;

    let rows: Result<Vec<Vec<Alg::Output>>, Cancelled> = (0..size.height())
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(row_width);

            for (i, x) in (0..size.width()).enumerate() {
                check_cancelled(i, cancel)?;
                row.push(algorithm.compute(x, y));
            }

            Ok(row)
        })
        .collect();

    rows.map(|rows| rows.into_iter().flatten().collect())
}
