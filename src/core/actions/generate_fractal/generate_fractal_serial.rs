use crate::core::actions::cancellation::{check_cancelled, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;

/// Row-major evaluation on the calling thread.
pub fn generate_fractal_serial<Alg, C>(
    algorithm: &Alg,
    cancel: &C,
) -> Result<Vec<Alg::Output>, Cancelled>
where
    Alg: FractalAlgorithm,
    C: CancelToken + ?Sized,
{
    let size = algorithm.size();
    let mut results = Vec::with_capacity(size.pixel_count());

    for y in 0..size.height() {
        for (i, x) in (0..size.width()).enumerate() {
            check_cancelled(i, cancel)?;
            results.push(algorithm.compute(x, y));
        }
    }

    Ok(results)
}
