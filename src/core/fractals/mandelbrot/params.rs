use crate::core::fractals::mandelbrot::errors::MandelbrotError;

pub const DEFAULT_ITERATION_BUDGET: u32 = 256;

/// Iteration cap for escape-time evaluation. Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IterationBudget(u32);

impl IterationBudget {
    pub fn new(max_iterations: u32) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterations);
        }

        Ok(Self(max_iterations))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self(DEFAULT_ITERATION_BUDGET)
    }
}

impl TryFrom<u32> for IterationBudget {
    type Error = MandelbrotError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_rejected() {
        assert_eq!(IterationBudget::new(0), Err(MandelbrotError::ZeroMaxIterations));
        assert_eq!(IterationBudget::try_from(0), Err(MandelbrotError::ZeroMaxIterations));
    }

    #[test]
    fn test_positive_budget_round_trips() {
        assert_eq!(IterationBudget::new(1).unwrap().get(), 1);
        assert_eq!(IterationBudget::new(5000).unwrap().get(), 5000);
        assert_eq!(IterationBudget::default().get(), DEFAULT_ITERATION_BUDGET);
    }
}
