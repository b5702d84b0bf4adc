/// A position on the complex plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexPoint {
    pub real: f64,
    pub imag: f64,
}

impl ComplexPoint {
    #[must_use]
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_squared() {
        let c = ComplexPoint::new(3.0, 4.0);
        assert_eq!(c.magnitude_squared(), 25.0); // 3² + 4² = 25
    }

    #[test]
    fn test_magnitude_squared_negative_parts() {
        let c = ComplexPoint::new(-3.0, -4.0);
        assert_eq!(c.magnitude_squared(), 25.0);
    }

    #[test]
    fn test_is_finite_rejects_nan_and_infinity() {
        assert!(ComplexPoint::new(-0.75, 0.0).is_finite());
        assert!(!ComplexPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!ComplexPoint::new(0.0, f64::INFINITY).is_finite());
    }
}
