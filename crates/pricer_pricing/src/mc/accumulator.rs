//! Payoff accumulator for the chunked reduction.
//!
//! Each chunk fills its own accumulator sequentially; chunk accumulators are
//! then merged in chunk order. Because the chunk boundaries and the merge
//! order are both fixed, the floating-point result does not depend on which
//! thread evaluated which chunk.

/// Running sums of undiscounted payoffs.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PayoffAccumulator;
///
/// let mut left = PayoffAccumulator::new();
/// left.add(1.0);
/// left.add(3.0);
///
/// let mut right = PayoffAccumulator::new();
/// right.add(5.0);
///
/// left.merge(&right);
/// assert_eq!(left.count(), 3);
/// assert!((left.mean() - 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffAccumulator {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl PayoffAccumulator {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one path payoff.
    #[inline]
    pub fn add(&mut self, payoff: f64) {
        self.sum += payoff;
        self.sum_sq += payoff * payoff;
        self.count += 1;
    }

    /// Adds the sums of another accumulator.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
    }

    /// Sum of payoffs.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of payoffs added.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean. NaN when empty.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Unbiased sample variance (`n - 1` denominator).
    ///
    /// Returns 0 for fewer than two payoffs.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let centred = self.sum_sq - self.sum * self.sum / n;
        // Cancellation can push a zero-variance sample slightly negative
        (centred / (n - 1.0)).max(0.0)
    }

    /// Standard error of the mean, `sqrt(variance / n)`.
    ///
    /// Returns 0 for fewer than two payoffs.
    pub fn std_error(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.variance() / self.count as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        let acc = PayoffAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert!(acc.mean().is_nan());
        assert_eq!(acc.std_error(), 0.0);
    }

    #[test]
    fn test_moments() {
        let mut acc = PayoffAccumulator::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            acc.add(x);
        }
        assert_relative_eq!(acc.mean(), 5.0, epsilon = 1e-12);
        // Population variance 4, sample variance 32 / 7
        assert_relative_eq!(acc.variance(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(acc.std_error(), (32.0 / 7.0 / 8.0_f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_payoff_has_zero_error() {
        let mut acc = PayoffAccumulator::new();
        acc.add(12.5);
        assert_eq!(acc.mean(), 12.5);
        assert_eq!(acc.std_error(), 0.0);
    }

    #[test]
    fn test_constant_payoffs_have_zero_error() {
        let mut acc = PayoffAccumulator::new();
        for _ in 0..1000 {
            acc.add(0.1);
        }
        assert!(acc.std_error() < 1e-9);
    }

    #[test]
    fn test_merge_equals_sequential() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 * 0.25).collect();

        let mut whole = PayoffAccumulator::new();
        values.iter().for_each(|&v| whole.add(v));

        let mut merged = PayoffAccumulator::new();
        for chunk in values.chunks(10) {
            let mut part = PayoffAccumulator::new();
            chunk.iter().for_each(|&v| part.add(v));
            merged.merge(&part);
        }

        assert_eq!(merged.count(), whole.count());
        assert_relative_eq!(merged.mean(), whole.mean(), epsilon = 1e-12);
        assert_relative_eq!(merged.variance(), whole.variance(), epsilon = 1e-9);
    }
}
