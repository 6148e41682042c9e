//! Path payoff functions.
//!
//! Every payoff takes a full price path (`steps + 1` prices, index 0 being
//! the initial price) and returns the undiscounted settlement value.
//!
//! # Asian averaging
//!
//! The arithmetic Asian average covers the simulated prices `S_1..S_n` by
//! default, leaving the known initial price out. [`AsianAveraging`] selects
//! the alternative convention that also averages `S_0`.

use num_traits::Float;

use super::option::{OptionKind, OptionSpec, OptionStyle};

/// Which prices of the path enter the Asian average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AsianAveraging {
    /// Average `S_1..S_n`.
    #[default]
    ExcludeInitial,
    /// Average `S_0..S_n`.
    IncludeInitial,
}

impl AsianAveraging {
    /// Returns the observed slice of `path` under this convention.
    #[inline]
    pub fn observations<'a, T>(&self, path: &'a [T]) -> &'a [T] {
        match self {
            AsianAveraging::ExcludeInitial => &path[1..],
            AsianAveraging::IncludeInitial => path,
        }
    }
}

/// Arithmetic mean of `prices`.
///
/// Returns NaN for an empty slice.
#[inline]
pub fn arithmetic_average<T: Float>(prices: &[T]) -> T {
    let sum = prices.iter().fold(T::zero(), |acc, &p| acc + p);
    let n = T::from(prices.len()).unwrap_or_else(T::nan);
    sum / n
}

/// European payoff on the terminal price of `path`.
///
/// # Panics
/// Panics if `path` is empty.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{european_payoff, OptionKind};
///
/// let path = [100.0, 104.0, 112.0];
/// assert_eq!(european_payoff(OptionKind::Call, &path, 100.0), 12.0);
/// assert_eq!(european_payoff(OptionKind::Put, &path, 100.0), 0.0);
/// ```
#[inline]
pub fn european_payoff(kind: OptionKind, path: &[f64], strike: f64) -> f64 {
    let terminal = path[path.len() - 1];
    kind.intrinsic(terminal, strike)
}

/// Arithmetic Asian payoff on `path`.
///
/// # Panics
/// Panics if `path` holds fewer than two prices.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{asian_arithmetic_payoff, AsianAveraging, OptionKind};
///
/// let path = [100.0, 90.0, 110.0, 130.0];
/// // mean(90, 110, 130) = 110
/// let excl = asian_arithmetic_payoff(OptionKind::Call, &path, 100.0, AsianAveraging::ExcludeInitial);
/// assert_eq!(excl, 10.0);
/// // mean(100, 90, 110, 130) = 107.5
/// let incl = asian_arithmetic_payoff(OptionKind::Call, &path, 100.0, AsianAveraging::IncludeInitial);
/// assert_eq!(incl, 7.5);
/// ```
#[inline]
pub fn asian_arithmetic_payoff(
    kind: OptionKind,
    path: &[f64],
    strike: f64,
    averaging: AsianAveraging,
) -> f64 {
    assert!(path.len() >= 2, "path must hold at least one simulated step");
    let average = arithmetic_average(averaging.observations(path));
    kind.intrinsic(average, strike)
}

/// Payoff evaluator for one option, dispatched statically on style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPayoff {
    kind: OptionKind,
    style: OptionStyle,
    strike: f64,
    averaging: AsianAveraging,
}

impl PathPayoff {
    /// Builds the evaluator for `spec` using the given Asian convention.
    pub fn new(spec: &OptionSpec, averaging: AsianAveraging) -> Self {
        Self {
            kind: spec.kind(),
            style: spec.style(),
            strike: spec.strike(),
            averaging,
        }
    }

    /// Undiscounted payoff of one path.
    #[inline]
    pub fn evaluate(&self, path: &[f64]) -> f64 {
        match self.style {
            OptionStyle::European => european_payoff(self.kind, path, self.strike),
            OptionStyle::AsianArithmetic => {
                asian_arithmetic_payoff(self.kind, path, self.strike, self.averaging)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PATH: [f64; 5] = [100.0, 95.0, 105.0, 98.0, 102.0];

    #[test]
    fn test_arithmetic_average() {
        assert_relative_eq!(arithmetic_average(&[1.0_f64, 2.0, 3.0, 4.0]), 2.5);
        assert!(arithmetic_average::<f64>(&[]).is_nan());
    }

    #[test]
    fn test_european_uses_terminal_price() {
        assert_eq!(european_payoff(OptionKind::Call, &PATH, 100.0), 2.0);
        assert_eq!(european_payoff(OptionKind::Put, &PATH, 100.0), 0.0);
        assert_eq!(european_payoff(OptionKind::Put, &PATH, 110.0), 8.0);
    }

    #[test]
    fn test_asian_excludes_initial_by_default() {
        // mean(95, 105, 98, 102) = 100
        let payoff = asian_arithmetic_payoff(
            OptionKind::Put,
            &PATH,
            101.0,
            AsianAveraging::default(),
        );
        assert_relative_eq!(payoff, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_asian_include_initial() {
        // mean(100, 95, 105, 98, 102) = 100
        let payoff = asian_arithmetic_payoff(
            OptionKind::Call,
            &PATH,
            99.0,
            AsianAveraging::IncludeInitial,
        );
        assert_relative_eq!(payoff, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_step_asian_equals_european() {
        let path = [100.0, 117.0];
        for kind in [OptionKind::Call, OptionKind::Put] {
            assert_eq!(
                asian_arithmetic_payoff(kind, &path, 105.0, AsianAveraging::ExcludeInitial),
                european_payoff(kind, &path, 105.0)
            );
        }
    }

    #[test]
    #[should_panic(expected = "at least one simulated step")]
    fn test_asian_rejects_initial_only_path() {
        let _ = asian_arithmetic_payoff(OptionKind::Call, &[100.0], 100.0, AsianAveraging::default());
    }

    #[test]
    fn test_path_payoff_dispatch() {
        let european = OptionSpec::european_call(100.0, 0.0).unwrap();
        let asian = OptionSpec::asian_call(99.0, 0.0).unwrap();

        assert_eq!(PathPayoff::new(&european, AsianAveraging::default()).evaluate(&PATH), 2.0);
        assert_relative_eq!(
            PathPayoff::new(&asian, AsianAveraging::default()).evaluate(&PATH),
            1.0,
            epsilon = 1e-12
        );
    }
}
