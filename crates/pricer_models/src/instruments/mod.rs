//! Option definitions and payoff functions.
//!
//! - [`option`]: `OptionKind`, `OptionStyle` and the validated `OptionSpec`
//! - [`payoff`]: per-path payoff evaluation, including the Asian averaging convention

pub mod option;
pub mod payoff;

pub use option::{OptionKind, OptionSpec, OptionStyle};
pub use payoff::{
    arithmetic_average, asian_arithmetic_payoff, european_payoff, AsianAveraging, PathPayoff,
};
