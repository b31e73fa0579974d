//! Option contract descriptions.
//!
//! - [`OptionParameters`]: market and contract inputs for one European option
//! - [`OptionType`]: call or put
//! - [`OptionStrategy`]: ordered legs evaluated as an expiry payoff diagram

pub mod option;
pub mod strategy;

pub use option::{OptionParameters, OptionType};
pub use strategy::{
    spot_grid, LegAction, OptionLeg, OptionStrategy, PayoffPoint, StrategyProfile,
};
