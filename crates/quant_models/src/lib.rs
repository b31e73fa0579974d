//! # Quant Models (L2: Business Logic)
//!
//! Closed-form option analytics and rule-based trading strategies.
//!
//! This crate provides:
//! - Option parameter types and multi-leg option strategies (`instruments`)
//! - Black-Scholes pricing, analytic Greeks and implied volatility (`analytical`)
//! - Moving-average, RSI and Bollinger-band signals (`signals`)
//!
//! ## Design Principles
//!
//! - **Validate once at construction**: pricers and strategies reject invalid
//!   inputs up front and are infallible afterwards
//! - **Desk units**: theta per calendar day, vega and rho per 1% move
//! - **Strategies as data**: a tagged enum plus pure evaluation functions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod signals;
