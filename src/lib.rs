//! # spc-core
//!
//! Statistical process control for individual observations: I-MR control
//! charts, Nelson run rules, normality testing and process capability.
//!
//! The crate is a pure computational core. It operates on an already
//! cleaned numeric [`Series`] and returns plain immutable data; reading
//! spreadsheets, drawing charts and building reports are the caller's
//! concern.
//!
//! ## Modules
//!
//! - [`spc`] — Control limits, sigma zones, run rules and stability verdict
//! - [`normality`] — Shapiro-Wilk normality test
//! - [`capability`] — Process capability indices (Cpk, Cp)
//! - [`descriptive`] — Descriptive summary of a series
//! - [`analysis`] — One-call analysis producing a complete report
//!
//! ## Example
//!
//! ```
//! use spc_core::{analyze, AnalysisConfig, Series};
//!
//! let series = Series::new(vec![10.0, 12.0, 8.0, 14.0, 80.0]).unwrap();
//! let report = analyze(&series, &AnalysisConfig::default());
//!
//! assert_eq!(report.is_stable(), Some(false));
//! ```
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every function is pure and reentrant
//! - **Recoverable errors**: failures are values, and one failed
//!   sub-computation never blocks the others
//! - **Research-backed**: constants and rules follow ASTM E2587 and Nelson (1984)

pub mod analysis;
pub mod capability;
pub mod config;
pub mod descriptive;
pub mod error;
pub mod normality;
pub mod series;
pub mod spc;

pub use analysis::{analyze, AnalysisReport};
pub use capability::{capability, CapabilityResult};
pub use config::{AnalysisConfig, SignificanceLevel, SpecLimits};
pub use descriptive::{describe, DescriptiveSummary};
pub use error::{Result, SpcError};
pub use normality::{normality_test, NormalityResult};
pub use series::{MovingRange, Series};
