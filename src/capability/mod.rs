//! Process capability analysis.
//!
//! Relates the spread and centering of a process to its specification
//! limits.
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Actual capability (centering considered)
//! - **Cpu**, **Cpl** — One-sided components of Cpk
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;

pub use indices::{capability, capability_with_sigma, CapabilityResult};
