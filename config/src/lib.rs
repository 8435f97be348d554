//! # Config Crate
//!
//! Centralized configuration constants for the structured mesh engine.
//! Tolerances, transition ratios and warp defaults live here so the mesh
//! crate never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MeshConfig, DEFAULT_BLEND_EXPONENT, TRANSITION_RATIO};
//!
//! let cfg = MeshConfig::default();
//! assert_eq!(cfg.blend_exponent, DEFAULT_BLEND_EXPONENT);
//!
//! // A transition plate of order 2 needs faces of 3^2 * k + 1 nodes.
//! let nodes_per_cell = TRANSITION_RATIO.pow(2);
//! assert_eq!(nodes_per_cell, 9);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: `MeshConfig::new` rejects nonsensical values

pub mod constants;

#[cfg(test)]
mod tests;
