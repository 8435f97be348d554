//! Centralized configuration values shared by the mesh engine.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Numerical tolerance for coordinate comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-11)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1.0e-10;

/// Tolerance used when deciding whether two nodes occupy the same point.
///
/// Transition cells place nodes at thirds of the coarse spacing, so this is
/// kept well above accumulated rounding but far below any realistic spacing.
///
/// # Examples
/// ```
/// use config::constants::{COINCIDENCE_TOLERANCE, EPSILON};
/// assert!(COINCIDENCE_TOLERANCE > EPSILON);
/// ```
pub const COINCIDENCE_TOLERANCE: f64 = 1.0e-8;

// =============================================================================
// LABELS
// =============================================================================

/// First label handed out for nodes and elements.
///
/// # Examples
/// ```
/// use config::constants::FIRST_LABEL;
/// assert_eq!(FIRST_LABEL, 1);
/// ```
pub const FIRST_LABEL: u32 = 1;

// =============================================================================
// TRANSITIONS
// =============================================================================

/// Density reduction factor of one transition level.
///
/// # Examples
/// ```
/// use config::constants::TRANSITION_RATIO;
/// assert_eq!(TRANSITION_RATIO, 3);
/// ```
pub const TRANSITION_RATIO: usize = 3;

/// Node count along each edge of a transition cell window.
///
/// # Examples
/// ```
/// use config::constants::{TRANSITION_CELL_NODES, TRANSITION_RATIO};
/// assert_eq!(TRANSITION_CELL_NODES, TRANSITION_RATIO + 1);
/// ```
pub const TRANSITION_CELL_NODES: usize = TRANSITION_RATIO + 1;

// =============================================================================
// WARPS
// =============================================================================

/// Default power-law exponent of the square-to-cylinder blend.
///
/// Nodes at radius `r` are displaced by `(r / r_max)^f` of the full warp.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_BLEND_EXPONENT;
/// let r_ratio: f64 = 0.5;
/// assert!(r_ratio.powf(DEFAULT_BLEND_EXPONENT) > r_ratio);
/// ```
pub const DEFAULT_BLEND_EXPONENT: f64 = 0.75;

/// Immutable snapshot of the settings a mesh is built with.
///
/// # Examples
/// ```
/// use config::constants::MeshConfig;
/// let config = MeshConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert!(!config.strict_transition_sizing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Tolerance for geometric degeneracy checks.
    pub tolerance: f64,
    /// Exponent of the square-to-cylinder radial blend.
    pub blend_exponent: f64,
    /// When set, transition drivers reject grids whose extents are not
    /// `3^order * k + 1` instead of stopping early.
    pub strict_transition_sizing: bool,
}

impl MeshConfig {
    /// Builds a configuration after validating tolerance and blend exponent.
    ///
    /// # Examples
    /// ```
    /// use config::constants::MeshConfig;
    /// let cfg = MeshConfig::new(1.0e-9, 1.0, true).expect("valid config");
    /// assert!(cfg.strict_transition_sizing);
    /// ```
    pub fn new(
        tolerance: f64,
        blend_exponent: f64,
        strict_transition_sizing: bool,
    ) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !blend_exponent.is_finite() || blend_exponent < 0.0 {
            return Err(ConfigError::InvalidBlendExponent(blend_exponent));
        }
        Ok(Self {
            tolerance,
            blend_exponent,
            strict_transition_sizing,
        })
    }

    /// Returns a copy with strict transition sizing switched on or off.
    pub fn with_strict_transition_sizing(mut self, strict: bool) -> Self {
        self.strict_transition_sizing = strict;
        self
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            tolerance: COINCIDENCE_TOLERANCE,
            blend_exponent: DEFAULT_BLEND_EXPONENT,
            strict_transition_sizing: false,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the blend exponent is negative or not finite.
    InvalidBlendExponent(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidBlendExponent(value) => {
                write!(f, "blend_exponent must be finite and >= 0: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns true when `count` nodes can be tiled by transition cells for
/// `order` consecutive levels, i.e. `count == 3^order * k + 1` with `k >= 1`.
///
/// # Example
///
/// ```rust
/// use config::constants::fits_transition_order;
///
/// assert!(fits_transition_order(10, 2));
/// assert!(!fits_transition_order(7, 2));
/// assert!(!fits_transition_order(1, 1));
/// ```
pub fn fits_transition_order(count: usize, order: u32) -> bool {
    let span = TRANSITION_RATIO.pow(order);
    count > 1 && (count - 1) % span == 0
}
