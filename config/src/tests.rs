//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_coincidence_tolerance_larger_than_epsilon() {
    assert!(
        COINCIDENCE_TOLERANCE >= EPSILON,
        "COINCIDENCE_TOLERANCE should be >= EPSILON"
    );
}

#[test]
fn test_approx_equal() {
    assert!(approx_equal(2.0, 2.0 + 1e-12));
    assert!(!approx_equal(2.0, 2.001));
}

// =============================================================================
// TRANSITION TESTS
// =============================================================================

#[test]
fn test_cell_nodes_match_ratio() {
    assert_eq!(TRANSITION_CELL_NODES, 4);
}

#[test]
fn test_fits_transition_order_single_level() {
    assert!(fits_transition_order(4, 1));
    assert!(fits_transition_order(7, 1));
    assert!(!fits_transition_order(5, 1));
}

#[test]
fn test_fits_transition_order_cascade() {
    assert!(fits_transition_order(28, 3));
    assert!(!fits_transition_order(10, 3));
    assert!(fits_transition_order(2, 0));
}

// =============================================================================
// WARP TESTS
// =============================================================================

#[test]
fn test_blend_exponent_is_sublinear() {
    assert!(DEFAULT_BLEND_EXPONENT > 0.0 && DEFAULT_BLEND_EXPONENT < 1.0);
}

#[test]
fn test_first_label_is_one() {
    assert_eq!(FIRST_LABEL, 1);
}
