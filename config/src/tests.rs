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
fn test_normalize_threshold_larger_than_epsilon() {
    assert!(
        NORMALIZE_THRESHOLD >= EPSILON,
        "NORMALIZE_THRESHOLD should be >= EPSILON"
    );
}

#[test]
fn test_degenerate_edge_length_is_small() {
    // Must stay far below the shortest real edge (24-gon at 0.01 hollow)
    assert!(DEGENERATE_EDGE_LENGTH < 1e-4);
}

// =============================================================================
// PROFILE TESTS
// =============================================================================

#[test]
fn test_min_sides_forms_polygon() {
    assert_eq!(MIN_SIDES, 3);
}

#[test]
fn test_square_scale_reaches_corners() {
    // Corners of a unit square are sqrt(2)/2 from its centre
    let corner = std::f64::consts::SQRT_2 / 2.0;
    assert!((SQUARE_PROFILE_SCALE - corner).abs() < 1e-3);
}

#[test]
fn test_hollow_limits() {
    assert!(MIN_HOLLOW < MAX_HOLLOW);
    assert!(MAX_HOLLOW < 1.0, "a full hollow would leave no wall");
}

#[test]
fn test_profile_span_fits_inside_turn() {
    assert!(MIN_PROFILE_END >= MIN_PROFILE_SPAN);
}

// =============================================================================
// PATH TESTS
// =============================================================================

#[test]
fn test_default_steps_per_revolution_matches_circle() {
    assert_eq!(DEFAULT_STEPS_PER_REVOLUTION as usize, CIRCLE_SIDES);
}

#[test]
fn test_circular_twist_thresholds_ordered() {
    assert!(CIRCULAR_TWIST_DOUBLE_FIRST < CIRCULAR_TWIST_DOUBLE_SECOND);
}

#[test]
fn test_default_hole_size() {
    assert_eq!(DEFAULT_HOLE_SIZE_X, 1.0);
    assert_eq!(DEFAULT_HOLE_SIZE_Y, 0.25);
}

#[test]
fn test_revolution_range_is_ordered() {
    assert!(MIN_REVOLUTIONS < MAX_REVOLUTIONS);
}

// =============================================================================
// RENDERING TESTS
// =============================================================================

#[test]
fn test_alpha_cutoff_in_unit_range() {
    assert!((0.0..1.0).contains(&TRANSPARENT_ALPHA_CUTOFF));
}

#[test]
fn test_default_color_is_opaque() {
    assert_eq!(DEFAULT_COLOR[3], 1.0);
}

#[test]
fn test_variations_index_suffix_table() {
    let widest = VARIATION_VERTEX_COLOR_ALPHA | VARIATION_FULLBRIGHT;
    assert!(widest < MATERIAL_SUFFIXES.len());
    assert_eq!(MATERIAL_SUFFIXES[VARIATION_VERTEX_COLOR_ALPHA], "vcolalpha");
    assert_eq!(MATERIAL_SUFFIXES[widest], "fbvcolalpha");
}

// =============================================================================
// HELPER FUNCTION TESTS
// =============================================================================

#[test]
fn test_approx_equal_same_value() {
    assert!(approx_equal(1.0, 1.0));
}

#[test]
fn test_approx_equal_within_epsilon() {
    assert!(approx_equal(1.0, 1.0 + EPSILON / 2.0));
}

#[test]
fn test_approx_equal_outside_epsilon() {
    assert!(!approx_equal(1.0, 1.0 + EPSILON * 2.0));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 2.0));
}
