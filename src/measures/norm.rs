//! Normalisation helpers shared by several measures.

use core::f64::consts::FRAC_PI_2;

/// Slope of [`logistic_norm`] used by the logistic-normalised measures.
pub const LOGISTIC_SLOPE: f64 = 8.0;

/// Cosine mapping of a similarity in `[0, 1]` onto `[0, 1]`: `1 - cos(pi * s / 2)`.
#[inline]
pub fn cosine_norm(similarity: f64) -> f64 {
    1.0 - (FRAC_PI_2 * similarity).cos()
}

/// Logistic mapping centred on 0.5: `1 / (1 + exp(-k (s - 0.5)))`.
#[inline]
pub fn logistic_norm(slope: f64, similarity: f64) -> f64 {
    1.0 / (1.0 + (-slope * (similarity - 0.5)).exp())
}

/// Exponential mapping: `exp(s) - 1`.
#[inline]
pub fn exp_norm(similarity: f64) -> f64 {
    similarity.exp() - 1.0
}

/// Maps a distance in `[0, 2 * max_distance]` onto a similarity in `[0, 1]`.
///
/// Infinite distances map to 0; a zero `max_distance` maps 0 to 1 and anything else to 0.
#[inline]
pub fn distance_to_similarity(distance: f64, max_distance: f64) -> f64 {
    if !distance.is_finite() {
        0.0
    } else if max_distance > 0.0 {
        1.0 - distance / (2.0 * max_distance)
    } else if distance == 0.0 {
        1.0
    } else {
        0.0
    }
}
