//! Confidence-level constants and rounding helpers.
//!
//! ## Z-scores
//!
//! Two-sided normal quantiles used by the attribute (Cochran) formula, taken
//! from the audit-practice table rather than computed:
//!
//! | Confidence | z    |
//! |-----------:|-----:|
//! | 90%        | 1.65 |
//! | 95%        | 1.96 |
//! | 99%        | 2.58 |
//!
//! ## Poisson reliability factor
//!
//! For monetary-unit sampling with zero expected errors, the reliability
//! factor at confidence `c` is `-ln(1 - c/100)`, e.g. ≈ 2.996 at 95%.

/// Confidence levels accepted by the engine, in percent.
pub const SUPPORTED_CONFIDENCE_LEVELS: [u32; 3] = [90, 95, 99];

/// Returns `true` if `confidence` is one of 90, 95, 99.
#[inline]
pub fn is_supported_confidence(confidence: u32) -> bool {
    SUPPORTED_CONFIDENCE_LEVELS.contains(&confidence)
}

/// Tabulated z-score for a supported confidence level.
///
/// Returns `None` for any level outside the table.
///
/// # Examples
///
/// ```
/// use sampling_core::math::statistics::z_score;
///
/// assert_eq!(z_score(90), Some(1.65));
/// assert_eq!(z_score(99), Some(2.58));
/// assert_eq!(z_score(80), None);
/// ```
pub fn z_score(confidence: u32) -> Option<f64> {
    match confidence {
        90 => Some(1.65),
        95 => Some(1.96),
        99 => Some(2.58),
        _ => None,
    }
}

/// Poisson reliability factor `-ln(1 - c/100)`.
///
/// Strictly increasing in `confidence` on `[0, 100)`; returns infinity at 100.
///
/// # Examples
///
/// ```
/// use sampling_core::math::statistics::poisson_factor;
///
/// assert!((poisson_factor(95.0) - 2.9957).abs() < 1e-4);
/// assert!(poisson_factor(99.0) > poisson_factor(95.0));
/// ```
#[inline]
pub fn poisson_factor(confidence: f64) -> f64 {
    -(1.0 - confidence / 100.0).ln()
}

/// Rounds `value` to `decimals` decimal places (half away from zero).
///
/// # Examples
///
/// ```
/// use sampling_core::math::statistics::round_to;
///
/// assert_eq!(round_to(12.345_6, 2), 12.35);
/// assert_eq!(round_to(-0.004, 2), -0.0);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Tolerance used when rounding a computed sample size up.
///
/// Products such as `30 * 1.2` land a few ulps above the integer they
/// represent; without the tolerance they would round up one item too far.
pub const CEIL_TOLERANCE: f64 = 1e-9;

/// Rounds a non-negative sample-size expression up to a count.
///
/// Returns `None` when `value` is NaN or infinite; negative values map to 0.
///
/// # Examples
///
/// ```
/// use sampling_core::math::statistics::ceil_count;
///
/// assert_eq!(ceil_count(30.0 * 1.2), Some(36));
/// assert_eq!(ceil_count(36.2), Some(37));
/// assert_eq!(ceil_count(f64::NAN), None);
/// ```
pub fn ceil_count(value: f64) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    if value <= 0.0 {
        return Some(0);
    }
    Some((value - CEIL_TOLERANCE).ceil().max(0.0) as usize)
}
