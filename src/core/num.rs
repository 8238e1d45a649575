//! Numeric helpers shared by the resolver, orchestrator and reveal.

/// Normalize NaN and infinities to `0.0`.
///
/// Chained multipliers can overflow; a non-finite score must never reach
/// the running totals.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Is `delta` a real change rather than floating-point noise?
#[must_use]
pub fn exceeds(delta: f64, epsilon: f64) -> bool {
    delta.abs() > epsilon
}

/// Round to two decimals for display, dropping trailing zeros.
///
/// ```
/// use handforge::core::format_value;
///
/// assert_eq!(format_value(150.0), "150");
/// assert_eq!(format_value(1.5), "1.5");
/// assert_eq!(format_value(107.123), "107.12");
/// assert_eq!(format_value(f64::NAN), "0");
/// ```
#[must_use]
pub fn format_value(value: f64) -> String {
    let rounded = (finite_or_zero(value) * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
