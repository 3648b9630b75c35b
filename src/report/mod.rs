pub mod text;
pub mod xlsx;

/// Three-decimal rendering used for every printed or exported reading.
/// NaN renders as an empty field.
pub fn format_f64_3(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{:.3}", v)
    }
}

/// Numeric rounding matching `format_f64_3`, for outputs that stay numeric.
pub fn round_3(v: f64) -> f64 {
    if v.is_finite() {
        (v * 1000.0).round() / 1000.0
    } else {
        v
    }
}
