/// Displayed in place of a formula that failed to evaluate.
pub const ERROR_SENTINEL: &str = "#ERROR";

/// Format a number for display.
///
/// Integral values print without a fractional part and other values use the
/// shortest text that reads back to the same `f64`. Magnitudes of `1e21` and
/// above, or below `1e-6`, switch to exponent form (`1e+21`, `1.5e-7`).
/// Non-finite values never reach display and fall back to the sentinel.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return ERROR_SENTINEL.to_string();
    }
    if n == 0.0 {
        // Also folds -0 into 0.
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}
