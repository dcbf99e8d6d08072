//! Optional-aware aggregation helpers.

/// Adds a possibly-absent value into a running sum; absent is identity.
pub fn add_opt(acc: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *acc += v;
    }
}

/// Keeps the first present value observed for a group.
pub fn first_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        if let Some(v) = value {
            *slot = Some(v);
        }
    }
}

/// A derived ratio rounded to `decimals` places.
///
/// Absent whenever the divisor is absent or zero, or the numerator is
/// absent — never infinite, never NaN.
pub fn ratio(numerator: Option<f64>, divisor: Option<f64>, decimals: u32) -> Option<f64> {
    let n = numerator?;
    let d = divisor?;
    if d == 0.0 {
        return None;
    }
    Some(round_to(n / d, decimals))
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
