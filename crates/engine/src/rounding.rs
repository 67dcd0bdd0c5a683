//! Explicit half-up rounding for deviation percentages.

/// Round `value` to `places` decimal places, half away from the floor.
///
/// The scaled value's fractional part is compared against 0.5: at or
/// above takes the ceiling, below takes the floor. Implemented
/// explicitly rather than through `f64::round` so the displayed output
/// is stable regardless of platform rounding defaults.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let pow = 10f64.powi(places as i32);
    let digit = value * pow;
    let frac = (digit - digit.trunc()).abs();
    let rounded = if frac >= 0.5 {
        digit.ceil()
    } else {
        digit.floor()
    };
    rounded / pow
}
