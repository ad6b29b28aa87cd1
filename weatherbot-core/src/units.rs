const KELVIN_OFFSET: f64 = 273.15;

/// Converts Kelvin to whole degrees Celsius, rounding half away from zero.
/// NaN and sub-zero Kelvin go through the arithmetic untouched.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET).round()
}
