/// Valid pH range, inclusive.
pub const PH_MIN: f64 = -1.0;
pub const PH_MAX: f64 = 15.0;

/// Decimal places shown by the pH meter.
pub const PH_METER_DECIMAL_PLACES: u32 = 2;

/// Decimal places shown for volumes, in liters.
pub const VOLUME_DECIMAL_PLACES: u32 = 2;

/// Smallest volume the beaker can display (0.01 L).
pub const MIN_VOLUME: f64 = 0.01;

pub const AVOGADROS_NUMBER: f64 = 6.023e23;

/// Default beaker capacity, in liters.
pub const BEAKER_MAX_VOLUME: f64 = 1.2;

/// Clamps a pH value into `[PH_MIN, PH_MAX]`.
pub fn clamp_ph(ph: f64) -> f64 {
    ph.clamp(PH_MIN, PH_MAX)
}

/// Rounds `value` to `places` decimal places, the way a numeric display would show it.
pub fn to_fixed(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
