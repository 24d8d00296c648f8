//! Plausibility rule for device-reported battery levels.

/// Lowest battery percentage accepted as a real reading.
const BATTERY_MIN: f64 = 1.0;
/// Highest battery percentage accepted as a real reading.
const BATTERY_MAX: f64 = 100.0;

/// Keep a reported battery level only when it is inside [1, 100].
///
/// Devices occasionally report sentinel values (0, -1, 255) while the
/// sensor is unavailable; those are stored as absent rather than
/// rejecting the whole location report.
pub fn sanitize_battery(battery: Option<f64>) -> Option<f64> {
    battery.filter(|b| (BATTERY_MIN..=BATTERY_MAX).contains(b))
}
