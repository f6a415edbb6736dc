//! Great-circle distance plus the derived ETA and rating placeholders.

use cravory_core::Coordinate;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

const ETA_MIN_MINUTES: u32 = 20;
const ETA_MAX_MINUTES: u32 = 70;
const ETA_MINUTES_PER_KM: f64 = 12.0;
const ETA_BASE_MINUTES: f64 = 25.0;

const RATING_FLOOR: f64 = 3.8;
const RATING_CEILING: f64 = 4.8;

/// Haversine distance in kilometres between two coordinates in degrees.
///
/// Uses the `atan2` form, which stays accurate for both tiny and
/// near-antipodal separations. The half-chord term is clamped to `[0, 1]`
/// so rounding on extreme inputs cannot produce `NaN`.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi_a = a.lat.to_radians();
    let phi_b = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = ((delta_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Human-readable distance: metres below 1 km, one decimal below 10 km,
/// whole kilometres above.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round())
    } else if km < 10.0 {
        format!("{km:.1} km")
    } else {
        format!("{km:.0} km")
    }
}

/// Pseudo delivery time: 25 minutes plus 12 per kilometre, kept within 20..=70.
#[must_use]
pub fn eta_minutes(km: f64) -> u32 {
    let raw = (km * ETA_MINUTES_PER_KM + ETA_BASE_MINUTES).round();
    if raw.is_nan() {
        return ETA_MAX_MINUTES;
    }
    // Clamped to 20..=70 before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = raw.clamp(f64::from(ETA_MIN_MINUTES), f64::from(ETA_MAX_MINUTES)) as u32;
    minutes
}

/// Displayed ETA range around a point estimate: `eta - 3` to `eta + 2`.
#[must_use]
pub fn eta_window(eta: u32) -> (u32, u32) {
    (eta.saturating_sub(3), eta + 2)
}

#[must_use]
pub fn format_eta(eta: u32) -> String {
    let (low, high) = eta_window(eta);
    format!("{low}-{high} min")
}

/// Deterministic placeholder rating in `[3.8, 4.8]` derived from the name.
///
/// Folds UTF-16 code units into `h = h * 31 + unit (mod 2^32)`, then maps
/// `h mod 1000` onto the range with one decimal.
#[must_use]
pub fn rating_for(name: &str) -> f64 {
    let hash = name
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
    let spread = f64::from(hash % 1000) / 1000.0;
    (((RATING_FLOOR + spread) * 10.0).round() / 10.0).min(RATING_CEILING)
}
