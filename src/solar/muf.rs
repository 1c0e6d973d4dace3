use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const MUF_FLOOR_MHZ: f64 = 2.0;
pub const MUF_CEILING_MHZ: f64 = 45.0;

/// One hour of the deterministic MUF forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MufForecastPoint {
    pub hour: u32,
    pub muf_mhz: f64,
}

/// Generate the 24-hour MUF curve from SFI and Kp.
///
/// The baseline scales with solar flux, geomagnetic disturbance
/// suppresses it, and a diurnal sine peaks mid-afternoon relative to
/// `current_hour` (UTC). Pure function: identical inputs always produce
/// the identical curve.
pub fn muf_curve(sfi: f64, kp: f64, current_hour: u32) -> Vec<MufForecastPoint> {
    let base = 3.0 + (sfi - 60.0) * 0.25;
    let kp_penalty = ((kp - 2.0) * 1.2).max(0.0);

    (0..24)
        .map(|hour| {
            let offset = (hour + 24 - current_hour % 24) % 24;
            let diurnal = 1.0 + 0.35 * (((offset as f64 - 3.0) / 24.0) * 2.0 * PI).sin();
            let muf = (base * diurnal - kp_penalty).clamp(MUF_FLOOR_MHZ, MUF_CEILING_MHZ);
            MufForecastPoint {
                hour,
                muf_mhz: round1(muf),
            }
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
