mod muf;

pub use muf::{muf_curve, MufForecastPoint, MUF_CEILING_MHZ, MUF_FLOOR_MHZ};

use serde::{Deserialize, Serialize};

const DEFAULT_SFI: f64 = 70.0;
const DEFAULT_KP: f64 = 2.0;

/// Solar-geophysical indices for one polling cycle. Replaced wholesale
/// each poll, never merged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolarState {
    pub sfi: f64,
    pub sfi_prev: f64,
    pub kp: f64,
    pub kp_prev: f64,
}

impl Default for SolarState {
    fn default() -> Self {
        Self {
            sfi: DEFAULT_SFI,
            sfi_prev: DEFAULT_SFI,
            kp: DEFAULT_KP,
            kp_prev: DEFAULT_KP,
        }
    }
}

impl SolarState {
    /// Clamp indices into physical range. NaN falls back to quiet-sun
    /// defaults so the scoring core never sees a malformed value.
    pub fn sanitized(self) -> SolarState {
        SolarState {
            sfi: sanitize_sfi(self.sfi),
            sfi_prev: sanitize_sfi(self.sfi_prev),
            kp: sanitize_kp(self.kp),
            kp_prev: sanitize_kp(self.kp_prev),
        }
    }
}

fn sanitize_sfi(sfi: f64) -> f64 {
    if sfi.is_nan() {
        DEFAULT_SFI
    } else {
        sfi.max(0.0)
    }
}

fn sanitize_kp(kp: f64) -> f64 {
    if kp.is_nan() {
        DEFAULT_KP
    } else {
        kp.clamp(0.0, 9.0)
    }
}
