use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Amateur HF band identifiers, ordered low to high frequency.
///
/// The five primary bands carry the full scoring model; the remaining
/// bands exist so that spot reports landing on them can still be
/// classified instead of silently vanishing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum Band {
    #[serde(rename = "160m")]
    #[strum(serialize = "160m")]
    M160,
    #[serde(rename = "80m")]
    #[strum(serialize = "80m")]
    M80,
    #[serde(rename = "40m")]
    #[strum(serialize = "40m")]
    M40,
    #[serde(rename = "30m")]
    #[strum(serialize = "30m")]
    M30,
    #[serde(rename = "20m")]
    #[strum(serialize = "20m")]
    M20,
    #[serde(rename = "17m")]
    #[strum(serialize = "17m")]
    M17,
    #[serde(rename = "15m")]
    #[strum(serialize = "15m")]
    M15,
    #[serde(rename = "12m")]
    #[strum(serialize = "12m")]
    M12,
    #[serde(rename = "10m")]
    #[strum(serialize = "10m")]
    M10,
}

/// Bands that receive SNR/absorption/DX scoring.
pub const PRIMARY_BANDS: [Band; 5] = [Band::M80, Band::M40, Band::M20, Band::M15, Band::M10];

impl Band {
    /// Canonical center frequency in MHz used by the scoring model.
    pub fn center_mhz(self) -> f64 {
        match self {
            Band::M160 => 1.8,
            Band::M80 => 3.6,
            Band::M40 => 7.1,
            Band::M30 => 10.1,
            Band::M20 => 14.1,
            Band::M17 => 18.1,
            Band::M15 => 21.1,
            Band::M12 => 24.9,
            Band::M10 => 28.5,
        }
    }

    pub fn is_primary(self) -> bool {
        PRIMARY_BANDS.contains(&self)
    }

    /// Typical noise floor in dB; lower bands are noisier.
    pub fn base_noise_db(self) -> f64 {
        match self {
            Band::M160 => 40.0,
            Band::M80 => 35.0,
            Band::M40 => 30.0,
            Band::M30 => 27.0,
            Band::M20 => 25.0,
            Band::M17 => 23.0,
            Band::M15 => 22.0,
            Band::M12 => 21.0,
            Band::M10 => 20.0,
        }
    }

    /// Baseline D-layer absorption in dB under quiet conditions.
    pub fn base_absorption_db(self) -> f64 {
        match self {
            Band::M160 => 8.0,
            Band::M80 => 6.0,
            Band::M40 => 4.0,
            Band::M30 => 3.0,
            Band::M20 => 2.0,
            Band::M17 => 1.7,
            Band::M15 => 1.5,
            Band::M12 => 1.2,
            Band::M10 => 1.0,
        }
    }

    /// How well the band supports long-distance work when open.
    pub fn dx_friendliness(self) -> f64 {
        match self {
            Band::M160 => 0.5,
            Band::M80 => 0.6,
            Band::M40 => 0.8,
            Band::M30 => 0.9,
            Band::M20 => 1.0,
            Band::M17 => 0.9,
            Band::M15 => 0.85,
            Band::M12 => 0.75,
            Band::M10 => 0.7,
        }
    }

    /// Weight of the band in the aggregate propagation score.
    pub fn score_weight(self) -> f64 {
        match self {
            Band::M80 => 0.8,
            Band::M40 => 1.0,
            Band::M20 => 1.2,
            Band::M15 => 1.3,
            Band::M10 => 1.4,
            _ => 1.0,
        }
    }

    /// Practical single-path reach of the band in km. Paths longer than
    /// this are not workable regardless of MUF.
    pub fn max_usable_distance_km(self) -> f64 {
        match self {
            Band::M160 => 2000.0,
            Band::M80 => 3000.0,
            Band::M40 => 6000.0,
            Band::M30 => 10000.0,
            Band::M20 => 15000.0,
            Band::M17 => 16000.0,
            Band::M15 => 18000.0,
            Band::M12 => 19000.0,
            Band::M10 => 20000.0,
        }
    }

    /// Map a raw spot frequency to its band. Frequencies outside every
    /// allocation return `None` and the spot is dropped upstream.
    pub fn classify(freq_hz: f64) -> Option<Band> {
        let mhz = freq_hz / 1e6;
        if mhz > 1.7 && mhz < 2.0 {
            Some(Band::M160)
        } else if mhz > 3.4 && mhz < 3.6 {
            Some(Band::M80)
        } else if mhz > 7.0 && mhz < 7.3 {
            Some(Band::M40)
        } else if mhz > 10.0 && mhz < 10.2 {
            Some(Band::M30)
        } else if mhz > 14.0 && mhz < 14.35 {
            Some(Band::M20)
        } else if mhz > 18.0 && mhz < 18.2 {
            Some(Band::M17)
        } else if mhz > 21.0 && mhz < 21.45 {
            Some(Band::M15)
        } else if mhz > 24.8 && mhz < 25.0 {
            Some(Band::M12)
        } else if mhz > 28.0 && mhz < 29.7 {
            Some(Band::M10)
        } else {
            None
        }
    }
}
