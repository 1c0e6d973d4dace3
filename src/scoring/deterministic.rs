use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::Display;

use crate::bands::{Band, PRIMARY_BANDS};

pub const SNR_FLOOR_DB: f64 = 5.0;
pub const SNR_CEILING_DB: f64 = 40.0;
pub const ABSORPTION_FLOOR_DB: f64 = 0.5;
pub const ABSORPTION_CEILING_DB: f64 = 10.0;

/// MUF support classification for a band, driven purely by the ratio of
/// the current MUF to the band's center frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MufSupport {
    Closed,
    Marginal,
    Open,
}

impl MufSupport {
    pub fn viability(self) -> f64 {
        match self {
            MufSupport::Closed => 0.0,
            MufSupport::Marginal => 0.5,
            MufSupport::Open => 1.0,
        }
    }
}

pub fn classify_muf_support(muf_mhz: f64, band: Band) -> MufSupport {
    let ratio = muf_mhz / band.center_mhz();
    if ratio < 0.8 {
        MufSupport::Closed
    } else if ratio < 1.1 {
        MufSupport::Marginal
    } else {
        MufSupport::Open
    }
}

/// Deterministic per-band conditions derived from (MUF, SFI, Kp).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandMetrics {
    pub band: Band,
    pub snr_db: f64,
    pub absorption_db: f64,
    pub dx_probability_pct: f64,
}

/// Score the five primary bands for a single MUF value.
///
/// Bit-identical output for identical inputs; every metric is clamped
/// into its documented range.
pub fn score_bands(muf_mhz: f64, sfi: f64, kp: f64) -> BTreeMap<Band, BandMetrics> {
    let kp_absorption_boost = ((kp - 2.0) * 1.2).max(0.0);
    let kp_snr_penalty = ((kp - 2.0) * 2.5).max(0.0);
    let sfi_boost = ((sfi - 70.0) / 4.0).clamp(-5.0, 15.0);

    PRIMARY_BANDS
        .iter()
        .map(|&band| {
            let ratio = muf_mhz / band.center_mhz();
            let viability = classify_muf_support(muf_mhz, band).viability();

            let noise_adj = (band.base_noise_db() - 20.0) * 0.3;
            let mut snr = 18.0 + sfi_boost - kp_snr_penalty - noise_adj;
            if ratio > 1.2 {
                snr += 3.0;
            }
            if ratio > 1.6 {
                snr += 2.0;
            }
            if ratio < 1.0 {
                snr -= 5.0;
            }
            let snr = round1(snr.clamp(SNR_FLOOR_DB, SNR_CEILING_DB));

            let under_muf = if ratio < 1.0 { (1.0 - ratio) * 4.0 } else { 0.0 };
            let absorption = round1(
                (band.base_absorption_db() + kp_absorption_boost + under_muf)
                    .clamp(ABSORPTION_FLOOR_DB, ABSORPTION_CEILING_DB),
            );

            let dx = (viability
                * 100.0
                * band.dx_friendliness()
                * (snr / 30.0)
                * (1.0 - absorption / 15.0))
                .clamp(0.0, 100.0)
                .round();

            (
                band,
                BandMetrics {
                    band,
                    snr_db: snr,
                    absorption_db: absorption,
                    dx_probability_pct: dx,
                },
            )
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_classification_uses_ratio_thresholds() {
        // 20m center is 14.1 MHz.
        assert_eq!(classify_muf_support(10.0, Band::M20), MufSupport::Closed);
        assert_eq!(classify_muf_support(14.1, Band::M20), MufSupport::Marginal);
        assert_eq!(classify_muf_support(22.5, Band::M20), MufSupport::Open);
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = score_bands(22.5, 145.0, 2.0);
        let b = score_bands(22.5, 145.0, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn metrics_respect_range_invariants() {
        for muf in [2.0, 8.0, 15.0, 30.0, 45.0] {
            for sfi in [0.0, 70.0, 145.0, 250.0] {
                for kp in [0.0, 2.0, 5.0, 9.0] {
                    for m in score_bands(muf, sfi, kp).values() {
                        assert!(m.snr_db >= SNR_FLOOR_DB && m.snr_db <= SNR_CEILING_DB);
                        assert!(
                            m.absorption_db >= ABSORPTION_FLOOR_DB
                                && m.absorption_db <= ABSORPTION_CEILING_DB
                        );
                        assert!(
                            m.dx_probability_pct >= 0.0 && m.dx_probability_pct <= 100.0
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn open_20m_under_good_flux_exceeds_fifty() {
        // MUF 22.5 over 14.1 gives ratio ~1.596, an open band.
        let metrics = score_bands(22.5, 145.0, 2.0);
        let m20 = &metrics[&Band::M20];
        assert_eq!(classify_muf_support(22.5, Band::M20), MufSupport::Open);
        assert!(m20.dx_probability_pct > 50.0, "dx was {}", m20.dx_probability_pct);
    }

    #[test]
    fn dx_is_monotone_in_muf() {
        for band in PRIMARY_BANDS {
            let mut prev = 0.0;
            let mut muf = 2.0;
            while muf <= 45.0 {
                let dx = score_bands(muf, 120.0, 2.0)[&band].dx_probability_pct;
                assert!(
                    dx >= prev,
                    "{band} dx dropped from {prev} to {dx} at muf {muf}"
                );
                prev = dx;
                muf += 0.25;
            }
        }
    }

    #[test]
    fn storm_conditions_raise_absorption_and_cut_snr() {
        let quiet = score_bands(20.0, 120.0, 1.0);
        let storm = score_bands(20.0, 120.0, 7.0);
        for band in PRIMARY_BANDS {
            assert!(storm[&band].absorption_db >= quiet[&band].absorption_db);
            assert!(storm[&band].snr_db <= quiet[&band].snr_db);
        }
    }
}
