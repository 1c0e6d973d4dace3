use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::alerts::{self, Alert, Trend};
use crate::bands::Band;
use crate::config::Config;
use crate::scoring::{hybrid_scores, score_bands, BandMetrics, HybridBandScore};
use crate::solar::{muf_curve, SolarState};
use crate::spots::{aggregate, Region, SpotMode, SpotReport};
use crate::paths::{evaluate_all, RegionPathStatus};

/// One hour of the 24-hour outlook.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastHour {
    pub hour_label: String,
    pub muf_mhz: f64,
    pub bands: BTreeMap<Band, BandMetrics>,
}

/// Complete scoring output for one invocation. Everything in here is
/// recomputed from the inputs; nothing is carried between requests.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionsReport {
    pub solar: SolarState,
    pub muf_mhz: f64,
    pub forecast: Vec<ForecastHour>,
    pub bands: BTreeMap<Band, BandMetrics>,
    pub hybrid: BTreeMap<Band, HybridBandScore>,
    pub paths: BTreeMap<Region, RegionPathStatus>,
    pub alerts: Vec<Alert>,
    pub score: u8,
    pub trend: Trend,
    pub generated_at: DateTime<Utc>,
}

/// Run the full pipeline: MUF curve, per-hour deterministic metrics,
/// spot aggregation, hybrid blend, region paths, alerts and the
/// aggregate score. Pure given `now`; an empty spot batch simply
/// zeroes that empirical layer.
pub fn build_report(
    solar: SolarState,
    wspr_reports: &[SpotReport],
    ft8_reports: &[SpotReport],
    config: &Config,
    now: DateTime<Utc>,
    freshness_window: Duration,
) -> ConditionsReport {
    let solar = solar.sanitized();
    let current_hour = now.hour();

    let curve = muf_curve(solar.sfi, solar.kp, current_hour);
    let muf_now = curve[current_hour as usize].muf_mhz;
    let muf_prev = muf_curve(solar.sfi_prev, solar.kp_prev, current_hour)[current_hour as usize]
        .muf_mhz;

    let forecast = curve
        .iter()
        .map(|point| ForecastHour {
            hour_label: format!("{:02}:00", point.hour),
            muf_mhz: point.muf_mhz,
            bands: score_bands(point.muf_mhz, solar.sfi, solar.kp),
        })
        .collect();

    let bands = score_bands(muf_now, solar.sfi, solar.kp);

    let rx_prefix = config.spots.rx_grid_prefix.as_deref();
    let wspr = aggregate(wspr_reports, SpotMode::Wspr, rx_prefix);
    let ft8 = aggregate(ft8_reports, SpotMode::Ft8, rx_prefix);

    let hybrid = hybrid_scores(&bands, &wspr.by_band, &ft8.by_band);

    let operator = config.station_lat_lon();
    let paths = evaluate_all(operator, muf_now, &bands, &hybrid, &wspr, &ft8);

    let alerts = alerts::filter_fresh(
        alerts::condition_alerts(&solar, muf_now, &bands, now),
        now,
        freshness_window,
    );
    let score = alerts::propagation_score(&bands);
    let trend = alerts::trend(&solar, muf_now, muf_prev);

    ConditionsReport {
        solar,
        muf_mhz: muf_now,
        forecast,
        bands,
        hybrid,
        paths,
        alerts,
        score,
        trend,
        generated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::default_freshness_window;
    use crate::spots::load_with_fallback;
    use chrono::TimeZone;

    fn quiet_solar() -> SolarState {
        SolarState {
            sfi: 145.0,
            sfi_prev: 140.0,
            kp: 2.0,
            kp_prev: 2.0,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap()
    }

    #[test]
    fn report_covers_all_outputs() {
        let wspr = load_with_fallback(None, SpotMode::Wspr);
        let ft8 = load_with_fallback(None, SpotMode::Ft8);
        let report = build_report(
            quiet_solar(),
            &wspr,
            &ft8,
            &Config::default(),
            fixed_now(),
            default_freshness_window(),
        );

        assert_eq!(report.forecast.len(), 24);
        assert_eq!(report.forecast[0].hour_label, "00:00");
        assert_eq!(report.bands.len(), 5);
        assert_eq!(report.hybrid.len(), 5);
        assert_eq!(report.paths.len(), 6);
        assert!(report.score <= 100);
    }

    #[test]
    fn report_is_deterministic_for_fixed_inputs() {
        let wspr = load_with_fallback(None, SpotMode::Wspr);
        let ft8 = load_with_fallback(None, SpotMode::Ft8);
        let a = build_report(
            quiet_solar(),
            &wspr,
            &ft8,
            &Config::default(),
            fixed_now(),
            default_freshness_window(),
        );
        let b = build_report(
            quiet_solar(),
            &wspr,
            &ft8,
            &Config::default(),
            fixed_now(),
            default_freshness_window(),
        );
        assert_eq!(a.muf_mhz, b.muf_mhz);
        assert_eq!(a.bands, b.bands);
        assert_eq!(a.hybrid, b.hybrid);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn empty_spot_batches_still_produce_a_complete_report() {
        let report = build_report(
            quiet_solar(),
            &[],
            &[],
            &Config::default(),
            fixed_now(),
            default_freshness_window(),
        );
        assert_eq!(report.forecast.len(), 24);
        for h in report.hybrid.values() {
            assert_eq!(h.wspr_pct, 0.0);
            assert_eq!(h.ft8_pct, 0.0);
        }
        // Deterministic layer still carries the result.
        assert!(report.bands.values().any(|m| m.dx_probability_pct > 0.0));
    }

    #[test]
    fn malformed_solar_input_never_panics() {
        let broken = SolarState {
            sfi: f64::NAN,
            sfi_prev: -10.0,
            kp: 99.0,
            kp_prev: f64::NAN,
        };
        let report = build_report(
            broken,
            &[],
            &[],
            &Config::default(),
            fixed_now(),
            default_freshness_window(),
        );
        assert!(report.solar.kp <= 9.0);
        assert!(report.solar.sfi >= 0.0);
    }
}
