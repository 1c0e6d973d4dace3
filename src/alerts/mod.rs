use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::Display;

use crate::bands::Band;
use crate::scoring::BandMetrics;
use crate::solar::SolarState;

pub const DEFAULT_FRESHNESS_HOURS: i64 = 24;

/// Window outside which an alert is considered stale.
pub fn default_freshness_window() -> Duration {
    Duration::hours(DEFAULT_FRESHNESS_HOURS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Direction conditions are heading, from index deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

/// An operator-facing condition warning. Immutable once created; a
/// missing timestamp means the upstream feed supplied none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: String,
    pub description: String,
    pub severity: Severity,
    pub issued_at: Option<DateTime<Utc>>,
}

impl Alert {
    fn new(kind: &str, description: String, severity: Severity, now: DateTime<Utc>) -> Self {
        Self {
            kind: kind.to_string(),
            description,
            severity,
            issued_at: Some(now),
        }
    }
}

/// Evaluate every threshold rule against the current conditions. The
/// rules are independent; a disturbed day can trip several at once.
pub fn condition_alerts(
    solar: &SolarState,
    muf_mhz: f64,
    metrics: &BTreeMap<Band, BandMetrics>,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if solar.kp >= 5.0 {
        alerts.push(Alert::new(
            "Geomagnetic Storm",
            format!(
                "Kp {:.0}: storm-level geomagnetic activity. Expect HF degradation, especially on low bands.",
                solar.kp
            ),
            Severity::High,
            now,
        ));
    } else if solar.kp >= 4.0 {
        alerts.push(Alert::new(
            "Unsettled Conditions",
            format!(
                "Kp {:.0}: unsettled geomagnetic field. Mid and high bands may fluctuate.",
                solar.kp
            ),
            Severity::Medium,
            now,
        ));
    }

    if muf_mhz < 10.0 {
        alerts.push(Alert::new(
            "MUF Collapse",
            "Maximum usable frequency is very low. High bands likely closed.".to_string(),
            Severity::High,
            now,
        ));
    } else if muf_mhz < 15.0 {
        alerts.push(Alert::new(
            "Low MUF",
            "High-band DX limited. 20m and below favoured.".to_string(),
            Severity::Medium,
            now,
        ));
    }

    for (band, m) in metrics {
        if m.snr_db < 10.0 {
            alerts.push(Alert::new(
                "High Noise Floor",
                format!("{band} showing elevated noise. Expect reduced readability."),
                Severity::Medium,
                now,
            ));
        }
    }

    if solar.sfi < 80.0 {
        alerts.push(Alert::new(
            "Low Solar Flux",
            format!(
                "SFI {:.0}: higher bands will struggle to open.",
                solar.sfi
            ),
            Severity::Low,
            now,
        ));
    }

    alerts
}

/// Drop alerts older than `window`. Alerts without a parseable issue
/// time are kept: losing a warning is worse than showing a stale one.
pub fn filter_fresh(alerts: Vec<Alert>, now: DateTime<Utc>, window: Duration) -> Vec<Alert> {
    alerts
        .into_iter()
        .filter(|a| match a.issued_at {
            Some(issued) => now - issued <= window,
            None => true,
        })
        .collect()
}

/// Trend score from index movement: MUF direction weighs double, a
/// falling Kp and a rising SFI each count as one point of improvement.
pub fn trend(solar: &SolarState, muf_mhz: f64, muf_prev_mhz: f64) -> Trend {
    let delta = sign(muf_mhz - muf_prev_mhz) * 2
        + sign(solar.kp_prev - solar.kp)
        + sign(solar.sfi - solar.sfi_prev);
    if delta >= 2 {
        Trend::Improving
    } else if delta <= -2 {
        Trend::Degrading
    } else {
        Trend::Stable
    }
}

fn sign(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Aggregate 0-100 propagation score: weighted mean of per-band DX,
/// weights rising with frequency.
pub fn propagation_score(metrics: &BTreeMap<Band, BandMetrics>) -> u8 {
    if metrics.is_empty() {
        return 0;
    }
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for (band, m) in metrics {
        let w = band.score_weight();
        total += m.dx_probability_pct * w;
        weight_sum += w;
    }
    (total / weight_sum).round().clamp(0.0, 100.0) as u8
}
