use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::Display;

use crate::bands::Band;
use crate::scoring::{BandMetrics, HybridBandScore};
use crate::spots::{haversine_km, Region, SpotStats};

const KM_PER_HOP: f64 = 4000.0;
const MUF_MARGIN_PER_EXTRA_HOP: f64 = 0.15;
const MIN_PATH_DX: f64 = 40.0;
const MIN_PATH_SNR_DB: f64 = 15.0;
const MAX_PATH_ABSORPTION_DB: f64 = 6.0;
const OPEN_DX: f64 = 70.0;

/// Overall usability of a DX path to one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PathStatus {
    Open,
    Marginal,
    Closed,
}

/// Spot-report evidence backing a path verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathEvidence {
    pub wspr_spots: usize,
    pub ft8_spots: usize,
    pub active_bands: Vec<Band>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionPathStatus {
    pub region: Region,
    pub status: PathStatus,
    pub best_band: Option<Band>,
    pub dx_pct: f64,
    pub evidence: PathEvidence,
}

/// Candidate bands worth trying toward each region from a mid-latitude
/// station; low bands only make sense on the shorter paths.
fn candidate_bands(region: Region) -> &'static [Band] {
    match region {
        Region::Europe => &[Band::M80, Band::M40, Band::M20],
        Region::NorthAmerica => &[Band::M40, Band::M20, Band::M15],
        Region::SouthAmerica => &[Band::M40, Band::M20, Band::M15, Band::M10],
        Region::Africa => &[Band::M40, Band::M20, Band::M15],
        Region::Asia => &[Band::M20, Band::M15, Band::M10],
        Region::Oceania => &[Band::M20, Band::M15, Band::M10],
        Region::Unknown => &[],
    }
}

/// Can `band` carry a path of `distance_km` under the current MUF?
///
/// Multi-hop paths need MUF headroom: each hop beyond the first adds a
/// 15% margin on the band's center frequency.
fn band_supports_path(band: Band, distance_km: f64, muf_mhz: f64) -> bool {
    if distance_km > band.max_usable_distance_km() {
        return false;
    }
    let hops = (distance_km / KM_PER_HOP).max(1.0);
    let required_muf = band.center_mhz() * (1.0 + MUF_MARGIN_PER_EXTRA_HOP * (hops - 1.0));
    muf_mhz >= required_muf
}

/// Evaluate the path from the operator to one region.
pub fn evaluate_region(
    region: Region,
    operator: (f64, f64),
    muf_mhz: f64,
    metrics: &BTreeMap<Band, BandMetrics>,
    hybrid: &BTreeMap<Band, HybridBandScore>,
    evidence: PathEvidence,
) -> RegionPathStatus {
    let distance_km = region
        .centroid()
        .map(|(lat, lon)| haversine_km(operator.0, operator.1, lat, lon))
        .unwrap_or(f64::INFINITY);

    let mut best: Option<(Band, f64)> = None;
    for &band in candidate_bands(region) {
        if !band_supports_path(band, distance_km, muf_mhz) {
            continue;
        }
        let (Some(m), Some(h)) = (metrics.get(&band), hybrid.get(&band)) else {
            continue;
        };
        if h.hybrid_pct < MIN_PATH_DX
            || m.snr_db < MIN_PATH_SNR_DB
            || m.absorption_db > MAX_PATH_ABSORPTION_DB
        {
            continue;
        }
        if best.map_or(true, |(_, dx)| h.hybrid_pct > dx) {
            best = Some((band, h.hybrid_pct));
        }
    }

    let (best_band, dx_pct) = match best {
        Some((band, dx)) => (Some(band), dx),
        None => (None, 0.0),
    };
    let status = if dx_pct >= OPEN_DX {
        PathStatus::Open
    } else if dx_pct >= MIN_PATH_DX {
        PathStatus::Marginal
    } else {
        PathStatus::Closed
    };

    RegionPathStatus {
        region,
        status,
        best_band,
        dx_pct,
        evidence,
    }
}

/// Evaluate every named region, attaching spot evidence from both
/// networks.
pub fn evaluate_all(
    operator: (f64, f64),
    muf_mhz: f64,
    metrics: &BTreeMap<Band, BandMetrics>,
    hybrid: &BTreeMap<Band, HybridBandScore>,
    wspr: &SpotStats,
    ft8: &SpotStats,
) -> BTreeMap<Region, RegionPathStatus> {
    crate::spots::NAMED_REGIONS
        .iter()
        .map(|&region| {
            let evidence = gather_evidence(region, wspr, ft8);
            (
                region,
                evaluate_region(region, operator, muf_mhz, metrics, hybrid, evidence),
            )
        })
        .collect()
}

fn gather_evidence(region: Region, wspr: &SpotStats, ft8: &SpotStats) -> PathEvidence {
    let mut evidence = PathEvidence::default();
    let mut active: Vec<Band> = Vec::new();
    if let Some(bands) = wspr.by_region.get(&region) {
        for (band, activity) in bands {
            evidence.wspr_spots += activity.count;
            active.push(*band);
        }
    }
    if let Some(bands) = ft8.by_region.get(&region) {
        for (band, activity) in bands {
            evidence.ft8_spots += activity.count;
            if !active.contains(band) {
                active.push(*band);
            }
        }
    }
    active.sort();
    evidence.active_bands = active;
    evidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{hybrid_scores, score_bands};
    use crate::spots::BandActivity;

    // Roughly IO91: southern England.
    const OPERATOR: (f64, f64) = (51.0, -1.0);

    fn strong_hybrid(metrics: &BTreeMap<Band, BandMetrics>) -> BTreeMap<Band, HybridBandScore> {
        let mut wspr = BTreeMap::new();
        let mut ft8 = BTreeMap::new();
        for &band in metrics.keys().collect::<Vec<_>>() {
            wspr.insert(
                band,
                BandActivity {
                    count: 20,
                    max_distance_km: 6000.0,
                    median_snr_db: 0.0,
                    last_heard_epoch: 0,
                },
            );
            ft8.insert(
                band,
                BandActivity {
                    count: 30,
                    max_distance_km: 8000.0,
                    median_snr_db: -5.0,
                    last_heard_epoch: 0,
                },
            );
        }
        hybrid_scores(metrics, &wspr, &ft8)
    }

    #[test]
    fn distance_cap_rejects_overlong_paths() {
        // South America sits ~9000 km out; 40m caps at 6000 km, so it
        // can never be the pick no matter how high the MUF.
        assert!(!band_supports_path(Band::M40, 9500.0, 45.0));
    }

    #[test]
    fn multi_hop_paths_demand_muf_headroom() {
        // Single hop only needs the center frequency.
        assert!(band_supports_path(Band::M20, 3000.0, 14.2));
        // Three hops at 12000 km want ~18.3 MHz on 20m.
        assert!(!band_supports_path(Band::M20, 12000.0, 15.0));
        assert!(band_supports_path(Band::M20, 12000.0, 19.0));
    }

    #[test]
    fn south_america_ignores_40m_and_uses_remaining_candidates() {
        let metrics = score_bands(30.0, 180.0, 0.0);
        let hybrid = strong_hybrid(&metrics);
        let result = evaluate_region(
            Region::SouthAmerica,
            OPERATOR,
            30.0,
            &metrics,
            &hybrid,
            PathEvidence::default(),
        );
        assert_ne!(result.best_band, Some(Band::M40));
        assert!(result.best_band.is_some());
    }

    #[test]
    fn no_surviving_candidate_closes_the_path() {
        // MUF 5 supports none of the candidates toward Asia.
        let metrics = score_bands(5.0, 70.0, 2.0);
        let hybrid = strong_hybrid(&metrics);
        let result = evaluate_region(
            Region::Asia,
            OPERATOR,
            5.0,
            &metrics,
            &hybrid,
            PathEvidence::default(),
        );
        assert_eq!(result.status, PathStatus::Closed);
        assert_eq!(result.best_band, None);
        assert_eq!(result.dx_pct, 0.0);
    }

    #[test]
    fn strong_conditions_open_nearby_paths() {
        let metrics = score_bands(28.0, 180.0, 0.0);
        let hybrid = strong_hybrid(&metrics);
        let result = evaluate_region(
            Region::Europe,
            OPERATOR,
            28.0,
            &metrics,
            &hybrid,
            PathEvidence::default(),
        );
        assert_eq!(result.status, PathStatus::Open);
        assert!(result.best_band.is_some());
        assert!(result.dx_pct >= 70.0);
    }

    #[test]
    fn evaluate_all_covers_every_named_region() {
        let metrics = score_bands(22.5, 145.0, 2.0);
        let hybrid = strong_hybrid(&metrics);
        let wspr = SpotStats::default();
        let ft8 = SpotStats::default();
        let all = evaluate_all(OPERATOR, 22.5, &metrics, &hybrid, &wspr, &ft8);
        assert_eq!(all.len(), crate::spots::NAMED_REGIONS.len());
    }
}
