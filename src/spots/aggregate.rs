use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bands::Band;
use crate::spots::grid::maidenhead_to_lat_lon;
use crate::spots::region::{classify_region, Region};
use crate::spots::{SpotMode, SpotReport};

/// Aggregated reception statistics for one (region, band) or band bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandActivity {
    pub count: usize,
    pub max_distance_km: f64,
    pub median_snr_db: f64,
    pub last_heard_epoch: i64,
}

/// Output of one aggregation pass over a spot batch.
///
/// `by_region` buckets spots by transmitter region for path evaluation;
/// `by_band` collapses all regions (Unknown included) for the hybrid
/// score combiner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpotStats {
    pub by_region: BTreeMap<Region, BTreeMap<Band, BandActivity>>,
    pub by_band: BTreeMap<Band, BandActivity>,
}

#[derive(Default)]
struct Bucket {
    snrs: Vec<f64>,
    max_distance_km: f64,
    last_heard_epoch: i64,
}

impl Bucket {
    fn add(&mut self, report: &SpotReport) {
        if report.snr_db.is_finite() {
            self.snrs.push(report.snr_db);
        }
        if let Some(d) = report.distance_km {
            if d.is_finite() {
                self.max_distance_km = self.max_distance_km.max(d);
            }
        }
        self.last_heard_epoch = self.last_heard_epoch.max(report.timestamp);
    }

    fn finalize(&self) -> Option<BandActivity> {
        if self.snrs.is_empty() {
            return None;
        }
        Some(BandActivity {
            count: self.snrs.len(),
            max_distance_km: self.max_distance_km,
            median_snr_db: median(&self.snrs),
            last_heard_epoch: self.last_heard_epoch,
        })
    }
}

/// Aggregate a raw spot batch into per-region and per-band statistics.
///
/// Spots are kept when they match `mode`, pass the optional receiver
/// grid prefix filter, and land on a known band. Transmitter grids that
/// do not decode, or decode into no named region, are excluded from the
/// regional view but still count toward the collapsed per-band view.
/// This is the single aggregation path for live and fallback data alike.
pub fn aggregate(reports: &[SpotReport], mode: SpotMode, rx_prefix: Option<&str>) -> SpotStats {
    let mut region_buckets: BTreeMap<(Region, Band), Bucket> = BTreeMap::new();
    let mut band_buckets: BTreeMap<Band, Bucket> = BTreeMap::new();

    for report in reports {
        if report.mode != mode {
            continue;
        }
        if let Some(prefix) = rx_prefix {
            if !report.rx_grid.to_ascii_uppercase().starts_with(prefix) {
                continue;
            }
        }
        let Some(band) = Band::classify(report.frequency_hz) else {
            continue;
        };

        band_buckets.entry(band).or_default().add(report);

        let region = maidenhead_to_lat_lon(&report.tx_grid)
            .map(|(lat, lon)| classify_region(lat, lon))
            .unwrap_or(Region::Unknown);
        if region != Region::Unknown {
            region_buckets.entry((region, band)).or_default().add(report);
        }
    }

    let mut stats = SpotStats::default();
    for ((region, band), bucket) in &region_buckets {
        if let Some(activity) = bucket.finalize() {
            stats
                .by_region
                .entry(*region)
                .or_default()
                .insert(*band, activity);
        }
    }
    for (band, bucket) in &band_buckets {
        if let Some(activity) = bucket.finalize() {
            stats.by_band.insert(*band, activity);
        }
    }
    stats
}

/// Median of an unsorted list; mean of the two middle values for even
/// lengths.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(freq_hz: f64, snr: f64, tx: &str, dist: Option<f64>, ts: i64) -> SpotReport {
        SpotReport {
            timestamp: ts,
            frequency_hz: freq_hz,
            snr_db: snr,
            distance_km: dist,
            tx_grid: tx.to_string(),
            rx_grid: "IO91wm".to_string(),
            mode: SpotMode::Wspr,
        }
    }

    #[test]
    fn median_of_even_list_averages_middle_pair() {
        assert_eq!(median(&[1.0, 3.0, 5.0, 7.0]), 4.0);
        assert_eq!(median(&[7.0, 1.0, 5.0, 3.0]), 4.0);
    }

    #[test]
    fn median_of_odd_list_takes_middle_value() {
        assert_eq!(median(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(median(&[6.0, 2.0, 4.0]), 4.0);
    }

    #[test]
    fn buckets_accumulate_count_distance_and_recency() {
        let reports = vec![
            spot(14_095_600.0, -10.0, "FN20", Some(5500.0), 100),
            spot(14_095_600.0, -20.0, "FN31", Some(5600.0), 300),
            spot(14_095_600.0, -15.0, "FN42", None, 200),
        ];
        let stats = aggregate(&reports, SpotMode::Wspr, None);
        let na = &stats.by_region[&Region::NorthAmerica][&Band::M20];
        assert_eq!(na.count, 3);
        assert_eq!(na.max_distance_km, 5600.0);
        assert_eq!(na.median_snr_db, -15.0);
        assert_eq!(na.last_heard_epoch, 300);
    }

    #[test]
    fn out_of_band_spots_are_dropped() {
        let reports = vec![spot(5_000_000.0, -5.0, "JN58", Some(900.0), 1)];
        let stats = aggregate(&reports, SpotMode::Wspr, None);
        assert!(stats.by_band.is_empty());
        assert!(stats.by_region.is_empty());
    }

    #[test]
    fn undecodable_grid_still_counts_per_band() {
        let reports = vec![spot(7_040_000.0, -8.0, "??", Some(1200.0), 5)];
        let stats = aggregate(&reports, SpotMode::Wspr, None);
        assert!(stats.by_region.is_empty());
        assert_eq!(stats.by_band[&Band::M40].count, 1);
    }

    #[test]
    fn mode_filter_excludes_other_modes() {
        let mut ft8 = spot(14_095_600.0, -3.0, "JN58", Some(900.0), 1);
        ft8.mode = SpotMode::Ft8;
        let reports = vec![ft8, spot(14_095_600.0, -6.0, "JN58", Some(900.0), 2)];
        let wspr_stats = aggregate(&reports, SpotMode::Wspr, None);
        assert_eq!(wspr_stats.by_band[&Band::M20].count, 1);
        let ft8_stats = aggregate(&reports, SpotMode::Ft8, None);
        assert_eq!(ft8_stats.by_band[&Band::M20].count, 1);
    }

    #[test]
    fn rx_prefix_filter_restricts_receivers() {
        let mut far = spot(14_095_600.0, -3.0, "JN58", Some(900.0), 1);
        far.rx_grid = "FN20xa".to_string();
        let reports = vec![far, spot(14_095_600.0, -6.0, "JN58", Some(900.0), 2)];
        let stats = aggregate(&reports, SpotMode::Wspr, Some("IO"));
        assert_eq!(stats.by_band[&Band::M20].count, 1);
    }
}
