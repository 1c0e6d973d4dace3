mod deterministic;
mod hybrid;

pub use deterministic::{classify_muf_support, score_bands, BandMetrics, MufSupport};
pub use hybrid::{ft8_layer_score, hybrid_scores, wspr_layer_score, HybridBandScore};
