use crate::model::FrameRecord;

/// Probability above which a frame counts as suspicious.
pub const SUSPICIOUS_THRESHOLD: f64 = 0.5;

/// Banding used to color frame markers, grids, and readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatBand {
    High,
    Elevated,
    Low,
}

impl ThreatBand {
    /// >0.6 is high, >0.4 elevated, anything else low.
    pub fn of(probability_fake: f64) -> Self {
        if probability_fake > 0.6 {
            ThreatBand::High
        } else if probability_fake > 0.4 {
            ThreatBand::Elevated
        } else {
            ThreatBand::Low
        }
    }
}

pub fn suspicious_count(frames: &[FrameRecord]) -> usize {
    frames
        .iter()
        .filter(|frame| frame.probability_fake > SUSPICIOUS_THRESHOLD)
        .count()
}

/// Highest fake probability over the set, 0 when empty.
pub fn peak_probability(frames: &[FrameRecord]) -> f64 {
    frames
        .iter()
        .map(|frame| frame.probability_fake)
        .fold(0.0, f64::max)
}

pub fn average_probability(frames: &[FrameRecord]) -> f64 {
    if frames.is_empty() {
        return 0.0;
    }
    let sum: f64 = frames.iter().map(|frame| frame.probability_fake).sum();
    sum / frames.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(probabilities: &[f64]) -> Vec<FrameRecord> {
        probabilities
            .iter()
            .enumerate()
            .map(|(i, &probability_fake)| FrameRecord {
                frame: i + 1,
                probability_fake,
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn banding_matches_thresholds() {
        assert_eq!(ThreatBand::of(0.61), ThreatBand::High);
        assert_eq!(ThreatBand::of(0.6), ThreatBand::Elevated);
        assert_eq!(ThreatBand::of(0.41), ThreatBand::Elevated);
        assert_eq!(ThreatBand::of(0.4), ThreatBand::Low);
        assert_eq!(ThreatBand::of(0.0), ThreatBand::Low);
    }

    #[test]
    fn suspicious_count_uses_strict_threshold() {
        let set = frames(&[0.5, 0.51, 0.49, 0.9]);
        assert_eq!(suspicious_count(&set), 2);
    }

    #[test]
    fn stats_on_empty_set_are_zero() {
        assert_eq!(peak_probability(&[]), 0.0);
        assert_eq!(average_probability(&[]), 0.0);
    }

    #[test]
    fn peak_and_average_agree_with_direct_recomputation() {
        let set = frames(&[0.2, 0.8, 0.5]);
        assert_eq!(peak_probability(&set), 0.8);
        assert!((average_probability(&set) - 0.5).abs() < 1e-12);
    }
}
