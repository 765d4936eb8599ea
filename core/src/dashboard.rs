use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::format;
use crate::model::HistoryEntry;

/// Rows shown in the "recent analyses" table.
pub const RECENT_ROWS: usize = 5;
/// Rows per page in the full history table.
pub const PAGE_SIZE: usize = 10;

/// Placeholder shown while the API key is hidden.
pub const MASKED_KEY: &str = "••••••••••••••••••••••••••••••";

/// API-usage figure shown when the backend provides no counter.
const DEMO_API_USAGE: usize = 157;

/// Aggregate counters for the dashboard stat tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_analyses: usize,
    pub fakes_detected: usize,
    /// Mean reported confidence across entries, 0-100 scale.
    pub detection_rate: f64,
    pub api_usage: usize,
}

pub fn compute_stats(history: &[HistoryEntry]) -> DashboardStats {
    let total_analyses = history.len();
    let fakes_detected = history
        .iter()
        .filter(|entry| entry.result.prediction.is_manipulated())
        .count();
    let detection_rate = if history.is_empty() {
        0.0
    } else {
        history.iter().map(|entry| entry.result.confidence).sum::<f64>() / total_analyses as f64
    };
    DashboardStats {
        total_analyses,
        fakes_detected,
        detection_rate,
        api_usage: DEMO_API_USAGE,
    }
}

/// Month-bucketed series for the analyses-over-time chart, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub totals: Vec<usize>,
    pub fakes: Vec<usize>,
}

pub fn monthly_series(history: &[HistoryEntry]) -> MonthlySeries {
    let mut buckets: Vec<((i32, u32), usize, usize)> = Vec::new();
    for entry in history {
        let Some(date) = DateTime::<Utc>::from_timestamp_millis(entry.timestamp) else {
            continue;
        };
        let key = (date.year(), date.month());
        let fake = usize::from(entry.result.prediction.is_manipulated());
        match buckets.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, total, fakes)) => {
                *total += 1;
                *fakes += fake;
            }
            None => buckets.push((key, 1, fake)),
        }
    }
    buckets.sort_by_key(|(key, _, _)| *key);

    let mut series = MonthlySeries::default();
    for ((year, month), total, fakes) in buckets {
        // Label from the first day of the bucket month.
        let label = Utc
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .map(|date| format::month_label(date.timestamp_millis()))
            .unwrap_or_else(|| "N/A".into());
        series.labels.push(label);
        series.totals.push(total);
        series.fakes.push(fakes);
    }
    series
}

/// Real/fake split for the distribution doughnut.
pub fn distribution(history: &[HistoryEntry]) -> (usize, usize) {
    let fakes = history
        .iter()
        .filter(|entry| entry.result.prediction.is_manipulated())
        .count();
    (history.len() - fakes, fakes)
}

pub fn recent(history: &[HistoryEntry]) -> &[HistoryEntry] {
    &history[..history.len().min(RECENT_ROWS)]
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Rows for a 0-based page.
pub fn page_slice(history: &[HistoryEntry], page: usize) -> &[HistoryEntry] {
    let start = (page * PAGE_SIZE).min(history.len());
    let end = (start + PAGE_SIZE).min(history.len());
    &history[start..end]
}

/// 1-based inclusive display window for the pagination footer, `(0, 0)` when
/// the table is empty.
pub fn page_window(total: usize, page: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    let start = (page * PAGE_SIZE).min(total.saturating_sub(1));
    let end = (start + PAGE_SIZE).min(total);
    (start + 1, end)
}

/// Account identity shown in the dashboard sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Uppercased first letters of each name part, e.g. `John Smith` -> `JS`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HistoryVerdict, Prediction, Probabilities};

    fn entry(id: usize, prediction: Prediction, confidence: f64, timestamp: i64) -> HistoryEntry {
        HistoryEntry {
            id: format!("analysis_{id}"),
            filename: "clip.mp4".into(),
            timestamp,
            result: HistoryVerdict {
                prediction,
                confidence,
                probabilities: Probabilities::default(),
            },
        }
    }

    #[test]
    fn stats_count_fakes_and_average_confidence() {
        let history = vec![
            entry(1, Prediction::Real, 90.0, 0),
            entry(2, Prediction::Deepfake, 80.0, 0),
            entry(3, Prediction::Fake, 70.0, 0),
        ];
        let stats = compute_stats(&history);
        assert_eq!(stats.total_analyses, 3);
        assert_eq!(stats.fakes_detected, 2);
        assert!((stats.detection_rate - 80.0).abs() < 1e-9);
    }

    #[test]
    fn empty_history_yields_zeroed_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.detection_rate, 0.0);
    }

    #[test]
    fn pagination_windows_cover_boundaries() {
        assert_eq!(page_window(0, 0), (0, 0));
        assert_eq!(page_window(25, 0), (1, 10));
        assert_eq!(page_window(25, 1), (11, 20));
        assert_eq!(page_window(25, 2), (21, 25));
        assert_eq!(page_window(20, 1), (11, 20));
        assert_eq!(page_count(25), 3);
        assert_eq!(page_count(20), 2);
        assert_eq!(page_count(0), 1);
    }

    #[test]
    fn recent_and_page_slices_respect_sizes() {
        let history: Vec<_> = (0..25)
            .map(|i| entry(i, Prediction::Real, 85.0, i as i64))
            .collect();
        assert_eq!(recent(&history).len(), 5);
        assert_eq!(page_slice(&history, 0).len(), 10);
        assert_eq!(page_slice(&history, 2).len(), 5);
        assert!(page_slice(&history, 9).is_empty());
    }

    #[test]
    fn monthly_series_buckets_by_month() {
        let jan = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2026, 2, 5, 0, 0, 0).unwrap();
        let history = vec![
            entry(1, Prediction::Real, 90.0, jan.timestamp_millis()),
            entry(2, Prediction::Deepfake, 85.0, jan.timestamp_millis()),
            entry(3, Prediction::Real, 88.0, feb.timestamp_millis()),
        ];
        let series = monthly_series(&history);
        assert_eq!(series.labels, vec!["Jan".to_string(), "Feb".to_string()]);
        assert_eq!(series.totals, vec![2, 1]);
        assert_eq!(series.fakes, vec![1, 0]);
    }

    #[test]
    fn initials_take_first_letters_uppercased() {
        let profile = UserProfile {
            name: "john smith".into(),
            email: "john@example.com".into(),
        };
        assert_eq!(profile.initials(), "JS");
    }
}
