use crate::prelude::{DataError, DataResult};
use crate::telemetry::LogManager;
use crate::trim::range::TrimRange;

/// One progress milestone reported while a trim runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimProgress {
    pub percent: u8,
    pub label: &'static str,
}

/// The five working milestones plus completion.
pub const TRIM_STEPS: [TrimProgress; 6] = [
    TrimProgress { percent: 10, label: "Loading video..." },
    TrimProgress { percent: 20, label: "Preparing video data..." },
    TrimProgress { percent: 40, label: "Processing frames..." },
    TrimProgress { percent: 60, label: "Creating trimmed video..." },
    TrimProgress { percent: 80, label: "Finalizing..." },
    TrimProgress { percent: 100, label: "Complete!" },
];

/// Byte bounds for a time range over a buffer: proportional positions,
/// floored, clamped to the buffer length.
pub fn byte_bounds(range: &TrimRange, total_bytes: usize) -> (usize, usize) {
    let scale = |seconds: f64| -> usize {
        ((seconds / range.video_duration()) * total_bytes as f64).floor() as usize
    };
    (
        scale(range.start_time()).min(total_bytes),
        scale(range.end_time()).min(total_bytes),
    )
}

/// Slices the raw byte span matching the selected time range.
///
/// This is a crude constant-bitrate approximation carried over from the web
/// client: it ignores container framing, keyframes, and codec boundaries, so
/// the output is generally NOT a valid standalone media file. Real trimming
/// belongs in a server-side or native media pipeline; this stays as the
/// documented client-side fallback.
///
/// The whole buffer is held in memory; there is no streaming, chunking, or
/// cancellation of an in-flight slice.
pub fn trim_bytes(
    buffer: &[u8],
    range: &TrimRange,
    mut progress: impl FnMut(TrimProgress),
) -> DataResult<Vec<u8>> {
    let logger = LogManager::new();
    progress(TRIM_STEPS[0]);

    if buffer.is_empty() {
        return Err(DataError::Trim("empty video buffer".into()));
    }
    progress(TRIM_STEPS[1]);

    let (start_byte, end_byte) = byte_bounds(range, buffer.len());
    progress(TRIM_STEPS[2]);

    if start_byte >= end_byte {
        return Err(DataError::Trim(
            "selected range maps to an empty byte span".into(),
        ));
    }
    let trimmed = buffer[start_byte..end_byte].to_vec();
    progress(TRIM_STEPS[3]);
    progress(TRIM_STEPS[4]);

    logger.record(&format!(
        "trimmed {} of {} bytes ({start_byte}..{end_byte})",
        trimmed.len(),
        buffer.len()
    ));
    progress(TRIM_STEPS[5]);
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_duration_trim_slices_the_back_half() {
        let mut range = TrimRange::new(64.0);
        range.set_start(32.0);
        let buffer: Vec<u8> = (0..=254).collect();
        let total = buffer.len();

        let (start_byte, end_byte) = byte_bounds(&range, total);
        assert_eq!(start_byte, total / 2);
        assert_eq!(end_byte, total);

        let trimmed = trim_bytes(&buffer, &range, |_| {}).unwrap();
        assert_eq!(trimmed.len(), total - total / 2);
        assert_eq!(trimmed[0], buffer[total / 2]);
        assert_eq!(*trimmed.last().unwrap(), *buffer.last().unwrap());
    }

    #[test]
    fn progress_walks_every_milestone_in_order() {
        let range = TrimRange::new(10.0);
        let buffer = vec![0u8; 100];
        let mut seen = Vec::new();
        trim_bytes(&buffer, &range, |step| seen.push(step.percent)).unwrap();
        assert_eq!(seen, vec![10, 20, 40, 60, 80, 100]);
    }

    #[test]
    fn empty_buffer_is_a_trim_failure() {
        let range = TrimRange::new(10.0);
        let result = trim_bytes(&[], &range, |_| {});
        assert!(matches!(result, Err(DataError::Trim(_))));
    }

    #[test]
    fn degenerate_byte_span_is_rejected() {
        let mut range = TrimRange::new(10_000.0);
        range.set_start(5_000.0);
        range.set_end(5_001.0);
        // One-second window over a ten-byte buffer floors to an empty span.
        let result = trim_bytes(&[1u8; 10], &range, |_| {});
        assert!(matches!(result, Err(DataError::Trim(_))));
    }

    #[test]
    fn full_range_returns_the_whole_buffer() {
        let range = TrimRange::new(30.0);
        let buffer = vec![7u8; 1234];
        let trimmed = trim_bytes(&buffer, &range, |_| {}).unwrap();
        assert_eq!(trimmed, buffer);
    }
}
