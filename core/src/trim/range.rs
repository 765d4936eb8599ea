/// User-selected subset of a clip, in seconds.
///
/// Invariant: `0 <= start_time < end_time <= video_duration` after every
/// mutation. Slider edits re-derive the range on each event; when a start
/// edit would cross the end, the start is pulled back to one second before
/// the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    start_time: f64,
    end_time: f64,
    video_duration: f64,
}

impl TrimRange {
    /// Full-length selection over a clip. Durations under one second are
    /// clamped up so a valid one-second gap always exists.
    pub fn new(video_duration: f64) -> Self {
        let video_duration = video_duration.max(1.0);
        Self {
            start_time: 0.0,
            end_time: video_duration,
            video_duration,
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn video_duration(&self) -> f64 {
        self.video_duration
    }

    pub fn selected_duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Applies a start-slider edit.
    pub fn set_start(&mut self, value: f64) {
        let mut start = value.clamp(0.0, self.video_duration);
        if start >= self.end_time {
            start = (self.end_time - 1.0).max(0.0);
        }
        self.start_time = start;
    }

    /// Applies an end-slider edit; the start follows if it would be crossed.
    pub fn set_end(&mut self, value: f64) {
        self.end_time = value.clamp(1.0f64.min(self.video_duration), self.video_duration);
        if self.start_time >= self.end_time {
            self.start_time = (self.end_time - 1.0).max(0.0);
        }
    }

    /// First-N-seconds quick selection; falls back to a reset when the clip
    /// is shorter than the requested window.
    pub fn quick_select(&mut self, seconds: f64) {
        if seconds >= 1.0 && seconds <= self.video_duration {
            self.start_time = 0.0;
            self.end_time = seconds;
        } else {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.start_time = 0.0;
        self.end_time = self.video_duration;
    }

    /// Timeline coverage as `(left offset, width)`, both fractions in [0, 1].
    pub fn selection_fractions(&self) -> (f64, f64) {
        let left = self.start_time / self.video_duration;
        let width = self.selected_duration() / self.video_duration;
        (left, width)
    }

    /// Constant-bitrate linear size extrapolation: exact proportion of the
    /// file size, no rounding. Ignores container overhead and keyframe
    /// alignment, so it is an approximation by construction.
    pub fn estimated_bytes(&self, file_size: u64) -> f64 {
        file_size as f64 * self.selected_duration() / self.video_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant_holds(range: &TrimRange) -> bool {
        0.0 <= range.start_time()
            && range.start_time() < range.end_time()
            && range.end_time() <= range.video_duration()
    }

    #[test]
    fn new_range_spans_the_whole_clip() {
        let range = TrimRange::new(120.0);
        assert_eq!(range.start_time(), 0.0);
        assert_eq!(range.end_time(), 120.0);
        assert!(invariant_holds(&range));
    }

    #[test]
    fn start_crossing_end_is_pulled_back() {
        let mut range = TrimRange::new(100.0);
        range.set_end(40.0);
        range.set_start(55.0);
        assert_eq!(range.start_time(), 39.0);
        assert_eq!(range.end_time(), 40.0);
        assert!(invariant_holds(&range));
    }

    #[test]
    fn end_dragged_below_start_drags_the_start_along() {
        let mut range = TrimRange::new(100.0);
        range.set_start(50.0);
        range.set_end(20.0);
        assert_eq!(range.end_time(), 20.0);
        assert_eq!(range.start_time(), 19.0);
        assert!(invariant_holds(&range));
    }

    #[test]
    fn invariant_survives_adversarial_slider_sequences() {
        let mut range = TrimRange::new(90.0);
        for &(start, end) in &[
            (90.0, 0.0),
            (0.0, 0.5),
            (89.9, 90.0),
            (-5.0, 200.0),
            (45.0, 45.0),
        ] {
            range.set_start(start);
            range.set_end(end);
            assert!(invariant_holds(&range), "violated at ({start}, {end})");
        }
    }

    #[test]
    fn quick_select_takes_the_head_or_resets() {
        let mut range = TrimRange::new(100.0);
        range.quick_select(30.0);
        assert_eq!((range.start_time(), range.end_time()), (0.0, 30.0));
        range.quick_select(180.0);
        assert_eq!((range.start_time(), range.end_time()), (0.0, 100.0));
    }

    #[test]
    fn size_estimate_is_exactly_proportional() {
        let mut range = TrimRange::new(100.0);
        range.set_start(25.0);
        range.set_end(75.0);
        let file_size = 123_456_789u64;
        let expected = file_size as f64 * 50.0 / 100.0;
        assert_eq!(range.estimated_bytes(file_size), expected);
    }

    #[test]
    fn half_duration_trim_estimates_half_the_size() {
        let mut range = TrimRange::new(64.0);
        range.set_start(32.0);
        let file_size = 100 * 1024 * 1024u64;
        assert_eq!(range.estimated_bytes(file_size), 50.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn selection_fractions_mirror_the_range() {
        let mut range = TrimRange::new(200.0);
        range.set_start(50.0);
        range.set_end(150.0);
        assert_eq!(range.selection_fractions(), (0.25, 0.5));
    }
}
