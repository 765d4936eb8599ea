use rand::{rngs::StdRng, Rng, SeedableRng};

/// Which surface the overlay is drawn for; thresholds and caps differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVariant {
    /// Frame-analysis overlay: ellipse at a pseudo-random spot, drawn above 0.4.
    Frame,
    /// Heatmap overlay: centered radial glow, drawn above 0.3.
    Heatmap,
}

/// Placement of the cosmetic demo overlay, all values as fractions of the
/// surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoOverlay {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Fill alpha in [0, 1].
    pub intensity: f64,
}

/// Demo-mode placement of the manipulation overlay.
///
/// This is a placeholder visual, NOT detector output: the position is
/// pseudo-random, derived only from the frame index so a given frame always
/// renders the same overlay. Returns `None` below the variant threshold so
/// low-probability frames stay clean.
pub fn demo_placement(
    variant: OverlayVariant,
    frame_index: usize,
    probability_fake: f64,
    opacity: f64,
) -> Option<DemoOverlay> {
    match variant {
        OverlayVariant::Frame => {
            if probability_fake <= 0.4 {
                return None;
            }
            let mut rng = StdRng::seed_from_u64(frame_index as u64);
            let radius = 0.1 + probability_fake * 0.2;
            Some(DemoOverlay {
                center_x: 0.3 + rng.gen::<f64>() * 0.4,
                center_y: 0.2 + rng.gen::<f64>() * 0.6,
                radius_x: radius,
                radius_y: radius,
                intensity: probability_fake.min(0.7),
            })
        }
        OverlayVariant::Heatmap => {
            if probability_fake <= 0.3 {
                return None;
            }
            Some(DemoOverlay {
                center_x: 0.5,
                center_y: 0.5,
                radius_x: 0.5,
                radius_y: 0.5,
                intensity: probability_fake.min(0.8) * opacity.clamp(0.0, 1.0),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_overlay_is_silent_below_threshold() {
        assert!(demo_placement(OverlayVariant::Frame, 3, 0.4, 1.0).is_none());
        assert!(demo_placement(OverlayVariant::Frame, 3, 0.41, 1.0).is_some());
    }

    #[test]
    fn heatmap_overlay_is_silent_below_threshold() {
        assert!(demo_placement(OverlayVariant::Heatmap, 0, 0.3, 1.0).is_none());
        assert!(demo_placement(OverlayVariant::Heatmap, 0, 0.31, 1.0).is_some());
    }

    #[test]
    fn placement_is_deterministic_per_frame_index() {
        let first = demo_placement(OverlayVariant::Frame, 7, 0.55, 1.0).unwrap();
        let second = demo_placement(OverlayVariant::Frame, 7, 0.55, 1.0).unwrap();
        assert_eq!(first, second);
        let other = demo_placement(OverlayVariant::Frame, 8, 0.55, 1.0).unwrap();
        assert_ne!(first.center_x, other.center_x);
    }

    #[test]
    fn frame_placement_stays_inside_bounds() {
        for index in 0..32 {
            let overlay = demo_placement(OverlayVariant::Frame, index, 0.7, 1.0).unwrap();
            assert!((0.3..0.7).contains(&overlay.center_x));
            assert!((0.2..0.8).contains(&overlay.center_y));
            assert!((overlay.intensity - 0.7).abs() < 1e-12);
        }
    }

    #[test]
    fn heatmap_intensity_scales_with_opacity() {
        let full = demo_placement(OverlayVariant::Heatmap, 0, 0.9, 1.0).unwrap();
        let half = demo_placement(OverlayVariant::Heatmap, 0, 0.9, 0.5).unwrap();
        assert!((full.intensity - 0.8).abs() < 1e-12);
        assert!((half.intensity - 0.4).abs() < 1e-12);
    }
}
