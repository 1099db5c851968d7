use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::recognition::domain::embedding_provider::EmbeddingProvider;
use crate::recognition::domain::identity_matcher::IdentityMatcher;
use crate::recognition::domain::whitelist::WhitelistStore;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Per-frame result: counters plus any diagnostics worth surfacing.
#[derive(Debug, Default)]
pub struct FrameStats {
    /// Faces the detector returned for this frame, before any filtering.
    pub detected: usize,
    /// Faces blurred in this frame.
    pub blurred: usize,
    pub diagnostics: Vec<String>,
}

/// Applies the detect → embed → match → blur sequence to one frame.
///
/// Failures are isolated per face and per frame: a face whose embedding
/// fails is blurred anyway (the conservative choice when identity is
/// unknown), a frame whose detection fails passes through untouched with
/// a diagnostic. Nothing in here aborts the job.
pub struct FrameTransformer {
    detector: Box<dyn FaceDetector>,
    embedder: Box<dyn EmbeddingProvider>,
    blurrer: Box<dyn FrameBlurrer>,
    matcher: IdentityMatcher,
    detection_confidence: f64,
}

impl FrameTransformer {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        embedder: Box<dyn EmbeddingProvider>,
        blurrer: Box<dyn FrameBlurrer>,
        matcher: IdentityMatcher,
        detection_confidence: f64,
    ) -> Self {
        Self {
            detector,
            embedder,
            blurrer,
            matcher,
            detection_confidence,
        }
    }

    pub fn transform(&mut self, frame: &mut Frame, store: &WhitelistStore) -> FrameStats {
        let mut stats = FrameStats::default();

        let regions = match self.detector.detect(frame) {
            Ok(regions) => regions,
            Err(e) => {
                stats
                    .diagnostics
                    .push(format!("frame {}: detection failed: {e}", frame.index()));
                return stats;
            }
        };
        stats.detected = regions.len();

        let mut to_blur: Vec<FaceRegion> = Vec::new();
        for region in &regions {
            if region.confidence < self.detection_confidence {
                continue;
            }
            let Some(clamped) = region.clamp(frame.width(), frame.height()) else {
                continue;
            };

            let whitelisted = match self.embedder.embed(&frame.crop(&clamped)) {
                Ok(embedding) => self.matcher.matches(&embedding, store),
                Err(e) => {
                    stats.diagnostics.push(format!(
                        "frame {}: embedding failed, blurring face at ({}, {}): {e}",
                        frame.index(),
                        clamped.x,
                        clamped.y
                    ));
                    false
                }
            };

            if !whitelisted {
                to_blur.push(clamped);
            }
        }

        if !to_blur.is_empty() {
            match self.blurrer.blur(frame, &to_blur) {
                Ok(()) => stats.blurred = to_blur.len(),
                Err(e) => {
                    stats
                        .diagnostics
                        .push(format!("frame {}: blur failed: {e}", frame.index()));
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::embedding::Embedding;

    struct FixedDetector {
        regions: Vec<FaceRegion>,
    }

    impl FaceDetector for FixedDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
            Ok(self.regions.clone())
        }
    }

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
            Err("session error".into())
        }
    }

    /// Embeds a crop as its mean R-channel value.
    struct MeanPixelEmbedder;

    impl EmbeddingProvider for MeanPixelEmbedder {
        fn embed(&self, face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>> {
            let ch = face.channels() as usize;
            let sum: f64 = face.data().iter().step_by(ch).map(|&b| b as f64).sum();
            let count = (face.width() * face.height()) as f64;
            Ok(Embedding::new(vec![(sum / count) as f32]))
        }
    }

    struct FailingEmbedder;

    impl EmbeddingProvider for FailingEmbedder {
        fn embed(&self, _face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>> {
            Err("crop too small".into())
        }
    }

    /// Paints blurred regions solid zero so tests can see exactly what
    /// was touched.
    struct MarkerBlurrer;

    impl FrameBlurrer for MarkerBlurrer {
        fn blur(
            &self,
            frame: &mut Frame,
            regions: &[FaceRegion],
        ) -> Result<(), Box<dyn std::error::Error>> {
            let fw = frame.width() as usize;
            let ch = frame.channels() as usize;
            let data = frame.data_mut();
            for r in regions {
                for row in 0..r.height as usize {
                    let start = ((r.y as usize + row) * fw + r.x as usize) * ch;
                    data[start..start + r.width as usize * ch].fill(0);
                }
            }
            Ok(())
        }
    }

    struct FailingBlurrer;

    impl FrameBlurrer for FailingBlurrer {
        fn blur(
            &self,
            _frame: &mut Frame,
            _regions: &[FaceRegion],
        ) -> Result<(), Box<dyn std::error::Error>> {
            Err("out of memory".into())
        }
    }

    fn frame_filled(value: u8) -> Frame {
        Frame::new(vec![value; 40 * 40 * 3], 40, 40, 3, 3)
    }

    fn transformer(
        detector: impl FaceDetector + 'static,
        embedder: impl EmbeddingProvider + 'static,
        blurrer: impl FrameBlurrer + 'static,
        threshold: f64,
    ) -> FrameTransformer {
        FrameTransformer::new(
            Box::new(detector),
            Box::new(embedder),
            Box::new(blurrer),
            IdentityMatcher::new(threshold),
            0.9,
        )
    }

    // Whitelist whose single entry embeds as mean pixel value 200.
    fn store_around(value: f32) -> WhitelistStore {
        WhitelistStore::from_entries(vec![("ref.jpg".to_string(), Embedding::new(vec![value]))])
    }

    #[test]
    fn test_whitelisted_face_left_untouched() {
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(5, 5, 10, 10, 0.95)],
            },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(200.0));
        assert_eq!(stats.detected, 1);
        assert_eq!(stats.blurred, 0);
        assert!(frame.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_unknown_face_blurred() {
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(5, 5, 10, 10, 0.95)],
            },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        // Whitelist centered far away: distance 150 >> threshold 1.0.
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.blurred, 1);
        let inside = (7 * 40 + 7) * 3;
        assert_eq!(frame.data()[inside], 0);
        let outside = (30 * 40 + 30) * 3;
        assert_eq!(frame.data()[outside], 200);
    }

    #[test]
    fn test_low_confidence_region_ignored_but_counted() {
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(5, 5, 10, 10, 0.5)],
            },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.detected, 1);
        assert_eq!(stats.blurred, 0);
        assert!(frame.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_embedding_failure_blurs_the_face() {
        // When identity cannot be established the face is blurred, never
        // shown.
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(5, 5, 10, 10, 0.95)],
            },
            FailingEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(200.0));
        assert_eq!(stats.blurred, 1);
        assert_eq!(stats.diagnostics.len(), 1);
        assert!(stats.diagnostics[0].contains("embedding failed"));
    }

    #[test]
    fn test_detection_failure_passes_frame_through() {
        let mut t = transformer(FailingDetector, MeanPixelEmbedder, MarkerBlurrer, 1.0);
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.detected, 0);
        assert_eq!(stats.blurred, 0);
        assert!(frame.data().iter().all(|&v| v == 200));
        assert!(stats.diagnostics[0].contains("detection failed"));
    }

    #[test]
    fn test_blur_failure_reported_not_counted() {
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(5, 5, 10, 10, 0.95)],
            },
            MeanPixelEmbedder,
            FailingBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.blurred, 0);
        assert!(stats.diagnostics[0].contains("blur failed"));
    }

    #[test]
    fn test_region_overhanging_frame_is_clamped_before_blur() {
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(35, 35, 20, 20, 0.99)],
            },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.blurred, 1);
        let corner = (39 * 40 + 39) * 3;
        assert_eq!(frame.data()[corner], 0);
    }

    #[test]
    fn test_region_fully_outside_frame_skipped() {
        let mut t = transformer(
            FixedDetector {
                regions: vec![FaceRegion::new(100, 100, 20, 20, 0.99)],
            },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(200);
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.detected, 1);
        assert_eq!(stats.blurred, 0);
    }

    #[test]
    fn test_mixed_frame_blurs_only_unknown_faces() {
        // Left face matches the whitelist (mean 200), right one does not.
        let mut data = vec![200u8; 40 * 40 * 3];
        for row in 0..10 {
            for col in 25..35 {
                let idx = ((5 + row) * 40 + col) * 3;
                data[idx] = 20;
                data[idx + 1] = 20;
                data[idx + 2] = 20;
            }
        }
        let mut frame = Frame::new(data, 40, 40, 3, 0);

        let mut t = transformer(
            FixedDetector {
                regions: vec![
                    FaceRegion::new(5, 5, 10, 10, 0.95),
                    FaceRegion::new(25, 5, 10, 10, 0.95),
                ],
            },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let stats = t.transform(&mut frame, &store_around(200.0));
        assert_eq!(stats.detected, 2);
        assert_eq!(stats.blurred, 1);
        // Whitelisted face untouched, unknown face zeroed.
        let left = (7 * 40 + 7) * 3;
        assert_eq!(frame.data()[left], 200);
        let right = (7 * 40 + 27) * 3;
        assert_eq!(frame.data()[right], 0);
    }

    #[test]
    fn test_empty_detection_is_a_no_op() {
        let mut t = transformer(
            FixedDetector { regions: vec![] },
            MeanPixelEmbedder,
            MarkerBlurrer,
            1.0,
        );
        let mut frame = frame_filled(128);
        let stats = t.transform(&mut frame, &store_around(50.0));
        assert_eq!(stats.detected, 0);
        assert_eq!(stats.blurred, 0);
        assert!(stats.diagnostics.is_empty());
    }
}
