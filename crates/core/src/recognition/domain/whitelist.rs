use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::embedding_provider::EmbeddingProvider;

/// One whitelisted identity: the reference image's label and its embedding.
#[derive(Clone, Debug)]
pub struct WhitelistEntry {
    pub label: String,
    pub embedding: Embedding,
}

/// In-memory collection of whitelisted identities.
///
/// Built once per job from reference images and read-only while frames
/// are being processed. A store with zero entries is a valid terminal
/// state of the build, not an error; the controller refuses to start a
/// job against it.
#[derive(Clone, Debug, Default)]
pub struct WhitelistStore {
    entries: Vec<WhitelistEntry>,
}

impl WhitelistStore {
    pub fn from_entries(entries: Vec<(String, Embedding)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, embedding)| WhitelistEntry { label, embedding })
                .collect(),
        }
    }

    /// Builds a store from labelled reference images.
    ///
    /// For each image the most confident detected face is cropped and
    /// embedded. When detection finds no face the whole image is embedded
    /// instead (reference photos are often already tight crops). An image
    /// whose embedding fails is skipped with a diagnostic; it never aborts
    /// the build.
    pub fn build(
        detector: &mut dyn FaceDetector,
        embedder: &dyn EmbeddingProvider,
        images: impl IntoIterator<Item = (String, Frame)>,
    ) -> Self {
        let mut entries = Vec::new();

        for (label, image) in images {
            let face = match best_face_crop(detector, &image) {
                Ok(Some(crop)) => crop,
                Ok(None) => image.clone(),
                Err(e) => {
                    log::warn!("whitelist: face detection failed for '{label}': {e}");
                    image.clone()
                }
            };

            match embedder.embed(&face) {
                Ok(embedding) => {
                    log::info!("whitelist: added '{label}'");
                    entries.push(WhitelistEntry { label, embedding });
                }
                Err(e) => {
                    log::warn!("whitelist: skipping '{label}', embedding failed: {e}");
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

/// Crop of the most confident face in the image, clamped to its bounds.
fn best_face_crop(
    detector: &mut dyn FaceDetector,
    image: &Frame,
) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
    let regions = detector.detect(image)?;
    let best: Option<&FaceRegion> = regions.iter().max_by(|a, b| {
        a.confidence
            .partial_cmp(&b.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(best
        .and_then(|r| r.clamp(image.width(), image.height()))
        .map(|r| image.crop(&r)))
}
