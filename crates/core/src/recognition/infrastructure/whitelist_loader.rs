use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::recognition::domain::embedding_provider::EmbeddingProvider;
use crate::recognition::domain::whitelist::WhitelistStore;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

/// Builds a [`WhitelistStore`] from a directory of reference images.
///
/// Every file with a recognized image extension is loaded as RGB and
/// labelled with its file name. Unreadable files are skipped with a
/// warning; the build never aborts over a single bad image.
pub fn load_whitelist_dir(
    dir: &Path,
    detector: &mut dyn FaceDetector,
    embedder: &dyn EmbeddingProvider,
) -> Result<WhitelistStore, Box<dyn std::error::Error>> {
    let mut entries = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image(path))
        .collect::<Vec<_>>();
    // Deterministic order keeps logs and diagnostics stable across runs.
    entries.sort();

    let images = entries.into_iter().filter_map(|path| {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match load_image(&path) {
            Ok(frame) => Some((label, frame)),
            Err(e) => {
                log::warn!("whitelist: cannot read '{}': {e}", path.display());
                None
            }
        }
    });

    Ok(WhitelistStore::build(detector, embedder, images))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn load_image(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)?.into_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3, 0))
}
