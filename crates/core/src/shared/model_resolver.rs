use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve an ONNX model file by name, checking local locations before
/// downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled path (for development / pre-packaged installs)
/// 3. Download from URL into the cache
pub fn resolve(
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            return Ok(bundled_path);
        }
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory, e.g.
/// `~/.cache/facepass/models/` on Linux.
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    dirs::cache_dir()
        .map(|d| d.join("facepass").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    let total = response.content_length().unwrap_or(0);

    // Write to a temp file first, then rename, so an interrupted download
    // never leaves a truncated model behind.
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    let mut downloaded: u64 = 0;
    let chunk_size = 1024 * 1024;
    for chunk in bytes.chunks(chunk_size) {
        file.write_all(chunk)
            .map_err(|e| ModelResolveError::Write {
                path: temp_path.clone(),
                source: e,
            })?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
