use std::path::PathBuf;

/// Stream-level facts about a source video, captured when the reader opens it.
///
/// `total_frames` may be 0 for containers that don't record a frame count;
/// progress fractions are undefined in that case and callers must tolerate it.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}
