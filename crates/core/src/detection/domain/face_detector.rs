use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Domain interface for face detection.
///
/// Returns every face found in the frame with its confidence; an empty
/// result is a valid non-error outcome. Implementations may keep state
/// between calls, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>>;
}
