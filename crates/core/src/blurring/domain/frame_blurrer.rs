use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Replaces the given regions of a frame with an irreversibly smoothed
/// version of the same pixels, in place.
///
/// Implementations must not change the frame's dimensions and must not
/// touch pixels outside the listed regions. Regions are expected to be
/// clamped to the frame bounds before they reach the blurrer.
pub trait FrameBlurrer: Send {
    fn blur(
        &self,
        frame: &mut Frame,
        regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
