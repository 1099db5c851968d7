/// An axis-aligned face bounding box in pixel coordinates of one frame,
/// together with the detector's confidence in [0, 1].
///
/// Regions are produced by a detector, consumed within the same frame
/// iteration, and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl FaceRegion {
    pub fn new(x: i32, y: i32, width: i32, height: i32, confidence: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Clips the region to the frame rectangle `[0, frame_w) x [0, frame_h)`.
    ///
    /// Detectors routinely return boxes that extend past the image edge;
    /// clamping before cropping is what keeps every pixel access in range.
    /// Returns `None` when nothing of the region lies inside the frame.
    pub fn clamp(&self, frame_w: u32, frame_h: u32) -> Option<FaceRegion> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_w as i32);
        let y2 = (self.y + self.height).min(frame_h as i32);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(FaceRegion {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            confidence: self.confidence,
        })
    }

    pub fn area(&self) -> i64 {
        (self.width.max(0) as i64) * (self.height.max(0) as i64)
    }

    /// Intersection over union with another region.
    pub fn iou(&self, other: &FaceRegion) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        let union = self.area() as f64 + other.area() as f64 - inter;
        inter / union
    }
}
