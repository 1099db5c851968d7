use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::execution_provider::preferred_execution_providers;

/// Fallback model input resolution when the model's shape is dynamic.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Floor below which raw model outputs are discarded outright. The
/// caller applies its own, stricter confidence threshold on top.
const CONFIDENCE_FLOOR: f64 = 0.25;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// YOLO-style face detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference, and NMS post-processing,
/// producing plain [`FaceRegion`]s with the detector's confidence.
pub struct OnnxFaceDetector {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxFaceDetector {
    /// Loads a face-detection ONNX model and prepares it for inference.
    ///
    /// The input resolution is read from the model's input shape
    /// (expecting NCHW); falls back to 640 when dynamic or unreadable.
    pub fn new(
        model_path: &Path,
        use_acceleration: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?
            .with_execution_providers(preferred_execution_providers(use_acceleration))?
            .commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    // shape is [N, C, H, W]; H == W for square inputs
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            input_size,
        })
    }
}

impl FaceDetector for OnnxFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        // 1. Preprocess: letterbox + normalize → NCHW float32
        let (input_tensor, scale, pad_x, pad_y) = letterbox(frame, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("detection model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // Output is [1, num_features, num_detections] (transposed) or
        // [1, num_detections, num_features]. Handle both.
        let (num_dets, num_feats) = if shape.len() == 3 {
            if shape[1] < shape[2] {
                (shape[2], shape[1])
            } else {
                (shape[1], shape[2])
            }
        } else {
            return Err(format!("unexpected detector output shape: {shape:?}").into());
        };
        let transposed = shape[1] < shape[2];
        let data = tensor.as_slice().ok_or("cannot get tensor slice")?;

        // 3. Parse detections: rows of [cx, cy, w, h, conf, ...]
        let mut raw_dets = Vec::new();
        for i in 0..num_dets {
            let at = |f: usize| {
                if transposed {
                    data[f * num_dets + i]
                } else {
                    data[i * num_feats + f]
                }
            };
            if num_feats < 5 {
                continue;
            }
            let conf = at(4) as f64;
            if conf < CONFIDENCE_FLOOR {
                continue;
            }

            let cx = at(0) as f64;
            let cy = at(1) as f64;
            let w = at(2) as f64;
            let h = at(3) as f64;

            // Map letterbox coords back to frame coords
            let x1 = ((cx - w / 2.0) - pad_x as f64) / scale;
            let y1 = ((cy - h / 2.0) - pad_y as f64) / scale;
            let x2 = ((cx + w / 2.0) - pad_x as f64) / scale;
            let y2 = ((cy + h / 2.0) - pad_y as f64) / scale;

            raw_dets.push(RawDetection {
                x1,
                y1,
                x2,
                y2,
                confidence: conf,
            });
        }

        // 4. NMS, then convert to regions
        let regions = nms(&mut raw_dets, NMS_IOU_THRESH)
            .into_iter()
            .map(|d| {
                FaceRegion::new(
                    d.x1.round() as i32,
                    d.y1.round() as i32,
                    (d.x2 - d.x1).round() as i32,
                    (d.y2 - d.y1).round() as i32,
                    d.confidence,
                )
            })
            .collect();

        Ok(regions)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Letterbox-resize a frame to `target_size` x `target_size`.
///
/// Returns `(NCHW float32 tensor, scale, pad_x, pad_y)`.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, f64, u32, u32) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = (fw * scale).round() as u32;
    let new_h = (fh * scale).round() as u32;
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    // Pad with 114/255 gray, the YOLO convention
    let gray = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target_size as usize, target_size as usize), gray);

    let src = frame.data();
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;
    let channels = frame.channels() as usize;

    // Nearest-neighbor resize into the padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            let base = (src_y * src_w + src_x) * channels;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[base + c] as f32 / 255.0;
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

// ---------------------------------------------------------------------------
// NMS
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct RawDetection {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    confidence: f64,
}

/// Greedy NMS: sort by confidence descending, suppress overlapping boxes.
fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; dets.len()];

    for i in 0..dets.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(dets[i].clone());
        for j in (i + 1)..dets.len() {
            if suppressed[j] {
                continue;
            }
            let iou = bbox_iou(
                &[dets[i].x1, dets[i].y1, dets[i].x2, dets[i].y2],
                &[dets[j].x1, dets[j].y1, dets[j].x2, dets[j].y2],
            );
            if iou > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> RawDetection {
        RawDetection {
            x1,
            y1,
            x2,
            y2,
            confidence,
        }
    }

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 frame into 640x640: scale 3.2, new_h 320, pad_y 160
        let frame = Frame::new(vec![128u8; 200 * 100 * 3], 200, 100, 3, 0);
        let (tensor, scale, pad_x, pad_y) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((scale - 3.2).abs() < 0.01);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 160);
    }

    #[test]
    fn test_letterbox_square_frame_has_no_padding() {
        let frame = Frame::new(vec![128u8; 100 * 100 * 3], 100, 100, 3, 0);
        let (tensor, scale, pad_x, pad_y) = letterbox(&frame, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((scale - 6.4).abs() < 0.01);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 0);
    }

    #[test]
    fn test_letterbox_values_normalized() {
        let frame = Frame::new(vec![255u8; 100 * 50 * 3], 100, 50, 3, 0);
        let (tensor, _, pad_x, pad_y) = letterbox(&frame, 640);

        assert_eq!(pad_x, 0);
        assert!(pad_y > 0);

        // Image region is white, ~1.0
        let y = pad_y as usize + 1;
        assert!((tensor[[0, 0, y, 1]] - 1.0).abs() < 0.01);

        // Padding is the gray fill
        let pad_val = 114.0 / 255.0;
        assert!((tensor[[0, 0, 0, 0]] - pad_val).abs() < 0.01);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let mut dets = vec![
            raw(0.0, 0.0, 100.0, 100.0, 0.9),
            raw(5.0, 5.0, 105.0, 105.0, 0.8),
        ];
        let kept = nms(&mut dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_keeps_non_overlapping() {
        let mut dets = vec![
            raw(0.0, 0.0, 50.0, 50.0, 0.9),
            raw(200.0, 200.0, 250.0, 250.0, 0.8),
        ];
        assert_eq!(nms(&mut dets, 0.3).len(), 2);
    }

    #[test]
    fn test_nms_empty_input() {
        let mut dets: Vec<RawDetection> = Vec::new();
        assert!(nms(&mut dets, 0.3).is_empty());
    }

    #[test]
    fn test_nms_highest_confidence_wins() {
        let mut dets = vec![
            raw(0.0, 0.0, 100.0, 100.0, 0.5),
            raw(2.0, 2.0, 102.0, 102.0, 0.9),
        ];
        let kept = nms(&mut dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_iou_no_overlap() {
        assert_eq!(
            bbox_iou(&[0.0, 0.0, 10.0, 10.0], &[20.0, 20.0, 30.0, 30.0]),
            0.0
        );
    }

    #[test]
    fn test_bbox_iou_identical() {
        let b = [0.0, 0.0, 10.0, 10.0];
        assert!((bbox_iou(&b, &b) - 1.0).abs() < 1e-9);
    }
}
