pub const DETECTOR_MODEL_NAME: &str = "yolov8n-face.onnx";
pub const DETECTOR_MODEL_URL: &str =
    "https://github.com/facepass/facepass/releases/download/v0.1.0/yolov8n-face.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/facepass/facepass/releases/download/v0.1.0/w600k_r50.onnx";

/// Minimum detector confidence for a region to be embedded and matched.
pub const DEFAULT_DETECTION_CONFIDENCE: f64 = 0.9;

/// Maximum embedding distance still treated as the same identity.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// Gaussian kernel size used when blurring unrecognized faces.
pub const DEFAULT_BLUR_KERNEL: usize = 99;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
