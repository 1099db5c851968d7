use std::path::Path;
use std::sync::Mutex;

use crate::detection::infrastructure::execution_provider::preferred_execution_providers;
use crate::recognition::domain::embedding_provider::EmbeddingProvider;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

/// Fallback input resolution for ArcFace-style recognition models.
const DEFAULT_INPUT_SIZE: u32 = 112;

/// Crops smaller than this on either side carry too little signal to
/// embed meaningfully.
const MIN_CROP_SIZE: u32 = 4;

/// Face embedding provider backed by an ArcFace-style ONNX model.
///
/// Input is resized to the model's square resolution and normalized to
/// [-1, 1] with the ArcFace convention `(x - 127.5) / 127.5`. The raw
/// output vector is returned un-normalized; [`Embedding::l2_distance`]
/// on raw vectors is what the match threshold is calibrated against.
pub struct OnnxEmbeddingProvider {
    // The trait takes `&self` so one provider can serve whitelist build
    // and frame loop alike; ort sessions need `&mut` to run.
    session: Mutex<ort::session::Session>,
    input_size: u32,
}

impl OnnxEmbeddingProvider {
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
            session: Mutex::new(session),
            input_size,
        })
    }
}

impl EmbeddingProvider for OnnxEmbeddingProvider {
    fn embed(&self, face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>> {
        if face.width() < MIN_CROP_SIZE || face.height() < MIN_CROP_SIZE {
            return Err(format!(
                "face crop {}x{} too small to embed",
                face.width(),
                face.height()
            )
            .into());
        }

        let tensor = preprocess(face, self.input_size);
        let input_value = ort::value::Tensor::from_array(tensor)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| "embedding session poisoned")?;
        let outputs = session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("embedding model produced no outputs".into());
        }
        let output = outputs[0].try_extract_array::<f32>()?;
        let values: Vec<f32> = output.iter().copied().collect();
        if values.is_empty() {
            return Err("embedding model produced an empty vector".into());
        }

        Ok(Embedding::new(values))
    }
}

/// Nearest-neighbor resize to the model's square input, normalized to
/// [-1, 1] in NCHW layout.
fn preprocess(face: &Frame, target_size: u32) -> ndarray::Array4<f32> {
    let target = target_size as usize;
    let src = face.data();
    let src_w = face.width() as usize;
    let src_h = face.height() as usize;
    let channels = face.channels() as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, target, target));
    for y in 0..target {
        let src_y = (y * src_h / target).min(src_h - 1);
        for x in 0..target {
            let src_x = (x * src_w / target).min(src_w - 1);
            let base = (src_y * src_w + src_x) * channels;
            for c in 0..3 {
                tensor[[0, c, y, x]] = (src[base + c] as f32 - 127.5) / 127.5;
            }
        }
    }
    tensor
}
