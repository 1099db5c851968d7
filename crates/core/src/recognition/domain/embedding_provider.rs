use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

/// Domain interface for turning a face crop into an identity embedding.
///
/// May fail when the crop is too small, malformed, or the underlying
/// model errors; the pipeline treats such failures as local to one face.
pub trait EmbeddingProvider: Send {
    fn embed(&self, face: &Frame) -> Result<Embedding, Box<dyn std::error::Error>>;
}
