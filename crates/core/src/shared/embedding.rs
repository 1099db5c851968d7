/// A fixed-length numeric fingerprint of a face.
///
/// Dimensionality is fixed by the provider that produced it; embeddings
/// are only comparable when they come from the same provider and model
/// configuration. The pipeline never inspects individual components,
/// it only measures distances.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Euclidean (L2) distance to another embedding.
    ///
    /// Accumulates in f64 so long vectors don't lose precision.
    pub fn l2_distance(&self, other: &Embedding) -> f64 {
        debug_assert_eq!(
            self.values.len(),
            other.values.len(),
            "embeddings from different providers are not comparable"
        );
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| {
                let d = (*a as f64) - (*b as f64);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}
