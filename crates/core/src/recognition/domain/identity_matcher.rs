use crate::shared::embedding::Embedding;

use super::whitelist::WhitelistStore;

/// Decides whether a probe embedding belongs to a whitelisted identity.
///
/// A probe matches when its minimum L2 distance to any whitelist entry is
/// strictly below the threshold. Distance exactly equal to the threshold
/// is not a match. The matcher returns a boolean, not an identity, so
/// tie-breaking between equally close entries never arises.
#[derive(Clone, Debug)]
pub struct IdentityMatcher {
    threshold: f64,
}

impl IdentityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Short-circuits on the first entry closer than the threshold.
    ///
    /// Equivalent to comparing [`min_distance`](Self::min_distance)
    /// against the threshold, just cheaper on early hits.
    pub fn matches(&self, probe: &Embedding, store: &WhitelistStore) -> bool {
        store
            .entries()
            .iter()
            .any(|entry| probe.l2_distance(&entry.embedding) < self.threshold)
    }

    /// Distance to the closest whitelist entry, `None` for an empty store.
    pub fn min_distance(&self, probe: &Embedding, store: &WhitelistStore) -> Option<f64> {
        store
            .entries()
            .iter()
            .map(|entry| probe.l2_distance(&entry.embedding))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}
