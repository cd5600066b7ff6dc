use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(default)]
// Recipe lookup
pub struct LookupConfig {
    /// Search recipes on all cores
    pub parallel: bool,
    /// Below this many recipes a lookup stays on the calling thread
    pub parallel_threshold: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: 64,
        }
    }
}

impl LookupConfig {
    pub fn validate(&self) {
        assert!(
            self.parallel_threshold > 0,
            "Parallel lookup threshold must be at least 1"
        );
    }
}
