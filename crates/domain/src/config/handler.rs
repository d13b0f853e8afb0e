use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Upper bound for answering one request, across all of its questions.
    /// `0` waits for every dispatch however long it takes.
    pub request_deadline_ms: u64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            request_deadline_ms: 5000,
        }
    }
}
