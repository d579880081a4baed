use serde::{Serialize, Deserialize};

/// Body of every non-2xx response the contest API sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
