use serde::{Deserialize, Serialize};

/// The part of a search response the load test looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnSearchResponse {
    pub hits: LearnSearchResponseHits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnSearchResponseHits {
    pub hits: Vec<serde_json::Value>,
}
