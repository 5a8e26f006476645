//! Hit counting for learn search responses.

use common::search_result::LearnSearchResponse;
use goose::goose::GooseResponse;
use tracing::warn;

pub fn hits_in_body(body: &str) -> anyhow::Result<usize> {
    let response: LearnSearchResponse = serde_json::from_str(body)?;
    Ok(response.hits.hits.len())
}

/// Number of hits on the returned page. Anything unreadable counts as an
/// empty page, which ends the current search.
pub async fn search_hit_count(goose: GooseResponse) -> usize {
    let response = match goose.response {
        Ok(response) => response,
        Err(e) => {
            warn!("search request failed: {}", e);
            return 0;
        }
    };
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("search response could not be read: {}", e);
            return 0;
        }
    };
    match hits_in_body(&body) {
        Ok(count) => count,
        Err(e) => {
            warn!("search response ({}) without hits: {}", status, e);
            0
        }
    }
}
