//! Dictionary words for OCW searches, downloaded once per process.

use anyhow::Context;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::fake_text::WORDS;
use crate::settings::settings;

static WORD_LIST: OnceCell<Vec<String>> = OnceCell::const_new();

pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

async fn download_word_list(url: &str) -> anyhow::Result<Vec<String>> {
    let client = reqwest::Client::new();
    let response = client.get(url).send().await?;
    let response = response.error_for_status().context("word list download failed")?;
    let words = parse_word_list(&response.text().await?);
    if words.is_empty() {
        anyhow::bail!("word list at {} is empty", url);
    }
    Ok(words)
}

/// Falls back to the built-in word pool when the download fails.
pub async fn word_list() -> &'static [String] {
    WORD_LIST
        .get_or_init(|| async {
            let url = &settings().learn_word_list_url;
            match download_word_list(url).await {
                Ok(words) => {
                    info!("Loaded {} search words from {}", words.len(), url);
                    words
                }
                Err(e) => {
                    warn!("word_list: using built-in words: {:#}", e);
                    WORDS.iter().map(|w| w.to_string()).collect()
                }
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let words = parse_word_list("a\r\naa\n\n  aah \n");
        assert_eq!(words, ["a", "aa", "aah"]);
    }
}
