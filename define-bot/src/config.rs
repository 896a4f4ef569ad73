use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use dictionary::{DictionaryConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};

const DEFAULT_REPLIES_PATH: &str = "data/replies.yaml";
const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Start-up settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub replies_path: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
    pub word_list: Option<PathBuf>,
    pub max_suggestions: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = var("BOT_TOKEN").ok_or_else(|| anyhow!("BOT_TOKEN must be set"))?;
        let timeout = match var("DICTIONARY_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse()
                    .with_context(|| format!("invalid DICTIONARY_TIMEOUT_SECS {secs:?}"))?,
            ),
            None => DEFAULT_TIMEOUT,
        };
        let max_suggestions = match var("SPELLING_MAX_SUGGESTIONS") {
            Some(max) => max
                .trim()
                .parse()
                .with_context(|| format!("invalid SPELLING_MAX_SUGGESTIONS {max:?}"))?,
            None => DEFAULT_MAX_SUGGESTIONS,
        };

        Ok(Self {
            token,
            replies_path: var("REPLIES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPLIES_PATH)),
            api_url: var("DICTIONARY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            timeout,
            word_list: var("SPELLING_WORDLIST").map(PathBuf::from),
            max_suggestions,
        })
    }

    pub fn dictionary(&self) -> DictionaryConfig {
        DictionaryConfig {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
        }
    }
}
