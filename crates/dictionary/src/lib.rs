use std::time::Duration;

use dictionary_api::get_definition;
use thiserror::Error;
use tracing::{debug, warn};

mod dictionary;
mod dictionary_api;
mod spelling;

pub use dictionary::{Definition, Lookup, LookupStatus, Meaning, Word};
pub use spelling::SpellChecker;

pub const DEFAULT_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to build the http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid dictionary api url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to reach the dictionary api: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("dictionary api answered with {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode the dictionary api response: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("dictionary api returned no entries")]
    Empty,
    #[error("word not found: {0}")]
    NotFound(NotFoundError),
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct NotFoundError {
    message: String,
}

impl NotFoundError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct Dictionary {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl Dictionary {
    pub fn new(config: DictionaryConfig) -> Result<Self, DictionaryError> {
        let base_url =
            reqwest::Url::parse(&config.base_url).map_err(|error| DictionaryError::InvalidUrl {
                url: config.base_url.clone(),
                reason: error.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidUrl {
                url: config.base_url,
                reason: "url cannot carry a path".to_owned(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DictionaryError::Client)?;
        Ok(Self { client, base_url })
    }

    /// Single request for `word`; there is no retry on failure.
    pub async fn get_definition(&self, word: &str) -> Result<Word, DictionaryError> {
        get_definition(&self.client, &self.base_url, word).await
    }

    /// Like [`Dictionary::get_definition`] but folds every exit path into one of the three
    /// lookup outcomes.
    pub async fn lookup(&self, word: &str) -> Lookup {
        match self.get_definition(word).await {
            Ok(found) => Lookup::Found(found),
            Err(DictionaryError::NotFound(reason)) => {
                debug!(word, %reason, "word not found");
                Lookup::NotFound {
                    word: word.to_lowercase(),
                }
            }
            Err(error) => {
                warn!(word, %error, "dictionary lookup failed");
                Lookup::Errored {
                    word: word.to_owned(),
                    error,
                }
            }
        }
    }
}
