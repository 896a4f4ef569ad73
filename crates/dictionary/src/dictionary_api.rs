// https://dictionaryapi.dev/ - free, no key, answers 404 with a json body for unknown words

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{Definition, DictionaryError, Meaning, NotFoundError, Word};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiEntry {
    word: String,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    text: Option<String>,
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    part_of_speech: String,
    definitions: Vec<ApiDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
    example: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiNotFound {
    title: Option<String>,
    message: Option<String>,
}

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    base_url: &Url,
    word: &str,
) -> Result<Word, DictionaryError> {
    let res = client
        .get(entry_url(base_url, word))
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    let status = res.status();
    if status == StatusCode::NOT_FOUND {
        let message = res
            .json::<ApiNotFound>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.title))
            .unwrap_or_else(|| format!("no definitions for {word:?}"));
        return Err(DictionaryError::NotFound(NotFoundError::new(message)));
    }
    if !status.is_success() {
        return Err(DictionaryError::Status(status));
    }
    let entries = res.json::<Vec<ApiEntry>>().await.map_err(|error| {
        if error.is_decode() {
            DictionaryError::Deserialize(error)
        } else {
            DictionaryError::Fetch(error)
        }
    })?;
    // only the first entry is used, later ones are homographs
    let entry = entries.into_iter().next().ok_or(DictionaryError::Empty)?;
    Ok(entry.into())
}

fn entry_url(base_url: &Url, word: &str) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&word.to_lowercase());
    }
    url
}

fn non_empty(list: Vec<String>) -> Option<Vec<String>> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

fn has_regional_audio(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.ends_with("us.mp3") || url.ends_with("uk.mp3")
}

/// Picks `(text, audio)` from the phonetics list.
///
/// The first entry with a non-empty us/uk recording wins and stops the scan. Entries without
/// any audio only contribute their text, the last one seen before a recording is found wins.
fn select_phonetic(phonetics: Vec<ApiPhonetic>) -> (Option<String>, Option<String>) {
    let mut text = None;
    for phonetic in phonetics {
        match phonetic.audio {
            Some(audio) => {
                if !audio.is_empty() && has_regional_audio(&audio) {
                    return (phonetic.text.or(text), Some(audio));
                }
            }
            None => {
                if phonetic.text.is_some() {
                    text = phonetic.text;
                }
            }
        }
    }
    (text, None)
}

impl From<ApiDefinition> for Definition {
    fn from(value: ApiDefinition) -> Self {
        Self {
            text: value.definition,
            synonyms: non_empty(value.synonyms),
            antonyms: non_empty(value.antonyms),
            example: value.example,
        }
    }
}

impl From<ApiMeaning> for Meaning {
    fn from(value: ApiMeaning) -> Self {
        Self {
            part_of_speech: value.part_of_speech,
            synonyms: non_empty(value.synonyms),
            antonyms: non_empty(value.antonyms),
            definitions: value.definitions.into_iter().map(Definition::from).collect(),
        }
    }
}

impl From<ApiEntry> for Word {
    fn from(value: ApiEntry) -> Self {
        let (phonetic_text, phonetic_audio) = select_phonetic(value.phonetics);
        Self {
            text: value.word,
            phonetic_text,
            phonetic_audio,
            meanings: value.meanings.into_iter().map(Meaning::from).collect(),
        }
    }
}
