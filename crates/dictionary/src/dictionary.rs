use crate::DictionaryError;

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub phonetic_text: Option<String>,
    pub phonetic_audio: Option<String>,
    pub meanings: Vec<Meaning>,
}

/// One part-of-speech grouping of definitions, in the order the API reported them.
#[derive(Debug, Clone, PartialEq)]
pub struct Meaning {
    pub part_of_speech: String,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub text: String,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub example: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    Ok,
    NotFound,
    Errored,
}

/// Outcome of a single dictionary request. Only `Found` carries data.
#[derive(Debug)]
pub enum Lookup {
    Found(Word),
    NotFound { word: String },
    Errored { word: String, error: DictionaryError },
}

impl Lookup {
    pub fn status(&self) -> LookupStatus {
        match self {
            Lookup::Found(_) => LookupStatus::Ok,
            Lookup::NotFound { .. } => LookupStatus::NotFound,
            Lookup::Errored { .. } => LookupStatus::Errored,
        }
    }

    /// The looked-up text; for a found word this is the API's spelling.
    pub fn word(&self) -> &str {
        match self {
            Lookup::Found(word) => &word.text,
            Lookup::NotFound { word } | Lookup::Errored { word, .. } => word,
        }
    }
}
