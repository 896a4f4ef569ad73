//! # Replies
//!
//! The static message table and the askama templates under `templates/`.

use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context};
use askama::Template;
use dictionary::Word;
use regex::Regex;
use serde::Deserialize;

/// Separates chunks that are sent as separate chat messages.
pub const CHUNK_BOUNDARY: &str = "----";

/// Tags Telegram accepts in HTML parse mode.
const SUPPORTED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "code", "del", "em", "i", "ins", "pre", "s", "span", "strike",
    "strong", "tg-emoji", "tg-spoiler", "u",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Start,
    Help,
    GeneralError,
    SyntaxError,
}

/// Fixed replies, matching the layout of `data/replies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyBook {
    pub start: String,
    pub help: String,
    pub general_error: String,
    pub syntax_error: String,
}

impl ReplyBook {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let book: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        book.validate()
            .with_context(|| format!("Invalid reply in {}", path.display()))?;
        Ok(book)
    }

    /// Every entry is sent in HTML parse mode, so it must be markup Telegram accepts.
    pub fn validate(&self) -> anyhow::Result<()> {
        for kind in [
            MessageKind::Start,
            MessageKind::Help,
            MessageKind::GeneralError,
            MessageKind::SyntaxError,
        ] {
            check_markup(self.get(kind)).with_context(|| format!("{kind:?} reply"))?;
        }
        Ok(())
    }

    pub fn get(&self, kind: MessageKind) -> &str {
        match kind {
            MessageKind::Start => &self.start,
            MessageKind::Help => &self.help,
            MessageKind::GeneralError => &self.general_error,
            MessageKind::SyntaxError => &self.syntax_error,
        }
    }
}

/// Rejects `<`, `>` and `&` that are not part of a supported tag or an entity.
fn check_markup(text: &str) -> anyhow::Result<()> {
    let tag = Regex::new(r"^</?([a-zA-Z][a-zA-Z0-9-]*)(?:\s[^<>]*)?>")?;
    let entity = Regex::new(r"^&(?:[a-zA-Z]+|#[0-9]+|#x[0-9a-fA-F]+);")?;
    let mut rest = text;
    while let Some(at) = rest.find(&['<', '>', '&'][..]) {
        let tail = &rest[at..];
        let consumed = if tail.starts_with('<') {
            let captures = tag
                .captures(tail)
                .ok_or_else(|| anyhow!("unescaped '<' before {:?}", preview(tail)))?;
            let name = captures[1].to_ascii_lowercase();
            ensure!(
                SUPPORTED_TAGS.contains(&name.as_str()),
                "unsupported tag <{name}>, write &lt;{name}&gt; for literal text"
            );
            captures[0].len()
        } else if tail.starts_with('&') {
            entity
                .find(tail)
                .ok_or_else(|| anyhow!("unescaped '&' before {:?}", preview(tail)))?
                .end()
        } else {
            bail!("unescaped '>' before {:?}", preview(tail))
        };
        rest = &tail[consumed..];
    }
    Ok(())
}

fn preview(text: &str) -> &str {
    text.char_indices().nth(16).map_or(text, |(end, _)| &text[..end])
}

#[derive(Template)]
#[template(path = "define.html")]
pub struct DefineTemplate<'a> {
    pub word: &'a Word,
}

#[derive(Template)]
#[template(path = "invalid-word.html")]
pub struct InvalidWordTemplate<'a> {
    pub suggestions: &'a [String],
}
