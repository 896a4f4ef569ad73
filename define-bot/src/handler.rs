//! # Handler
//!
//! Routes one inbound text message from dispatch to lookup to reply.

use std::sync::Arc;

use async_trait::async_trait;
use dictionary::{Dictionary, Lookup, SpellChecker};
use tracing::{debug, info};

use crate::chat::{ChatError, ChatSink};
use crate::commands::{Command, CommandParser};
use crate::render::{Renderer, Reply};
use crate::replies::MessageKind;

/// Source of word lookups, the dictionary api in production.
#[async_trait]
pub trait WordLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> Lookup;
}

#[async_trait]
impl WordLookup for Dictionary {
    async fn lookup(&self, word: &str) -> Lookup {
        Dictionary::lookup(self, word).await
    }
}

/// Read-only after construction; one instance serves every chat.
pub struct Handler {
    parser: CommandParser,
    dictionary: Arc<dyn WordLookup>,
    speller: SpellChecker,
    renderer: Renderer,
}

impl Handler {
    pub fn new(
        parser: CommandParser,
        dictionary: Arc<dyn WordLookup>,
        speller: SpellChecker,
        renderer: Renderer,
    ) -> Self {
        Self {
            parser,
            dictionary,
            speller,
            renderer,
        }
    }

    pub async fn handle(&self, text: &str, chat: &dyn ChatSink) -> Result<(), ChatError> {
        let reply = match self.parser.parse(text) {
            Command::Start => Reply::Static(MessageKind::Start),
            Command::Help => Reply::Static(MessageKind::Help),
            Command::Define(word) => return self.define(word, chat).await,
            Command::Unrecognized => {
                debug!(text, "unrecognized message");
                Reply::Static(MessageKind::SyntaxError)
            }
        };
        self.renderer.send(chat, reply).await
    }

    async fn define(&self, word: &str, chat: &dyn ChatSink) -> Result<(), ChatError> {
        match self.dictionary.lookup(word).await {
            Lookup::Found(found) => {
                info!(word = %found.text, meanings = found.meanings.len(), "defining word");
                self.renderer.send(chat, Reply::Definition(&found)).await
            }
            Lookup::NotFound { word } => {
                let suggestions = self.speller.candidates(&word);
                info!(word, suggestions = suggestions.len(), "no definition, suggesting");
                self.renderer.send(chat, Reply::Suggestions(&suggestions)).await
            }
            // the dictionary has already logged the cause
            Lookup::Errored { .. } => {
                self.renderer
                    .send(chat, Reply::Static(MessageKind::GeneralError))
                    .await
            }
        }
    }
}
