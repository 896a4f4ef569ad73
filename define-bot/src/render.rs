//! # Renderer
//!
//! Turns a reply into outbound chat messages and is the only place that sends them.

use askama::Template;
use dictionary::Word;
use tracing::error;

use crate::chat::{ChatError, ChatSink};
use crate::replies::{DefineTemplate, InvalidWordTemplate, MessageKind, ReplyBook, CHUNK_BOUNDARY};

/// Telegram rejects longer messages. Raw markup is never shorter than the parsed text.
pub const MAX_MESSAGE_CHARS: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub enum Reply<'a> {
    Static(MessageKind),
    Definition(&'a Word),
    Suggestions(&'a [String]),
}

impl Reply<'_> {
    /// Syntax errors and suggestions quote the message they answer.
    fn quotes_inbound(&self) -> bool {
        matches!(
            self,
            Reply::Static(MessageKind::SyntaxError) | Reply::Suggestions(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    book: ReplyBook,
}

impl Renderer {
    pub fn new(book: ReplyBook) -> Self {
        Self { book }
    }

    /// Messages for `reply`, in sending order. Every message is non-empty and trimmed.
    pub fn render(&self, reply: &Reply<'_>) -> Result<Vec<String>, askama::Error> {
        let messages = match reply {
            Reply::Static(kind) => vec![self.book.get(*kind).trim().to_owned()],
            Reply::Definition(word) => split_chunks(&DefineTemplate { word: *word }.render()?),
            Reply::Suggestions(suggestions) => {
                vec![InvalidWordTemplate {
                    suggestions: *suggestions,
                }
                .render()?
                .trim()
                .to_owned()]
            }
        };
        Ok(messages)
    }

    pub async fn send(&self, chat: &dyn ChatSink, reply: Reply<'_>) -> Result<(), ChatError> {
        let messages = match self.render(&reply) {
            Ok(messages) => messages,
            Err(err) => {
                error!(?reply, %err, "failed to render reply");
                vec![self.book.get(MessageKind::GeneralError).trim().to_owned()]
            }
        };
        for message in messages.iter().filter(|message| !message.is_empty()) {
            if reply.quotes_inbound() {
                chat.reply(message).await?;
            } else {
                chat.send(message).await?;
            }
        }
        Ok(())
    }
}

fn split_chunks(rendered: &str) -> Vec<String> {
    rendered
        .split(CHUNK_BOUNDARY)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .flat_map(|chunk| fit_message(chunk, MAX_MESSAGE_CHARS))
        .collect()
}

/// Splits an oversized chunk between lines, so every template tag stays whole. A single line
/// over the limit is cut at a character boundary.
fn fit_message(chunk: &str, limit: usize) -> Vec<String> {
    if chunk.chars().count() <= limit {
        return vec![chunk.to_owned()];
    }
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for line in chunk.lines() {
        let line_len = line.chars().count();
        if current_len > 0 && current_len + 1 + line_len > limit {
            messages.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                messages.push(piece.iter().collect());
            }
            continue;
        }
        if current_len > 0 {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if current_len > 0 {
        messages.push(current);
    }
    messages
        .into_iter()
        .map(|message| message.trim().to_owned())
        .filter(|message| !message.is_empty())
        .collect()
}
