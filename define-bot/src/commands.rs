//! # Commands
//!
//! Decides what an inbound message asks for. No I/O happens here.

use regex::Regex;
use teloxide::types::BotCommand;

const DEFINE_PATTERN: &str = r"^(?i:define) (?P<word>[a-zA-Z]+)$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    Help,
    /// The word as typed; case is left to the lookup.
    Define(&'a str),
    Unrecognized,
}

/// Built once at start-up and shared read-only by every handler.
#[derive(Debug, Clone)]
pub struct CommandParser {
    define: Regex,
}

impl CommandParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            define: Regex::new(DEFINE_PATTERN)?,
        })
    }

    pub fn parse<'a>(&self, text: &'a str) -> Command<'a> {
        if let Some(command) = slash_command(text) {
            match command {
                "start" => return Command::Start,
                "help" => return Command::Help,
                _ => {}
            }
        }
        match self.define.captures(text).and_then(|captures| captures.name("word")) {
            Some(word) => Command::Define(word.as_str()),
            None => Command::Unrecognized,
        }
    }
}

/// `/name`, `/name@bot` or `/name args` yield `name`.
fn slash_command(text: &str) -> Option<&str> {
    let token = text.split_whitespace().next()?.strip_prefix('/')?;
    let name = token.split_once('@').map_or(token, |(name, _)| name);
    Some(name)
}

/// Entries for the platform's command menu.
pub fn menu() -> Vec<BotCommand> {
    vec![BotCommand::new("help", "get help msg on using the bot")]
}
