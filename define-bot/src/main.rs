use std::sync::Arc;

use anyhow::Context;
use chat::TelegramChat;
use commands::CommandParser;
use config::Config;
use dictionary::{Dictionary, SpellChecker};
use handler::Handler;
use render::Renderer;
use replies::ReplyBook;
use teloxide::{
    dispatching::UpdateFilterExt, dptree, error_handlers::LoggingErrorHandler, prelude::*,
};
use tracing_subscriber::EnvFilter;

mod chat;
mod commands;
mod config;
mod handler;
mod render;
mod replies;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env()?;
    let book = ReplyBook::load(&config.replies_path)?;
    let speller = match &config.word_list {
        Some(path) => SpellChecker::from_file(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?,
        None => SpellChecker::english(),
    }
    .with_limit(config.max_suggestions);
    tracing::info!(words = speller.len(), "spell checker loaded");

    let dictionary =
        Dictionary::new(config.dictionary()).context("Failed to set up dictionary client")?;
    let handler = Arc::new(Handler::new(
        CommandParser::new().context("Failed to compile command pattern")?,
        Arc::new(dictionary),
        speller,
        Renderer::new(book),
    ));

    let bot = Bot::new(&config.token);
    bot.set_my_commands(commands::menu())
        .await
        .context("Failed to register bot commands")?;

    run(bot, handler).await;
    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,hyper_util=warn,reqwest=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Long-polls for updates until ctrl-c.
async fn run(bot: Bot, handler: Arc<Handler>) {
    let tree = Update::filter_message().endpoint(on_message);

    tracing::info!("Starting dispatcher with long polling...");
    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![handler])
        .default_handler(|upd| async move {
            tracing::debug!(update = ?upd.id, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in message handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    tracing::warn!("Dispatcher stopped");
}

async fn on_message(bot: Bot, msg: Message, handler: Arc<Handler>) -> anyhow::Result<()> {
    // stickers, photos and the like carry no text
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat = TelegramChat::new(bot, &msg);
    handler.handle(text, &chat).await?;
    Ok(())
}
