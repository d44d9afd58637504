use crate::{Data, Error};
use poise::{self, BoxFuture, serenity_prelude as serenity};

pub mod config_log;
pub mod mention;
pub mod usage;

pub type EventHandler = for<'a> fn(
    &'a serenity::Context,
    poise::FrameworkContext<'a, Data, Error>,
    &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>>;

/// Returns the list of registered gateway event handlers
pub fn load_all() -> &'static [EventHandler] {
    &[mention::event_handler]
}

/// Dispatches the incoming event to every registered handler in order
pub fn dispatch<'a>(
    ctx: &'a serenity::Context,
    framework: poise::FrameworkContext<'a, Data, Error>,
    event: &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        for handler in load_all() {
            handler(ctx, framework, event).await?;
        }
        Ok(())
    })
}
