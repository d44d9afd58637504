use crate::{
    api::{ApiClient, Endpoints},
    commands, env, events,
    functions::bot::bans,
};
use poise::serenity_prelude as serenity;
use serenity::prelude::TypeMapKey;
use sqlx::SqlitePool;
use std::{collections::HashSet, path::PathBuf, sync::Arc};
use tracing::info;

pub struct Data {
    pub shard_manager: Arc<serenity::ShardManager>,
    pub database: SqlitePool,
    pub api: ApiClient,
    pub temp_dir: PathBuf,
    pub owners: Vec<serenity::UserId>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<serenity::ShardManager>;
}

/// Everything the framework needs besides the gateway connection
pub struct Settings {
    pub database: SqlitePool,
    pub temp_dir: PathBuf,
    pub owners: Vec<serenity::UserId>,
}

impl Settings {
    pub fn from_env(database: SqlitePool) -> Result<Self, Error> {
        let owners = env::owner_ids()?
            .into_iter()
            .map(serenity::UserId::new)
            .collect();

        Ok(Self {
            database,
            temp_dir: env::temp_dir()?,
            owners,
        })
    }
}

/// Builds the Poise framework with all commands and the provided prefix options
pub fn build_framework(
    prefix_options: poise::PrefixFrameworkOptions<Data, Error>,
    settings: Settings,
) -> poise::Framework<Data, Error> {
    let owners: HashSet<serenity::UserId> = settings.owners.iter().copied().collect();

    poise::Framework::builder()
        .options(framework_options(prefix_options, owners))
        .setup(move |ctx, ready, framework| {
            Box::pin(async move { setup_framework(ctx, ready, framework, settings).await })
        })
        .build()
}

pub async fn run_client(
    token: String,
    intents: serenity::GatewayIntents,
    framework: poise::Framework<Data, Error>,
) -> Result<(), Error> {
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
    }

    client.start_autosharded().await?;

    Ok(())
}

fn framework_options(
    prefix_options: poise::PrefixFrameworkOptions<Data, Error>,
    owners: HashSet<serenity::UserId>,
) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands::load_all(),
        prefix_options,
        owners,
        initialize_owners: true,
        on_error: |error| Box::pin(commands::util::on_error(error)),
        pre_command: |ctx| Box::pin(events::usage::record(ctx)),
        post_command: |ctx| Box::pin(events::config_log::record(ctx)),
        command_check: Some(|ctx| Box::pin(bans::enforce_command_ban(ctx))),
        event_handler: |ctx, event, framework, _data| events::dispatch(ctx, framework, event),
        ..Default::default()
    }
}

async fn setup_framework(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: &poise::Framework<Data, Error>,
    settings: Settings,
) -> Result<Data, Error> {
    register_commands(ctx, framework).await?;
    let shard_manager = extract_shard_manager(ctx).await?;
    let api = ApiClient::new(Endpoints::default())?;
    info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected and ready");

    Ok(Data {
        shard_manager,
        database: settings.database,
        api,
        temp_dir: settings.temp_dir,
        owners: settings.owners,
    })
}

async fn register_commands(
    ctx: &serenity::Context,
    framework: &poise::Framework<Data, Error>,
) -> Result<(), Error> {
    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
    Ok(())
}

async fn extract_shard_manager(
    ctx: &serenity::Context,
) -> Result<Arc<serenity::ShardManager>, Error> {
    let data = ctx.data.read().await;
    data.get::<ShardManagerContainer>()
        .cloned()
        .ok_or_else(|| "shard manager missing from TypeMap".into())
}
