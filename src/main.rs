/*

Copyright 2025 Lealt

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.

*/

use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod commands;
mod config;
mod constants;
mod database;
mod env;
mod events;
mod functions;
mod parrot;

pub use parrot::{Context, Data, Error};

#[tokio::main]
async fn main() -> Result<(), parrot::Error> {
    dotenv().ok();
    init_tracing();

    let token = env::discord_token()?;
    let intents = config::gateway_intents();
    let prefix_options = config::prefix_options();
    let database = database::connect()
        .await
        .map_err(|err| -> parrot::Error { Box::new(err) })?;
    let settings = parrot::Settings::from_env(database)?;

    let framework = parrot::build_framework(prefix_options, settings);
    parrot::run_client(token, intents, framework).await
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
