mod config;
mod design;
mod error;
mod llm;
mod orchestrator;
mod server;

use std::sync::Arc;

use crate::config::Config;
use crate::llm::gemini::{self, GeminiClient};
use crate::orchestrator::DesignService;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(err) = run().await {
        log::error!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> error::Result<()> {
    let config = Config::load()?;

    let system_prompt = gemini::load_system_prompt(&config.system_prompt);
    let client = GeminiClient::new(
        config.endpoint.as_str(),
        config.api_key()?,
        system_prompt,
        config.timeout(),
    )?;
    log::info!(
        "design bridge starting, model endpoint {} (timeout {}s)",
        client.endpoint(),
        config.timeout_secs
    );

    let service = Arc::new(DesignService::new(client));
    server::serve(config.bind, service).await
}
