use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};
use crate::llm::gemini::DEFAULT_ENDPOINT;

/// Startup settings. Every flag can also come from the environment or a
/// `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "design-bridge", version, about = "Turns UI instructions into canvas shape JSON")]
pub struct Config {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Full URL of the generateContent endpoint
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// File holding the system instruction sent with every request
    #[arg(long = "system-prompt", env = "SYSTEM_PROMPT_PATH", default_value = "prompts/system.txt")]
    pub system_prompt: PathBuf,

    /// Timeout for the outbound model call, in seconds
    #[arg(long = "timeout-secs", env = "REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        // A missing .env file is normal in production.
        dotenv::dotenv().ok();
        let config = Config::parse();
        config.api_key()?;
        Ok(config)
    }

    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::Config(
                "GOOGLE_API_KEY is not set; put the Gemini key in the environment or .env".to_string(),
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
