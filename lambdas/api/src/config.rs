use std::{env, net::SocketAddr};

use anyhow::Context;
use domain::llm::openai::DEFAULT_BASE_URL;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_CODING_MODEL: &str = "gpt-4";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub coding_model: String,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .context("OPENAI_API_KEY must be set")?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or(DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse().context("MAX_UPLOAD_BYTES is not a number")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            api_key,
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(DEFAULT_BASE_URL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or(DEFAULT_CHAT_MODEL.to_string()),
            coding_model: lookup("CODING_MODEL").unwrap_or(DEFAULT_CODING_MODEL.to_string()),
            bind_addr,
            max_upload_bytes,
        })
    }
}
