use async_trait::async_trait;
use reqwest::Client;
use std::fmt::{self, Debug};
use tracing::debug;

use crate::error::{Error, Result, truncate_body};

pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Delivers a rendered message somewhere.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, text: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    base_url: String,
    http: Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self::with_base_url(bot_token, chat_id, DEFAULT_TELEGRAM_URL)
    }

    pub fn with_base_url(bot_token: String, chat_id: String, base_url: impl Into<String>) -> Self {
        Self {
            bot_token,
            chat_id,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

// The token is a credential; keep it out of logs.
impl Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        const ENDPOINT: &str = "sendMessage";
        let url = format!("{}/bot{}/{}", self.base_url, self.bot_token, ENDPOINT);
        debug!(chat_id = %self.chat_id, bytes = text.len(), "sending Telegram message");

        let res = self
            .http
            .get(&url)
            .query(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(Error::transport(ENDPOINT))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Status {
                endpoint: ENDPOINT,
                status,
                body: truncate_body(&body),
            });
        }

        Ok(())
    }
}

/// Prints the message to stdout instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}
