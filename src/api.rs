use crate::{
    constants::{CHAT_PATH, FAILURE_FALLBACK},
    errors::{MurmurError, MurmurResult},
    logging::{log_api_call, summarize},
    models::{ApiCallLog, ChatReply, OutboundMessage},
};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;

/// Something that can deliver an outbound message and hand back the reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> MurmurResult<ChatReply>;
}

/// Posts `{"message": ...}` as JSON to `<endpoint>/chat`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Self {
        let url = format!("{}{}", endpoint.trim_end_matches('/'), CHAT_PATH);
        Self {
            client: Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &OutboundMessage) -> MurmurResult<ChatReply> {
        let started = Instant::now();
        let mut call = ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.url.clone(),
            request_summary: summarize(message.text(), 60),
            response_status: None,
            response_time_ms: 0,
        };

        // `.json` also sets Content-Type: application/json
        let sent = self.client.post(&self.url).json(message).send().await;
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                call.response_time_ms = started.elapsed().as_millis();
                log_api_call(&call);
                return Err(MurmurError::Request(e));
            }
        };

        let status = response.status();
        call.response_status = Some(status.as_u16());
        call.response_time_ms = started.elapsed().as_millis();
        log_api_call(&call);

        if !status.is_success() {
            return Err(MurmurError::Http(status));
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)?;
        debug!("API Response: {}", data);
        Ok(ChatReply::from_value(data))
    }
}

/// Runs one exchange and returns the text to show as the bot message.
/// Every failure collapses to the fixed apology.
pub async fn exchange(transport: &dyn ChatTransport, message: &OutboundMessage) -> String {
    match transport.send(message).await {
        Ok(reply) => reply.text(),
        Err(e) => {
            error!("Fetch error: {}", e);
            FAILURE_FALLBACK.to_string()
        }
    }
}
