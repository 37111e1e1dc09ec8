// src/clients/slack.rs

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{ChannelInfo, Delivery, Notifier};

/// Slack Web API client (`chat.postMessage`, `conversations.list`).
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationsListResponse {
    ok: bool,
    #[serde(default)]
    channels: Vec<SlackChannel>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlackChannel {
    id: String,
    name: String,
}

impl SlackClient {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn send(&self, channel: &str, text: &str, display_name: &str, icon: &str) -> Delivery {
        let body = json!({
            "channel": channel,
            "text": text,
            "username": display_name,
            "icon_emoji": icon,
        });

        let response = match self
            .http
            .post(self.url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(err) => return Delivery::failed(err.to_string()),
        };

        match response.json::<PostMessageResponse>().await {
            Ok(parsed) if parsed.ok => Delivery {
                ok: true,
                detail: parsed.ts.unwrap_or_default(),
            },
            Ok(parsed) => Delivery::failed(parsed.error.unwrap_or_else(|| "unknown_error".into())),
            Err(err) => Delivery::failed(format!("invalid response: {err}")),
        }
    }

    async fn resolve_channel_id(&self, name: &str) -> Option<String> {
        let wanted = name.trim_start_matches('#');
        match self.list_channels().await {
            Ok(channels) => channels.into_iter().find(|c| c.name == wanted).map(|c| c.id),
            Err(err) => {
                warn!(channel = wanted, error = %err, "cannot resolve channel id");
                None
            }
        }
    }

    async fn list_channels(&self) -> Result<Vec<ChannelInfo>> {
        let parsed: ConversationsListResponse = self
            .http
            .get(self.url("conversations.list"))
            .bearer_auth(&self.token)
            .query(&[("limit", "1000"), ("exclude_archived", "true")])
            .send()
            .await
            .context("calling conversations.list")?
            .json()
            .await
            .context("decoding conversations.list response")?;

        if !parsed.ok {
            return Err(anyhow!(
                "conversations.list failed: {}",
                parsed.error.unwrap_or_else(|| "unknown_error".into())
            ));
        }

        debug!(count = parsed.channels.len(), "listed channels");
        Ok(parsed
            .channels
            .into_iter()
            .map(|c| ChannelInfo {
                id: c.id,
                name: c.name,
            })
            .collect())
    }
}
