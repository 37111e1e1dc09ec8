// src/clients/tunein.rs

use async_trait::async_trait;
use tracing::{debug, warn};

use super::MetadataPublisher;

/// TuneIn AIR metadata endpoint (`Playing.ashx`).
#[derive(Debug, Clone)]
pub struct TuneInPublisher {
    http: reqwest::Client,
    api_url: String,
}

impl TuneInPublisher {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl MetadataPublisher for TuneInPublisher {
    async fn publish(
        &self,
        station_id: &str,
        partner_id: &str,
        partner_key: &str,
        title: &str,
        artist: &str,
    ) {
        if station_id.is_empty() || partner_id.is_empty() || partner_key.is_empty() {
            debug!("TuneIn credentials not configured; skipping metadata update");
            return;
        }

        let mut query = vec![
            ("partnerId", partner_id),
            ("partnerKey", partner_key),
            ("id", station_id),
            ("title", title),
        ];
        if !artist.is_empty() {
            query.push(("artist", artist));
        }

        let result = self
            .http
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        match result {
            Ok(_) => debug!(title, artist, "published metadata to TuneIn"),
            Err(err) => warn!(title, artist, error = %err, "TuneIn metadata update failed"),
        }
    }
}
