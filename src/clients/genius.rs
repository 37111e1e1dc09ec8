// src/clients/genius.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use similar::TextDiff;
use tracing::{debug, info, warn};

use super::{LyricsReport, LyricsSearch, ProfanityList};

/// Report text used when no lyrics could be located.
pub const NOT_FOUND_REPORT: &str = "Song Lyrics Not Found";

/// Minimum similarity for a search hit to count as the same song.
pub const MATCH_THRESHOLD: f32 = 0.7;

/// Character-diff similarity in `0.0..=1.0`, case-insensitive.
pub fn similarity(a: &str, b: &str) -> f32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    TextDiff::from_chars(a.as_str(), b.as_str()).ratio()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    result: SongHit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongHit {
    pub title: String,
    pub path: String,
    pub primary_artist: ArtistHit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistHit {
    pub name: String,
}

/// Genius lyrics lookup: API search, then a scrape of the song page.
#[derive(Debug, Clone)]
pub struct GeniusSearch {
    http: reqwest::Client,
    api_base: String,
    web_base: String,
    container: Regex,
    line_break: Regex,
    tag: Regex,
}

impl GeniusSearch {
    pub fn new(api_base: impl Into<String>, web_base: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            web_base: web_base.into().trim_end_matches('/').to_string(),
            container: Regex::new(r#"(?s)<div[^>]*data-lyrics-container="true"[^>]*>(.*?)</div>"#)?,
            line_break: Regex::new(r"(?i)<br\s*/?>")?,
            tag: Regex::new(r"<[^>]+>")?,
        })
    }

    async fn search_hits(&self, query: &str, token: &str) -> Result<Vec<SongHit>> {
        let parsed: SearchResponse = self
            .http
            .get(format!("{}/search", self.api_base))
            .bearer_auth(token)
            .query(&[("q", query)])
            .send()
            .await
            .context("calling Genius search")?
            .error_for_status()
            .context("Genius search status")?
            .json()
            .await
            .context("decoding Genius search response")?;

        Ok(parsed.response.hits.into_iter().map(|h| h.result).collect())
    }

    /// Search by title and check the artist, then by artist and check the
    /// title.
    pub async fn find_song(&self, title: &str, artist: &str, token: &str) -> Result<Option<SongHit>> {
        let by_title = self.search_hits(title, token).await?;
        if let Some(hit) = by_title
            .into_iter()
            .find(|h| similarity(&h.primary_artist.name, artist) >= MATCH_THRESHOLD)
        {
            return Ok(Some(hit));
        }

        if artist.is_empty() {
            return Ok(None);
        }

        let by_artist = self.search_hits(artist, token).await?;
        Ok(by_artist
            .into_iter()
            .find(|h| similarity(&h.title, title) >= MATCH_THRESHOLD))
    }

    async fn fetch_lyrics(&self, path: &str) -> Result<String> {
        let html = self
            .http
            .get(format!("{}{}", self.web_base, path))
            .send()
            .await
            .context("fetching lyrics page")?
            .error_for_status()
            .context("lyrics page status")?
            .text()
            .await
            .context("reading lyrics page")?;

        Ok(self.extract_lyrics(&html))
    }

    /// Plain-text lyrics from a song page. Empty if no container is found.
    pub fn extract_lyrics(&self, html: &str) -> String {
        let mut out = String::new();
        for cap in self.container.captures_iter(html) {
            let Some(inner) = cap.get(1) else { continue };
            let text = self.line_break.replace_all(inner.as_str(), "\n");
            let text = self.tag.replace_all(&text, "");
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&decode_entities(&text));
        }
        out
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Build the report text and cleanliness verdict for a song's lyrics.
pub fn build_report(title: &str, artist: &str, lyrics: &str, profanity: &ProfanityList) -> LyricsReport {
    let found = profanity.find(lyrics);
    let clean = found.is_empty();

    let verdict = if clean {
        "PASS Profanity Test #1".to_string()
    } else {
        format!("FAIL Profanity Test #1 Song Contains: {}", found.join(", "))
    };

    let report = format!(
        "Song   Name: {title}\nSong Artist: {artist}\n\n{verdict}\n\n\nSong Lyrics: {lyrics}"
    );

    LyricsReport { report, clean }
}

fn not_found() -> LyricsReport {
    LyricsReport {
        report: NOT_FOUND_REPORT.to_string(),
        clean: true,
    }
}

#[async_trait]
impl LyricsSearch for GeniusSearch {
    async fn search(
        &self,
        title: &str,
        artist: &str,
        auth_token: &str,
        profanity: &ProfanityList,
    ) -> LyricsReport {
        if auth_token.is_empty() {
            warn!("no Genius token configured; skipping lyrics lookup");
            return not_found();
        }

        let hit = match self.find_song(title, artist, auth_token).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                info!(title, artist, "no matching song on Genius");
                return not_found();
            }
            Err(err) => {
                warn!(title, artist, error = %err, "Genius search failed");
                return not_found();
            }
        };

        debug!(path = %hit.path, "matched Genius song");
        match self.fetch_lyrics(&hit.path).await {
            Ok(lyrics) if !lyrics.trim().is_empty() => build_report(title, artist, &lyrics, profanity),
            Ok(_) => {
                info!(path = %hit.path, "song page has no lyrics");
                not_found()
            }
            Err(err) => {
                warn!(path = %hit.path, error = %err, "lyrics fetch failed");
                not_found()
            }
        }
    }
}
