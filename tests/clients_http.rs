// tests/clients_http.rs

mod common;
use crate::common::init_tracing;

use std::time::Duration;

use serde_json::json;
use stationwatch::clients::genius::{build_report, similarity, NOT_FOUND_REPORT};
use stationwatch::clients::{
    GeniusSearch, IcecastProbe, LyricsSearch, MetadataPublisher, Notifier, ProbeResult,
    ProfanityList, SlackClient, StreamProbe, TuneInPublisher,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PAGE: &str = r#"
<table>
<tr><td>Stream Name:</td><td class="streamdata">Station FM</td></tr>
<tr><td>Bitrate:</td><td class="streamdata">128</td></tr>
<tr><td>Current Song:</td><td class="streamdata">
    Beat Market __by__ Sun Machine
</td></tr>
</table>
"#;

// ── Slack ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn slack_send_posts_message_with_bearer_token() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(header("authorization", "Bearer xoxb-test"))
        .and(body_partial_json(json!({
            "channel": "C1",
            "text": "hello",
            "username": "BOT",
            "icon_emoji": ":robot_face:"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "ts": "123.4"})))
        .expect(1)
        .mount(&server)
        .await;

    let slack = SlackClient::new(server.uri(), "xoxb-test");
    let delivery = slack.send("C1", "hello", "BOT", ":robot_face:").await;

    assert!(delivery.ok);
    assert_eq!(delivery.detail, "123.4");
}

#[tokio::test]
async fn slack_send_surfaces_api_error() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "channel_not_found"})),
        )
        .mount(&server)
        .await;

    let slack = SlackClient::new(server.uri(), "xoxb-test");
    let delivery = slack.send("nope", "hello", "BOT", ":skull:").await;

    assert!(!delivery.ok);
    assert_eq!(delivery.detail, "channel_not_found");
}

#[tokio::test]
async fn slack_resolves_channel_names() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [
                {"id": "C1", "name": "engineering"},
                {"id": "C2", "name": "nowplaying"}
            ]
        })))
        .mount(&server)
        .await;

    let slack = SlackClient::new(server.uri(), "xoxb-test");

    assert_eq!(slack.list_channels().await.unwrap().len(), 2);
    assert_eq!(slack.resolve_channel_id("#nowplaying").await.as_deref(), Some("C2"));
    assert_eq!(slack.resolve_channel_id("engineering").await.as_deref(), Some("C1"));
    assert_eq!(slack.resolve_channel_id("random").await, None);
}

#[tokio::test]
async fn slack_list_failure_is_an_error() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "invalid_auth"})),
        )
        .mount(&server)
        .await;

    let slack = SlackClient::new(server.uri(), "bad");
    let err = slack.list_channels().await.unwrap_err();
    assert!(err.to_string().contains("invalid_auth"));
    assert_eq!(slack.resolve_channel_id("engineering").await, None);
}

// ── Icecast ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn icecast_probe_reads_last_streamdata_cell() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status.xsl"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_PAGE))
        .mount(&server)
        .await;

    let probe = IcecastProbe::new().unwrap();
    let result = probe
        .probe(&format!("{}/status.xsl", server.uri()), Duration::from_secs(5))
        .await;

    assert_eq!(
        result,
        ProbeResult::Up("#NowPlaying: Beat Market __by__ Sun Machine".to_string())
    );
}

#[tokio::test]
async fn icecast_probe_without_stream_data_is_down() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>no mounts</html>"))
        .mount(&server)
        .await;

    let probe = IcecastProbe::new().unwrap();
    match probe.probe(&server.uri(), Duration::from_secs(5)).await {
        ProbeResult::Down(diag) => assert!(diag.contains("No data read")),
        up => panic!("expected Down, got {up:?}"),
    }
}

#[tokio::test]
async fn icecast_probe_error_status_or_timeout_is_unreachable() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(STATUS_PAGE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let probe = IcecastProbe::new().unwrap();
    for route in ["/broken", "/slow"] {
        match probe
            .probe(&format!("{}{route}", server.uri()), Duration::from_millis(200))
            .await
        {
            ProbeResult::Down(diag) => assert!(diag.contains("failed or timed out")),
            up => panic!("expected Down for {route}, got {up:?}"),
        }
    }
}

// ── TuneIn ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn tunein_publish_sends_metadata_query() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Playing.ashx"))
        .and(query_param("partnerId", "p"))
        .and(query_param("partnerKey", "k"))
        .and(query_param("id", "s1"))
        .and(query_param("title", "Beat Market"))
        .and(query_param("artist", "Sun Machine"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = TuneInPublisher::new(format!("{}/Playing.ashx", server.uri()));
    publisher
        .publish("s1", "p", "k", "Beat Market", "Sun Machine")
        .await;
}

#[tokio::test]
async fn tunein_without_credentials_does_nothing() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let publisher = TuneInPublisher::new(format!("{}/Playing.ashx", server.uri()));
    publisher.publish("", "", "", "Song", "Band").await;
}

// ── Genius ───────────────────────────────────────────────────────────────

fn hit(title: &str, artist: &str, song_path: &str) -> serde_json::Value {
    json!({"result": {"title": title, "path": song_path, "primary_artist": {"name": artist}}})
}

async fn mount_search(server: &MockServer, q: &str, hits: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", q))
        .and(header("authorization", "Bearer genius-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {"hits": hits}})))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, song_path: &str, lyrics_html: &str) {
    Mock::given(method("GET"))
        .and(path(song_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body><div data-lyrics-container=\"true\" class=\"Lyrics\">{lyrics_html}</div></body></html>"
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn genius_flags_profane_lyrics() {
    init_tracing();
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Float On",
        vec![
            hit("Float On", "Somebody Else", "/wrong"),
            hit("Float On", "Modest Mouse", "/modest-mouse-float-on"),
        ],
    )
    .await;
    mount_page(&server, "/modest-mouse-float-on", "I backed my car<br/>into a cop car, darn!").await;

    let genius = GeniusSearch::new(server.uri(), server.uri()).unwrap();
    let profanity = ProfanityList::parse("darn\n");
    let result = genius
        .search("Float On", "Modest Mouse", "genius-token", &profanity)
        .await;

    assert!(!result.clean);
    assert!(result.report.starts_with("Song   Name: Float On\nSong Artist: Modest Mouse\n"));
    assert!(result.report.contains("FAIL Profanity Test #1 Song Contains: darn"));
    assert!(result.report.contains("I backed my car\ninto a cop car, darn!"));
}

#[tokio::test]
async fn genius_falls_back_to_artist_search() {
    init_tracing();
    let server = MockServer::start().await;
    mount_search(&server, "Float On", vec![hit("Float On", "Somebody Else", "/wrong")]).await;
    mount_search(
        &server,
        "Modest Mouse",
        vec![hit("float on", "Modest Mouse", "/found-by-artist")],
    )
    .await;
    mount_page(&server, "/found-by-artist", "Alright already we'll all float on").await;

    let genius = GeniusSearch::new(server.uri(), server.uri()).unwrap();
    let result = genius
        .search("Float On", "Modest Mouse", "genius-token", &ProfanityList::parse("darn"))
        .await;

    assert!(result.clean);
    assert!(result.report.contains("PASS Profanity Test #1"));
}

#[tokio::test]
async fn genius_not_found_is_clean() {
    init_tracing();
    let server = MockServer::start().await;
    mount_search(&server, "Unknown", vec![]).await;
    mount_search(&server, "Nobody", vec![]).await;

    let genius = GeniusSearch::new(server.uri(), server.uri()).unwrap();
    let result = genius
        .search("Unknown", "Nobody", "genius-token", &ProfanityList::default())
        .await;

    assert_eq!(result.report, NOT_FOUND_REPORT);
    assert!(result.clean);

    let no_token = genius
        .search("Unknown", "Nobody", "", &ProfanityList::default())
        .await;
    assert_eq!(no_token.report, NOT_FOUND_REPORT);
}

#[test]
fn similarity_tolerates_partial_names() {
    assert!(similarity("Kendrick Lamar", "Kendrick") > 0.7);
    assert!(similarity("apples", "APPLES") > 0.99);
    assert!(similarity("apples", "oranges") < 0.7);
}

#[test]
fn profanity_matching_strips_punctuation_and_suffixes() {
    let list = ProfanityList::parse("darn\nheck\n");
    assert_eq!(
        list.find("Darn! What the heck, darning socks is darned hard. Heckin' fine."),
        vec!["darn", "heck", "darning", "darned", "heckin'"]
    );
    assert!(list.find("the darnedest").is_empty());

    let report = build_report("Song", "Band", "all good here", &list);
    assert!(report.clean);
}
