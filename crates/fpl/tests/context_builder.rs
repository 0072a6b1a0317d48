//! Integration tests for the squad context builder against a mock FPL API.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fplmate_fpl::{ContextBuilder, ContextOutcome, ContextVariant, FplClient, FplError};

/// Minimal bootstrap catalog: 15 players, one club, one position type.
fn bootstrap_body() -> serde_json::Value {
    let elements: Vec<_> = (1..=15)
        .map(|id| {
            json!({
                "id": id,
                "first_name": "Player",
                "second_name": id.to_string(),
                "team": 1,
                "element_type": 3,
                "form": "4.2",
                "now_cost": 60
            })
        })
        .collect();

    json!({
        "elements": elements,
        "teams": [{"id": 1, "name": "Arsenal"}],
        "element_types": [{"id": 3, "singular_name_short": "MID"}]
    })
}

fn entry_body(current_event: serde_json::Value) -> serde_json::Value {
    json!({
        "current_event": current_event,
        "name": "Test FC",
        "player_first_name": "Ada",
        "player_last_name": "Lovelace",
        "summary_event_points": 55,
        "summary_overall_points": 410,
        "event_transfers_left": 1,
        "leagues": {"classic": [{"name": "Overall", "entry_rank": 120000}]}
    })
}

fn picks_body() -> serde_json::Value {
    let picks: Vec<_> = (1..=15)
        .map(|pos| {
            json!({
                "element": pos,
                "position": pos,
                "is_captain": pos == 1,
                "is_vice_captain": pos == 2
            })
        })
        .collect();

    json!({"picks": picks, "entry_history": {"bank": 15}})
}

async fn mount_bootstrap(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/bootstrap-static/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bootstrap_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn builds_ready_context_with_partitioned_squad() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    Mock::given(method("GET"))
        .and(path("/entry/12345/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_body(json!(7))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/entry/12345/event/7/picks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(picks_body()))
        .mount(&server)
        .await;

    let client = FplClient::new(server.uri());
    let outcome = ContextBuilder::new(&client)
        .build("12345", ContextVariant::Chat)
        .await
        .expect("catalog fetch should succeed");

    let ContextOutcome::Ready(ctx) = outcome else {
        panic!("expected a ready context");
    };
    assert_eq!(ctx.current_gameweek, 7);
    assert_eq!(ctx.starting_eleven.len(), 11);
    assert_eq!(ctx.bench.len(), 4);
    assert!(ctx.starting_eleven[0].ends_with(" [C]"));
    assert!(ctx.starting_eleven[1].ends_with(" [VC]"));
    assert!(ctx.bench[0].ends_with("(B1)"));
    assert!(ctx.bench[3].ends_with("(B4)"));
}

#[tokio::test]
async fn null_current_gameweek_degrades() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    Mock::given(method("GET"))
        .and(path("/entry/12345/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_body(json!(null))))
        .mount(&server)
        .await;

    let client = FplClient::new(server.uri());
    let outcome = ContextBuilder::new(&client)
        .build("12345", ContextVariant::Chat)
        .await
        .expect("catalog fetch should succeed");

    assert!(outcome.is_degraded());
    assert_eq!(
        outcome.render(),
        "FPL Team Context: current gameweek unknown."
    );
    assert_eq!(outcome.current_gameweek(), 1);
}

#[tokio::test]
async fn entry_fetch_failure_degrades_instead_of_failing() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    Mock::given(method("GET"))
        .and(path("/entry/999999999/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail":"Not found."}"#))
        .mount(&server)
        .await;

    let client = FplClient::new(server.uri());
    let outcome = ContextBuilder::new(&client)
        .build("999999999", ContextVariant::Projection)
        .await
        .expect("catalog fetch should succeed");

    assert!(outcome.is_degraded());
    assert!(outcome.render().starts_with("FPL Team Context:"));
}

#[tokio::test]
async fn catalog_fetch_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bootstrap-static/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = FplClient::new(server.uri());
    let result = ContextBuilder::new(&client)
        .build("12345", ContextVariant::Chat)
        .await;

    assert!(matches!(result, Err(FplError::Api { status: 503, .. })));
}

#[tokio::test]
async fn repeated_builds_are_structurally_identical() {
    let server = MockServer::start().await;
    mount_bootstrap(&server).await;
    Mock::given(method("GET"))
        .and(path("/entry/12345/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_body(json!(7))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/entry/12345/event/7/picks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(picks_body()))
        .mount(&server)
        .await;

    let client = FplClient::new(server.uri());
    let builder = ContextBuilder::new(&client);

    let first = builder.build("12345", ContextVariant::Chat).await.unwrap();
    let second = builder.build("12345", ContextVariant::Chat).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.render(), second.render());
}
