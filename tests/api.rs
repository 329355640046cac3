//! End-to-end API tests: boot the real service and drive it over HTTP.

use serde_json::{json, Value};

use platform_request_service::processor::options;

mod common;

#[tokio::test]
async fn supplied_fields_echo_back() {
    let (addr, repo, _dir) = common::start_service().await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/requests?latency_ms=0", addr))
        .json(&json!({
            "team": "payments",
            "type": "dashboard",
            "urgency": "high",
            "title": "More dashboards",
            "description": "One can never have enough"
        }))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["team"], "payments");
    assert_eq!(body["type"], "dashboard");
    assert_eq!(body["urgency"], "high");
    assert_eq!(body["time_to_response_ms"], 0);
    assert!(options::RESPONSES.contains(&body["platform_response"].as_str().unwrap()));
    assert!(options::COMMENTS.contains(&body["comment"].as_str().unwrap()));

    let rows = repo.find_by_team("payments").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title.as_deref(), Some("More dashboards"));
    assert_eq!(rows[0].time_to_response_ms, 0);
}

#[tokio::test]
async fn negative_latency_yields_empty_400() {
    let (addr, repo, _dir) = common::start_service().await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/requests?latency_ms=-1", addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn simulated_error_yields_empty_500() {
    let (addr, repo, _dir) = common::start_service().await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/requests?latency_ms=0&error=true", addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 500);
    assert!(res.text().await.unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn no_body_and_no_params_applies_defaults() {
    let (addr, repo, _dir) = common::start_service().await;
    let client = common::client();

    // No latency override: the call takes up to 3.2 seconds.
    let res = client
        .post(format!("http://{}/requests", addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();

    assert!(options::TEAMS.contains(&body["team"].as_str().unwrap()));
    assert!(options::REQUEST_TYPES.contains(&body["type"].as_str().unwrap()));
    assert!(options::URGENCY_LEVELS.contains(&body["urgency"].as_str().unwrap()));

    let latency = body["time_to_response_ms"].as_i64().unwrap();
    assert!((120..=3200).contains(&latency));

    let id = body["id"].as_str().unwrap();
    assert_eq!(id.len(), 8);
    assert!(id.starts_with("rq-"));
    assert!(id[3..].chars().all(|c| c.is_ascii_digit()));

    assert_eq!(repo.count().await.unwrap(), 1);
    let rows = repo.find_by_team(body["team"].as_str().unwrap()).await.unwrap();
    assert_eq!(rows[0].title.as_deref(), Some(options::DEFAULT_TITLE));
    assert_eq!(rows[0].description.as_deref(), Some(options::DEFAULT_DESCRIPTION));
}

#[tokio::test]
async fn malformed_latency_is_a_client_error() {
    let (addr, repo, _dir) = common::start_service().await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/requests?latency_ms=soon", addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 400);
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn probes_always_succeed() {
    let (addr, _repo, _dir) = common::start_service().await;
    let client = common::client();

    let health: Value = client
        .get(format!("http://{}/healthz", addr))
        .send()
        .await
        .expect("service unreachable")
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "ok"}));

    let ready: Value = client
        .get(format!("http://{}/readyz", addr))
        .send()
        .await
        .expect("service unreachable")
        .json()
        .await
        .unwrap();
    assert_eq!(ready, json!({"status": "ready"}));
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let (addr, repo, _dir) = common::start_service().await;
    let client = common::client();

    let post = |team: &'static str| {
        let client = client.clone();
        async move {
            let res = client
                .post(format!("http://{}/requests?latency_ms=0", addr))
                .json(&json!({ "team": team }))
                .send()
                .await
                .expect("service unreachable");
            assert_eq!(res.status(), 200);
            let body: Value = res.json().await.unwrap();
            assert_eq!(body["team"], team);
        }
    };

    tokio::join!(
        post("payments"),
        post("recommendations"),
        post("search"),
        post("devops"),
    );

    assert_eq!(repo.count().await.unwrap(), 4);
    for team in options::TEAMS {
        assert_eq!(repo.count_by_team(team).await.unwrap(), 1);
    }
}

#[tokio::test]
async fn success_emits_counter_and_histogram_samples() {
    // Installs the process-global recorder; the only test that does so.
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("recorder already installed");

    let (addr, _repo, _dir) = common::start_service().await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/requests?latency_ms=0", addr))
        .json(&json!({"team": "payments", "type": "dashboard", "urgency": "low"}))
        .send()
        .await
        .expect("service unreachable");
    assert_eq!(res.status(), 200);

    let rendered = handle.render();
    assert!(rendered.contains("platform_requests_total"));
    assert!(rendered.contains("time_to_initial_response_ms"));
    assert!(rendered.contains("team=\"payments\""));
}
