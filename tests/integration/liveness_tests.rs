use std::time::Duration;
use sumi_probe::config::{HttpConfig, LivenessConfig};
use sumi_probe::liveness::{broken_links, build_probe_client, check_all, probe_url, ProbeOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(probe_timeout_secs: u64) -> reqwest::Client {
    let liveness = LivenessConfig {
        probe_timeout_secs,
        ..LivenessConfig::default()
    };
    build_probe_client(&HttpConfig::default(), &liveness).expect("Failed to build client")
}

async fn mount_head(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

async fn mount_redirect(server: &MockServer, route: &str, location: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_batch_isolates_failing_probe() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_head(&mock_server, "/one", 200).await;
    mount_head(&mock_server, "/two", 200).await;
    mount_head(&mock_server, "/broken", 500).await;
    mount_head(&mock_server, "/three", 204).await;

    let urls = vec![
        format!("{}/one", base_url),
        format!("{}/two", base_url),
        format!("{}/broken", base_url),
        "http://127.0.0.1:1/refused".to_string(),
        format!("{}/three", base_url),
    ];

    let verdicts = check_all(&client(5), &urls, &ProbeOptions::default()).await;

    assert_eq!(verdicts.len(), urls.len());
    for (verdict, url) in verdicts.iter().zip(&urls) {
        assert_eq!(&verdict.url, url);
    }

    let reachable: Vec<bool> = verdicts.iter().map(|v| v.reachable).collect();
    assert_eq!(reachable, vec![true, true, false, false, true]);

    assert_eq!(verdicts[2].status_code, Some(500));
    assert_eq!(verdicts[3].status_code, None);
    assert!(verdicts[3].failure_reason.is_some());

    assert_eq!(
        broken_links(&verdicts),
        vec![urls[2].clone(), urls[3].clone()]
    );
}

#[tokio::test]
async fn test_duplicate_urls_probed_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/same"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/same", mock_server.uri());
    let verdicts = check_all(
        &client(5),
        &[url.clone(), url.clone(), url],
        &ProbeOptions::default(),
    )
    .await;

    assert_eq!(verdicts.len(), 1);
    assert!(verdicts[0].reachable);
}

#[tokio::test]
async fn test_slow_probe_does_not_hold_back_others() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;
    mount_head(&mock_server, "/fast", 200).await;

    let urls = vec![format!("{}/slow", base_url), format!("{}/fast", base_url)];
    let options = ProbeOptions {
        max_concurrent: 2,
        ..ProbeOptions::default()
    };

    let started = std::time::Instant::now();
    let verdicts = check_all(&client(1), &urls, &options).await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!verdicts[0].reachable);
    assert_eq!(verdicts[0].failure_reason.as_deref(), Some("Request timeout"));
    assert!(verdicts[1].reachable);
}

#[tokio::test]
async fn test_redirects_within_budget_are_followed() {
    let mock_server = MockServer::start().await;

    mount_redirect(&mock_server, "/old", "/middle").await;
    mount_redirect(
        &mock_server,
        "/middle",
        &format!("{}/new", mock_server.uri()),
    )
    .await;
    mount_head(&mock_server, "/new", 200).await;

    let url = format!("{}/old", mock_server.uri());
    let verdict = probe_url(&client(5), &url, &ProbeOptions::default()).await;

    assert!(verdict.reachable);
    assert_eq!(verdict.url, url);
    assert_eq!(verdict.status_code, Some(200));
}

#[tokio::test]
async fn test_redirect_budget() {
    let mock_server = MockServer::start().await;

    // /hop/0 -> /hop/1 -> ... -> /hop/6, which answers 200
    for i in 0..6 {
        let (from, to) = (format!("/hop/{}", i), format!("/hop/{}", i + 1));
        mount_redirect(&mock_server, &from, &to).await;
    }
    mount_head(&mock_server, "/hop/6", 200).await;

    let options = ProbeOptions {
        max_redirects: 5,
        ..ProbeOptions::default()
    };

    // Exactly five hops fits the budget
    let url = format!("{}/hop/1", mock_server.uri());
    let within = probe_url(&client(5), &url, &options).await;
    assert!(within.reachable);

    // Six hops does not
    let url = format!("{}/hop/0", mock_server.uri());
    let beyond = probe_url(&client(5), &url, &options).await;
    assert!(!beyond.reachable);
    assert_eq!(beyond.status_code, Some(301));
    assert!(beyond.failure_reason.unwrap().contains("Too many redirects"));
}

#[tokio::test]
async fn test_redirect_loop_is_unreachable() {
    let mock_server = MockServer::start().await;

    mount_redirect(&mock_server, "/a", "/b").await;
    mount_redirect(&mock_server, "/b", "/a").await;

    let url = format!("{}/a", mock_server.uri());
    let verdict = probe_url(&client(5), &url, &ProbeOptions::default()).await;

    assert!(!verdict.reachable);
    assert!(verdict.failure_reason.unwrap().contains("Redirect loop"));
}

#[tokio::test]
async fn test_head_rejected_falls_back_to_get() {
    let mock_server = MockServer::start().await;

    mount_head(&mock_server, "/no-head", 405).await;
    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/no-head", mock_server.uri());

    let verdict = probe_url(&client(5), &url, &ProbeOptions::default()).await;
    assert!(verdict.reachable);

    let strict = ProbeOptions {
        get_fallback: false,
        ..ProbeOptions::default()
    };
    let verdict = probe_url(&client(5), &url, &strict).await;
    assert!(!verdict.reachable);
    assert_eq!(verdict.status_code, Some(405));
}

#[tokio::test]
async fn test_per_host_limit_still_checks_everything() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(50)))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..6)
        .map(|i| format!("{}/page/{}", mock_server.uri(), i))
        .collect();
    let options = ProbeOptions {
        per_host_limit: Some(1),
        ..ProbeOptions::default()
    };

    let verdicts = check_all(&client(5), &urls, &options).await;

    assert_eq!(verdicts.len(), 6);
    assert!(verdicts.iter().all(|v| v.reachable));
}
