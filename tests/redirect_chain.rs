// End-to-end redirect chain tests against local mock servers.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use redirect_chain::{
    get_location_header, get_redirect_chain, no_head_request_domains, run_resolve_with_writer,
    ChainError, Config, DomainPolicy, ErrorType, InfoType, OutputFormat, ProbeSettings,
    ProbeStats, RedirectResolver, TransportFailureMode,
};
use reqwest::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    redirect_chain::initialization::init_redirect_client(&Config::default())
        .expect("client should build")
}

fn resolver() -> RedirectResolver {
    RedirectResolver::new(client(), DomainPolicy::empty())
}

fn url_for(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), p)).expect("mock server URL should parse")
}

async fn redirect(server: &MockServer, from: &str, to: &str) {
    Mock::given(method("HEAD"))
        .and(path(from))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", to))
        .mount(server)
        .await;
}

async fn terminal(server: &MockServer, at: &str) {
    Mock::given(method("HEAD"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// A URL on a local port that refuses connections.
fn closed_port_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("listener has address")
        .port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{port}/")).expect("static URL shape")
}

#[tokio::test]
async fn test_no_redirect_returns_only_start_url() {
    let server = MockServer::start().await;
    terminal(&server, "/").await;

    let start = url_for(&server, "/");
    let chain = resolver()
        .redirect_chain(&start, 20)
        .await
        .expect("resolution should succeed");
    assert_eq!(chain, vec![start]);
}

#[tokio::test]
async fn test_relative_location_keeps_scheme_and_host() {
    let server = MockServer::start().await;
    redirect(&server, "/a", "/b").await;
    redirect(&server, "/b", "/c").await;
    terminal(&server, "/c").await;

    let chain = resolver()
        .redirect_chain(&url_for(&server, "/a"), 20)
        .await
        .expect("resolution should succeed");
    assert_eq!(
        chain,
        vec![
            url_for(&server, "/a"),
            url_for(&server, "/b"),
            url_for(&server, "/c")
        ]
    );
}

#[tokio::test]
async fn test_absolute_location_crosses_servers() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    let target = url_for(&second, "/landing");
    redirect(&first, "/start", target.as_str()).await;
    terminal(&second, "/landing").await;

    let chain = resolver()
        .redirect_chain(&url_for(&first, "/start"), 20)
        .await
        .expect("resolution should succeed");
    assert_eq!(chain, vec![url_for(&first, "/start"), target]);
}

#[tokio::test]
async fn test_redirect_loop_is_truncated_at_max_length() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/loop"))
        .expect(20)
        .mount(&server)
        .await;

    let start = url_for(&server, "/loop");
    let stats = Arc::new(ProbeStats::new());
    let resolved = resolver()
        .with_stats(Arc::clone(&stats))
        .resolve(&start, 20)
        .await
        .expect("truncation is not an error");

    assert_eq!(resolved.urls.len(), 20);
    assert!(resolved.urls.iter().all(|u| *u == start));
    assert!(resolved.truncated);
    assert_eq!(stats.get_info_count(InfoType::ChainTruncated), 1);
    assert_eq!(stats.get_info_count(InfoType::RedirectFollowed), 20);
}

#[tokio::test]
async fn test_max_chain_length_zero_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let resolved = resolver()
        .resolve(&url_for(&server, "/"), 0)
        .await
        .expect("empty chain is not an error");
    assert!(resolved.urls.is_empty());
    assert!(!resolved.truncated);
}

#[tokio::test]
async fn test_max_chain_length_one_returns_start_even_when_redirecting() {
    let server = MockServer::start().await;
    redirect(&server, "/a", "/b").await;

    let start = url_for(&server, "/a");
    let resolved = resolver()
        .resolve(&start, 1)
        .await
        .expect("truncation is not an error");
    assert_eq!(resolved.urls, vec![start]);
    assert!(resolved.truncated);
}

#[tokio::test]
async fn test_client_error_mid_chain_fails_whole_resolution() {
    let server = MockServer::start().await;
    redirect(&server, "/a", "/missing").await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = resolver()
        .redirect_chain(&url_for(&server, "/a"), 20)
        .await
        .expect_err("404 should fail the chain");
    match err {
        ChainError::HttpStatus { url, status } => {
            assert_eq!(url, url_for(&server, "/missing"));
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_relative_location_without_slash_is_invalid() {
    let server = MockServer::start().await;
    redirect(&server, "/a", "next").await;

    let err = resolver()
        .redirect_chain(&url_for(&server, "/a"), 20)
        .await
        .expect_err("bare relative target should fail");
    assert!(matches!(err, ChainError::InvalidLocation { .. }));
}

#[tokio::test]
async fn test_policy_host_never_receives_head() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/file"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/download"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let policy = DomainPolicy::empty();
    policy.insert("127.0.0.1");
    let stats = Arc::new(ProbeStats::new());
    let chain = RedirectResolver::new(client(), policy)
        .with_stats(Arc::clone(&stats))
        .redirect_chain(&url_for(&server, "/file"), 20)
        .await
        .expect("resolution should succeed");

    assert_eq!(
        chain,
        vec![url_for(&server, "/file"), url_for(&server, "/download")]
    );
    assert_eq!(stats.get_info_count(InfoType::HeadProbeSkipped), 2);
}

#[tokio::test]
async fn test_policy_mutation_is_seen_by_existing_resolver() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let policy = DomainPolicy::empty();
    let resolver = RedirectResolver::new(client(), policy.clone());
    let start = url_for(&server, "/");

    resolver
        .redirect_chain(&start, 20)
        .await
        .expect("HEAD probe should succeed");
    policy.insert("127.0.0.1");
    resolver
        .redirect_chain(&start, 20)
        .await
        .expect("GET probe should succeed");
}

#[tokio::test]
async fn test_first_hop_transport_failure_propagates_by_default() {
    let start = closed_port_url();
    let stats = Arc::new(ProbeStats::new());
    let err = resolver()
        .with_stats(Arc::clone(&stats))
        .redirect_chain(&start, 20)
        .await
        .expect_err("refused connection should fail");

    assert!(err.is_transport());
    assert_eq!(err.url(), &start);
    assert_eq!(stats.get_info_count(InfoType::HeadProbeFallback), 1);
    assert_eq!(stats.total_errors(), 1);
    assert_eq!(stats.get_error_count(ErrorType::HttpRequestConnectError), 1);
}

#[tokio::test]
async fn test_first_hop_transport_failure_ends_chain_when_configured() {
    let start = closed_port_url();
    let settings = ProbeSettings {
        transport_failure: TransportFailureMode::EndChain,
        ..ProbeSettings::default()
    };
    let chain = resolver()
        .with_settings(settings)
        .redirect_chain(&start, 20)
        .await
        .expect("transport failure ends the chain");
    assert_eq!(chain, vec![start]);
}

#[tokio::test]
async fn test_slow_head_falls_back_to_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(307).insert_header("Location", "/fast"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ProbeSettings {
        head_timeout: Duration::from_millis(150),
        ..ProbeSettings::default()
    };
    let chain = resolver()
        .with_settings(settings)
        .redirect_chain(&url_for(&server, "/slow"), 20)
        .await
        .expect("GET fallback should succeed");
    assert_eq!(
        chain,
        vec![url_for(&server, "/slow"), url_for(&server, "/fast")]
    );
}

#[tokio::test]
async fn test_global_free_functions() {
    let server = MockServer::start().await;
    redirect(&server, "/a", "/b").await;
    terminal(&server, "/b").await;

    let client = client();
    let location = get_location_header(&client, &url_for(&server, "/a"))
        .await
        .expect("probe should succeed");
    assert_eq!(location.as_deref(), Some("/b"));

    let none = get_location_header(&client, &url_for(&server, "/b"))
        .await
        .expect("probe should succeed");
    assert_eq!(none, None);

    let chain = get_redirect_chain(&client, &url_for(&server, "/a"), 20)
        .await
        .expect("resolution should succeed");
    assert_eq!(chain.first(), Some(&url_for(&server, "/a")));
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_global_table_is_seeded() {
    assert!(no_head_request_domains().contains("mega.nz"));
    assert!(!no_head_request_domains().contains("example.com"));
}

#[tokio::test]
async fn test_run_resolve_reads_file_and_writes_jsonl() {
    let server = MockServer::start().await;
    redirect(&server, "/a", "/b").await;
    terminal(&server, "/b").await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let mut input = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(input, "# sample input").expect("write temp file");
    writeln!(input, "{}", url_for(&server, "/a")).expect("write temp file");
    writeln!(input).expect("write temp file");
    writeln!(input, "{}", url_for(&server, "/gone")).expect("write temp file");
    writeln!(input, "ftp://unsupported.example").expect("write temp file");

    let config = Config {
        file: Some(input.path().to_path_buf()),
        output: OutputFormat::Jsonl,
        max_concurrency: 2,
        ..Default::default()
    };

    let mut out = Vec::new();
    let report = run_resolve_with_writer(config, &mut out)
        .await
        .expect("run should succeed");

    assert_eq!(report.total_urls, 2);
    assert_eq!(report.resolved, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.truncated, 0);

    let text = String::from_utf8(out).expect("output is UTF-8");
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();
    assert_eq!(lines.len(), 2);

    let ok = lines
        .iter()
        .find(|v| v["error"].is_null())
        .expect("one successful record");
    assert_eq!(ok["hops"], 1);
    assert_eq!(ok["final_url"], url_for(&server, "/b").as_str());

    let failed = lines
        .iter()
        .find(|v| !v["error"].is_null())
        .expect("one failed record");
    assert_eq!(failed["url"], url_for(&server, "/gone").as_str());
    assert!(failed["chain"].as_array().is_some_and(|c| c.is_empty()));
}

#[tokio::test]
async fn test_run_resolve_plain_output_with_extra_no_head_domain() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/y"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/y"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = Config {
        urls: vec![url_for(&server, "/x").to_string()],
        no_head_domains: vec!["127.0.0.1".to_string()],
        ..Default::default()
    };

    let mut out = Vec::new();
    let report = run_resolve_with_writer(config, &mut out)
        .await
        .expect("run should succeed");
    assert_eq!(report.resolved, 1);

    let text = String::from_utf8(out).expect("output is UTF-8");
    assert_eq!(
        text.trim_end(),
        format!("{} -> {}", url_for(&server, "/x"), url_for(&server, "/y"))
    );

    // Extra hosts apply to the run only
    assert!(!no_head_request_domains().contains("127.0.0.1"));
}
