//! End-to-end crawl tests
//!
//! Each test mounts listing and city pages on a mock server, points the
//! crawler's origin at it, and checks the aggregated outcome and CSV files.

use locator_sweep::config::Config;
use locator_sweep::crawler::{run_crawl, walk, Coordinator, Extractor, FailureLevel};
use locator_sweep::model::{StateKey, ALL_STATE_CODES};
use locator_sweep::output::Progress;
use locator_sweep::CrawlError;

use crate::log_capture::CapturedLogs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `states` from `origin`
fn create_test_config(origin: &str, states: &[&str], output_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.origin = origin.to_string();
    config.site.states = states
        .iter()
        .map(|code| code.parse::<StateKey>().expect("valid state code"))
        .collect();
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.output.directory = output_dir.path().join("out").display().to_string();
    config
}

/// A state listing page with one row per `(href, data-count, name)`
fn listing_page(rows: &[(&str, &str, &str)]) -> String {
    let items: String = rows
        .iter()
        .map(|(href, count, name)| {
            format!(
                r#"<li class="Directory-listItem">
                    <a class="Directory-listLink" href="{}" data-count="{}">
                        <span class="Directory-listLinkText">{}</span>
                    </a>
                </li>"#,
                href, count, name
            )
        })
        .collect();

    format!(
        r#"<html><body><div class="Directory-content"><ul>{}</ul></div></body></html>"#,
        items
    )
}

/// A detail-format block with coordinates and metadata
fn detail_block(street: &str, city: &str, state: &str, latitude: &str, longitude: &str) -> String {
    format!(
        r#"<div class="Core-address">
            <meta itemprop="latitude" content="{latitude}">
            <meta itemprop="longitude" content="{longitude}">
            <address class="c-address">
                <meta itemprop="streetAddress" content="{street}">
                <meta itemprop="addressLocality" content="{city}">
                <abbr class="c-address-state">{state}</abbr>
                <span class="c-address-postal-code">02108</span>
                <abbr class="c-address-country-name">US</abbr>
            </address>
        </div>"#
    )
}

/// A teaser-format card without coordinates
fn teaser_card(geo: &str, street: &str, city: &str, state: &str) -> String {
    format!(
        r#"<li class="Directory-listTeaser">
            <a class="Teaser-titleLink">
                <span class="LocationName-brand">KFC</span>
                <span class="LocationName-geo">{geo}</span>
            </a>
            <address class="c-address">
                <span class="c-address-street-1">{street}</span>
                <span class="c-address-city">{city}</span>
                <abbr class="c-address-state">{state}</abbr>
            </address>
        </li>"#
    )
}

fn page(body: &str) -> String {
    format!("<html><body>{}</body></html>", body)
}

async fn mount_page(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_declared_count_mismatch_keeps_extracted_rows() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/ma",
        200,
        listing_page(&[("ma/boston", "(3)", "Boston")]),
    )
    .await;

    mount_page(
        &mock_server,
        "/ma/boston",
        200,
        page(&format!(
            "{}{}",
            detail_block("1 Tremont St", "Boston", "MA", "42.1234", "-71.0589"),
            detail_block("2 Beacon St", "Boston", "MA", "42.3601", "-71.0620"),
        )),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &["ma"], &output_dir);
    let (logs, _guard) = CapturedLogs::install();
    let outcome = run_crawl(config, Progress::silent())
        .await
        .expect("crawl should complete");

    let mismatch_warnings: Vec<String> = logs
        .warnings()
        .into_iter()
        .filter(|line| line.contains("/ma/boston"))
        .collect();
    assert_eq!(mismatch_warnings.len(), 1);
    assert!(mismatch_warnings[0].contains("Expected 3"));
    assert!(mismatch_warnings[0].contains("got 2"));

    assert_eq!(outcome.cities.len(), 1);
    assert_eq!(outcome.cities[0].declared_count, 3);
    assert_eq!(
        outcome.cities[0].url,
        format!("{}/ma/boston", mock_server.uri())
    );

    assert_eq!(outcome.locations.len(), 2);
    assert_eq!(outcome.mismatches.len(), 1);
    assert_eq!(outcome.mismatches[0].declared, 3);
    assert_eq!(outcome.mismatches[0].actual, 2);
    assert!(outcome.failures.is_empty());

    let locations =
        std::fs::read_to_string(output_dir.path().join("out/locations.csv")).unwrap();
    let lines: Vec<&str> = locations.lines().collect();
    assert_eq!(
        lines[0],
        "name,address,city,state,zip_code,country,latitude,longitude"
    );
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "1 Tremont St,1 Tremont St,Boston,MA,02108,US,42.12340000,-71.05890000"
    );
    assert!(lines[2].starts_with("2 Beacon St,2 Beacon St,Boston,MA"));

    let cities = std::fs::read_to_string(output_dir.path().join("out/cities.csv")).unwrap();
    assert_eq!(
        cities,
        format!(
            "place_name,state_code,data_count,url\nBoston,MA,3,{}/ma/boston\n",
            mock_server.uri()
        )
    );
}

#[tokio::test]
async fn test_one_failing_state_does_not_affect_the_others() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    for code in ALL_STATE_CODES {
        if code == "ri" {
            mount_page(&mock_server, "/ri", 500, "Internal Server Error".to_string()).await;
            continue;
        }

        let href = format!("{}/springfield", code);
        mount_page(
            &mock_server,
            &format!("/{}", code),
            200,
            listing_page(&[(href.as_str(), "(1)", "Springfield")]),
        )
        .await;

        mount_page(
            &mock_server,
            &format!("/{}", href),
            200,
            page(&teaser_card(
                "Springfield",
                "100 Main St",
                "Springfield",
                &code.to_uppercase(),
            )),
        )
        .await;
    }

    let config = create_test_config(&mock_server.uri(), &ALL_STATE_CODES, &output_dir);
    let outcome = run_crawl(config, Progress::silent())
        .await
        .expect("crawl should complete");

    assert_eq!(outcome.cities.len(), 47);
    assert!(outcome.cities.iter().all(|c| c.state.as_str() != "ri"));
    assert_eq!(outcome.locations.len(), 47);
    assert!(outcome.locations.iter().all(|l| l.state != "RI"));
    assert!(outcome.mismatches.is_empty());

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].level, FailureLevel::State);
    assert_eq!(outcome.failures[0].state.as_str(), "ri");

    assert_eq!(outcome.stats.states_attempted, 48);
    assert_eq!(outcome.stats.states_failed, 1);

    // Output is sorted by state code regardless of completion order
    let codes: Vec<&str> = outcome.cities.iter().map(|c| c.state.as_str()).collect();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
}

#[tokio::test]
async fn test_failing_city_is_skipped() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/ct",
        200,
        listing_page(&[
            ("ct/hartford", "(1)", "Hartford"),
            ("ct/gone", "(4)", "Gone"),
            ("ct/mystic", "(1)", "Mystic"),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/ct/hartford",
        200,
        page(&teaser_card("Downtown", "5 Asylum St", "Hartford", "CT")),
    )
    .await;
    mount_page(&mock_server, "/ct/gone", 404, "Not Found".to_string()).await;
    mount_page(
        &mock_server,
        "/ct/mystic",
        200,
        page(&teaser_card("Harbor", "9 Water St", "Mystic", "CT")),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &["ct"], &output_dir);
    let outcome = run_crawl(config, Progress::silent()).await.unwrap();

    assert_eq!(outcome.cities.len(), 3);
    assert_eq!(outcome.locations.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].level, FailureLevel::City);
    assert!(outcome.failures[0].url.ends_with("/ct/gone"));
    assert_eq!(outcome.stats.cities_failed, 1);

    // The failed city is not reconciled
    assert!(outcome.mismatches.is_empty());
}

#[tokio::test]
async fn test_teaser_rows_have_empty_coordinates() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/vt",
        200,
        listing_page(&[("vt/burlington", "(1)", "Burlington")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/vt/burlington",
        200,
        page(&teaser_card("Church St", "12 Church St", "Burlington", "VT")),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &["vt"], &output_dir);
    run_crawl(config, Progress::silent()).await.unwrap();

    let locations =
        std::fs::read_to_string(output_dir.path().join("out/locations.csv")).unwrap();
    let lines: Vec<&str> = locations.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "KFC Church St,12 Church St,Burlington,VT,,,,");
}

#[tokio::test]
async fn test_max_cities_per_state_takes_first_in_document_order() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/me",
        200,
        listing_page(&[
            ("me/portland", "(1)", "Portland"),
            ("me/bangor", "(1)", "Bangor"),
            ("me/augusta", "(1)", "Augusta"),
        ]),
    )
    .await;
    for (route, street) in [("/me/portland", "1 Congress St"), ("/me/bangor", "2 Main St")] {
        mount_page(
            &mock_server,
            route,
            200,
            page(&teaser_card("Center", street, "Somewhere", "ME")),
        )
        .await;
    }

    let mut config = create_test_config(&mock_server.uri(), &["me"], &output_dir);
    config.crawler.max_cities_per_state = Some(2);

    let outcome = run_crawl(config, Progress::silent()).await.unwrap();

    let names: Vec<&str> = outcome.cities.iter().map(|c| c.place_name.as_str()).collect();
    assert_eq!(names, vec!["Bangor", "Portland"]);
    assert_eq!(outcome.locations.len(), 2);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn test_walk_fails_on_server_error() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/ri", 500, "boom".to_string()).await;

    let client = reqwest::Client::new();
    let url = format!("{}/ri", mock_server.uri());
    let result = walk(&client, &url, "ri".parse().unwrap(), &mock_server.uri()).await;

    match result {
        Err(CrawlError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reextraction_is_identical() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/ma/boston",
        200,
        page(&detail_block("1 Tremont St", "Boston", "MA", "42.1234", "-71.0589")),
    )
    .await;

    let client = reqwest::Client::new();
    let extractor = Extractor::default();
    let url = format!("{}/ma/boston", mock_server.uri());

    let first = extractor.extract(&client, &url).await.unwrap();
    let second = extractor.extract(&client, &url).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(first[0].latitude, Some(42.1234));
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/wy", 200, listing_page(&[])).await;

    let blocker = output_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut config = create_test_config(&mock_server.uri(), &["wy"], &output_dir);
    config.output.directory = blocker.join("out").display().to_string();

    let err = run_crawl(config, Progress::silent()).await.unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, CrawlError::Output(_)));
}

#[tokio::test]
async fn test_coordinator_runs_without_writing() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/nh",
        200,
        listing_page(&[("nh/concord", "(oops)", "Concord")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/nh/concord",
        200,
        page("<p>No locations listed</p>"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &["nh"], &output_dir);
    let coordinator = Coordinator::new(&config, Progress::silent()).unwrap();
    let (logs, _guard) = CapturedLogs::install();
    let outcome = coordinator.run().await;

    let warnings = logs.warnings();
    assert!(warnings
        .iter()
        .any(|line| line.contains("'(oops)'") && line.contains("nh/concord")));

    // Unparsable count defaults to 0, which matches the empty page
    assert_eq!(outcome.cities.len(), 1);
    assert_eq!(outcome.cities[0].declared_count, 0);
    assert!(outcome.locations.is_empty());
    assert!(outcome.mismatches.is_empty());
    assert!(!output_dir.path().join("out").exists());
}
