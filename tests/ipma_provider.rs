//! Integration tests for the live IPMA provider
//!
//! Every test talks to a local endpoint; nothing leaves the machine.

mod common;

use chrono::NaiveDate;

use common::{ipma_body, ipma_provider, spawn_endpoint, Reply};
use meal_weather::app::{Forecast, ForecastProvider, MockProvider};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[tokio::test]
async fn test_matching_record_is_parsed() {
    let body = ipma_body(&[
        (date(1), "14.0", "23.5", "3", "10.0"),
        (date(2), "11.2", "17.9", "12", "90.0"),
    ]);
    let (base_url, connections) = spawn_endpoint(Reply::Status(200, body)).await;
    let provider = ipma_provider(&base_url);

    let forecast = provider.fetch(date(2)).await;
    assert_eq!(forecast, Forecast::new("Heavy rain", 11.2, 17.9, "90.0%"));
    assert_eq!(connections.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_temperatures_default_to_zero() {
    let body = ipma_body(&[(date(1), "cold", "", "1", "0.0")]);
    let (base_url, _) = spawn_endpoint(Reply::Status(200, body)).await;

    let forecast = ipma_provider(&base_url).fetch(date(1)).await;
    assert_eq!(forecast.description, "Clear sky");
    assert_eq!(forecast.min_temperature, 0.0);
    assert_eq!(forecast.max_temperature, 0.0);
}

#[tokio::test]
async fn test_missing_record_falls_back_to_mock() {
    let body = ipma_body(&[(date(1), "14.0", "23.5", "3", "10.0")]);
    let (base_url, _) = spawn_endpoint(Reply::Status(200, body)).await;

    let forecast = ipma_provider(&base_url).fetch(date(20)).await;
    assert_eq!(forecast, MockProvider::generate(date(20)));
}

#[tokio::test]
async fn test_response_without_data_falls_back_to_mock() {
    let (base_url, _) =
        spawn_endpoint(Reply::Status(200, r#"{"owner":"IPMA","country":"PT"}"#.to_string())).await;

    let forecast = ipma_provider(&base_url).fetch(date(7)).await;
    assert_eq!(forecast, MockProvider::generate(date(7)));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let (base_url, _) = spawn_endpoint(Reply::Status(500, "{}".to_string())).await;

    let forecast = ipma_provider(&base_url).fetch(date(1)).await;
    assert_eq!(forecast, Forecast::unavailable());
}

#[tokio::test]
async fn test_undecodable_body_is_unavailable() {
    let (base_url, _) = spawn_endpoint(Reply::Status(200, "<html>oops</html>".to_string())).await;

    let forecast = ipma_provider(&base_url).fetch(date(1)).await;
    assert_eq!(forecast, Forecast::unavailable());
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let (base_url, _) = spawn_endpoint(Reply::Hang).await;

    let forecast = ipma_provider(&base_url).fetch(date(1)).await;
    assert_eq!(forecast, Forecast::unavailable());
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let forecast = ipma_provider("http://127.0.0.1:1/daily").fetch(date(1)).await;
    assert_eq!(forecast, Forecast::unavailable());
}

#[tokio::test]
async fn test_request_url_includes_location() {
    let provider = ipma_provider("http://127.0.0.1:1/daily/");
    assert_eq!(provider.url().as_str(), "http://127.0.0.1:1/daily/1010500.json");
}
