//! Integration tests for the forecast cache service
//!
//! These exercise the public service API the way the booking layer uses it:
//! single lookups, batch lookups, expiry over real time, and concurrent
//! callers sharing one instance.

mod common;

use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use common::{ipma_body, spawn_endpoint, CountingProvider, Reply};
use meal_weather::app::{
    CacheConfig, Forecast, ForecastProvider, IpmaProvider, ManualClock, MockProvider,
    WeatherCacheService,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn clocked_service(
    provider: Arc<dyn ForecastProvider>,
    config: CacheConfig,
) -> (WeatherCacheService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(today(), 1_718_000_000_000));
    let service = WeatherCacheService::with_clock(provider, config, clock.clone());
    (service, clock)
}

fn mock_service(ttl: Duration) -> (WeatherCacheService, Arc<ManualClock>) {
    clocked_service(Arc::new(MockProvider::new()), CacheConfig::with_ttl(ttl))
}

#[tokio::test]
async fn test_cold_lookup_then_hit() {
    let (service, _) = mock_service(Duration::from_secs(60));
    let d = today() + chrono::Duration::days(1);

    let first = service.get_forecast(d).await;
    let stats = service.get_statistics().await;
    assert_eq!((stats.hits, stats.misses), (0, 1));

    let second = service.get_forecast(d).await;
    let stats = service.get_statistics().await;
    assert_eq!((stats.hits, stats.misses), (1, 1));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_ttl_expiry_scenario() {
    let (service, clock) = mock_service(Duration::from_millis(100));

    let first = service.get_forecast(today()).await; // miss
    clock.advance(Duration::from_millis(50));
    let second = service.get_forecast(today()).await; // hit
    clock.advance(Duration::from_millis(80));
    let third = service.get_forecast(today()).await; // miss, 130ms > 100ms

    let stats = service.get_statistics().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.ttl_millis, 100);

    // The mock is deterministic per date, so only the classification changed
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_batch_lookup_on_cold_cache() {
    let (service, _) = mock_service(Duration::from_secs(60));
    let dates: HashSet<NaiveDate> = [today(), today() + chrono::Duration::days(1)]
        .into_iter()
        .collect();

    let forecasts = service.get_forecasts(&dates).await;
    assert_eq!(forecasts.len(), 2);
    assert!(dates.iter().all(|d| forecasts.contains_key(d)));

    service.get_forecast(today()).await;

    let stats = service.get_statistics().await;
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.total_entries, 2);
}

#[tokio::test]
async fn test_empty_batch() {
    let (service, _) = mock_service(Duration::from_secs(60));
    assert!(service.get_forecasts(&HashSet::new()).await.is_empty());
    assert_eq!(service.get_statistics().await.total_lookups(), 0);
}

#[tokio::test]
async fn test_statistics_classify_stale_entries() {
    let (service, clock) = mock_service(Duration::from_millis(30));

    service.get_forecast(today()).await;
    clock.advance(Duration::from_millis(60));
    service
        .get_forecast(today() + chrono::Duration::days(1))
        .await;

    let stats = service.get_statistics().await;
    assert_eq!(stats.total_entries, 2);
    assert_eq!(stats.valid_entries, 1);
    assert_eq!(stats.expired_entries, 1);

    // Taking statistics has no side effects
    assert_eq!(service.get_statistics().await, stats);
}

#[tokio::test]
async fn test_long_range_prediction_for_any_provider() {
    let far = today() + chrono::Duration::days(10);

    let (service, _) = mock_service(Duration::from_secs(60));
    assert_eq!(service.get_forecast(far).await, Forecast::long_range_prediction());

    // A live provider pointed at a counting endpoint is never contacted
    let (base_url, connections) = spawn_endpoint(Reply::Status(200, ipma_body(&[]))).await;
    let (live, _) = clocked_service(
        Arc::new(common::ipma_provider(&base_url)),
        CacheConfig::default(),
    );
    assert_eq!(live.get_forecast(far).await, Forecast::long_range_prediction());
    assert_eq!(connections.load(Ordering::SeqCst), 0);
    assert_eq!(live.get_statistics().await.misses, 1);
}

#[tokio::test]
async fn test_live_lookup_is_cached() {
    let d = today() + chrono::Duration::days(1);
    let body = ipma_body(&[(d, "12.0", "19.0", "9", "60.0")]);
    let (base_url, connections) = spawn_endpoint(Reply::Status(200, body)).await;

    let provider: IpmaProvider = common::ipma_provider(&base_url);
    let (service, _) = clocked_service(Arc::new(provider), CacheConfig::default());

    let expected = Forecast::new("Light rain", 12.0, 19.0, "60.0%");
    assert_eq!(service.get_forecast(d).await, expected);
    assert_eq!(service.get_forecast(d).await, expected);

    assert_eq!(connections.load(Ordering::SeqCst), 1);
    assert_eq!(service.provider_name(), "ipma");
}

#[tokio::test]
async fn test_concurrent_lookups_account_for_every_call() {
    let provider = Arc::new(CountingProvider::default());
    let (service, _) = clocked_service(provider.clone(), CacheConfig::default());
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for i in 0..40i64 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let d = today() + chrono::Duration::days(i % 3);
            service.get_forecast(d).await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().description, "Counted");
    }

    let stats = service.get_statistics().await;
    assert_eq!(stats.total_lookups(), 40);
    assert_eq!(stats.total_entries, 3);
    // Misses are not coalesced, so each one reached the provider
    assert_eq!(stats.misses as usize, provider.calls());
    assert!(stats.misses >= 3);
}

#[tokio::test]
async fn test_independent_instances() {
    let (a, _) = mock_service(Duration::from_secs(60));
    let (b, _) = mock_service(Duration::from_secs(60));

    a.get_forecast(today()).await;
    a.get_forecast(today()).await;

    let stats_b = b.get_statistics().await;
    assert_eq!(stats_b.total_lookups(), 0);
    assert_eq!(stats_b.total_entries, 0);
}

#[tokio::test]
async fn test_ttl_beyond_i64_millis_keeps_caching() {
    let provider = Arc::new(CountingProvider::default());
    let (service, clock) = clocked_service(
        provider.clone(),
        CacheConfig::with_ttl(Duration::from_millis(u64::MAX)),
    );
    let d = today() + chrono::Duration::days(1);

    service.get_forecast(d).await;
    clock.advance(Duration::from_secs(10 * 365 * 24 * 3600));
    service.get_forecast(d).await;

    let stats = service.get_statistics().await;
    assert_eq!((stats.hits, stats.misses), (1, 1));
    assert_eq!((stats.valid_entries, stats.expired_entries), (1, 0));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_wall_clock_service_expires_entries() {
    let service = WeatherCacheService::new(
        Arc::new(MockProvider::new()),
        CacheConfig::with_ttl(Duration::from_millis(30)),
    );
    let d = service.today();

    service.get_forecast(d).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    service.get_forecast(d).await;

    let stats = service.get_statistics().await;
    assert_eq!((stats.hits, stats.misses), (0, 2));
}
