//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use meal_weather::app::{ClientConfig, Forecast, ForecastProvider, HttpHandler, IpmaProvider};

/// Provider that counts calls and returns a fixed forecast
#[derive(Default)]
pub struct CountingProvider {
    pub calls: AtomicUsize,
}

impl CountingProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch(&self, _date: NaiveDate) -> Forecast {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent lookups can interleave
        tokio::time::sleep(Duration::from_millis(5)).await;
        Forecast::new("Counted", 10.0, 20.0, "50%")
    }
}

/// How the local test endpoint answers each connection
#[derive(Clone)]
pub enum Reply {
    Status(u16, String),
    Hang,
}

/// Start a local HTTP endpoint; returns its base URL and a connection counter
pub async fn spawn_endpoint(reply: Reply) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let counter = connections.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let reply = reply.clone();

            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;

                match reply {
                    Reply::Status(status, body) => {
                        let response = format!(
                            "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    Reply::Hang => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            });
        }
    });

    (format!("http://{}/daily", addr), connections)
}

/// Live provider pointed at `base_url` with short timeouts
pub fn ipma_provider(base_url: &str) -> IpmaProvider {
    let config = ClientConfig {
        request_timeout: Duration::from_millis(300),
        connect_timeout: Duration::from_millis(200),
        pool_idle_timeout: None,
        rate_limit_rps: 100,
    };
    let handler = HttpHandler::new(config.build_http_client().unwrap(), config.rate_limit_rps)
        .unwrap();
    IpmaProvider::new(handler, base_url, "1010500").unwrap()
}

/// IPMA-shaped body with one record per `(date, tMin, tMax, type, precip)`
pub fn ipma_body(records: &[(NaiveDate, &str, &str, &str, &str)]) -> String {
    let data: Vec<serde_json::Value> = records
        .iter()
        .map(|(date, t_min, t_max, weather_type, precip)| {
            serde_json::json!({
                "precipitaProb": precip,
                "tMin": t_min,
                "tMax": t_max,
                "predWindDir": "N",
                "idWeatherType": weather_type,
                "classWindSpeed": 1,
                "longitude": "-8.6538",
                "latitude": "40.6413",
                "forecastDate": date.format("%Y-%m-%d").to_string(),
            })
        })
        .collect();

    serde_json::json!({ "owner": "IPMA", "country": "PT", "data": data }).to_string()
}
