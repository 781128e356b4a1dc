//! Integration tests for the steady mock endpoint.

use std::time::{Duration, Instant};
use xdrip_sim::glucose::Reading;
use xdrip_sim::http::SteadyMode;

mod common;

#[tokio::test]
async fn steady_mode_serves_three_spaced_readings() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Steady).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/sgv.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"].to_str().unwrap(),
        "*"
    );

    let readings: Vec<Reading> = res.json().await.unwrap();
    assert_eq!(readings.len(), 3);

    for pair in readings.windows(2) {
        // Newest first, five minutes apart.
        assert_eq!(pair[0].date - pair[1].date, 5 * 60 * 1000);
    }
    for reading in &readings {
        assert!((70..=250).contains(&reading.sgv));
        assert!(reading.trend.is_some());
        assert_eq!(reading.kind.as_deref(), Some("sgv"));
        assert_eq!(reading.device, "MockSensor");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn single_mode_serves_one_reading() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Single).await;
    let client = common::client();

    let readings: Vec<Reading> = client
        .get(format!("http://{addr}/sgv.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(readings.len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn empty_mode_serves_empty_array() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Empty).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/sgv.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "[]");

    shutdown.trigger();
}

#[tokio::test]
async fn error_mode_always_fails() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Error).await;
    let client = common::client();

    for _ in 0..3 {
        let res = client
            .get(format!("http://{addr}/sgv.json"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 500);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn slow_mode_delays_but_succeeds() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Slow).await;
    let client = common::client();

    let started = Instant::now();
    let readings: Vec<Reading> = client
        .get(format!("http://{addr}/sgv.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(4));
    assert_eq!(readings.len(), 3);

    shutdown.trigger();
}

#[tokio::test]
async fn status_json_reports_mode_and_version() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Single).await;
    let client = common::client();

    let status: serde_json::Value = client
        .get(format!("http://{addr}/status.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(status["status"], "ok");
    assert_eq!(status["mode"], "single");
    assert_eq!(status["version"], env!("CARGO_PKG_VERSION"));
    assert!(status["timestamp"].as_i64().unwrap() > 0);

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let (addr, shutdown) = common::start_steady_server(SteadyMode::Steady).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/pebble"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);

    shutdown.trigger();
}
