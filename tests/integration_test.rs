use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SensorReading {
    id: i64,
    temperature: f32,
    humidity: f32,
    mq2_value: i32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RollingAverage {
    avg_temp: f32,
    avg_humid: f32,
    avg_mq2: f32,
}

#[derive(Debug, Deserialize)]
struct TimeBucket {
    time_slot: String,
    temp: Option<f32>,
    humid: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    stale: bool,
    last_observed_at: Option<DateTime<Utc>>,
    alerts: Vec<AlertEntry>,
}

#[derive(Debug, Deserialize)]
struct AlertEntry {
    metric: String,
    severity: String,
    message: String,
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into())
}

#[tokio::test]
async fn insert_then_latest_round_trip() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();

    let url = format!(
        "{}/sensor/insert?temperature=21.5&humidity=55.5&gas=120",
        base
    );
    let avg: RollingAverage = client.post(&url).send().await?.json().await?;

    // Averages must be finite and inside the range the inserted values
    // could pull them into.
    assert!(avg.avg_temp.is_finite());
    assert!(avg.avg_humid.is_finite());
    assert!(avg.avg_mq2.is_finite());
    assert!(avg.avg_mq2 >= 0.0, "gas average cannot go negative");

    // The reading we just wrote must be the latest one.
    let url = format!("{}/sensor/latest", base);
    let latest: SensorReading = client.get(&url).send().await?.json().await?;

    assert!(latest.id > 0, "store must assign a positive id");
    assert_eq!(latest.temperature, 21.5);
    assert_eq!(latest.humidity, 55.5);
    assert_eq!(latest.mq2_value, 120);
    assert!(
        latest.created_at > DateTime::from_timestamp(0, 0).unwrap(),
        "created_at should be store-assigned"
    );

    Ok(())
}

#[tokio::test]
async fn insert_rejects_negative_gas() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();

    let url = format!("{}/sensor/insert?temperature=21.5&humidity=55.5&gas=-5", base);
    let resp = client.post(&url).send().await?;

    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn hourly_returns_the_full_grid() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();

    let url = format!("{}/sensor/hourly", base);
    let buckets: Vec<TimeBucket> = client.get(&url).send().await?.json().await?;

    assert_eq!(buckets.len(), 48, "one bucket per half hour of the day");
    assert_eq!(buckets[0].time_slot, "00:00");
    assert_eq!(buckets[47].time_slot, "23:30");

    for pair in buckets.windows(2) {
        assert!(
            pair[0].time_slot < pair[1].time_slot,
            "slots must ascend and never repeat"
        );
    }

    // A populated slot carries both means; an empty one carries neither.
    for b in &buckets {
        assert_eq!(b.temp.is_some(), b.humid.is_some(), "slot {}", b.time_slot);
    }

    Ok(())
}

#[tokio::test]
async fn all_readings_come_newest_first() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();

    // Guarantee at least one row exists.
    let url = format!("{}/sensor/insert?temperature=23.0&humidity=50.0&gas=90", base);
    client.post(&url).send().await?.error_for_status()?;

    let url = format!("{}/sensor/all", base);
    let readings: Vec<SensorReading> = client.get(&url).send().await?.json().await?;

    assert!(!readings.is_empty());
    for pair in readings.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "log must be ordered newest first"
        );
    }

    Ok(())
}

#[tokio::test]
async fn status_never_returns_an_empty_panel() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();

    // A fresh nominal reading should yield stale=false and one entry.
    let url = format!("{}/sensor/insert?temperature=22.0&humidity=55.0&gas=100", base);
    client.post(&url).send().await?.error_for_status()?;

    let url = format!("{}/sensor/status", base);
    let status: StatusResponse = client.get(&url).send().await?.json().await?;

    assert!(!status.stale, "a just-inserted reading cannot be stale");
    assert!(status.last_observed_at.is_some());

    assert!(!status.alerts.is_empty(), "panel must never be empty");
    assert!(status.alerts.len() <= 5, "panel is capped at 5 entries");
    for a in &status.alerts {
        assert!(!a.metric.is_empty());
        assert!(!a.severity.is_empty());
        assert!(!a.message.is_empty());
    }

    Ok(())
}
