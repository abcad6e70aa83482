use anyhow::Result;
use astroscope::core::fallback;
use astroscope::utils::validation::Validate;
use astroscope::{DataRefreshController, HttpSpaceDataSource, RefreshSettings, TomlConfig};
use httpmock::prelude::*;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::sync::watch;

fn config_for(server: &MockServer) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[sources]
orbital_endpoint = "{}"
near_body_endpoint = "{}"
near_body_api_key = "INTEGRATION_KEY"

[refresh]
interval_seconds = 1
request_timeout_seconds = 2
"#,
        server.url("/iss-now.json"),
        server.url("/neo/rest/v1/feed")
    );
    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

fn fast_settings() -> RefreshSettings {
    RefreshSettings {
        interval: Duration::from_millis(200),
        near_body_limit: 3,
    }
}

fn neo_object(name: &str, diameter: f64, miss: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "estimated_diameter": {"kilometers": {"estimated_diameter_max": diameter}},
        "close_approach_data": [{"miss_distance": {"kilometers": miss}}]
    })
}

async fn wait_for_revision(rx: &mut watch::Receiver<u64>, revision: u64) -> Result<()> {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|r| *r >= revision)).await??;
    Ok(())
}

#[tokio::test]
async fn test_dashboard_populates_from_live_endpoints() -> Result<()> {
    let server = MockServer::start();

    let iss_mock = server.mock(|when, then| {
        when.method(GET).path("/iss-now.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "message": "success",
                "timestamp": 1721486400,
                "iss_position": {"latitude": "48.8566", "longitude": "2.3522"}
            }));
    });

    let neo_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/neo/rest/v1/feed")
            .query_param("api_key", "INTEGRATION_KEY")
            .query_param_exists("start_date")
            .query_param_exists("end_date");
        then.status(200).json_body(serde_json::json!({
            "element_count": 4,
            "near_earth_objects": {"2024-07-20": [
                neo_object("(2024 AA)", 0.1, "1000000"),
                neo_object("(2024 BB)", 0.2, "2000000"),
                neo_object("(2024 CC)", 0.3, "3000000"),
                neo_object("(2024 DD)", 0.4, "4000000")
            ]}
        }));
    });

    let config = config_for(&server)?;
    config.validate()?;
    let source = HttpSpaceDataSource::new(&config)?;
    let controller = DataRefreshController::new(source, RefreshSettings::from_config(&config));
    let mut rx = controller.subscribe();

    controller.start()?;
    wait_for_revision(&mut rx, 3).await?;
    controller.stop();

    iss_mock.assert();
    neo_mock.assert();

    let position = controller.orbital_position().expect("orbital slot populated");
    assert_eq!(position.latitude, 48.8566);
    assert_eq!(position.longitude, 2.3522);
    assert_eq!(position.observed_at_unix_seconds, 1721486400);

    let names: Vec<String> = controller
        .near_body_records()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, vec!["(2024 AA)", "(2024 BB)", "(2024 CC)"]);
    assert_eq!(
        controller.environmental_reading(),
        Some(fallback::environmental_reading())
    );
    Ok(())
}

#[tokio::test]
async fn test_dashboard_falls_back_when_endpoints_fail() -> Result<()> {
    let server = MockServer::start();

    let iss_mock = server.mock(|when, then| {
        when.method(GET).path("/iss-now.json");
        then.status(500).body("internal error");
    });

    let neo_mock = server.mock(|when, then| {
        when.method(GET).path("/neo/rest/v1/feed");
        then.status(200).json_body(serde_json::json!({"error": "quota exceeded"}));
    });

    let config = config_for(&server)?;
    let source = HttpSpaceDataSource::new(&config)?;
    let controller = DataRefreshController::new(source, RefreshSettings::from_config(&config));
    let mut rx = controller.subscribe();

    controller.start()?;
    wait_for_revision(&mut rx, 3).await?;
    controller.stop();

    assert!(iss_mock.hits() >= 1);
    neo_mock.assert();

    let position = controller.orbital_position().expect("fallback position");
    assert_eq!(position.latitude, 25.4);
    assert_eq!(position.longitude, -45.2);
    assert_eq!(controller.near_body_records(), fallback::near_bodies());
    Ok(())
}

#[tokio::test]
async fn test_only_orbital_endpoint_is_polled() -> Result<()> {
    let server = MockServer::start();

    let iss_mock = server.mock(|when, then| {
        when.method(GET).path("/iss-now.json");
        then.status(200).json_body(serde_json::json!({
            "timestamp": 1,
            "iss_position": {"latitude": "0.0", "longitude": "0.0"}
        }));
    });

    let neo_mock = server.mock(|when, then| {
        when.method(GET).path("/neo/rest/v1/feed");
        then.status(200)
            .json_body(serde_json::json!({"near_earth_objects": {}}));
    });

    let config = config_for(&server)?;
    let source = HttpSpaceDataSource::new(&config)?;
    let controller = DataRefreshController::new(source, fast_settings());

    controller.start()?;
    tokio::time::sleep(Duration::from_millis(750)).await;
    controller.stop();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let polled = iss_mock.hits();
    assert!(polled >= 3, "expected repeated orbital polls, got {}", polled);
    neo_mock.assert_hits(1);
    assert!(controller.near_body_records().is_empty());

    // No new requests once the timer is cancelled.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(iss_mock.hits(), polled);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_from_config_file() -> Result<()> {
    let server = MockServer::start();
    let iss_mock = server.mock(|when, then| {
        when.method(GET).path("/iss-now.json");
        then.status(200).json_body(serde_json::json!({
            "timestamp": 42,
            "iss_position": {"latitude": "-33.8688", "longitude": "151.2093"}
        }));
    });

    let mut temp_file = NamedTempFile::new()?;
    write!(
        temp_file,
        "[sources]\norbital_endpoint = \"{}\"\nnear_body_endpoint = \"{}\"\n",
        server.url("/iss-now.json"),
        server.url("/missing")
    )?;

    let config = TomlConfig::from_file(temp_file.path())?;
    config.validate()?;

    let source = HttpSpaceDataSource::new(&config)?;
    let controller = DataRefreshController::new(source, RefreshSettings::from_config(&config));
    let mut rx = controller.subscribe();

    controller.start()?;
    wait_for_revision(&mut rx, 3).await?;

    iss_mock.assert();
    assert_eq!(controller.orbital_position().map(|p| p.latitude), Some(-33.8688));
    // httpmock answers unmatched paths with 404, so the catalog falls back.
    assert_eq!(controller.near_body_records(), fallback::near_bodies());
    Ok(())
}
