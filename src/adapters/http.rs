use crate::core::{ConfigProvider, NearBodyRecord, OrbitalPosition, SpaceDataSource};
use crate::utils::error::{AstroError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

/// Live `SpaceDataSource` backed by the open-notify and NASA NeoWs APIs.
#[derive(Debug, Clone)]
pub struct HttpSpaceDataSource {
    client: Client,
    orbital_endpoint: String,
    near_body_endpoint: String,
    api_key: String,
}

impl HttpSpaceDataSource {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            orbital_endpoint: config.orbital_endpoint().to_string(),
            near_body_endpoint: config.near_body_endpoint().to_string(),
            api_key: config.near_body_api_key().to_string(),
        })
    }

    async fn get_body(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Response from {}: {}", endpoint, status);

        if !status.is_success() {
            return Err(AstroError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl SpaceDataSource for HttpSpaceDataSource {
    async fn fetch_orbital_position(&self) -> Result<OrbitalPosition> {
        tracing::debug!("Requesting orbital position from {}", self.orbital_endpoint);
        let request = self.client.get(&self.orbital_endpoint);
        let body = self.get_body(request, &self.orbital_endpoint).await?;
        parse_orbital_position(&body)
    }

    async fn fetch_near_bodies(&self, date: NaiveDate) -> Result<Vec<NearBodyRecord>> {
        let day = date.format("%Y-%m-%d").to_string();
        tracing::debug!("Requesting near-earth objects for {} from {}", day, self.near_body_endpoint);

        let request = self.client.get(&self.near_body_endpoint).query(&[
            ("start_date", day.as_str()),
            ("end_date", day.as_str()),
            ("api_key", self.api_key.as_str()),
        ]);
        let body = self.get_body(request, &self.near_body_endpoint).await?;
        parse_near_bodies(&body)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

// Both APIs send some numbers as JSON strings. "NaN" and "inf" parse as f64 but are not data.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => value,
        NumberOrText::Text(text) => text.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!("non-finite number: {}", value)))
    }
}

#[derive(Deserialize)]
struct IssNowPayload {
    iss_position: IssPositionPayload,
    timestamp: i64,
}

#[derive(Deserialize)]
struct IssPositionPayload {
    #[serde(deserialize_with = "lenient_f64")]
    latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    longitude: f64,
}

#[derive(Deserialize)]
struct NeoFeedPayload {
    // serde_json's `preserve_order` keeps the date keys in payload order.
    near_earth_objects: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct NeoObjectPayload {
    name: String,
    estimated_diameter: EstimatedDiameterPayload,
    close_approach_data: Vec<CloseApproachPayload>,
}

#[derive(Deserialize)]
struct EstimatedDiameterPayload {
    kilometers: DiameterRangePayload,
}

#[derive(Deserialize)]
struct DiameterRangePayload {
    #[serde(deserialize_with = "lenient_f64")]
    estimated_diameter_max: f64,
}

#[derive(Deserialize)]
struct CloseApproachPayload {
    miss_distance: MissDistancePayload,
}

#[derive(Deserialize)]
struct MissDistancePayload {
    #[serde(deserialize_with = "lenient_f64")]
    kilometers: f64,
}

pub fn parse_orbital_position(body: &str) -> Result<OrbitalPosition> {
    let payload: IssNowPayload = serde_json::from_str(body)
        .map_err(|e| AstroError::malformed(format!("orbital position: {}", e)))?;

    Ok(OrbitalPosition {
        latitude: payload.iss_position.latitude,
        longitude: payload.iss_position.longitude,
        observed_at_unix_seconds: payload.timestamp,
    })
}

/// Objects listed under the first date key as it appears in the payload, in upstream order.
pub fn parse_near_bodies(body: &str) -> Result<Vec<NearBodyRecord>> {
    let payload: NeoFeedPayload = serde_json::from_str(body)
        .map_err(|e| AstroError::malformed(format!("near-earth object feed: {}", e)))?;

    let Some((day, listed)) = payload.near_earth_objects.into_iter().next() else {
        return Ok(Vec::new());
    };
    let objects: Vec<NeoObjectPayload> = serde_json::from_value(listed)
        .map_err(|e| AstroError::malformed(format!("near-earth objects for {}: {}", day, e)))?;

    objects
        .into_iter()
        .map(|object| -> Result<NearBodyRecord> {
            let approach = object.close_approach_data.into_iter().next().ok_or_else(|| {
                AstroError::malformed(format!("{} has no close approach data", object.name))
            })?;
            Ok(NearBodyRecord {
                name: object.name,
                max_diameter_km: object.estimated_diameter.kilometers.estimated_diameter_max,
                miss_distance_km: approach.miss_distance.kilometers,
            })
        })
        .collect()
}
