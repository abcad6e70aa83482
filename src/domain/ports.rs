use crate::domain::model::{ContactSubmission, NearBodyRecord, OrbitalPosition};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn orbital_endpoint(&self) -> &str;
    fn near_body_endpoint(&self) -> &str;
    fn near_body_api_key(&self) -> &str;
    fn refresh_interval(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn near_body_limit(&self) -> usize;
}

/// Upstream APIs feeding the network-backed slots.
#[async_trait]
pub trait SpaceDataSource: Send + Sync {
    async fn fetch_orbital_position(&self) -> Result<OrbitalPosition>;

    /// Objects passing near Earth on `date`, in upstream order.
    async fn fetch_near_bodies(&self, date: NaiveDate) -> Result<Vec<NearBodyRecord>>;
}

/// Destination for contact form submissions.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<()>;
}
