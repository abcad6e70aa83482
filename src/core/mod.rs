pub mod controller;
pub mod display;
pub mod fallback;
pub mod format;
pub mod shell;
pub mod slot;

pub use crate::domain::model::{
    ContactSubmission, DashboardSnapshot, EnvironmentalReading, NearBodyRecord, OrbitalPosition,
};
pub use crate::domain::ports::{ConfigProvider, FormTransport, SpaceDataSource};
pub use crate::utils::error::Result;
