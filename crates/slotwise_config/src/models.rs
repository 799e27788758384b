// --- File: crates/slotwise_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Scheduling Config ---
// Deployment-level knobs for the availability engine. Per-business policy
// (slot duration, buffers, advance windows) lives on the business record,
// not here.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SchedulingConfig {
    /// IANA time zone the engine evaluates "now" in, e.g. "Europe/Zurich".
    pub time_zone: Option<String>,
    /// Same-day preparation buffer in minutes. Defaults to 30.
    pub preparation_time_minutes: Option<i64>,
    /// Upper bound on the span of a selectable-dates query. Defaults to 92.
    pub max_date_range_days: Option<i64>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub scheduling: Option<SchedulingConfig>,
}
