use serde::{Deserialize, Serialize};

/// `maintenance_mode` value the API uses for "on". Every other value means off.
pub const MAINTENANCE_MODE_ON: i64 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceStatus {
    pub enabled: bool,
    pub version: String,
}

impl MaintenanceStatus {
    #[must_use]
    pub fn from_mode_code(code: Option<i64>, version: Option<String>) -> Self {
        Self {
            enabled: code == Some(MAINTENANCE_MODE_ON),
            version: version.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct StatusPayload {
    #[serde(default)]
    pub common: Option<CommonStatus>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CommonStatus {
    #[serde(default)]
    pub maintenance_mode: Option<serde_json::Value>,
    #[serde(default)]
    pub version: Option<serde_json::Value>,
}

impl From<StatusPayload> for MaintenanceStatus {
    fn from(payload: StatusPayload) -> Self {
        let common = payload.common.unwrap_or_default();
        let code = common.maintenance_mode.as_ref().and_then(serde_json::Value::as_i64);
        let version = common.version.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        Self::from_mode_code(code, version)
    }
}

/// Body of `PUT /api/v1/admin/maintenance`.
#[derive(Debug, Serialize)]
pub struct MaintenanceRequest {
    pub data: bool,
}
