use serde::Deserialize;

/// Response of the backend root endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub models_loaded: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
