use serde::{Deserialize, Serialize};

/// Classification of a single URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "urlClassifications", default)]
    pub classifications: Vec<String>,
    #[serde(rename = "urlClassificationsWithSecurityAlert", default)]
    pub security_alert_classifications: Vec<String>,
}

impl ClassificationResult {
    pub fn classifications_display(&self) -> String {
        self.classifications.join(", ")
    }

    pub fn security_alerts_display(&self) -> String {
        self.security_alert_classifications.join(", ")
    }
}

/// Body of the authentication request.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
    pub timestamp: i64,
}
