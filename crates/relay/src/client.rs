use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::json;
use tracing::debug;

use crate::message::ContactMessage;

/// Default submission endpoint of the transactional-email relay.
const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The relay is not configured; reported distinctly from transport
    /// failures so the user can tell a setup problem from a network one.
    #[error("relay is not configured: missing {0}")]
    Config(&'static str),
    #[error("invalid relay endpoint: {0}")]
    Endpoint(String),
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay rejected the message (status {status}): {body}")]
    Status { status: u16, body: String },
}

/// The three identifiers the relay needs, plus the endpoint to post to.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: Url,
}

impl RelayConfig {
    /// Builds a config from optional parts, rejecting any blank identifier.
    pub fn from_parts(
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Result<Self, RelayError> {
        let require = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(RelayError::Config(field))
        };
        Ok(Self {
            service_id: require(service_id, "service id")?,
            template_id: require(template_id, "template id")?,
            public_key: require(public_key, "public key")?,
            endpoint: Url::parse(DEFAULT_ENDPOINT)
                .map_err(|err| RelayError::Endpoint(err.to_string()))?,
        })
    }
}

/// Seam between the form state machine and the network, so the form can be
/// driven by a fake under test.
pub trait Transport {
    fn send(&self, message: &ContactMessage, reply_to: &str) -> Result<(), RelayError>;
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    config: RelayConfig,
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }
}

impl Transport for RelayClient {
    fn send(&self, message: &ContactMessage, reply_to: &str) -> Result<(), RelayError> {
        let payload = json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.public_key,
            "template_params": {
                "from_name": message.name,
                "from_email": message.email,
                "subject": message.subject,
                "message": message.message,
                "reply_to": reply_to,
            },
        });
        debug!(endpoint = %self.config.endpoint, "submitting contact message");
        let response = self
            .http
            .post(self.config.endpoint.clone())
            .json(&payload)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let snippet = body.chars().take(200).collect::<String>();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body: snippet,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_every_identifier() {
        let err = RelayConfig::from_parts(None, Some("tpl".into()), Some("pk".into())).unwrap_err();
        assert!(matches!(err, RelayError::Config("service id")));

        let err = RelayConfig::from_parts(Some("svc".into()), Some("  ".into()), Some("pk".into()))
            .unwrap_err();
        assert!(matches!(err, RelayError::Config("template id")));

        let err =
            RelayConfig::from_parts(Some("svc".into()), Some("tpl".into()), None).unwrap_err();
        assert!(matches!(err, RelayError::Config("public key")));
    }

    #[test]
    fn complete_config_builds() {
        let config = RelayConfig::from_parts(
            Some("svc_123".into()),
            Some("tpl_456".into()),
            Some("pk_789".into()),
        )
        .unwrap();
        assert_eq!(config.service_id, "svc_123");
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn config_errors_read_distinctly() {
        let err = RelayConfig::from_parts(None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "relay is not configured: missing service id"
        );
    }
}
