use serde::Deserialize;

pub const DEFAULT_MAILGUN_DOMAIN: &str = "sandbox.mailgun.org";

/// Where new-comment notifications go.
///
/// Notifications are skipped while `mailgun_api_key` is unset.
///
/// ```toml
/// [notify]
/// mailgun_domain = "mg.example.org"
/// recipient = "author@example.org"
/// ```
///
/// The key itself is best kept out of files: `PDM_NOTIFY__MAILGUN_API_KEY`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    pub mailgun_domain: String,
    pub mailgun_api_key: Option<String>,
    pub recipient: Option<String>,
    /// Sender display name.
    pub site_name: String,
    /// Used in the message body.
    pub site_title: String,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            mailgun_domain: DEFAULT_MAILGUN_DOMAIN.to_string(),
            mailgun_api_key: None,
            recipient: None,
            site_name: "Diffusion Models".to_string(),
            site_title: "Principles of Diffusion Models".to_string(),
        }
    }
}

impl NotifySettings {
    /// The API key, ignoring blank values.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.mailgun_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
