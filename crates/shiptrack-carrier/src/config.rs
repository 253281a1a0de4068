/// Configuration for the carrier-tracking provider.
///
/// The API key is optional on purpose: a deployment without one still
/// serves the tracking endpoint, it just answers with an empty checkpoint
/// list and an explanatory message.
#[derive(Debug, Clone)]
pub struct CarrierConfig {
    /// Provider API key. `None` disables live lookups.
    pub api_key: Option<String>,

    /// Provider API base URL.
    pub base_url: String,
}

impl CarrierConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.trackship.dev/v1";

    /// Create a config with the default provider base URL.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the provider base URL (test servers, regional endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether live lookups can be performed.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().map(str::trim).is_some_and(|k| !k.is_empty())
    }
}
