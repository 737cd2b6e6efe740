use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub profile_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub retry_max_attempts: u32,
    pub retry_max_age_secs: u64,
    pub export_poll_interval_secs: u64,
    pub export_timeout_secs: u64,
    pub stripe_publishable_key: Option<String>,
    pub whatsapp_phone_number_id: Option<String>,
    pub whatsapp_access_token: Option<String>,
    pub maps_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("profile_dir", &self.profile_dir)
            .field("catalog_path", &self.catalog_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("retry_max_attempts", &self.retry_max_attempts)
            .field("retry_max_age_secs", &self.retry_max_age_secs)
            .field(
                "export_poll_interval_secs",
                &self.export_poll_interval_secs,
            )
            .field("export_timeout_secs", &self.export_timeout_secs)
            .field(
                "stripe_publishable_key",
                &self.stripe_publishable_key.as_ref().map(|_| "[redacted]"),
            )
            .field("whatsapp_phone_number_id", &self.whatsapp_phone_number_id)
            .field(
                "whatsapp_access_token",
                &self.whatsapp_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
