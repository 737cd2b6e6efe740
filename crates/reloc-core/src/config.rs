use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("RELOC_API_BASE_URL")?;

    let env = parse_environment(&or_default("RELOC_ENV", "development"));

    let log_level = or_default("RELOC_LOG_LEVEL", "info");
    let profile_dir = PathBuf::from(or_default("RELOC_PROFILE_DIR", "./.justrelocation"));
    let catalog_path = lookup("RELOC_CATALOG_PATH").ok().map(PathBuf::from);

    let request_timeout_secs = parse_u64("RELOC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("RELOC_USER_AGENT", "justrelocation/0.1 (relocation-directory)");

    let retry_max_attempts = parse_u32("RELOC_RETRY_MAX_ATTEMPTS", "3")?;
    let retry_max_age_secs = parse_u64("RELOC_RETRY_MAX_AGE_SECS", "300")?;

    let export_poll_interval_secs = parse_u64("RELOC_EXPORT_POLL_INTERVAL_SECS", "5")?;
    let export_timeout_secs = parse_u64("RELOC_EXPORT_TIMEOUT_SECS", "600")?;

    let stripe_publishable_key = lookup("STRIPE_PUBLISHABLE_KEY").ok();
    let whatsapp_phone_number_id = lookup("WHATSAPP_PHONE_NUMBER_ID").ok();
    let whatsapp_access_token = lookup("WHATSAPP_ACCESS_TOKEN").ok();
    let maps_api_key = lookup("GOOGLE_MAPS_API_KEY").ok();

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        profile_dir,
        catalog_path,
        request_timeout_secs,
        user_agent,
        retry_max_attempts,
        retry_max_age_secs,
        export_poll_interval_secs,
        export_timeout_secs,
        stripe_publishable_key,
        whatsapp_phone_number_id,
        whatsapp_access_token,
        maps_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
