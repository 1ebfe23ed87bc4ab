use std::env;

use crate::errors::AppError;

const DEFAULT_HOSPITAL_NAME: &str = "City General Hospital";
const DEFAULT_RECEPTION_PHONE: &str = "(555) 123-4567";
const DEFAULT_HOURS: &str = "Our hospital is open 24/7 for emergency services. Regular outpatient services are available Monday-Friday 8:00 AM - 6:00 PM, Saturday 9:00 AM - 4:00 PM.";
const DEFAULT_ADDRESS: &str = "City General Hospital is located at Nh-24 Merrut expressway near honda showroom .Exact Address is plot-96B Metro-pillar-34 Kohat-Enclave Delhi-110009 . We have free parking available and are accessible via public transportation.";

/// Facts about the hospital that the assistant quotes back to patients.
#[derive(Clone, Debug)]
pub struct ClinicProfile {
    pub name: String,
    pub reception_phone: String,
    pub hours: String,
    pub address: String,
}

impl Default for ClinicProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_HOSPITAL_NAME.to_string(),
            reception_phone: DEFAULT_RECEPTION_PHONE.to_string(),
            hours: DEFAULT_HOURS.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub webhook_url: String,
    pub webhook_timeout_secs: Option<u64>,
    pub typing_delay_min_ms: u64,
    pub typing_delay_max_ms: u64,
    pub clinic: ClinicProfile,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let typing_delay_min_ms = parse_var("TYPING_DELAY_MIN_MS").unwrap_or(800);
        let typing_delay_max_ms = parse_var("TYPING_DELAY_MAX_MS")
            .unwrap_or(2000)
            .max(typing_delay_min_ms);

        Self {
            port: parse_var("PORT").unwrap_or(3000),
            webhook_url: env::var("WEBHOOK_URL")
                .or_else(|_| env::var("N8N_URL"))
                .unwrap_or_default(),
            webhook_timeout_secs: parse_var("WEBHOOK_TIMEOUT_SECS"),
            typing_delay_min_ms,
            typing_delay_max_ms,
            clinic: ClinicProfile {
                name: env::var("HOSPITAL_NAME")
                    .unwrap_or_else(|_| DEFAULT_HOSPITAL_NAME.to_string()),
                reception_phone: env::var("RECEPTION_PHONE")
                    .unwrap_or_else(|_| DEFAULT_RECEPTION_PHONE.to_string()),
                hours: env::var("HOSPITAL_HOURS").unwrap_or_else(|_| DEFAULT_HOURS.to_string()),
                address: env::var("HOSPITAL_ADDRESS")
                    .unwrap_or_else(|_| DEFAULT_ADDRESS.to_string()),
            },
        }
    }
}

impl AppConfig {
    /// Startup check: the booking webhook must be a usable absolute URL.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.webhook_url.trim().is_empty() {
            return Err(AppError::Config(
                "WEBHOOK_URL (or N8N_URL) must be set".to_string(),
            ));
        }
        reqwest::Url::parse(&self.webhook_url)
            .map_err(|e| AppError::Config(format!("invalid WEBHOOK_URL: {e}")))?;
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
