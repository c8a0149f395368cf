use chrono::FixedOffset;
use clap::{Parser, ValueEnum};
use reqwest::Url;
use std::time::Duration;

/// Named deployments of the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiTarget {
    Local,
    Staging,
    Production,
}

impl ApiTarget {
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            ApiTarget::Local => "http://localhost:8080",
            ApiTarget::Staging => {
                "https://5lajrqrx7xdj5brkfzsinr7s640wubzo.lambda-url.ap-northeast-1.on.aws"
            }
            ApiTarget::Production => "https://api.s.marty-golf.co",
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Which admin API deployment to talk to
    #[arg(
        long,
        value_name = "API_TARGET",
        env = "MARTY_API_TARGET",
        value_enum,
        default_value_t = ApiTarget::Local
    )]
    pub api_target: ApiTarget,
    /// Explicit admin API base url, wins over --api-target
    #[arg(
        long,
        value_name = "API_BASE_URL",
        env = "MARTY_API_BASE_URL",
        value_parser = crate::args::validation::check_base_url
    )]
    pub api_base_url: Option<Url>,
    /// Address the dashboard listens on
    #[arg(long, value_name = "BIND", env = "MARTY_BIND", default_value = "0.0.0.0:8081")]
    pub bind: String,
    #[arg(
        long,
        value_name = "SECONDS",
        env = "MARTY_REQUEST_TIMEOUT_SECS",
        default_value = "10",
        value_parser = crate::args::validation::check_positive_secs
    )]
    pub request_timeout_secs: u64,
    /// How long an untouched browser view keeps its state
    #[arg(
        long,
        value_name = "SECONDS",
        env = "MARTY_VIEW_IDLE_SECS",
        default_value = "1800",
        value_parser = crate::args::validation::check_positive_secs
    )]
    pub view_idle_secs: u64,
    /// UTC offset play times are shown in, e.g. +09:00
    #[arg(
        long,
        value_name = "OFFSET",
        env = "MARTY_DISPLAY_OFFSET",
        default_value = "+09:00",
        allow_hyphen_values = true,
        value_parser = crate::args::validation::check_utc_offset
    )]
    pub display_offset: FixedOffset,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub api_base_url: Url,
    pub bind: String,
    pub request_timeout: Duration,
    pub view_idle: Duration,
    pub display_offset: FixedOffset,
}
