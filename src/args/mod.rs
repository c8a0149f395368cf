use clap::Parser;
use std::time::Duration;

pub mod types;
pub mod validation;

pub use types::{ApiTarget, Args, CleanArgs};

use crate::api::ApiConfig;

/// Parses the command line (and its environment fallbacks) into resolved settings.
///
/// # Errors
///
/// Will return `Err` if the chosen api preset is not a usable base url
pub fn args_checks() -> Result<CleanArgs, String> {
    CleanArgs::new(Args::parse())
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the chosen api preset is not a usable base url
    pub fn new(args: Args) -> Result<Self, String> {
        let api_base_url = match args.api_base_url {
            Some(url) => url,
            None => validation::check_base_url(args.api_target.base_url())?,
        };
        Ok(CleanArgs {
            api_base_url,
            bind: args.bind,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            view_idle: Duration::from_secs(args.view_idle_secs),
            display_offset: args.display_offset,
        })
    }

    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_base_url.clone(),
            request_timeout: self.request_timeout,
        }
    }
}
