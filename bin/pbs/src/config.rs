use eyre::{Result, WrapErr};
use pbs_relay_rs::Config as RelayConfig;
use serde::Deserialize;
use std::{fmt, path::Path};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub relay: Option<RelayConfig>,
}

impl Config {
    pub fn from_toml_file<P: AsRef<Path> + fmt::Display + Clone>(path: P) -> Result<Config> {
        tracing::info!("loading config from `{path}`...");

        let config_data = std::fs::read_to_string(path.as_ref())
            .wrap_err_with(|| format!("could not read config from `{path}`"))?;

        toml::from_str(&config_data).wrap_err("could not parse TOML")
    }
}
