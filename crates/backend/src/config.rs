use once_cell::sync::Lazy;
use serde::Deserialize;

use libs::util;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_ipv4_address")]
    pub backend_ipv4_address: String,
    #[serde(default = "default_backend_port")]
    pub backend_port: u16,
    #[serde(default = "default_data_file")]
    pub backend_data_file: String,
    #[serde(default = "default_ipv4_address")]
    pub prometheus_ipv4_address: String,
    #[serde(default = "default_prometheus_port")]
    pub prometheus_port: u16,
    #[serde(default = "default_refresh_interval")]
    pub prometheus_refresh_interval: u64,
}

fn default_ipv4_address() -> String {
    "0.0.0.0".to_owned()
}

fn default_backend_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "data/pictures.json".to_owned()
}

fn default_prometheus_port() -> u16 {
    9090
}

fn default_refresh_interval() -> u64 {
    15
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        let mut config = envy::from_env::<Config>()?;

        // the backing file lives next to the installed binary unless given absolutely
        config.backend_data_file = util::resolve_path(&util::install_dir(), &config.backend_data_file)
            .to_string_lossy()
            .into_owned();

        Ok(config)
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env()
        .unwrap_or_else(|err| panic!("Failed to load configuration from env: {:#?}", err))
});
