use anyhow::{Context, Result};
use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

const ENV_ADDR: &str = "GABCGEN_ADDR";
const ENV_TIMEOUT_SECS: &str = "GABCGEN_TIMEOUT_SECS";
const ENV_DICT_DIR: &str = "GABCGEN_DICT_DIR";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub dict_dir: PathBuf,
}

impl ServerConfig {
    /// Defaults, overridden by any non-blank `GABCGEN_*` variable.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply(|key| env::var(key).ok())?;
        Ok(config)
    }

    fn apply(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        let set = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = set(ENV_ADDR) {
            self.addr = value
                .trim()
                .parse()
                .with_context(|| format!("{ENV_ADDR} must be a socket address, got {value:?}"))?;
        }
        if let Some(value) = set(ENV_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {value:?}"))?;
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(value) = set(ENV_DICT_DIR) {
            self.dict_dir = PathBuf::from(value);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            timeout: Duration::from_secs(10),
            dict_dir: PathBuf::from("assets/syllable_databases"),
        }
    }
}
