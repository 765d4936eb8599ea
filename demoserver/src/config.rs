use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Seed for the demo generators; a fixed seed makes every endpoint
    /// reproducible across restarts.
    pub seed: u64,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_history_entries")]
    pub history_entries: usize,
}

fn default_port() -> u16 {
    9000
}

fn default_history_entries() -> usize {
    shieldcore::mock::DEMO_HISTORY_ENTRIES
}

impl DemoConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading demo config {}", path_ref.display()))?;
        let config: DemoConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing demo config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(seed: u64, port: u16) -> Self {
        Self {
            seed,
            port,
            history_entries: default_history_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_uses_spec_history_size() {
        let config = DemoConfig::from_args(3, 9100);
        assert_eq!(config.history_entries, 25);
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"seed: 11\nport: 9050\nhistory_entries: 40\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = DemoConfig::load(&path).unwrap();
        assert_eq!(config.seed, 11);
        assert_eq!(config.history_entries, 40);
    }

    #[test]
    fn config_load_defaults_optional_fields() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"seed: 2\n").unwrap();
        let path = temp.into_temp_path();
        let config = DemoConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.history_entries, 25);
    }
}
