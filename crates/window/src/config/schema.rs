use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WindowConfig {
    pub window_ms: u64,
    #[serde(default = "default_granularity_ms")]
    pub granularity_ms: u64,
}

impl WindowConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn granularity(&self) -> Duration {
        Duration::from_millis(self.granularity_ms)
    }
}

fn default_granularity_ms() -> u64 {
    1_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let yaml = r#"
window_ms: 10000
granularity_ms: 2000
"#;
        let cfg: WindowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.window(), Duration::from_secs(10));
        assert_eq!(cfg.granularity(), Duration::from_secs(2));
    }

    #[test]
    fn granularity_defaults_to_one_second() {
        let cfg: WindowConfig = serde_yaml::from_str("window_ms: 60000").unwrap();
        assert_eq!(cfg.granularity_ms, 1_000);
    }

    #[test]
    fn window_is_required() {
        assert!(serde_yaml::from_str::<WindowConfig>("granularity_ms: 5").is_err());
    }
}
