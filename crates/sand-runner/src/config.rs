//! Configuration from `SAND_*` environment variables.

use anyhow::{Context, Result};
use sand_core::SimConfig;
use std::str::FromStr;

/// Start from the defaults and override whatever the environment sets.
pub fn load_config() -> Result<SimConfig> {
    load_config_from(|key| std::env::var(key).ok())
}

pub fn load_config_from<F>(lookup: F) -> Result<SimConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = SimConfig::default();

    override_with(&lookup, "SAND_WIDTH", &mut config.world_config.width)?;
    override_with(&lookup, "SAND_HEIGHT", &mut config.world_config.height)?;
    override_with(&lookup, "SAND_RADIUS", &mut config.world_config.radius)?;
    override_with(&lookup, "SAND_SPEED", &mut config.speed)?;
    override_with(&lookup, "SAND_SEED", &mut config.seed)?;
    override_with(&lookup, "SAND_TICKS", &mut config.num_ticks)?;
    override_with(&lookup, "SAND_SNAPSHOT_INTERVAL", &mut config.snapshot_interval)?;

    config.validate().context("invalid simulation configuration")?;
    Ok(config)
}

/// Key script applied before the run starts, e.g. `"uu"` to speed up twice.
pub fn key_script() -> String {
    std::env::var("SAND_KEYS").unwrap_or_default()
}

fn override_with<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an unparsable value {:?}", key, raw))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = load_config_from(lookup_from(&[])).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load_config_from(lookup_from(&[
            ("SAND_WIDTH", "40"),
            ("SAND_HEIGHT", " 30 "),
            ("SAND_SPEED", "100"),
            ("SAND_RADIUS", "2"),
            ("SAND_SEED", "7"),
            ("SAND_TICKS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.world_config.width, 40);
        assert_eq!(config.world_config.height, 30);
        assert_eq!(config.world_config.radius, 2);
        assert_eq!(config.speed, 100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.num_ticks, 250);
    }

    #[test]
    fn test_unparsable_value_is_an_error() {
        let err = load_config_from(lookup_from(&[("SAND_SPEED", "fast")])).unwrap_err();
        assert!(err.to_string().contains("SAND_SPEED"));
    }

    #[test]
    fn test_out_of_range_value_is_an_error() {
        assert!(load_config_from(lookup_from(&[("SAND_SPEED", "150")])).is_err());
        assert!(load_config_from(lookup_from(&[("SAND_WIDTH", "0")])).is_err());
    }
}
