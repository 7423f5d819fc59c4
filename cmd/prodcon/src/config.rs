//! Config file loading and command-line overrides.

use std::fs;

use anyhow::Context;
use clap::{Args, ValueEnum};
use giztoy_prodcon::Config;
use giztoy_slotbuf::SlotOrder;

/// Slot selection policy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Lowest free slot in, lowest occupied slot out
    Positional,
    /// First in, first out
    Fifo,
}

impl From<OrderArg> for SlotOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Positional => SlotOrder::Positional,
            OrderArg::Fifo => SlotOrder::Fifo,
        }
    }
}

/// Flags that override values from the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Number of buffer slots
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Slot selection policy
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Random seed (default: seeded from entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after producing this many items
    #[arg(long)]
    pub items: Option<u64>,

    /// Milliseconds of wall time per delay unit
    #[arg(long)]
    pub time_unit_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(capacity) = self.capacity {
            cfg.capacity = capacity;
        }
        if let Some(order) = self.order {
            cfg.order = order.into();
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.items.is_some() {
            cfg.items = self.items;
        }
        if let Some(ms) = self.time_unit_ms {
            cfg.time_unit_ms = ms;
        }
    }
}

/// Loads the config file, or the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read config {}", path))?;
    let cfg = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path))?;
    Ok(cfg)
}

/// Loads, overrides and validates the run configuration.
pub fn resolve_config(path: Option<&str>, overrides: &Overrides) -> anyhow::Result<Config> {
    let mut cfg = load_config(path)?;
    overrides.apply(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_config("capacity: 8\norder: fifo\nitems: 12\n");
        let cfg = load_config(file.path().to_str()).unwrap();
        assert_eq!(cfg.capacity, 8);
        assert_eq!(cfg.order, SlotOrder::Fifo);
        assert_eq!(cfg.items, Some(12));
    }

    #[test]
    fn test_flags_override_file() {
        let file = write_config("capacity: 8\nseed: 1\ntime_unit_ms: 500\n");
        let overrides = Overrides {
            capacity: Some(2),
            order: Some(OrderArg::Fifo),
            seed: None,
            items: Some(5),
            time_unit_ms: Some(0),
        };
        let cfg = resolve_config(file.path().to_str(), &overrides).unwrap();
        assert_eq!(cfg.capacity, 2);
        assert_eq!(cfg.order, SlotOrder::Fifo);
        assert_eq!(cfg.seed, Some(1));
        assert_eq!(cfg.items, Some(5));
        assert_eq!(cfg.time_unit_ms, 0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let overrides = Overrides {
            capacity: Some(0),
            ..Overrides::default()
        };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some("/nonexistent/prodcon.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("capacity: [not, a, number]\n");
        let err = load_config(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
