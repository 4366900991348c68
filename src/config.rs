//! Startup configuration: `width`, `taps`, `seed` and, optionally,
//! `topology`.
//!
//! Configurations are read from JSON.  `taps` and `seed` may be given either as
//! numbers or as strings, so masks can be written the way they are usually
//! quoted:
//!
//! ```
//! use lfsr_rs::config::LfsrConfig;
//!
//! let config = LfsrConfig::from_json(
//!     r#"{ "width": 32, "taps": "0x80200003", "seed": 1 }"#,
//! ).unwrap();
//! let mut core = config.build().unwrap();
//! assert_eq!(core.step(), 0x3);
//! ```

use crate::error::Error;
use crate::lfsr::{maximal_taps, ConfigError, RegisterCore, Topology};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LfsrConfig {
    pub width: u32,
    #[serde(with = "hex_word")]
    pub taps: u64,
    #[serde(with = "hex_word")]
    pub seed: u64,
    #[serde(default)]
    pub topology: Topology,
}

impl LfsrConfig {
    pub fn new(width: u32, taps: u64, seed: u64) -> Self {
        LfsrConfig {
            width,
            taps,
            seed,
            topology: Topology::default(),
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// A maximal-length register of the given width seeded with 1, or `None`
    /// for widths outside `1..=64`.
    pub fn maximal(width: u32, topology: Topology) -> Option<Self> {
        let taps = maximal_taps::<u64>(width, topology)?;
        Some(LfsrConfig::new(width, taps, 1).with_topology(topology))
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: LfsrConfig = serde_json::from_reader(reader)?;
        debug!("loaded {:?} from {}", config, path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Constructs the register, validating every field.
    pub fn build(&self) -> Result<RegisterCore<u64>, ConfigError> {
        RegisterCore::with_topology(
            self.width,
            self.taps,
            self.seed,
            self.topology,
        )
    }
}

/// Parses `0x`-prefixed hex, `0b`-prefixed binary or plain decimal.
/// Underscores are ignored.
pub fn parse_word(text: &str) -> Result<u64, String> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2)
    } else {
        lower.parse()
    };
    parsed.map_err(|err| format!("invalid word {:?}: {}", text, err))
}

mod hex_word {
    use super::parse_word;
    use serde::de;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawWord {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        value: &u64,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<u64, D::Error> {
        match RawWord::deserialize(deserializer)? {
            RawWord::Number(value) => Ok(value),
            RawWord::Text(text) => parse_word(&text).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("0x80200003"), Ok(0x8020_0003));
        assert_eq!(parse_word("0X8020_0003"), Ok(0x8020_0003));
        assert_eq!(parse_word("0b1011_1000"), Ok(0xB8));
        assert_eq!(parse_word(" 255 "), Ok(255));
        assert!(parse_word("0xZZ").is_err());
        assert!(parse_word("").is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "width": 8,
            "taps": 184,
            "seed": "0x01",
            "topology": "galois"
        }"#;
        let config = LfsrConfig::from_json(json).unwrap();
        assert_eq!(
            config,
            LfsrConfig::new(8, 0xB8, 1).with_topology(Topology::Galois)
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let res = LfsrConfig::from_json(
            r#"{"width": 8, "taps": 184, "seed": 1, "polarity": true}"#,
        );
        assert!(res.is_err());
        let res = LfsrConfig::from_json(r#"{"width": 8, "seed": 1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = LfsrConfig::new(32, 0x8020_0003, 1);
        let text = config.to_json().unwrap();
        assert!(text.contains("\"0x80200003\""));
        assert!(text.contains("fibonacci-left"));
        assert_eq!(LfsrConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    // Bad values come back as config errors rather than being patched up.
    fn test_build_validates() {
        assert_eq!(
            LfsrConfig::new(8, 0xB8, 0).build().unwrap_err(),
            ConfigError::ZeroSeed
        );
        assert_eq!(
            LfsrConfig::new(8, 0x100, 1).build().unwrap_err(),
            ConfigError::ZeroTaps
        );
        assert_eq!(
            LfsrConfig::new(70, 0xB8, 1).build().unwrap_err(),
            ConfigError::InvalidWidth { width: 70, max: 64 }
        );
        let core = LfsrConfig::new(8, 0xB8, 1).build().unwrap();
        assert_eq!(core.width(), 8);
    }

    #[test]
    fn test_maximal() {
        let config = LfsrConfig::maximal(32, Topology::FibonacciLeft).unwrap();
        assert_eq!(config.taps, 0xA300_0000);
        assert_eq!(config.seed, 1);
        assert!(LfsrConfig::maximal(0, Topology::Galois).is_none());
        assert!(LfsrConfig::maximal(65, Topology::Galois).is_none());
    }
}
