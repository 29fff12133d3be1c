use {
    crate::error::{Result, TrapError},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// Percent change at or above which the trap fires.
pub const DEFAULT_THRESHOLD_PCT: u64 = 2;

/// Current configuration schema version.
pub const CONFIG_VERSION: u32 = 1;

/// Size of one encoded word, in bytes.
pub const WORD_SIZE: usize = 32;

/// On-wire shape of an encoded [`Sample`](crate::sample::Sample).
///
/// Producer and consumer of `collect()` output must agree on the layout;
/// a buffer in one layout never decodes in the other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SampleLayout {
    /// One word: `abi.encode(uint256 value)`.
    #[default]
    Value,
    /// Two words: `abi.encode(uint256 value, uint256 threshold)`.
    ValueWithThreshold,
}

impl SampleLayout {
    /// Number of words a sample occupies in this layout.
    #[inline]
    pub const fn word_count(&self) -> usize {
        match self {
            SampleLayout::Value => 1,
            SampleLayout::ValueWithThreshold => 2,
        }
    }

    /// Exact byte length of an encoded sample in this layout.
    #[inline]
    pub const fn encoded_len(&self) -> usize {
        self.word_count().saturating_mul(WORD_SIZE)
    }
}

impl fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleLayout::Value => write!(f, "value"),
            SampleLayout::ValueWithThreshold => write!(f, "value-with-threshold"),
        }
    }
}

impl FromStr for SampleLayout {
    type Err = TrapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "value" => Ok(SampleLayout::Value),
            "value-with-threshold" => Ok(SampleLayout::ValueWithThreshold),
            other => Err(TrapError::InvalidConfig {
                reason: format!("unknown sample layout {other:?}"),
            }),
        }
    }
}

/// Deployment configuration for a base-fee trap.
///
/// The threshold is fixed for the lifetime of a deployment and injected at
/// construction; the decision rule never reads a hidden literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(default)]
pub struct TrapConfig {
    /// Schema version of this configuration. Must be non-zero.
    pub version: u32,

    /// Percent change (truncated) at or above which the trap fires.
    /// 0 fires on every sample pair with a non-zero baseline.
    pub threshold_pct: u64,

    /// Wire layout shared by `collect()` and `should_respond()`.
    pub layout: SampleLayout,
}

impl TrapConfig {
    /// Config with the given threshold and defaults elsewhere.
    pub fn with_threshold(threshold_pct: u64) -> Self {
        Self {
            threshold_pct,
            ..Self::default()
        }
    }

    /// Validate that the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.version == 0 {
            return Err(TrapError::InvalidConfig {
                reason: "version must be > 0".to_string(),
            });
        }
        if self.version > CONFIG_VERSION {
            return Err(TrapError::InvalidConfig {
                reason: format!(
                    "version {} is newer than supported version {}",
                    self.version, CONFIG_VERSION
                ),
            });
        }
        Ok(())
    }
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            layout: SampleLayout::Value,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[test]
    fn test_default_config() {
        let cfg = TrapConfig::default();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.threshold_pct, 2);
        assert_eq!(cfg.layout, SampleLayout::Value);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(SampleLayout::Value.encoded_len(), 32);
        assert_eq!(SampleLayout::ValueWithThreshold.encoded_len(), 64);
        assert_eq!(SampleLayout::ValueWithThreshold.word_count(), 2);
    }

    #[test]
    fn test_validate_rejects_zero_version() {
        let cfg = TrapConfig {
            version: 0,
            ..Default::default()
        };
        assert_matches!(cfg.validate(), Err(TrapError::InvalidConfig { .. }));
    }

    #[test]
    fn test_validate_rejects_future_version() {
        let cfg = TrapConfig {
            version: CONFIG_VERSION.saturating_add(1),
            ..Default::default()
        };
        assert_matches!(cfg.validate(), Err(TrapError::InvalidConfig { .. }));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("value".parse::<SampleLayout>().unwrap(), SampleLayout::Value);
        assert_eq!(
            "value-with-threshold".parse::<SampleLayout>().unwrap(),
            SampleLayout::ValueWithThreshold
        );
        assert_matches!(
            "words".parse::<SampleLayout>(),
            Err(TrapError::InvalidConfig { .. })
        );
        assert_eq!(SampleLayout::ValueWithThreshold.to_string(), "value-with-threshold");
    }

    #[test]
    fn test_serde_partial_config_uses_defaults() {
        let cfg: TrapConfig = serde_json::from_str(r#"{"threshold_pct": 5}"#).unwrap();
        assert_eq!(cfg.threshold_pct, 5);
        assert_eq!(cfg.version, CONFIG_VERSION);
        assert_eq!(cfg.layout, SampleLayout::Value);

        let cfg: TrapConfig =
            serde_json::from_str(r#"{"layout": "value-with-threshold"}"#).unwrap();
        assert_eq!(cfg.layout, SampleLayout::ValueWithThreshold);
    }

    #[test]
    fn test_borsh_roundtrip() {
        let cfg = TrapConfig {
            version: 1,
            threshold_pct: 7,
            layout: SampleLayout::ValueWithThreshold,
        };
        let bytes = borsh::to_vec(&cfg).unwrap();
        let decoded: TrapConfig = borsh::from_slice(&bytes).unwrap();
        assert_eq!(cfg, decoded);
    }
}
