use crate::error::CacheError;
use crate::types::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Configuration for [`OnboardCache::new`](crate::OnboardCache::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Size of the staging buffer in bytes.
    ///
    /// One byte is always held back as headroom, so a buffer of `capacity`
    /// bytes accepts records totalling at most `capacity - 1` bytes through
    /// the checked append path.
    ///
    /// Default: 256 bytes.
    #[serde(default = "default_capacity")]
    pub capacity: NonZeroUsize,
}

fn default_capacity() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Result<Self, CacheError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| CacheError::Config("capacity must be positive".into()))?;
        Ok(Self { capacity })
    }

    /// Parse from JSON, e.g. `{"capacity": 512}`. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, CacheError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(CacheConfig::default().capacity.get(), 256);
    }

    #[test]
    fn test_from_json() {
        let cfg = CacheConfig::from_json(r#"{"capacity": 512}"#).unwrap();
        assert_eq!(cfg.capacity.get(), 512);

        let cfg = CacheConfig::from_json("{}").unwrap();
        assert_eq!(cfg, CacheConfig::default());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert!(matches!(
            CacheConfig::from_json(r#"{"capacity": 0}"#),
            Err(CacheError::Config(_))
        ));
        assert!(matches!(
            CacheConfig::with_capacity(0),
            Err(CacheError::Config(_))
        ));
    }
}
