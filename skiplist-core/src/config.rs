//! Configuration for the skiplist engine.

use crate::error::{Error, Result};

/// Maximum layer the engine will ever allocate a node's `next` array for.
///
/// A node's chosen top layer is clipped to this value regardless of what
/// `ListConfig::max_layer` is set to, matching the C original's
/// `SKIPLIST_MAX_LAYER` ceiling.
pub const ABSOLUTE_MAX_LAYER: usize = 64;

/// Tunable parameters for the `skiplist-engine` list core.
///
/// `fanout` is the inverse probability that a node's random level grows
/// by one during insertion; `max_layer` bounds how tall the list can
/// grow. The defaults (`fanout = 4`, `max_layer = 12`) give `O(log_4 n)`
/// height for up to roughly `4^12` (~17M) entries, per the original
/// implementation's own reasoning.
///
/// # Example
///
/// ```
/// use skiplist_core::ListConfig;
///
/// let config = ListConfig {
///     fanout: 2,
///     max_layer: 16,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// Inverse probability (1/fanout) that a node's height grows by one.
    pub fanout: usize,
    /// Maximum number of layers the list may grow to.
    pub max_layer: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            fanout: 4,
            max_layer: 12,
        }
    }
}

impl ListConfig {
    /// Checks that this configuration can be used to build a list.
    ///
    /// `fanout` must be at least 1 (a fanout of 1 always grows, up to
    /// `max_layer - 1`), and `max_layer` must be in `1..=ABSOLUTE_MAX_LAYER`.
    pub fn validate(&self) -> Result<()> {
        if self.fanout == 0 {
            return Err(Error::InvalidConfig("fanout must be >= 1".into()));
        }
        if self.max_layer == 0 {
            return Err(Error::InvalidConfig("max_layer must be >= 1".into()));
        }
        if self.max_layer > ABSOLUTE_MAX_LAYER {
            return Err(Error::InvalidConfig(format!(
                "max_layer must be <= {ABSOLUTE_MAX_LAYER}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ListConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_fanout_is_invalid() {
        let config = ListConfig {
            fanout: 0,
            max_layer: 12,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_layer_is_invalid() {
        let config = ListConfig {
            fanout: 4,
            max_layer: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_max_layer_is_invalid() {
        let config = ListConfig {
            fanout: 4,
            max_layer: ABSOLUTE_MAX_LAYER + 1,
        };
        assert!(config.validate().is_err());
    }
}
