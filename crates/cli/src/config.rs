//! Start-up configuration, read from the environment once.

use millbook_core::try_parse_non_negative_decimal;
use millbook_milling::ACK_QUANTITY_QUINTALS;

pub const ACK_QUANTITY_VAR: &str = "MILLBOOK_ACK_QUANTITY";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliConfig {
    /// Rice target used when an ACK request does not name one, quintals.
    pub ack_quantity: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ack_quantity: ACK_QUANTITY_QUINTALS,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; bad values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ACK_QUANTITY_VAR) {
            match try_parse_non_negative_decimal(&raw) {
                Ok(quantity) if quantity > 0.0 => config.ack_quantity = quantity,
                Ok(_) => tracing::warn!(
                    "{ACK_QUANTITY_VAR} must be positive; using {}",
                    config.ack_quantity
                ),
                Err(e) => tracing::warn!(
                    error = %e,
                    "{ACK_QUANTITY_VAR} is invalid; using {}",
                    config.ack_quantity
                ),
            }
        }

        config
    }
}
