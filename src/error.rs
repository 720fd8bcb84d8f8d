use thiserror::Error;

/// Errors raised when a table is constructed with an unusable configuration.
///
/// These are the only hard failures the crate reports. Missing keys and
/// out-of-range positions are ordinary `None` results.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The requested initial bucket count was zero.
    #[error("capacity must be positive")]
    ZeroCapacity,
    /// The load factor was zero, negative, NaN or infinite.
    #[error("load factor must be a positive finite number, got {0}")]
    InvalidLoadFactor(f64),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ConfigError::ZeroCapacity.to_string(), "capacity must be positive");
        assert_eq!(
            ConfigError::InvalidLoadFactor(-1.5).to_string(),
            "load factor must be a positive finite number, got -1.5"
        );
    }
}
