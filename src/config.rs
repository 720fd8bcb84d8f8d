use crate::error::ConfigError;

/// Bucket count used when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Growth threshold used when no load factor is given.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Construction parameters shared by [`HashMap`](crate::HashMap),
/// [`HashSet`](crate::HashSet) and [`HashTable`](crate::HashTable).
///
/// A `TableConfig` can only be obtained through validating constructors, so a
/// table built from one always has a positive capacity and a positive, finite
/// load factor.
///
/// # Examples
///
/// ```rust
/// use chain_hash::TableConfig;
///
/// let config = TableConfig::new(4, 0.5).unwrap();
/// assert_eq!(config.initial_capacity(), 4);
/// assert_eq!(config.load_factor(), 0.5);
///
/// assert!(TableConfig::new(0, 0.75).is_err());
/// assert!(TableConfig::new(16, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    initial_capacity: usize,
    load_factor: f64,
}

impl TableConfig {
    /// Validates and bundles an initial bucket count and a load factor.
    pub fn new(initial_capacity: usize, load_factor: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            initial_capacity: validate_capacity(initial_capacity)?,
            load_factor: validate_load_factor(load_factor)?,
        })
    }

    /// Returns a copy of this configuration with a different initial capacity.
    pub fn with_initial_capacity(self, initial_capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            initial_capacity: validate_capacity(initial_capacity)?,
            ..self
        })
    }

    /// Returns a copy of this configuration with a different load factor.
    pub fn with_load_factor(self, load_factor: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            load_factor: validate_load_factor(load_factor)?,
            ..self
        })
    }

    /// The number of buckets a new table starts with.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// The entries-per-bucket ratio above which a table doubles its buckets.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::ZeroCapacity);
    }
    Ok(capacity)
}

fn validate_load_factor(load_factor: f64) -> Result<f64, ConfigError> {
    // `is_finite` is false for NaN.
    if load_factor.is_finite() && load_factor > 0.0 {
        Ok(load_factor)
    } else {
        Err(ConfigError::InvalidLoadFactor(load_factor))
    }
}
