//! Pipeline configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Rows per batch pulled from the backing store. Must be >= 1.
    pub batch_size: usize,

    /// Age threshold for the stock filter; records with age strictly greater
    /// pass. Must be positive.
    pub min_age: i64,

    /// Optional cap on matching records; the driver stops pulling and closes
    /// the cursor as soon as this many matches have been produced.
    pub limit: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 25,
            min_age: 25,
            limit: None,
        }
    }
}

impl PipelineConfig {
    /// Reject out-of-range knobs up front so no stage ever sees them.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be >= 1".into()));
        }
        if self.min_age <= 0 {
            return Err(Error::Config(format!(
                "min_age must be positive, got {}",
                self.min_age
            )));
        }
        if self.limit == Some(0) {
            return Err(Error::Config("limit must be >= 1 when set".into()));
        }
        Ok(())
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ROWTIDE_BATCH_SIZE`: rows per batch
    /// - `ROWTIDE_MIN_AGE`: filter threshold
    /// - `ROWTIDE_LIMIT`: match cap
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("ROWTIDE_BATCH_SIZE") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.batch_size = v;
            }
        }

        if let Ok(s) = std::env::var("ROWTIDE_MIN_AGE") {
            if let Ok(v) = s.parse::<i64>() {
                cfg.min_age = v;
            }
        }

        if let Ok(s) = std::env::var("ROWTIDE_LIMIT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.limit = Some(v);
            }
        }

        cfg
    }
}
