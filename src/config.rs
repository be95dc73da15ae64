//! Service configuration.
//!
//! Configuration values are plain data with sensible defaults. Host
//! applications can deserialize them from any `serde` format; missing fields
//! fall back to [`Default`].
//!
//! # Examples
//!
//! ```
//! use taskboard::config::{PaginationConfig, ServiceConfig};
//!
//! let config = ServiceConfig::default();
//! assert_eq!(config.pagination, PaginationConfig::default());
//! assert_eq!(config.pagination.default_page_size, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Pagination limits applied to list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller passes zero.
    pub default_page_size: u32,
    /// Largest page size a caller may request.
    pub max_page_size: u32,
}

impl PaginationConfig {
    /// Creates a configuration with explicit limits.
    ///
    /// `max_page_size` is raised to `default_page_size` when smaller.
    #[must_use]
    pub const fn new(default_page_size: u32, max_page_size: u32) -> Self {
        let max = if max_page_size < default_page_size {
            default_page_size
        } else {
            max_page_size
        };
        Self {
            default_page_size,
            max_page_size: max,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(20, 100)
    }
}

/// Top-level configuration shared by the services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Pagination limits for list operations.
    pub pagination: PaginationConfig,
}

impl ServiceConfig {
    /// Returns a copy with different pagination limits.
    #[must_use]
    pub const fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}
