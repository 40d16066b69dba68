//! Page limit configuration
//!
//! Query handlers page with a default limit (used when a request asks for
//! `limit = 0`) and a hard maximum. Both can be loaded from YAML or JSON.

use crate::error::{Error, Result, ResultExt};
use crate::pagination::{self, Page, PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default and maximum page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Limit used when a request leaves `limit` at zero
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest limit a request may ask for
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    20
}

fn default_max_limit() -> usize {
    50
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl PageLimits {
    /// Create limits from explicit values
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Check that the limits can serve a request
    pub fn validate(&self) -> Result<()> {
        if self.max_limit == 0 {
            return Err(Error::invalid_value("max_limit", "must be greater than 0"));
        }
        if self.default_limit > self.max_limit {
            return Err(Error::invalid_value(
                "default_limit",
                format!(
                    "{} exceeds max_limit {}",
                    self.default_limit, self.max_limit
                ),
            ));
        }
        Ok(())
    }

    /// Parse and validate limits from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let limits: Self = serde_yaml::from_str(yaml)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Parse and validate limits from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let limits: Self = serde_json::from_str(json)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Load limits from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let limits = match extension {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(Error::config(format!(
                "Unsupported limits file extension '{other}' (expected yaml, yml or json)"
            ))),
        };
        limits.with_context(|| format!("Failed to load limits from '{}'", path.display()))
    }

    /// Paginate `length` items with these limits
    pub fn paginate<F, E>(
        &self,
        length: usize,
        request: Option<&PageRequest>,
        visitor: F,
    ) -> std::result::Result<PageResponse, E>
    where
        F: FnMut(usize) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        pagination::paginate(
            length,
            request,
            visitor,
            self.default_limit,
            self.max_limit,
        )
    }

    /// Paginate a slice with these limits
    pub fn paginate_slice<'a, T, F, E>(
        &self,
        items: &'a [T],
        request: Option<&PageRequest>,
        visitor: F,
    ) -> std::result::Result<PageResponse, E>
    where
        F: FnMut(usize, &'a T) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        pagination::paginate_slice(
            items,
            request,
            visitor,
            self.default_limit,
            self.max_limit,
        )
    }

    /// Collect one page of a slice with these limits
    pub fn collect_page<'a, T>(
        &self,
        items: &'a [T],
        request: Option<&PageRequest>,
    ) -> Result<Page<&'a T>> {
        pagination::collect_page(items, request, self)
    }
}
