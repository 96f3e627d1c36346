//! Client configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so the API base URL is baked
//! in from `BOOKSHELF_API_BASE` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api/";

/// Maximum number of notifications shown at once; older ones are dropped.
pub const MAX_VISIBLE_NOTIFICATIONS: usize = 3;
/// How long a notification stays on screen.
pub const NOTIFICATION_TTL_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every REST path is resolved against. Always ends with `/`.
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_owned() }
    }
}

impl ClientConfig {
    /// Build config from compile-time environment.
    ///
    /// - `BOOKSHELF_API_BASE`: absolute or root-relative base URL, default `/api/`
    pub fn from_build_env() -> Self {
        Self { api_base: parse_api_base(option_env!("BOOKSHELF_API_BASE")) }
    }

    /// Resolve a relative API path such as `books/rate/3`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path.trim_start_matches('/'))
    }
}

pub(crate) fn parse_api_base(raw: Option<&str>) -> String {
    let base = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_API_BASE);
    if base.ends_with('/') { base.to_owned() } else { format!("{base}/") }
}
