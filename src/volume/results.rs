//! Volume result types
//!
//! Defines result structures returned by registry queries.

use serde::Serialize;

/// Visibility of volumes across hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Same volume on every host sharing the backing filesystem
    Global,
}

/// Static capabilities advertised to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    #[serde(rename = "Scope")]
    pub scope: Scope,
}
