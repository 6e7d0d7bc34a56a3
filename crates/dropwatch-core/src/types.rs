//! Core types for dropwatch-core.
//!
//! This module defines the data shared between the ingestion side and the
//! display side: the structured [`DropEvent`] produced by the classifier and
//! the [`Category`] that decides which store receives it.

use std::fmt;

/// Which side of the firewall dropped the packet.
///
/// Driven by the marker token (`INTERNAL_DROPPED:` / `EXTERNAL_DROPPED:`)
/// that the firewall rules write into the kernel log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Internal,
    External,
}

impl Category {
    /// The log-line marker token for this category, including the colon.
    pub fn marker(self) -> &'static str {
        match self {
            Category::Internal => "INTERNAL_DROPPED:",
            Category::External => "EXTERNAL_DROPPED:",
        }
    }

    /// Inverse of [`Category::marker`].
    pub fn from_marker(token: &str) -> Option<Self> {
        match token {
            "INTERNAL_DROPPED:" => Some(Category::Internal),
            "EXTERNAL_DROPPED:" => Some(Category::External),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Internal => write!(f, "internal"),
            Category::External => write!(f, "external"),
        }
    }
}

/// A single firewall drop, extracted from one kernel log line.
///
/// Only `timestamp`, `host` and `process` are guaranteed; the remaining
/// fields depend on how many tokens the line carried. Formatting into the
/// one-line summary shown in the panels is deferred to [`DropEvent::summary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Tokens 0–2 joined by single spaces (syslog `Mon DD HH:MM:SS`).
    pub timestamp: String,
    /// Token 3.
    pub host: String,
    /// Token 4, usually `kernel:`.
    pub process: String,
    pub category: Category,
    /// Token 9, typically the `SRC=` field of an iptables log line.
    pub source: Option<String>,
    /// Last `PROTO=` token, only when the line has no `DPT=` token.
    pub protocol: Option<String>,
    /// First `DPT=` token.
    pub port: Option<String>,
}

impl DropEvent {
    /// Render the one-line summary:
    /// `"<timestamp>[ <source>][ <port> | <protocol>]"`.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DropEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.timestamp)?;
        let marker = self.port.as_ref().or(self.protocol.as_ref());
        for part in [self.source.as_ref(), marker].into_iter().flatten() {
            write!(f, " {part}")?;
        }
        Ok(())
    }
}
