//! Opaque identifiers and the dotted-path domain hierarchy (spec §3).

use serde::{Deserialize, Serialize};

/// A stable identity in the graph. The engine never interprets the bytes —
/// in this deployment they happen to be a 20-byte wallet address, but
/// nothing here assumes that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal(Vec<u8>);

impl Principal {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<Vec<u8>> for Principal {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) if s.chars().all(|c| !c.is_control()) => write!(f, "{s}"),
            _ => {
                write!(f, "0x")?;
                for byte in &self.0 {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// A dotted, lowercase hierarchical label, e.g. `food.restaurants.pizza`.
/// The literal `*` is the wildcard, matching every domain. Hierarchy is
/// purely lexical — the engine performs no registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Domain(String);

impl Domain {
    pub const WILDCARD: &'static str = "*";

    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn wildcard() -> Self {
        Self(Self::WILDCARD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }

    /// The ancestor chain of this domain, most specific first, always ending
    /// in the wildcard. Does not include the domain itself. The wildcard's
    /// own ancestor chain is empty.
    ///
    /// `food.restaurants.pizza` -> `[food.restaurants, food, *]`.
    pub fn ancestors(&self) -> Vec<Domain> {
        if self.is_wildcard() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(idx) = rest.rfind('.') {
            rest = &rest[..idx];
            out.push(Domain::new(rest.to_string()));
        }
        out.push(Domain::wildcard());
        out
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Domain {
    fn from(s: &str) -> Self {
        Domain::new(s)
    }
}
