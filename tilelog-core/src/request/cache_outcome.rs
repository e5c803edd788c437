use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Result reported by one caching layer for a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheOutcome {
    Hit,
    Miss,
    Pass,
    Error,
    /// A token no known cache layer emits. Kept verbatim so new tiers don't break parsing.
    Other(String),
}

impl CacheOutcome {
    pub fn from_token(token: &str) -> Self {
        match token {
            "HIT" => Self::Hit,
            "MISS" => Self::Miss,
            "PASS" => Self::Pass,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Display for CacheOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => f.write_str("HIT"),
            Self::Miss => f.write_str("MISS"),
            Self::Pass => f.write_str("PASS"),
            Self::Error => f.write_str("ERROR"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Ordered cache results, most edge-facing layer first.
///
/// Fastly chains are rarely longer than two tiers (edge + shield), so they
/// stay inline.
pub type CacheChain = SmallVec<[CacheOutcome; 2]>;
