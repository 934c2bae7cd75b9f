//! Single-clause version specifiers (`>=3.9`, `==1.2.*`, `~=2.0`).
//!
//! Only the numeric release segments take part in comparisons. That is all
//! the interpreter-version checks need; the package version specifier is
//! never compared, only rendered.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DocifyError, Result};

static SPECIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(===|==|!=|<=|>=|~=|<|>)\s*([0-9A-Za-z][0-9A-Za-z.+!_\-]*(?:\.\*)?)\s*$")
        .expect("specifier regex is valid")
});

/// Comparison operator of a [`VersionSpecifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Compatible,
    Arbitrary,
}

impl Operator {
    /// The operator as written in a specifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Compatible => "~=",
            Self::Arbitrary => "===",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<=" => Some(Self::LessEqual),
            ">=" => Some(Self::GreaterEqual),
            "<" => Some(Self::Less),
            ">" => Some(Self::Greater),
            "~=" => Some(Self::Compatible),
            "===" => Some(Self::Arbitrary),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version constraint made of one operator and one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionSpecifier {
    operator: Operator,
    version: String,
}

impl VersionSpecifier {
    /// Parse a specifier such as `>=3.9` or `== 1.2.*`.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |message: &str| DocifyError::InvalidSpecifier {
            spec: spec.to_string(),
            message: message.to_string(),
        };

        let caps = SPECIFIER_REGEX
            .captures(spec)
            .ok_or_else(|| invalid("expected an operator followed by a version"))?;

        let operator = Operator::parse(&caps[1]).ok_or_else(|| invalid("unknown operator"))?;
        let version = caps[2].to_string();

        if version.ends_with(".*") && !matches!(operator, Operator::Equal | Operator::NotEqual) {
            return Err(invalid("wildcards are only allowed with == and !="));
        }
        if operator == Operator::Compatible && release_segments(&version).len() < 2 {
            return Err(invalid("~= requires at least two release segments"));
        }

        Ok(Self { operator, version })
    }

    /// Parse a declared package version.
    ///
    /// A bare version (`1.2.3`, `2.*`) is pinned with `==`; anything else must
    /// already carry an operator.
    pub fn from_declared(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            Self::parse(&format!("=={trimmed}"))
        } else {
            Self::parse(trimmed)
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Check whether `candidate` (e.g. an interpreter version) satisfies
    /// this specifier.
    pub fn contains(&self, candidate: &str) -> bool {
        let have = release_segments(candidate);

        match self.operator {
            Operator::Arbitrary => candidate.trim() == self.version,
            Operator::Equal => self.matches_exact(&have),
            Operator::NotEqual => !self.matches_exact(&have),
            Operator::LessEqual => compare_releases(&have, &self.release()) != Ordering::Greater,
            Operator::GreaterEqual => compare_releases(&have, &self.release()) != Ordering::Less,
            Operator::Less => compare_releases(&have, &self.release()) == Ordering::Less,
            Operator::Greater => compare_releases(&have, &self.release()) == Ordering::Greater,
            Operator::Compatible => {
                let want = self.release();
                let prefix = &want[..want.len() - 1];
                compare_releases(&have, &want) != Ordering::Less
                    && compare_releases(&padded(&have, prefix.len()), prefix) == Ordering::Equal
            }
        }
    }

    fn release(&self) -> Vec<u64> {
        release_segments(&self.version)
    }

    fn matches_exact(&self, have: &[u64]) -> bool {
        match self.version.strip_suffix(".*") {
            Some(prefix) => {
                let want = release_segments(prefix);
                compare_releases(&padded(have, want.len()), &want) == Ordering::Equal
            }
            None => compare_releases(have, &self.release()) == Ordering::Equal,
        }
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

impl FromStr for VersionSpecifier {
    type Err = DocifyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionSpecifier {
    type Error = DocifyError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<VersionSpecifier> for String {
    fn from(spec: VersionSpecifier) -> Self {
        spec.to_string()
    }
}

/// Leading numeric release segments of a version (`3.12.1rc1` -> `[3, 12, 1]`).
fn release_segments(version: &str) -> Vec<u64> {
    let version = version.trim();
    let version = version.split_once('!').map_or(version, |(_, rest)| rest);
    let mut segments = Vec::new();
    for part in version.split('.') {
        let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
        match digits.parse() {
            Ok(n) => segments.push(n),
            Err(_) => break,
        }
        if digits.len() != part.len() {
            break;
        }
    }
    segments
}

fn padded(segments: &[u64], len: usize) -> Vec<u64> {
    let mut out: Vec<u64> = segments.iter().copied().take(len).collect();
    out.resize(len, 0);
    out
}

fn compare_releases(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    padded(a, len).cmp(&padded(b, len))
}
