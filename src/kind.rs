//! Catalog kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The three categories of catalog content.
///
/// Each kind has its own metadata shape and its own subdirectory under the
/// content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Agent definitions (`agents/`).
    Agent,
    /// Installable skills (`skills/`).
    Skill,
    /// Multi-step workflows (`workflows/`).
    Workflow,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Kind {
    /// All kinds, in display order.
    pub const ALL: &'static [Self] = &[Self::Agent, Self::Skill, Self::Workflow];

    /// Singular lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Skill => "skill",
            Self::Workflow => "workflow",
        }
    }

    /// Name of the subdirectory holding this kind's documents.
    #[must_use]
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::Agent => "agents",
            Self::Skill => "skills",
            Self::Workflow => "workflows",
        }
    }

    /// Icon key used when a document does not name one.
    #[must_use]
    pub const fn default_icon(&self) -> &'static str {
        match self {
            Self::Agent => "bot",
            Self::Skill => "box",
            Self::Workflow => "workflow",
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    /// Accepts singular or plural names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agent" | "agents" => Ok(Self::Agent),
            "skill" | "skills" => Ok(Self::Skill),
            "workflow" | "workflows" => Ok(Self::Workflow),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_names_are_plural() {
        let dirs: Vec<_> = Kind::ALL.iter().map(Kind::dir_name).collect();
        assert_eq!(dirs, vec!["agents", "skills", "workflows"]);
    }

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!("agents".parse::<Kind>().unwrap(), Kind::Agent);
        assert_eq!("Skill".parse::<Kind>().unwrap(), Kind::Skill);
        assert_eq!(" WORKFLOWS ".parse::<Kind>().unwrap(), Kind::Workflow);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "plugins".parse::<Kind>().unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref s) if s == "plugins"));
    }

    #[test]
    fn display_matches_as_str() {
        for kind in Kind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Workflow).unwrap(), "\"workflow\"");
    }

    #[test]
    fn default_icons_per_kind() {
        assert_eq!(Kind::Agent.default_icon(), "bot");
        assert_eq!(Kind::Skill.default_icon(), "box");
        assert_eq!(Kind::Workflow.default_icon(), "workflow");
    }
}
