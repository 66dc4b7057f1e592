//! Kind-specific metadata shapes and their coercion from header values.
//!
//! Each shape is read from a private header struct that accepts whatever the
//! document author wrote (numbers for versions, comma-separated strings for
//! lists), then validated: `name` and `description` are required, everything
//! else falls back to a default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::frontmatter::Document;
use crate::kind::Kind;
use crate::{Error, Result};

/// Model shown for agents that do not name one.
pub const DEFAULT_MODEL: &str = "ai";
/// Version shown for skills that do not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Author shown for skills that do not declare one.
pub const DEFAULT_AUTHOR: &str = "Unknown";
/// Estimated time shown for workflows that do not declare one.
pub const DEFAULT_ESTIMATED_TIME: &str = "30 min";

/// Typed metadata for one catalog kind.
pub trait Metadata: Serialize + Clone + fmt::Debug + PartialEq + Send + Sync + Sized {
    /// The kind this shape belongs to.
    const KIND: Kind;

    /// Validate and coerce a parsed document's header into this shape.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingField` if `name` or `description` is absent or
    /// blank, `Error::InvalidField` for unusable values, and
    /// `Error::YamlParse` if a field has the wrong structure.
    fn from_document(doc: &Document) -> Result<Self>;

    /// Display name.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Optional grouping label.
    fn category(&self) -> Option<&str>;

    /// Icon key named in the header, if any.
    fn icon(&self) -> Option<&str>;

    /// Icon key to render, falling back to the kind's default.
    fn icon_key(&self) -> &str {
        self.icon().unwrap_or(Self::KIND.default_icon())
    }
}

/// A scalar that may stand in for a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Number(serde_yaml::Number),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::String(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// A list written either as a YAML sequence or as `a, b, c`.
///
/// Null entries in a sequence (`[react, ~]`) are dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum StringList {
    #[default]
    None,
    List(Vec<Option<Scalar>>),
    CommaSeparated(String),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::None => Vec::new(),
            StringList::List(v) => v
                .into_iter()
                .flatten()
                .map(|s| s.into_string().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            StringList::CommaSeparated(s) => split_list(&s).map(str::to_string).collect(),
        }
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|t| !t.is_empty())
}

fn text(value: Option<Scalar>) -> Option<String> {
    value
        .map(|v| v.into_string().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(value: Option<Scalar>, field: &str) -> Result<String> {
    text(value).ok_or_else(|| Error::MissingField(field.to_string()))
}

fn or_default(value: Option<Scalar>, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}

/// Header of an agent document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMetadata {
    /// Agent name (required).
    pub name: String,
    /// What the agent does (required).
    pub description: String,
    /// Capability list as written, comma-separated. See [`AgentMetadata::tools`].
    pub tools: String,
    /// Model the agent targets, or [`DEFAULT_MODEL`].
    pub model: String,
    /// Optional grouping label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional icon key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AgentMetadata {
    /// The individual tools, trimmed, without empty entries.
    pub fn tools(&self) -> impl Iterator<Item = &str> {
        split_list(&self.tools)
    }
}

#[derive(Debug, Deserialize)]
struct AgentHeader {
    name: Option<Scalar>,
    description: Option<Scalar>,
    #[serde(default)]
    tools: ToolsField,
    model: Option<Scalar>,
    category: Option<Scalar>,
    icon: Option<Scalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ToolsField {
    #[default]
    None,
    List(Vec<Option<Scalar>>),
    CommaSeparated(Scalar),
}

impl ToolsField {
    fn into_string(self) -> String {
        match self {
            ToolsField::None => String::new(),
            ToolsField::List(v) => v
                .into_iter()
                .flatten()
                .map(Scalar::into_string)
                .collect::<Vec<_>>()
                .join(", "),
            ToolsField::CommaSeparated(s) => s.into_string(),
        }
    }
}

impl Metadata for AgentMetadata {
    const KIND: Kind = Kind::Agent;

    fn from_document(doc: &Document) -> Result<Self> {
        let header: AgentHeader = doc.deserialize_metadata()?;
        Ok(Self {
            name: required(header.name, "name")?,
            description: required(header.description, "description")?,
            tools: header.tools.into_string(),
            model: or_default(header.model, DEFAULT_MODEL),
            category: text(header.category),
            icon: text(header.icon),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Header of a skill document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMetadata {
    /// Skill name (required).
    pub name: String,
    /// What the skill does (required).
    pub description: String,
    /// Version string, or [`DEFAULT_VERSION`].
    pub version: String,
    /// Author, or [`DEFAULT_AUTHOR`].
    pub author: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Shell command that installs the skill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    /// Other skills or packages this one needs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Optional grouping label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional icon key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillHeader {
    name: Option<Scalar>,
    description: Option<Scalar>,
    version: Option<Scalar>,
    author: Option<Scalar>,
    #[serde(default)]
    tags: StringList,
    install_command: Option<Scalar>,
    #[serde(default)]
    dependencies: StringList,
    category: Option<Scalar>,
    icon: Option<Scalar>,
}

impl Metadata for SkillMetadata {
    const KIND: Kind = Kind::Skill;

    fn from_document(doc: &Document) -> Result<Self> {
        let header: SkillHeader = doc.deserialize_metadata()?;
        Ok(Self {
            name: required(header.name, "name")?,
            description: required(header.description, "description")?,
            version: or_default(header.version, DEFAULT_VERSION),
            author: or_default(header.author, DEFAULT_AUTHOR),
            tags: header.tags.into_vec(),
            install_command: text(header.install_command),
            dependencies: header.dependencies.into_vec(),
            category: text(header.category),
            icon: text(header.icon),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// How demanding a workflow is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// No prior experience needed.
    #[default]
    Beginner,
    /// Some familiarity expected.
    Intermediate,
    /// For experienced users.
    Advanced,
}

impl Difficulty {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(Error::InvalidField {
                field: "difficulty".to_string(),
                reason: format!("unknown level '{s}'"),
            }),
        }
    }
}

/// One step of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Short step title.
    pub title: String,
    /// What happens in this step.
    #[serde(default)]
    pub description: String,
    /// Command or prompt to run, if the step has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Header of a workflow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    /// Workflow name (required).
    pub name: String,
    /// What the workflow achieves (required).
    pub description: String,
    /// Rough duration, or [`DEFAULT_ESTIMATED_TIME`].
    pub estimated_time: String,
    /// Difficulty level, beginner when unspecified.
    pub difficulty: Difficulty,
    /// Ordered steps, when the header lists them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<WorkflowStep>,
    /// Optional grouping label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional icon key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowHeader {
    name: Option<Scalar>,
    description: Option<Scalar>,
    estimated_time: Option<Scalar>,
    difficulty: Option<Scalar>,
    #[serde(default)]
    steps: Option<Vec<WorkflowStep>>,
    category: Option<Scalar>,
    icon: Option<Scalar>,
}

impl Metadata for WorkflowMetadata {
    const KIND: Kind = Kind::Workflow;

    fn from_document(doc: &Document) -> Result<Self> {
        let header: WorkflowHeader = doc.deserialize_metadata()?;
        let difficulty = match text(header.difficulty) {
            Some(level) => level.parse()?,
            None => Difficulty::default(),
        };
        Ok(Self {
            name: required(header.name, "name")?,
            description: required(header.description, "description")?,
            estimated_time: or_default(header.estimated_time, DEFAULT_ESTIMATED_TIME),
            difficulty,
            steps: header.steps.unwrap_or_default(),
            category: text(header.category),
            icon: text(header.icon),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse_document;

    fn meta<M: Metadata>(content: &str) -> Result<M> {
        M::from_document(&parse_document(content)?)
    }

    #[test]
    fn agent_defaults_model_and_splits_tools() {
        let agent: AgentMetadata = meta(
            "---\nname: Frontend Developer\ndescription: Builds UIs\ntools: Read, Write , ,Bash\n---\n",
        )
        .unwrap();
        assert_eq!(agent.model, DEFAULT_MODEL);
        assert_eq!(agent.tools, "Read, Write , ,Bash");
        assert_eq!(agent.tools().collect::<Vec<_>>(), vec!["Read", "Write", "Bash"]);
    }

    #[test]
    fn agent_accepts_tools_as_list() {
        let agent: AgentMetadata = meta(
            "---\nname: a\ndescription: b\ntools:\n  - Read\n  - Grep\nmodel: sonnet\n---\n",
        )
        .unwrap();
        assert_eq!(agent.tools, "Read, Grep");
        assert_eq!(agent.model, "sonnet");
    }

    #[test]
    fn agent_drops_null_tool_entries() {
        let agent: AgentMetadata =
            meta("---\nname: a\ndescription: b\ntools: [Read, ~, Grep]\n---\n").unwrap();
        assert_eq!(agent.tools, "Read, Grep");
    }

    #[test]
    fn agent_without_tools_has_none() {
        let agent: AgentMetadata = meta("---\nname: a\ndescription: b\n---\n").unwrap();
        assert_eq!(agent.tools().count(), 0);
    }

    #[test]
    fn skill_defaults() {
        let skill: SkillMetadata = meta("---\nname: s\ndescription: d\n---\n").unwrap();
        assert_eq!(skill.version, DEFAULT_VERSION);
        assert_eq!(skill.author, DEFAULT_AUTHOR);
        assert!(skill.tags.is_empty());
        assert!(skill.install_command.is_none());
        assert!(skill.dependencies.is_empty());
    }

    #[test]
    fn skill_reads_all_fields() {
        let skill: SkillMetadata = meta(
            "---\nname: React Component Generator\ndescription: Scaffolds components\nversion: 2.1.0\nauthor: Jane\ntags: [react, typescript]\ninstallCommand: npx skills add react\ndependencies:\n  - node\n---\n",
        )
        .unwrap();
        assert_eq!(skill.version, "2.1.0");
        assert_eq!(skill.author, "Jane");
        assert_eq!(skill.tags, vec!["react", "typescript"]);
        assert_eq!(skill.install_command.as_deref(), Some("npx skills add react"));
        assert_eq!(skill.dependencies, vec!["node"]);
    }

    #[test]
    fn skill_coerces_numeric_version_and_comma_tags() {
        let skill: SkillMetadata =
            meta("---\nname: s\ndescription: d\nversion: 2\ntags: a, b\n---\n").unwrap();
        assert_eq!(skill.version, "2");
        assert_eq!(skill.tags, vec!["a", "b"]);
    }

    #[test]
    fn skill_drops_null_list_entries() {
        let skill: SkillMetadata = meta(
            "---\nname: s\ndescription: d\ntags: [react, ~]\ndependencies:\n  - node\n  -\n---\n",
        )
        .unwrap();
        assert_eq!(skill.tags, vec!["react"]);
        assert_eq!(skill.dependencies, vec!["node"]);
    }

    #[test]
    fn skill_rejects_mapping_tags() {
        let err = meta::<SkillMetadata>("---\nname: s\ndescription: d\ntags:\n  a: 1\n---\n")
            .unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn missing_required_fields_are_errors() {
        let err = meta::<SkillMetadata>("---\nname: s\n---\n").unwrap_err();
        assert!(matches!(err, Error::MissingField(ref f) if f == "description"));

        let err = meta::<AgentMetadata>("---\nname: \"  \"\ndescription: d\n---\n").unwrap_err();
        assert!(matches!(err, Error::MissingField(ref f) if f == "name"));
    }

    #[test]
    fn workflow_defaults() {
        let wf: WorkflowMetadata = meta("---\nname: w\ndescription: d\n---\n").unwrap();
        assert_eq!(wf.estimated_time, DEFAULT_ESTIMATED_TIME);
        assert_eq!(wf.difficulty, Difficulty::Beginner);
        assert!(wf.steps.is_empty());
    }

    #[test]
    fn workflow_reads_difficulty_and_steps() {
        let wf: WorkflowMetadata = meta(
            "---\nname: w\ndescription: d\nestimatedTime: 2 hours\ndifficulty: Advanced\nsteps:\n  - title: Plan\n    description: Write a plan\n  - title: Ship\n    action: git push\n---\n",
        )
        .unwrap();
        assert_eq!(wf.estimated_time, "2 hours");
        assert_eq!(wf.difficulty, Difficulty::Advanced);
        assert_eq!(wf.steps.len(), 2);
        assert_eq!(wf.steps[1].action.as_deref(), Some("git push"));
        assert_eq!(wf.steps[1].description, "");
    }

    #[test]
    fn workflow_rejects_unknown_difficulty() {
        let err = meta::<WorkflowMetadata>("---\nname: w\ndescription: d\ndifficulty: expert\n---\n")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "difficulty"));
    }

    #[test]
    fn icon_key_falls_back_to_kind_default() {
        let plain: WorkflowMetadata = meta("---\nname: w\ndescription: d\n---\n").unwrap();
        assert_eq!(plain.icon_key(), "workflow");

        let custom: AgentMetadata =
            meta("---\nname: a\ndescription: d\nicon: not-a-real-icon\n---\n").unwrap();
        assert_eq!(custom.icon_key(), "not-a-real-icon");
    }

    #[test]
    fn serializes_with_header_key_names() {
        let skill: SkillMetadata =
            meta("---\nname: s\ndescription: d\ninstallCommand: run it\n---\n").unwrap();
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["installCommand"], "run it");
        assert_eq!(json["version"], DEFAULT_VERSION);
        assert!(json.get("category").is_none());
    }
}
