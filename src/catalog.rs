//! Read-only catalog access.
//!
//! [`ContentDir`] reads documents from disk on every call. [`Catalog`] loads
//! all three kinds once into an immutable [`Snapshot`] and shares it until
//! [`Catalog::reload`] swaps in a new one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::config::CatalogConfig;
use crate::filter::filter;
use crate::kind::Kind;
use crate::loader::{load_kind, load_one, sort_by_name};
use crate::record::{AgentRecord, SkillRecord, WorkflowRecord};

/// Uncached, per-kind access to a content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDir {
    root: PathBuf,
}

impl ContentDir {
    /// Access documents under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Access documents under the configured content root.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.content_root.clone())
    }

    /// The content root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All agents, in directory order.
    #[must_use]
    pub fn list_agents(&self) -> Vec<AgentRecord> {
        load_kind(&self.root)
    }

    /// The agent with this slug.
    #[must_use]
    pub fn get_agent(&self, slug: &str) -> Option<AgentRecord> {
        load_one(&self.root, slug)
    }

    /// All skills, in directory order.
    #[must_use]
    pub fn list_skills(&self) -> Vec<SkillRecord> {
        load_kind(&self.root)
    }

    /// The skill with this slug.
    #[must_use]
    pub fn get_skill(&self, slug: &str) -> Option<SkillRecord> {
        load_one(&self.root, slug)
    }

    /// All workflows, in directory order.
    #[must_use]
    pub fn list_workflows(&self) -> Vec<WorkflowRecord> {
        load_kind(&self.root)
    }

    /// The workflow with this slug.
    #[must_use]
    pub fn get_workflow(&self, slug: &str) -> Option<WorkflowRecord> {
        load_one(&self.root, slug)
    }
}

/// Number of records per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Loaded agents.
    pub agents: usize,
    /// Loaded skills.
    pub skills: usize,
    /// Loaded workflows.
    pub workflows: usize,
}

impl Counts {
    /// Count for one kind.
    #[must_use]
    pub const fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Agent => self.agents,
            Kind::Skill => self.skills,
            Kind::Workflow => self.workflows,
        }
    }

    /// Sum over all kinds.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.agents + self.skills + self.workflows
    }
}

/// One complete load of the catalog, sorted by name within each kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    agents: Vec<AgentRecord>,
    skills: Vec<SkillRecord>,
    workflows: Vec<WorkflowRecord>,
}

impl Snapshot {
    /// Load every kind from `content`.
    #[must_use]
    pub fn load(content: &ContentDir) -> Self {
        let mut agents = content.list_agents();
        let mut skills = content.list_skills();
        let mut workflows = content.list_workflows();
        sort_by_name(&mut agents);
        sort_by_name(&mut skills);
        sort_by_name(&mut workflows);
        Self {
            agents,
            skills,
            workflows,
        }
    }

    /// Loaded agents, sorted by name.
    #[must_use]
    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    /// Loaded skills, sorted by name.
    #[must_use]
    pub fn skills(&self) -> &[SkillRecord] {
        &self.skills
    }

    /// Loaded workflows, sorted by name.
    #[must_use]
    pub fn workflows(&self) -> &[WorkflowRecord] {
        &self.workflows
    }

    /// The cached agent with this slug.
    #[must_use]
    pub fn agent(&self, slug: &str) -> Option<&AgentRecord> {
        self.agents.iter().find(|r| r.slug == slug)
    }

    /// The cached skill with this slug.
    #[must_use]
    pub fn skill(&self, slug: &str) -> Option<&SkillRecord> {
        self.skills.iter().find(|r| r.slug == slug)
    }

    /// The cached workflow with this slug.
    #[must_use]
    pub fn workflow(&self, slug: &str) -> Option<&WorkflowRecord> {
        self.workflows.iter().find(|r| r.slug == slug)
    }

    /// Records per kind.
    #[must_use]
    pub fn counts(&self) -> Counts {
        Counts {
            agents: self.agents.len(),
            skills: self.skills.len(),
            workflows: self.workflows.len(),
        }
    }

    /// Slugs of one kind, e.g. for generating detail routes.
    #[must_use]
    pub fn slugs(&self, kind: Kind) -> Vec<&str> {
        match kind {
            Kind::Agent => self.agents.iter().map(|r| r.slug.as_str()).collect(),
            Kind::Skill => self.skills.iter().map(|r| r.slug.as_str()).collect(),
            Kind::Workflow => self.workflows.iter().map(|r| r.slug.as_str()).collect(),
        }
    }

    /// Filter all three kinds with the same query.
    #[must_use]
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        SearchResults {
            agents: filter(&self.agents, query),
            skills: filter(&self.skills, query),
            workflows: filter(&self.workflows, query),
        }
    }

    /// Filter a single kind.
    #[must_use]
    pub fn filter_kind(&self, kind: Kind, query: &str) -> FilteredView<'_> {
        match kind {
            Kind::Agent => FilteredView::Agents(filter(&self.agents, query)),
            Kind::Skill => FilteredView::Skills(filter(&self.skills, query)),
            Kind::Workflow => FilteredView::Workflows(filter(&self.workflows, query)),
        }
    }
}

/// Matches across all kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    /// Matching agents.
    pub agents: Vec<&'a AgentRecord>,
    /// Matching skills.
    pub skills: Vec<&'a SkillRecord>,
    /// Matching workflows.
    pub workflows: Vec<&'a WorkflowRecord>,
}

impl SearchResults<'_> {
    /// Matches per kind.
    #[must_use]
    pub fn counts(&self) -> Counts {
        Counts {
            agents: self.agents.len(),
            skills: self.skills.len(),
            workflows: self.workflows.len(),
        }
    }

    /// Whether nothing matched in any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }
}

/// Matches within one kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "lowercase")]
pub enum FilteredView<'a> {
    /// Matching agents.
    Agents(Vec<&'a AgentRecord>),
    /// Matching skills.
    Skills(Vec<&'a SkillRecord>),
    /// Matching workflows.
    Workflows(Vec<&'a WorkflowRecord>),
}

impl FilteredView<'_> {
    /// The kind these records belong to.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Agents(_) => Kind::Agent,
            Self::Skills(_) => Kind::Skill,
            Self::Workflows(_) => Kind::Workflow,
        }
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Agents(v) => v.len(),
            Self::Skills(v) => v.len(),
            Self::Workflows(v) => v.len(),
        }
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-wide catalog cache.
///
/// Starts unloaded. The first [`ensure_loaded`](Self::ensure_loaded) reads
/// every document; later calls return the same snapshot.
/// [`reload`](Self::reload) replaces the snapshot as a whole, so readers
/// holding the previous `Arc` keep a consistent view.
#[derive(Debug)]
pub struct Catalog {
    content: ContentDir,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl Catalog {
    /// An unloaded catalog over `content_root`.
    #[must_use]
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content: ContentDir::new(content_root),
            snapshot: RwLock::new(None),
        }
    }

    /// An unloaded catalog over the configured content root.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.content_root.clone())
    }

    /// Uncached access to the same content root.
    #[must_use]
    pub fn content(&self) -> &ContentDir {
        &self.content
    }

    /// Whether a snapshot has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    /// The loaded snapshot, if any, without loading.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Load on first use, then return the cached snapshot.
    pub fn ensure_loaded(&self) -> Arc<Snapshot> {
        if let Some(snapshot) = self.current() {
            return snapshot;
        }

        let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have loaded while we waited for the lock.
        if let Some(snapshot) = slot.as_ref() {
            return Arc::clone(snapshot);
        }
        let snapshot = Arc::new(self.build());
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Re-read every document and replace the cached snapshot.
    pub fn reload(&self) -> Arc<Snapshot> {
        let snapshot = Arc::new(self.build());
        let mut slot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    fn build(&self) -> Snapshot {
        let snapshot = Snapshot::load(&self.content);
        let counts = snapshot.counts();
        tracing::info!(
            root = %self.content.root().display(),
            agents = counts.agents,
            skills = counts.skills,
            workflows = counts.workflows,
            "catalog loaded"
        );
        snapshot
    }
}
