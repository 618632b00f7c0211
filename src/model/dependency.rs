//! Dependency graph entries.

/// A node in the dependency graph, identified by a `bom-ref`.
///
/// Children are themselves dependencies and may nest to any depth. Most
/// documents nest one level, listing the refs the node depends on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dependency {
    pub dependency_ref: String,
    pub dependencies: Vec<Dependency>,
}

impl Dependency {
    #[must_use]
    pub fn new(dependency_ref: impl Into<String>) -> Self {
        Self {
            dependency_ref: dependency_ref.into(),
            dependencies: Vec::new(),
        }
    }

    /// Add a direct dependency on `dependency_ref`.
    #[must_use]
    pub fn depends_on(mut self, dependency_ref: impl Into<String>) -> Self {
        self.dependencies.push(Self::new(dependency_ref));
        self
    }

    /// Add a nested dependency entry.
    #[must_use]
    pub fn with_child(mut self, child: Dependency) -> Self {
        self.dependencies.push(child);
        self
    }

    /// Refs of the direct dependencies.
    pub fn direct_refs(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|d| d.dependency_ref.as_str())
    }
}
