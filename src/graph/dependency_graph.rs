//! Dependency graph built from installed package manifests.
//!
//! Nodes are packages keyed by name (case-insensitive), each holding one real
//! version plus the set of declared ranges that resolved to it. Edges point
//! from the dependent package to the dependency and carry the declared range.

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use super::error::{GraphError, GraphResult};
use super::metadata::DependencyMetadata;
use super::store::{NodeStore, RelationStore};

/// Represents a node in the dependency graph.
///
/// Each node is one installed package at its real version. `aliases` lists
/// every version string that has been resolved to this node, starting with
/// `version` itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyNode<D> {
    /// Package name (e.g., "react", "lodash")
    pub name: String,
    /// Caller payload, typically the raw manifest
    pub data: D,
    /// Installed ("real") version
    pub version: String,
    /// Versions and ranges equivalent to `version`; never shrinks
    pub aliases: Vec<String>,
}

impl<D> DependencyNode<D> {
    /// Creates a node whose only alias is its real version.
    ///
    /// # Example
    ///
    /// ```rust
    /// use depgraph::graph::DependencyNode;
    ///
    /// let node = DependencyNode::new("react", "18.2.0", ());
    /// assert_eq!(node.aliases, vec!["18.2.0".to_string()]);
    /// ```
    pub fn new(name: impl Into<String>, version: impl Into<String>, data: D) -> Self {
        let version = version.into();
        Self {
            name: name.into(),
            data,
            aliases: vec![version.clone()],
            version,
        }
    }

    /// Returns true if `version` is one of this node's aliases.
    pub fn has_alias(&self, version: &str) -> bool {
        self.aliases.iter().any(|alias| alias == version)
    }
}

/// A directed graph of package dependencies.
///
/// The graph owns one [`NodeStore`] and one [`RelationStore`]. It exposes the
/// low-level node/edge primitives (`add_node`, `mark_dependency`, ...) and the
/// dependency vocabulary layered on top of them (`add_real_dependency`,
/// `add_implied_dependency`, `create_inter_dependency`, ...).
///
/// Edges are keyed by the bare dependency name and carry the declared range.
///
/// # Example
///
/// ```rust
/// use depgraph::graph::{DependencyGraph, DependencyMetadata};
///
/// let mut graph = DependencyGraph::new();
/// graph.add_real_dependency(&DependencyMetadata::new("a", "1.0.0"), ()).unwrap();
/// graph.add_real_dependency(&DependencyMetadata::new("b", "2.3.1"), ()).unwrap();
///
/// let range = DependencyMetadata::new("b", "^2.0.0");
/// graph.add_implied_dependency(&range).unwrap();
/// graph.create_inter_dependency("a", &range).unwrap();
///
/// assert_eq!(graph.get_dependency_aliases("b").unwrap(), ["2.3.1", "^2.0.0"]);
/// assert_eq!(graph.list_dependencies_of_dependency("a").unwrap()["b"], "^2.0.0");
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<D = serde_json::Value> {
    nodes: NodeStore<DependencyNode<D>>,
    relations: RelationStore<String>,
}

impl<D> Default for DependencyGraph<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> DependencyGraph<D> {
    /// Creates a new empty dependency graph.
    pub fn new() -> Self {
        Self {
            nodes: NodeStore::new(),
            relations: RelationStore::new(),
        }
    }

    // ------------------------------------------------------------------
    // Node and edge primitives
    // ------------------------------------------------------------------

    /// Adds a node and an empty edge bucket for it.
    ///
    /// Fails with [`GraphError::NameMismatch`] if `node.name` is not `name`,
    /// and with [`GraphError::AlreadyExists`] if a node with the same name
    /// (both compared case-insensitively) is present.
    pub fn add_node(&mut self, name: &str, node: DependencyNode<D>) -> GraphResult<()> {
        if node.name.to_lowercase() != name.to_lowercase() {
            return Err(GraphError::NameMismatch {
                key: name.to_string(),
                node: node.name,
            });
        }
        if self.nodes.exists(name) {
            return Err(GraphError::AlreadyExists(name.to_string()));
        }
        self.nodes.set(name, node);
        self.relations.init(name);
        Ok(())
    }

    /// Gets a node by name.
    pub fn get_node(&self, name: &str) -> GraphResult<&DependencyNode<D>> {
        self.nodes.get(name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.exists(name)
    }

    /// Node names in insertion order.
    pub fn list_nodes(&self) -> Vec<String> {
        self.nodes.names()
    }

    /// Records the edge `from -> to` with `payload`, overwriting any earlier one.
    ///
    /// `from` is checked before `to`; the graph is untouched if either is
    /// missing.
    pub fn mark_dependency(
        &mut self,
        from: &str,
        to: &str,
        payload: impl Into<String>,
    ) -> GraphResult<()> {
        if !self.nodes.exists(from) {
            return Err(GraphError::NotFound(from.to_string()));
        }
        if !self.nodes.exists(to) {
            return Err(GraphError::NotFound(to.to_string()));
        }
        self.relations.set(from, to, payload.into())
    }

    /// Returns true if the edge `from -> to` exists. Never fails.
    pub fn has_dependency(&self, from: &str, to: &str) -> bool {
        self.relations.exists(from, to)
    }

    /// Outgoing edges of `of`, as target name -> payload.
    pub fn list_dependencies(&self, of: &str) -> GraphResult<IndexMap<String, String>> {
        let bucket = self.relations.get(of)?;
        Ok(bucket
            .iter()
            .map(|(to, payload)| (to.to_string(), payload.clone()))
            .collect())
    }

    /// Incoming edges of `of`, as source name -> payload.
    ///
    /// Unknown names simply have no dependants.
    pub fn list_dependants(&self, of: &str) -> IndexMap<String, String> {
        self.relations.dependants_of(of)
    }

    // ------------------------------------------------------------------
    // Dependency vocabulary
    // ------------------------------------------------------------------

    /// Registers an installed package as a node.
    pub fn add_real_dependency(&mut self, meta: &DependencyMetadata, data: D) -> GraphResult<()> {
        let node = DependencyNode::new(meta.name.clone(), meta.version.clone(), data);
        self.add_node(&meta.name, node)
    }

    /// Appends `meta.version` to the aliases of the existing node `meta.name`.
    ///
    /// Fails with [`GraphError::NotFound`] if there is no such node, and with
    /// [`GraphError::VersionAlreadyExists`] if the version is already an alias.
    ///
    /// # Example
    ///
    /// ```rust
    /// use depgraph::graph::{DependencyGraph, DependencyMetadata, GraphError};
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_real_dependency(&DependencyMetadata::new("foo", "1"), ()).unwrap();
    /// graph.add_implied_dependency(&DependencyMetadata::new("foo", "2")).unwrap();
    ///
    /// let again = graph.add_implied_dependency(&DependencyMetadata::new("foo", "2"));
    /// assert!(matches!(again, Err(GraphError::VersionAlreadyExists { .. })));
    /// ```
    pub fn add_implied_dependency(&mut self, meta: &DependencyMetadata) -> GraphResult<()> {
        let node = self.nodes.get_mut(&meta.name)?;
        if node.has_alias(&meta.version) {
            return Err(GraphError::VersionAlreadyExists {
                name: meta.name.clone(),
                version: meta.version.clone(),
            });
        }
        node.aliases.push(meta.version.clone());
        Ok(())
    }

    /// Returns a predicate telling whether a version is an alias of `name`.
    ///
    /// The lookup of `name` happens once, up front; the predicate sees the
    /// aliases as they were at that moment.
    pub fn version_exists(&self, name: &str) -> GraphResult<impl Fn(&str) -> bool + '_> {
        let node = self.get_node(name)?;
        Ok(move |version: &str| node.has_alias(version))
    }

    /// Returns true if `version` is an alias of `name`.
    pub fn has_version(&self, name: &str, version: &str) -> GraphResult<bool> {
        Ok(self.get_node(name)?.has_alias(version))
    }

    pub fn get_dependency_data(&self, name: &str) -> GraphResult<&D> {
        Ok(&self.get_node(name)?.data)
    }

    pub fn get_dependency_version(&self, name: &str) -> GraphResult<&str> {
        Ok(&self.get_node(name)?.version)
    }

    pub fn get_dependency_aliases(&self, name: &str) -> GraphResult<&[String]> {
        Ok(&self.get_node(name)?.aliases)
    }

    /// Records that `from` declared a dependency on `meta.name` at `meta.version`.
    pub fn create_inter_dependency(
        &mut self,
        from: &str,
        meta: &DependencyMetadata,
    ) -> GraphResult<()> {
        self.mark_dependency(from, &meta.name, meta.version.clone())
    }

    pub fn list_dependencies_of_dependency(
        &self,
        name: &str,
    ) -> GraphResult<IndexMap<String, String>> {
        self.list_dependencies(name)
    }

    pub fn list_dependants_of_dependency(&self, name: &str) -> IndexMap<String, String> {
        self.list_dependants(name)
    }

    /// `{name, version}` of every node, in insertion order.
    pub fn list_all_real_dependencies(&self) -> Vec<DependencyMetadata> {
        self.nodes
            .iter()
            .map(|(_, node)| DependencyMetadata::new(node.name.clone(), node.version.clone()))
            .collect()
    }

    /// Every node reachable from `name` over outgoing edges, breadth-first.
    ///
    /// Each node appears once, by canonical name. `name` itself is left out
    /// even when a cycle leads back to it.
    pub fn transitive_dependencies(&self, name: &str) -> GraphResult<Vec<String>> {
        let start = self.get_node(name)?;
        let mut seen = HashSet::from([start.name.to_lowercase()]);
        let mut queue = VecDeque::from([start.name.clone()]);
        let mut reached = Vec::new();

        while let Some(current) = queue.pop_front() {
            for target in self.relations.get(&current)?.keys() {
                let target = &self.get_node(target)?.name;
                if seen.insert(target.to_lowercase()) {
                    reached.push(target.clone());
                    queue.push_back(target.clone());
                }
            }
        }

        Ok(reached)
    }

    /// Builds a petgraph snapshot: node weights are names, edge weights are
    /// declared ranges.
    pub fn to_petgraph(&self) -> DiGraph<String, String> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let mut indices: HashMap<String, NodeIndex> = HashMap::with_capacity(self.node_count());

        for (name, _) in self.nodes.iter() {
            let idx = graph.add_node(name.to_string());
            indices.insert(name.to_lowercase(), idx);
        }

        for (from, bucket) in self.relations.iter() {
            let Some(&from_idx) = indices.get(&from.to_lowercase()) else {
                continue;
            };
            for (to, payload) in bucket.iter() {
                if let Some(&to_idx) = indices.get(&to.to_lowercase()) {
                    graph.add_edge(from_idx, to_idx, payload.clone());
                }
            }
        }

        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.relations.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
