//! Entity relationship graph

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

/// Kind of edge between two entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Child takes over the attributes of the target
    InheritsFrom,
    /// Target takes over the attributes of this kind
    InheritsTo,
    /// Plain association, no attributes flow either way
    RelatedTo,
}

impl EdgeKind {
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::InheritsFrom => "inherits from",
            EdgeKind::InheritsTo => "inherits to",
            EdgeKind::RelatedTo => "related to",
        }
    }

    pub fn all_variants() -> &'static [EdgeKind] {
        &[EdgeKind::InheritsFrom, EdgeKind::InheritsTo, EdgeKind::RelatedTo]
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "inherits_from" | "inheritsfrom" => Ok(EdgeKind::InheritsFrom),
            "inherits_to" | "inheritsto" => Ok(EdgeKind::InheritsTo),
            "related_to" | "relatedto" => Ok(EdgeKind::RelatedTo),
            other => Err(format!(
                "Unknown edge kind '{}'. Expected inherits_from, inherits_to or related_to",
                other
            )),
        }
    }
}

/// Edges and owned attributes of one entity kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inherits_from: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inherits_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_to: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl EntityDescriptor {
    /// Targets of one edge list
    pub fn edges(&self, kind: EdgeKind) -> &[String] {
        match kind {
            EdgeKind::InheritsFrom => &self.inherits_from,
            EdgeKind::InheritsTo => &self.inherits_to,
            EdgeKind::RelatedTo => &self.related_to,
        }
    }

    pub(crate) fn edges_mut(&mut self, kind: EdgeKind) -> &mut Vec<String> {
        match kind {
            EdgeKind::InheritsFrom => &mut self.inherits_from,
            EdgeKind::InheritsTo => &mut self.inherits_to,
            EdgeKind::RelatedTo => &mut self.related_to,
        }
    }

    /// Whether `target` appears in any of the three edge lists
    pub fn has_edge_to(&self, target: &str) -> bool {
        EdgeKind::all_variants()
            .iter()
            .any(|kind| self.edges(*kind).iter().any(|t| t == target))
    }
}

/// Read-only map from entity kind to its descriptor
///
/// Built once through [`super::EntityGraphBuilder`]; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityGraph {
    pub(crate) entities: BTreeMap<String, EntityDescriptor>,
}

impl EntityGraph {
    pub fn descriptor(&self, kind: &str) -> Option<&EntityDescriptor> {
        self.entities.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entities.contains_key(kind)
    }

    /// All entity kinds, sorted
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether `target` is reachable from `source` by a single edge of any kind
    ///
    /// Only `source`'s own edge lists are consulted, so the relation is not
    /// symmetric. Unknown sources are related to nothing.
    pub fn are_related(&self, source: &str, target: &str) -> bool {
        self.descriptor(source)
            .is_some_and(|descriptor| descriptor.has_edge_to(target))
    }

    /// Every kind `kind` points at, across all edge lists, first occurrence wins
    pub fn related_kinds(&self, kind: &str) -> Vec<&str> {
        let Some(descriptor) = self.descriptor(kind) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        EdgeKind::all_variants()
            .iter()
            .flat_map(|edge| descriptor.edges(*edge))
            .map(String::as_str)
            .filter(|target| seen.insert(*target))
            .collect()
    }

    /// Attributes of every ancestor reachable through `inherits_from`
    ///
    /// Traversal keeps a visited set, so cycles in the configuration end the
    /// walk instead of recursing forever. Ancestors missing from the graph
    /// contribute nothing.
    pub fn collect_inherited_attributes(&self, kind: &str) -> BTreeSet<String> {
        let mut attributes = BTreeSet::new();

        for ancestor in self.ancestors(kind) {
            if let Some(descriptor) = self.descriptor(ancestor) {
                attributes.extend(descriptor.attributes.iter().cloned());
            }
        }

        attributes
    }

    /// Whether `parent` is a (transitive) `inherits_from` ancestor of `child`
    pub fn is_inheriting(&self, child: &str, parent: &str) -> bool {
        self.ancestors(child).iter().any(|a| *a == parent)
    }

    /// Ancestors of `kind` in depth-first discovery order, each listed once
    fn ancestors<'a>(&'a self, kind: &str) -> Vec<&'a str> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();

        let Some(start) = self.descriptor(kind) else {
            return order;
        };
        let mut stack: Vec<&str> = start.inherits_from.iter().rev().map(String::as_str).collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);

            if let Some(descriptor) = self.descriptor(current) {
                stack.extend(
                    descriptor
                        .inherits_from
                        .iter()
                        .rev()
                        .map(String::as_str)
                        .filter(|parent| !visited.contains(parent)),
                );
            }
        }

        order
    }
}
