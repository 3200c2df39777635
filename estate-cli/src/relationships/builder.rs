//! Startup-time construction of the entity graph

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::graph::{EdgeKind, EntityDescriptor, EntityGraph};

/// One relationship registration, as written in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipExtension {
    pub source: String,
    pub target: String,
    pub edge: EdgeKind,
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// Builder for [`EntityGraph`]
///
/// Registration only happens here; the built graph is read-only.
#[derive(Debug, Default)]
pub struct EntityGraphBuilder {
    entities: BTreeMap<String, EntityDescriptor>,
}

impl EntityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing graph, e.g. the shipped defaults
    pub fn from_graph(graph: EntityGraph) -> Self {
        Self {
            entities: graph.entities,
        }
    }

    /// Declare an entity kind with its own attributes, replacing any previous attribute list
    pub fn entity(mut self, kind: &str, attributes: &[&str]) -> Self {
        let descriptor = self.entities.entry(kind.to_string()).or_default();
        descriptor.attributes = attributes.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Add `target` to `source`'s `edge` list and append `attributes` to `source`
    ///
    /// The source entry is created if absent. An edge already present is not
    /// added again; attributes are appended as given, without checking the
    /// existing list.
    pub fn register_relationship(
        mut self,
        source: &str,
        target: &str,
        edge: EdgeKind,
        attributes: &[&str],
    ) -> Self {
        let descriptor = self.entities.entry(source.to_string()).or_default();

        let edges = descriptor.edges_mut(edge);
        if !edges.iter().any(|t| t == target) {
            edges.push(target.to_string());
        }

        descriptor
            .attributes
            .extend(attributes.iter().map(|a| a.to_string()));

        self
    }

    /// Apply registrations loaded from configuration, in order
    pub fn apply_extensions(self, extensions: &[RelationshipExtension]) -> Self {
        extensions.iter().fold(self, |builder, ext| {
            log::debug!(
                "Registering {} {} {}",
                ext.source,
                ext.edge.label(),
                ext.target
            );
            let attributes: Vec<&str> = ext.attributes.iter().map(String::as_str).collect();
            builder.register_relationship(&ext.source, &ext.target, ext.edge, &attributes)
        })
    }

    pub fn build(self) -> EntityGraph {
        EntityGraph {
            entities: self.entities,
        }
    }
}
