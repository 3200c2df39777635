//! Entity relationship model
//!
//! Describes, per entity kind, which kinds it inherits attributes from
//! (`inherits_from`), which inherit from it (`inherits_to`) and which it is
//! merely associated with (`related_to`). Inheritance means a child record
//! logically includes its ancestors' fields for display and automation;
//! association only warrants a cross-reference.

pub mod builder;
pub mod graph;
pub mod schema;

pub use builder::{EntityGraphBuilder, RelationshipExtension};
pub use graph::{EdgeKind, EntityDescriptor, EntityGraph};
