//! Data model: the document tree, the reference-definition table, and the
//! records exchanged with host collaborators.

mod definition;
mod fluid;
mod tree;

pub use definition::DefinitionTable;
pub use fluid::{DocumentFile, FileNode, FluidImage};
pub use tree::{Node, NodeId, NodeKind, Tree};
