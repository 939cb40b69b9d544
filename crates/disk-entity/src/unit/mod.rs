//! Unit (file or folder) domain entities.

pub mod import;
pub mod kind;
pub mod model;
pub mod tree;

pub use import::ImportRecord;
pub use kind::UnitKind;
pub use model::Unit;
pub use tree::UnitNode;
