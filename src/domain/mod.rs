//! Domain layer: the bookmark tree and its move engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod movement;
pub mod mutation;
pub mod path;
pub mod search;
pub mod tree;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use movement::{apply_drag_end, DragEnd, DropLocation, Moved, Skip};
pub use path::{ContainerId, ItemPath};
