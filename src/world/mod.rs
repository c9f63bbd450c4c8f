//! World model - levels, entities and the world lookup grid
//!
//! Pure transforms from the bound LDtk project into the records the code
//! generator emits. Nothing here touches the filesystem.

mod defs;
mod entity;
mod grid;
mod level;

pub use defs::*;
pub use entity::*;
pub use grid::*;
pub use level::*;
