//! Level background conversion
//!
//! Each level's PNG export becomes an indexed BMP the game's image importer
//! understands, plus the JSON descriptor it reads next to it.

mod convert;
mod quantize;

pub use convert::*;
pub use quantize::*;
