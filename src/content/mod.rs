//! Content domain: RON-backed controller tuning, level layout, and clip tables.

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{BoxDef, ControllerDef, DataFile, LevelDef};
pub use loader::{ClipSetDef, ContentLoadError, build_clip_library, load_all_content, parse_ron};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content, validate_controller, validate_level};
