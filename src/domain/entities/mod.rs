//! Domain Entities
//!
//! - `ModuleDescriptor` / `ModuleRegistry` - what the manifest declares
//! - `TransformedModule` - a module's source after transformation
//! - `CombinedUnit` - the emitted artifact, section by section

mod module;
mod registry;
mod unit;

pub use module::{ModuleDescriptor, ModuleKind, TopLevelBindings, TransformedModule};
pub use registry::ModuleRegistry;
pub use unit::{CombinedUnit, Segment};
