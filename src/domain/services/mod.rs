//! Domain Services
//!
//! The build stages, all pure text-in/text-out. Nothing here touches the
//! file system; sources arrive as strings and the unit leaves as one.

pub mod assembler;
pub mod conflict_resolver;
pub mod data_loader;
pub mod linker;
pub mod lua_scan;
pub mod public_api;
mod transformer;

pub use assembler::{banner, Assembler, AssemblyInput, EnvironmentHandle, DEFAULT_HEADER};
pub use conflict_resolver::{
    Claim, ConflictResolver, ENVIRONMENT_OWNER, LINKER_OWNER, PREAMBLE_OWNER,
};
pub use linker::{Linker, DEFAULT_TABLE};
pub use public_api::{PublicApi, API_OWNER};
pub use transformer::Transformer;
