//! Domain Layer
//!
//! The bundler proper, with no I/O.
//!
//! ## Structure
//!
//! - `entities/` - ModuleDescriptor, ModuleRegistry, TransformedModule, CombinedUnit
//! - `value_objects/` - Identifier, StrategyKind, CallStyle, ContentHash
//! - `services/` - lua_scan, Transformer, data loader, ConflictResolver, Linker, Assembler
//! - `policies/` - ScopeStrategy and its three implementations
//! - `ports/` - FileSystem trait implemented by infrastructure

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
