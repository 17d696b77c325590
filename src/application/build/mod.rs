//! Build use case - pipeline, render, atomic write

mod result;
mod use_case;

pub use result::BuildResult;
pub use use_case::BuildUseCase;
