pub mod actions;
pub mod codegen;
pub mod connections;
pub mod emitters;
pub mod error;
pub mod generator;
pub mod perform;

pub use actions::{ActionDescriptor, ActionInput, assemble, operations_to_actions};
pub use connections::build_connection_declaration;
pub use error::GenerateError;
pub use generator::{Descriptors, SpectralConfig, SpectralGenerator};
pub use perform::{PerformTemplate, build_perform};
