pub mod classifier;
pub mod name_normalizer;
pub mod partition;
pub mod security;

pub use classifier::{ClassifiedInputs, InputClassifier, InputOrigin, RawInput, SchemaClassifier};
pub use partition::{PartitionedInputs, partition};
pub use security::security_schemes_to_connections;
