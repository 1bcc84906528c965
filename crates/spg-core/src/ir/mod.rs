pub mod connections;
pub mod grouping;
pub mod types;

pub use connections::{ConnectionDescriptor, ConnectionInput, OAuth2Type, UnknownOAuth2Type};
pub use grouping::group_tag;
pub use types::{
    HttpVerb, Input, InputChoice, InputField, InputLocation, InputType, UnknownVerb,
};
