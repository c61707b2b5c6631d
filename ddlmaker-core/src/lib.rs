pub mod config;
pub mod constants;
pub mod definition;
pub mod error;
pub mod maker;
pub mod schema;

pub use config::{DbConfig, MakerConfig};
pub use definition::SchemaDefinition;
pub use error::{DdlError, MappingError, Result, ValidationError};
pub use maker::Maker;
