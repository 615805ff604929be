//! Core module - fundamental types and utilities

pub mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod fields;
pub mod links;
pub mod transport;

pub use codec::encode_fields;
pub use config::{Config, ConfigError};
pub use entity::Entity;
pub use error::{DradisError, Result};
pub use fields::OrderedFieldMap;
pub use links::{NodeRef, ProjectRef};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, Transport, TransportError,
    UploadPart,
};
