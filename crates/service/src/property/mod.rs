//! Property module: repository abstraction and the service on top of it.

pub mod repository;
pub mod service;

pub use repository::{PropertyRepository, SeaOrmPropertyRepository};
pub use service::PropertyService;
