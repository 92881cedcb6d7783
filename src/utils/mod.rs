pub mod errors;

pub use errors::ServiceError;
