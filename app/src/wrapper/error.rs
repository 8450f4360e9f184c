pub use crate::repository::RepositoryError;
use anyhow::Error;
use std::any::Any;
use std::fmt;

pub trait IServiceError: Any {
    fn error_type(&self) -> String {
        "internal_error".to_string()
    }

    fn exit_code(&self) -> u8 {
        1
    }
}

#[derive(Debug)]
pub struct ServiceError {
    type_id: std::any::TypeId,
    error_type: String,
    exit_code: u8,
    inner: Error,
}

pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    pub fn new<E>(err: impl IServiceError, detail: E) -> ServiceError
    where
        Error: From<E>,
    {
        ServiceError {
            type_id: err.type_id(),
            error_type: err.error_type(),
            exit_code: err.exit_code(),
            inner: From::from(detail),
        }
    }

    #[cfg(test)]
    pub fn only(err: impl IServiceError) -> ServiceError {
        let error_type = err.error_type();
        ServiceError {
            type_id: err.type_id(),
            exit_code: err.exit_code(),
            inner: Error::msg(error_type.clone()),
            error_type,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn error_type(&self) -> String {
        self.error_type.clone()
    }

    pub fn is_error_of(&self, err: impl IServiceError) -> bool {
        self.type_id == err.type_id() && self.error_type() == err.error_type()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:#}", self.error_type, self.inner)
    }
}

// anyhow::Error can be treated as ServiceError
impl IServiceError for Error {}

pub enum FutureError {
    JoinError,
}

// for tokio::task::spawn_blocking
impl IServiceError for FutureError {
    fn error_type(&self) -> String {
        match self {
            FutureError::JoinError => "internal_error".to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> ServiceError {
        ServiceError::new(FutureError::JoinError, err)
    }
}

// Errors shared by several layers. No business logic here: anything that a
// caller wants to branch on deserves its own error enum next to the code.
pub enum GeneralError {
    SerializationError,
    InvalidInput,
}

impl GeneralError {
    pub fn serialization_error<E>(detail: E) -> ServiceError
    where
        Error: From<E>,
    {
        ServiceError::new(GeneralError::SerializationError, detail)
    }

    pub fn invalid_input<E>(detail: E) -> ServiceError
    where
        Error: From<E>,
    {
        ServiceError::new(GeneralError::InvalidInput, detail)
    }
}

impl IServiceError for GeneralError {
    fn error_type(&self) -> String {
        use GeneralError::*;

        match self {
            SerializationError => "serialization_error".to_string(),
            InvalidInput => "invalid_input".to_string(),
        }
    }

    fn exit_code(&self) -> u8 {
        use GeneralError::*;

        match self {
            SerializationError => 1,
            InvalidInput => 2,
        }
    }
}
