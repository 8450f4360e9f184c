use crate::error::*;

#[derive(Debug)]
pub enum RepositoryError {
    WriteError,
}

impl IServiceError for RepositoryError {
    fn error_type(&self) -> String {
        use RepositoryError::*;

        match self {
            WriteError => "write_error",
        }
        .to_string()
    }

    fn exit_code(&self) -> u8 {
        use RepositoryError::*;

        match self {
            WriteError => 1,
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> ServiceError {
        ServiceError::new(RepositoryError::WriteError, err)
    }
}
