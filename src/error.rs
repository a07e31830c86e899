use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollcallError {
    #[error("Employee not found: roll number {0}")]
    EmployeeNotFound(u32),

    #[error("Vacation record not found: {0}")]
    VacationNotFound(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RollcallError>;
