use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Happiness index {0} is outside the allowed range [-10, 10]")]
    IndexOutOfRange(i32),
}
