use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PathError {
    #[error("invalid number of arguments for {what}: got {got}")]
    InvalidArity { what: &'static str, got: usize },
    #[error("unknown path command {0:?}")]
    UnknownCommand(String),
    #[error("cannot remove a command from an empty sequence")]
    EmptySequence,
}
