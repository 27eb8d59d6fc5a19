use std::fmt::{self, Display};

/// The kind of error that occurred while fetching a fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not complete, or the server answered with a
    /// non-success status.
    Transport,
    /// The response arrived but its payload did not have the expected
    /// shape.
    Shape,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::Shape => write!(f, "Unexpected response shape"),
        }
    }
}
