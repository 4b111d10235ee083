//! Error type shared by the library and the binary

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value outside a closed domain, e.g. a block kind ordinal not in 1..=7
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
