use core::fmt;

/// Result alias for `imbalance`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph ingestion, construction heuristics and search drivers.
///
/// Corruption of the partition state itself (an odd raw frustration count) is not
/// represented here: it is a programming fault and panics.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty (no vertices, no trial seeds).
    EmptyInput,

    /// Length mismatch between a solution and the vertex count.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Graph format tag is not one of the supported formats.
    UnsupportedFormat(String),

    /// A vertex id outside `0..n`.
    VertexOutOfRange {
        /// Offending vertex id.
        vertex: usize,
        /// Number of vertices.
        n: usize,
    },

    /// An edge from a vertex to itself.
    SelfLoop {
        /// The vertex.
        vertex: usize,
    },

    /// Malformed line in a graph file.
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// I/O failure while reading or writing a graph.
    Io(String),

    /// Generic error with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::UnsupportedFormat(tag) => write!(f, "unsupported graph format '{tag}'"),
            Error::VertexOutOfRange { vertex, n } => {
                write!(f, "vertex {vertex} out of range for graph with {n} vertices")
            }
            Error::SelfLoop { vertex } => write!(f, "self-loop on vertex {vertex}"),
            Error::Parse { line, message } => write!(f, "line {line}: {message}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
