use std::path::PathBuf;

#[derive(Debug)]
#[non_exhaustive]
pub enum WriteError {
    /// The output file couldn't be created.  Nothing was written.
    PathUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing failed part way through.  The file may be truncated.
    WriteFailure(std::io::Error),

    /// The image can't be stored as a valid run-length encoded file.
    DegenerateInput(String),
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::PathUnwritable { ref source, .. } => Some(source),
            WriteError::WriteFailure(ref e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::PathUnwritable { path, source } => write!(
                f,
                "PathUnwritable: could not open \"{}\" for writing: {}",
                path.display(),
                source
            ),
            WriteError::WriteFailure(e) => {
                write!(f, "WriteFailure: the image file could not be fully written: {}", e)
            }
            WriteError::DegenerateInput(msg) => write!(f, "DegenerateInput: {}", msg),
        }
    }
}

//-------------------------------------------------------------
// From impls.

impl From<std::io::Error> for WriteError {
    fn from(other: std::io::Error) -> Self {
        WriteError::WriteFailure(other)
    }
}
