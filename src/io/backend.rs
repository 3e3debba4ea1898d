use crate::model::Item;

/// Error type for backend exchanges. Every variant is fatal to the
/// operation that hit it; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{command} exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("malformed backend payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("no record with identity {0}")]
    NotFound(String),
    #[error("{count} records share identity {uuid}; refusing to guess")]
    DuplicateIdentity { uuid: String, count: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The export/import boundary of the task store.
///
/// `export` takes whitespace-free filter tokens (an empty slice means every
/// item) and returns the matching records as the backend reports them.
/// `import` writes one record, creating it when it has no identity.
pub trait Backend {
    fn export(&mut self, filter: &[String]) -> Result<Vec<Item>, BackendError>;
    fn import(&mut self, item: &Item) -> Result<(), BackendError>;
}
