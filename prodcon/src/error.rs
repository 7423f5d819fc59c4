//! Error types for worker and orchestration failures.

use std::fmt;
use std::io;

use thiserror::Error;

/// Which side of the buffer a worker thread serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Producer,
    Consumer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Producer => "producer",
            Role::Consumer => "consumer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the orchestrator.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("prodcon: invalid config: {0}")]
    InvalidConfig(String),

    #[error("prodcon: failed to spawn {role} thread: {source}")]
    Spawn {
        role: Role,
        #[source]
        source: io::Error,
    },

    #[error("prodcon: {0} thread panicked")]
    Panicked(Role),
}

pub type Result<T> = std::result::Result<T, WorkerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_worker_error_display() {
        let err = WorkerError::InvalidConfig("capacity must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "prodcon: invalid config: capacity must be greater than 0"
        );

        let err = WorkerError::Panicked(Role::Consumer);
        assert_eq!(err.to_string(), "prodcon: consumer thread panicked");
    }

    #[test]
    fn test_spawn_error_source() {
        let err = WorkerError::Spawn {
            role: Role::Producer,
            source: io::Error::new(io::ErrorKind::OutOfMemory, "no threads left"),
        };
        assert!(err.to_string().contains("producer"));
        assert!(err.source().is_some());
    }
}
