//! Error types for buffer operations.

use thiserror::Error;

/// Buffer operation error.
///
/// Neither variant is a failure of the buffer itself. Both tell the caller
/// that the other side is gone or going away and the loop should end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The write side has been closed and, for `consume`, the buffer is drained.
    #[error("buffer: closed")]
    Closed,
    /// The buffer has been shut down; pending items are abandoned.
    #[error("buffer: shut down")]
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_error_display() {
        assert_eq!(format!("{}", BufferError::Closed), "buffer: closed");
        assert_eq!(format!("{}", BufferError::Shutdown), "buffer: shut down");
    }

    #[test]
    fn test_buffer_error_equality() {
        assert_eq!(BufferError::Closed, BufferError::Closed);
        assert_ne!(BufferError::Closed, BufferError::Shutdown);
    }
}
