use std::fmt;
use std::io;

use modemsim_frame::FrameError;

// Exit code constants.
// `run`, `send` and `decode` exit with their failed-transfer count instead.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::PayloadTooLarge { .. }
        | FrameError::InvalidText { .. }
        | FrameError::Malformed(_)
        | FrameError::CrcMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::IdsExhausted => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

/// Exit status for a batch: the number of failed transfers.
pub fn failure_count_code(failures: usize) -> i32 {
    i32::try_from(failures).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use modemsim_frame::Malformed;

    use super::*;

    #[test]
    fn data_errors_map_to_data_invalid() {
        let err = frame_error(
            "build failed",
            FrameError::PayloadTooLarge { size: 200, max: 110 },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("build failed: "));

        let err = frame_error(
            "decode failed",
            FrameError::Malformed(Malformed::UnknownKind(9)),
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn exhausted_ids_map_to_failure() {
        assert_eq!(frame_error("x", FrameError::IdsExhausted).code, FAILURE);
    }

    #[test]
    fn io_permission_denied() {
        let err = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code, PERMISSION_DENIED);
    }

    #[test]
    fn failure_count_passthrough() {
        assert_eq!(failure_count_code(0), SUCCESS);
        assert_eq!(failure_count_code(3), 3);
    }
}
