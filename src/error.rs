//! Process-level error type.
//!
//! Every stage of the report returns `Result<_, AppError>`. The error carries
//! the exit status the binary should terminate with, so `main` only has to
//! print and exit.

/// Input file does not exist.
pub const EXIT_FILE_NOT_FOUND: u8 = 1;
/// Input could not be read or does not match the expected schema.
pub const EXIT_INPUT: u8 = 2;
/// Nothing left to aggregate after normalization.
pub const EXIT_EMPTY: u8 = 3;
/// A chart could not be drawn or written.
pub const EXIT_RENDER: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// The one failure the report recognises and reports as such.
    ///
    /// `shown_path` is the path the caller asked for, which is not
    /// necessarily the file that was opened.
    pub fn file_not_found(shown_path: impl std::fmt::Display) -> Self {
        Self::new(
            EXIT_FILE_NOT_FOUND,
            format!("Error: The file '{shown_path}' was not found."),
        )
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn empty_dataset(message: impl Into<String>) -> Self {
        Self::new(EXIT_EMPTY, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(EXIT_RENDER, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
