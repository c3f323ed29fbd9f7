use thiserror::Error;

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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
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

/// Failures of the segment → reduce → fit pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkydipError {
    /// A SKY run appeared before any HOT run could calibrate it.
    #[error("SKY run #{run_index} has no prior HOT run to pair with")]
    NoPriorHot { run_index: usize },
    /// A degree-1 fit needs at least two valid airmass points.
    #[error("insufficient data: {valid} valid airmass point(s), at least 2 required")]
    InsufficientData { valid: usize },
    /// A valid point carried an exactly zero propagated error.
    #[error("airmass point #{index} has zero propagated error (infinite weight)")]
    ZeroError { index: usize },
    /// All points share the same airmass, or the solver did not converge.
    #[error("weighted regression is degenerate (secz values do not span a line)")]
    Degenerate,
}

impl SkydipError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SkydipError::NoPriorHot { .. } | SkydipError::InsufficientData { .. } => 3,
            SkydipError::ZeroError { .. } | SkydipError::Degenerate => 4,
        }
    }
}

impl From<SkydipError> for AppError {
    fn from(err: SkydipError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
