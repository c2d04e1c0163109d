//! Error types for the toolcrib engine

use thiserror::Error;

/// Numeric application error codes, stable across the API surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchEntity = 2,
    InsufficientStock = 3,
    TeamBlacklisted = 4,
    AlreadyReturned = 5,
    StillHasOpenItems = 6,
    NotBlacklisted = 7,
    AlreadyBlacklisted = 8,
    NotBorrowable = 9,
    TeamInactive = 10,
    BadValue = 11,
    LockTimeout = 12,
    Conflict = 13,
    InvariantViolation = 14,
    StoreUnavailable = 15,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("insufficient stock for equipment {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: i64,
        requested: i32,
        available: i32,
    },

    #[error("team {team_id} is blacklisted: {reason}")]
    TeamBlacklisted { team_id: i64, reason: String },

    #[error("checkout {0} was already returned")]
    AlreadyReturned(i64),

    #[error("team {team_id} still has {open} open checkout(s)")]
    StillHasOpenItems { team_id: i64, open: usize },

    #[error("team {0} is not blacklisted")]
    NotBlacklisted(i64),

    #[error("team {0} is already blacklisted")]
    AlreadyBlacklisted(i64),

    #[error("equipment {0} is not borrowable")]
    NotBorrowable(i64),

    #[error("team {0} is inactive")]
    TeamInactive(i64),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("timed out waiting for {0}")]
    Timeout(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    /// Stable numeric code for the calling layer
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchEntity,
            AppError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            AppError::TeamBlacklisted { .. } => ErrorCode::TeamBlacklisted,
            AppError::AlreadyReturned(_) => ErrorCode::AlreadyReturned,
            AppError::StillHasOpenItems { .. } => ErrorCode::StillHasOpenItems,
            AppError::NotBlacklisted(_) => ErrorCode::NotBlacklisted,
            AppError::AlreadyBlacklisted(_) => ErrorCode::AlreadyBlacklisted,
            AppError::NotBorrowable(_) => ErrorCode::NotBorrowable,
            AppError::TeamInactive(_) => ErrorCode::TeamInactive,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Timeout(_) => ErrorCode::LockTimeout,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            AppError::Unavailable(_) => ErrorCode::StoreUnavailable,
        }
    }

    /// Whether the caller may retry the same request as-is.
    ///
    /// Contention and transport failures are retryable; domain
    /// refusals are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Timeout(_) | AppError::Conflict(_) | AppError::Unavailable(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;
