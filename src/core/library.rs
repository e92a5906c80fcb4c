use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// ValidationKind enumerates the lending business rules a caller can violate.
// All of them are recoverable: fix the input and retry.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ValidationKind {
    AlreadyBorrowed,
    BorrowLimitExceeded,
    NonBorrowableCategory,
    DuplicateEmail,
    MemberBlocked,
}

impl Display for ValidationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::AlreadyBorrowed => write!(f, "AlreadyBorrowed"),
            ValidationKind::BorrowLimitExceeded => write!(f, "BorrowLimitExceeded"),
            ValidationKind::NonBorrowableCategory => write!(f, "NonBorrowableCategory"),
            ValidationKind::DuplicateEmail => write!(f, "DuplicateEmail"),
            ValidationKind::MemberBlocked => write!(f, "MemberBlocked"),
        }
    }
}

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        kind: ValidationKind,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(kind: ValidationKind, message: &str) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), kind }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    // Violated business rule, if this error is one.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            LibraryError::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::AccessDenied { .. } => { false }
            LibraryError::NotGranted { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::NotGranted { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, kind } => {
                write!(f, "{} {}", kind, message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for Repository .
pub type LibraryResult<T> = Result<T, LibraryError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// MediaKind is the closed catalog category enumeration. Board games are
// catalogued but can never be lent out.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum MediaKind {
    Book,
    Dvd,
    Cd,
    BoardGame,
}

impl MediaKind {
    pub fn borrowable(&self) -> bool {
        *self != MediaKind::BoardGame
    }
}

impl From<String> for MediaKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Book" => MediaKind::Book,
            "Dvd" => MediaKind::Dvd,
            "Cd" => MediaKind::Cd,
            "BoardGame" => MediaKind::BoardGame,
            _ => MediaKind::Book,
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            MediaKind::Book => write!(f, "Book"),
            MediaKind::Dvd => write!(f, "Dvd"),
            MediaKind::Cd => write!(f, "Cd"),
            MediaKind::BoardGame => write!(f, "BoardGame"),
        }
    }
}

// LoanStatus mirrors the effective return date: a loan is Open until the item
// is physically returned. The due date never closes a loan.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Open,
    Returned,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Open" => LoanStatus::Open,
            "Returned" => LoanStatus::Returned,
            _ => LoanStatus::Open,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Open => write!(f, "Open"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Librarian,
    Member,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Admin" => Role::Admin,
            "Librarian" => Role::Librarian,
            "Member" => Role::Member,
            _ => Role::Member,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Librarian => write!(f, "Librarian"),
            Role::Member => write!(f, "Member"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, LoanStatus, MediaKind, Role, ValidationKind};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_error() {
        assert!(matches!(LibraryError::access_denied("test", None), LibraryError::AccessDenied{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_granted_error() {
        assert!(matches!(LibraryError::not_granted("test", None), LibraryError::NotGranted{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        let err = LibraryError::validation(ValidationKind::AlreadyBorrowed, "test");
        assert!(matches!(err, LibraryError::Validation{ message: _, kind: _ }));
        assert_eq!(Some(ValidationKind::AlreadyBorrowed), err.validation_kind());
        assert_eq!(None, LibraryError::not_found("test").validation_kind());
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ message: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("400".to_string()), false), LibraryError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LibraryError::database("test", None, false).retryable());
        assert_eq!(false, LibraryError::duplicate_key("test").retryable());
        assert_eq!(false, LibraryError::not_found("test").retryable());
        assert_eq!(true, LibraryError::unavailable("test", None, true).retryable());
        assert_eq!(false, LibraryError::validation(ValidationKind::DuplicateEmail, "test").retryable());
        assert_eq!(false, LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_format_media_kind() {
        let kinds = vec![
            MediaKind::Book,
            MediaKind::Dvd,
            MediaKind::Cd,
            MediaKind::BoardGame,
        ];
        for kind in kinds {
            let str = kind.to_string();
            let str_kind = MediaKind::from(str);
            assert_eq!(kind, str_kind);
        }
        assert!(MediaKind::Book.borrowable());
        assert!(!MediaKind::BoardGame.borrowable());
    }

    #[tokio::test]
    async fn test_should_format_loan_status() {
        for status in vec![LoanStatus::Open, LoanStatus::Returned] {
            assert_eq!(status, LoanStatus::from(status.to_string()));
        }
    }

    #[tokio::test]
    async fn test_should_format_roles() {
        for role in vec![Role::Admin, Role::Librarian, Role::Member] {
            assert_eq!(role, Role::from(role.to_string()));
        }
    }
}
