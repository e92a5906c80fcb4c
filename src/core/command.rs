use async_trait::async_trait;
use crate::core::domain::Principal;
use crate::core::library::{LibraryError, ValidationKind};

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        kind: ValidationKind,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

// Capability gate for management and lending operations. The identity
// provider asserts the roles; this only checks them.
pub(crate) fn require_librarian(principal: &Principal) -> Result<(), CommandError> {
    if principal.is_librarian() {
        Ok(())
    } else {
        Err(CommandError::Access {
            message: format!("account {} lacks the librarian role", principal.account_id),
            reason_code: Some("403".to_string()),
        })
    }
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::NotGranted { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, kind } => {
                CommandError::Validation { message, kind }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{require_librarian, CommandError};
    use crate::core::domain::Principal;
    use crate::core::library::{LibraryError, Role, ValidationKind};

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Access { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), kind: ValidationKind::AlreadyBorrowed };
        let _ = CommandError::Other { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_map_validation_kind() {
        let err = CommandError::from(LibraryError::validation(
            ValidationKind::BorrowLimitExceeded, "too many loans"));
        assert!(matches!(err, CommandError::Validation { kind: ValidationKind::BorrowLimitExceeded, .. }));
    }

    #[tokio::test]
    async fn test_should_require_librarian() {
        assert!(require_librarian(&Principal::librarian("acct")).is_ok());
        assert!(require_librarian(&Principal::new("acct", vec![Role::Member])).is_err());
    }
}
