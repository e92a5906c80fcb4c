use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use crate::core::command::CommandError;
use crate::core::domain::{Configuration, Principal};
use crate::core::library::Role;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
}

impl AppState {
    pub fn new(branch: &str, store: RepositoryStore) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store,
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

// The gateway authorizer in front of these handlers authenticates the session
// and forwards the verified identity as headers; an absent header yields an
// anonymous principal with no roles, which every gated command rejects.
pub(crate) fn principal_from_headers(headers: &HeaderMap) -> Principal {
    let account_id = headers.get("x-account-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous");
    let roles = headers.get("x-account-roles")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',')
            .filter(|r| !r.trim().is_empty())
            .map(|r| Role::from(r.trim().to_string())).collect())
        .unwrap_or_default();
    Principal::new(account_id, roles)
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Access { .. } => {
                (StatusCode::FORBIDDEN, format!("{:?}", err))
            }
            CommandError::Database { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            CommandError::DuplicateKey { .. } => {
                (StatusCode::CONFLICT, format!("{:?}", err))
            }
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, format!("{:?}", err))
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::Other { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use crate::core::controller::principal_from_headers;

    #[tokio::test]
    async fn test_should_parse_principal_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-account-id", "acct-9".parse().unwrap());
        headers.insert("x-account-roles", "Librarian,Member".parse().unwrap());
        let principal = principal_from_headers(&headers);
        assert_eq!("acct-9", principal.account_id.as_str());
        assert!(principal.is_librarian());
    }

    #[tokio::test]
    async fn test_should_default_to_anonymous() {
        let principal = principal_from_headers(&HeaderMap::new());
        assert_eq!("anonymous", principal.account_id.as_str());
        assert!(!principal.is_librarian());
    }
}
