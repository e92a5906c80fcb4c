use serde::{Deserialize, Serialize};
use crate::core::library::Role;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts lending policy options for the library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    // open loans a member may hold at once
    pub max_active_loans: i64,
    pub loan_period_days: i64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_active_loans: 3,
            loan_period_days: 7,
        }
    }
}

// Principal is the authenticated caller as asserted by the external identity
// provider. The engine itself performs no authorization; commands at the
// presentation boundary check capabilities against the typed roles here.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Principal {
    pub account_id: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(account_id: &str, roles: Vec<Role>) -> Self {
        Self {
            account_id: account_id.to_string(),
            roles,
        }
    }

    pub fn librarian(account_id: &str) -> Self {
        Self::new(account_id, vec![Role::Librarian])
    }

    pub fn is_role(&self, match_role: Role) -> bool {
        for role in self.roles.iter() {
            if *role == match_role {
                return true;
            }
        }
        false
    }

    pub fn is_librarian(&self) -> bool {
        self.is_role(Role::Librarian)
    }

    pub fn is_admin(&self) -> bool {
        self.is_role(Role::Admin)
    }
}
