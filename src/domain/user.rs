use chrono::{DateTime, Utc};

/// Authenticated caller, as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The provider's subject claim; primary key of the User row.
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Account row, created lazily on first authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.subject.clone(),
            email: identity.email.clone(),
            display_name: identity.name.clone(),
            created_at: Utc::now(),
        }
    }
}
