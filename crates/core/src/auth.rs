use serde::{Deserialize, Serialize};

use crate::InstitutionId;

/// Current-actor information supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
    institution_id: InstitutionId,
    role: String,
}

impl UserIdentity {
    /// Creates a user identity from authentication and tenancy data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        institution_id: InstitutionId,
        role: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
            institution_id,
            role: role.into(),
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the institution linked to the identity.
    #[must_use]
    pub fn institution_id(&self) -> InstitutionId {
        self.institution_id
    }

    /// Returns the raw role claim from the identity provider.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }
}
