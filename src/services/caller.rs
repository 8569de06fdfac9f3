use crate::models;
use std::sync::Arc;

/// Who is acting, as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User { id: String, role: String },
}

impl Caller {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User { id, .. } => Some(id.as_str()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    pub fn has_role(&self, role: &str) -> bool {
        matches!(self, Self::User { role: own, .. } if own == role)
    }

    pub fn owns(&self, owner_user_id: &str) -> bool {
        self.user_id() == Some(owner_user_id)
    }

    /// Public rows are visible to anyone, private ones to their owner only.
    pub fn can_read(&self, is_public: bool, owner_user_id: &str) -> bool {
        is_public || self.owns(owner_user_id)
    }
}

impl From<&models::User> for Caller {
    fn from(user: &models::User) -> Self {
        Self::User {
            id: user.id.clone(),
            role: user.role.clone(),
        }
    }
}

impl From<Option<&Arc<models::User>>> for Caller {
    fn from(user: Option<&Arc<models::User>>) -> Self {
        user.map(|user| Caller::from(user.as_ref()))
            .unwrap_or(Caller::Anonymous)
    }
}
