use serde::{Deserialize, Serialize};

/// Authorization context attached to an inbound call.
///
/// The caller identity is `uid`, or the `userId` claim of the auth token
/// when `uid` is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthContext {
    pub uid: Option<String>,
    pub token_user_id: Option<String>,
}

impl AuthContext {
    pub fn for_user(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            token_user_id: None,
        }
    }

    /// The non-empty caller identity, if any.
    pub fn caller_id(&self) -> Option<&str> {
        self.uid
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.token_user_id.as_deref().filter(|id| !id.is_empty()))
    }
}

/// Entry in the user directory.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub is_disabled: bool,
}

impl UserRecord {
    pub fn enabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_disabled: false,
        }
    }

    pub fn disabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_disabled: true,
        }
    }
}
