//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator
    Admin,
    /// Regular user
    #[default]
    User,
}

/// A user record in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned by the store.
    pub id: u64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address. Neither format nor uniqueness is enforced.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Role of the user.
    #[serde(default)]
    pub role: UserRole,
    /// Whether the account is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Records written without an active flag count as active.
fn default_active() -> bool {
    true
}

impl User {
    /// Builds a record from a create payload.
    ///
    /// Role falls back to [`UserRole::User`] and the active flag to `true`
    /// when the payload leaves them out. Missing names or email become empty
    /// strings; callers are expected to reject such payloads first with
    /// [`NewUser::missing_required`].
    pub fn from_new(id: u64, new: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name.unwrap_or_default(),
            last_name: new.last_name.unwrap_or_default(),
            email: new.email.unwrap_or_default(),
            phone: new.phone,
            role: new.role.unwrap_or_default(),
            is_active: new.is_active.unwrap_or_else(default_active),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch onto this record.
    ///
    /// Fields present in the patch overwrite, absent fields are kept. The
    /// identifier and creation time never change.
    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

/// Payload for creating a user.
///
/// Identifier and timestamps are assigned by the store, so any values a
/// client sends for them are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl NewUser {
    /// Creates a payload with the three required fields set.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Returns true if first name, last name or email is absent or empty.
    pub fn missing_required(&self) -> bool {
        [&self.first_name, &self.last_name, &self.email]
            .iter()
            .any(|field| field.as_deref().is_none_or(str::is_empty))
    }
}

/// Partial update for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `Some(None)` clears the phone number.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number, or clears it with `None`.
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Keeps an explicit `null` distinguishable from an absent key.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
