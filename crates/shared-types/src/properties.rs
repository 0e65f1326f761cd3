//! # Account Properties
//!
//! The closed set of editable account properties, their wire keys, and the
//! federation-scope vocabulary. Wire keys and the `Scope` suffix addressing
//! match the server's provisioning API.

use serde::{Deserialize, Serialize};

/// Suffix appended to a property key to address its scope endpoint.
pub const SCOPE_SUFFIX: &str = "Scope";

/// All editable account properties.
///
/// Single-valued properties save under `key()`; the additional-email
/// collection saves under `AdditionalMail.key()` with compound addressing
/// (see `settings-sync::domain::collection`). Scope writes always go to
/// `scope_key()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountProperty {
    /// Full display name.
    DisplayName,
    /// Primary account email.
    Email,
    /// The additional-email collection (multi-valued).
    AdditionalMail,
    /// Phone number.
    Phone,
    /// Postal address / location.
    Address,
    /// Personal website URL.
    Website,
    /// Twitter/X handle.
    Twitter,
    /// Fediverse handle (`user@host`).
    Fediverse,
    /// Organisation name.
    Organisation,
    /// Role / job title.
    Role,
    /// Profile headline.
    Headline,
    /// Profile biography.
    Biography,
    /// Whether the public profile page is enabled.
    ProfileEnabled,
    /// Avatar image (scope only; cropping is out of scope).
    Avatar,
    /// UI language.
    Language,
    /// Formatting locale.
    Locale,
    /// The notification/password-reset email selection.
    NotificationEmail,
}

impl AccountProperty {
    /// Wire key for value writes.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::DisplayName => "displayname",
            Self::Email => "email",
            Self::AdditionalMail => "additional_mail",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Website => "website",
            Self::Twitter => "twitter",
            Self::Fediverse => "fediverse",
            Self::Organisation => "organisation",
            Self::Role => "role",
            Self::Headline => "headline",
            Self::Biography => "biography",
            Self::ProfileEnabled => "profile_enabled",
            Self::Avatar => "avatar",
            Self::Language => "language",
            Self::Locale => "locale",
            Self::NotificationEmail => "notify_email",
        }
    }

    /// Wire key for scope writes (`<property>Scope`).
    #[must_use]
    pub fn scope_key(&self) -> String {
        format!("{}{}", self.key(), SCOPE_SUFFIX)
    }

    /// Properties that are never published outside the instance.
    ///
    /// These only ever offer LOCAL/PRIVATE, regardless of server
    /// capability flags.
    #[must_use]
    pub fn is_unpublished(&self) -> bool {
        matches!(
            self,
            Self::Biography | Self::Headline | Self::Organisation | Self::Role
        )
    }

    /// The property's declared scope subset, before capability flags are
    /// applied.
    #[must_use]
    pub fn default_scopes(&self) -> &'static [Scope] {
        if self.is_unpublished() {
            return &[Scope::Private, Scope::Local];
        }
        match self {
            // Language/locale/notification selection carry no federation
            // scope of their own.
            Self::Language | Self::Locale | Self::NotificationEmail => &[],
            _ => &[
                Scope::Private,
                Scope::Local,
                Scope::Federated,
                Scope::Published,
            ],
        }
    }
}

impl std::fmt::Display for AccountProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Federation visibility level of a property.
///
/// Ordered from least to most visible; the wire strings are the v2 scope
/// constants of the original server API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Visible only to the user (and addressbook sync of trusted servers).
    #[serde(rename = "v2-private")]
    Private,
    /// Visible to logged-in users on this instance.
    #[serde(rename = "v2-local")]
    Local,
    /// Synced to trusted federated servers.
    #[serde(rename = "v2-federated")]
    Federated,
    /// Published to the public lookup server.
    #[serde(rename = "v2-published")]
    Published,
}

impl Scope {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "v2-private",
            Self::Local => "v2-local",
            Self::Federated => "v2-federated",
            Self::Published => "v2-published",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = crate::errors::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v2-private" => Ok(Self::Private),
            "v2-local" => Ok(Self::Local),
            "v2-federated" => Ok(Self::Federated),
            "v2-published" => Ok(Self::Published),
            other => Err(crate::errors::ConfigError::UnknownScope(other.to_string())),
        }
    }
}

/// Verification lifecycle of an email address.
///
/// Wire codes are the original server constants (0/1/2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VerificationState {
    /// Not verified (code 0).
    #[default]
    NotVerified,
    /// Verification email sent, awaiting confirmation (code 1).
    InProgress,
    /// Verified (code 2).
    Verified,
}

impl VerificationState {
    /// Parse from the server's integer code.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::InProgress,
            2 => Self::Verified,
            _ => Self::NotVerified,
        }
    }

    /// The server's integer code.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::NotVerified => 0,
            Self::InProgress => 1,
            Self::Verified => 2,
        }
    }
}
