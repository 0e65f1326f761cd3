//! # Typed Account Configuration
//!
//! The server seeds the settings page with a namespaced key/value bag at
//! load time. Instead of destructuring that bag ad hoc (and mutating it as
//! ambient page state), [`AccountConfig`] parses it once into an explicit,
//! typed context that is handed to controllers at construction. Updates
//! happen through named methods, never by reaching into a global.
//!
//! Required fields fail parsing with [`ConfigError::MissingField`];
//! optional fields (capability flags, avatar block) fall back to inert
//! defaults.

use crate::errors::ConfigError;
use crate::properties::{Scope, VerificationState};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One server-seeded single-valued property: name, confirmed value, scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededProperty {
    /// Wire name of the property.
    pub name: String,
    /// Server-confirmed value.
    #[serde(default)]
    pub value: String,
    /// Active federation scope.
    pub scope: Scope,
}

/// A server-seeded flag property (e.g. profile visibility).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededFlag {
    /// Wire name of the property.
    pub name: String,
    /// Server-confirmed value.
    pub value: bool,
    /// Active federation scope.
    pub scope: Scope,
}

/// One entry of the additional-email collection as seeded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededEmail {
    /// Server-confirmed address.
    pub value: String,
    /// Active federation scope.
    pub scope: Scope,
    /// Verification code (0/1/2).
    #[serde(default)]
    pub verified: u8,
}

impl SeededEmail {
    /// Decoded verification state.
    #[must_use]
    pub fn verification(&self) -> VerificationState {
        VerificationState::from_code(self.verified)
    }
}

/// The email section of the bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    /// Primary account email.
    pub primary_email: SeededProperty,
    /// Additional emails, in server order.
    #[serde(default)]
    pub additional_emails: Vec<SeededEmail>,
    /// Current notification email selection; empty means "use primary".
    #[serde(default)]
    pub notification_email: String,
}

/// A language or locale option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// ISO-ish code (`"en"`, `"de_DE"`).
    pub code: String,
    /// Human-readable name.
    pub name: String,
}

/// The language section of the bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    /// Currently active language.
    pub active_language: LanguageEntry,
    /// Languages promoted at the top of the picker.
    #[serde(default)]
    pub common_languages: Vec<LanguageEntry>,
    /// Everything else.
    #[serde(default)]
    pub all_languages: Vec<LanguageEntry>,
}

/// The locale section of the bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    /// Currently active locale.
    pub active_locale: LanguageEntry,
    /// Other selectable locales.
    #[serde(default)]
    pub other_locales: Vec<LanguageEntry>,
}

/// The avatar block: scope plus cache-busting version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarInfo {
    /// Active federation scope of the avatar.
    pub scope: Scope,
    /// Version counter, bumped on every avatar change.
    #[serde(default)]
    pub version: u64,
    /// Whether the current avatar is server-generated.
    #[serde(default)]
    pub generated: bool,
}

/// Server capability flags affecting scope selection and editability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Trusted-server federation is configured.
    #[serde(default)]
    pub federation_enabled: bool,
    /// Publishing to the public lookup server is allowed.
    #[serde(default)]
    pub lookup_server_upload_enabled: bool,
    /// The user backend supports display name changes.
    #[serde(default)]
    pub display_name_change_supported: bool,
    /// The user backend supports avatar changes.
    #[serde(default)]
    pub avatar_change_supported: bool,
}

/// The typed configuration context for one settings page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Display name property.
    pub display_name: SeededProperty,
    /// Email section (primary, additional, notification selection).
    pub emails: EmailConfig,
    /// Phone property.
    pub phone: SeededProperty,
    /// Address/location property.
    pub address: SeededProperty,
    /// Website property.
    pub website: SeededProperty,
    /// Twitter handle property.
    pub twitter: SeededProperty,
    /// Fediverse handle property.
    pub fediverse: SeededProperty,
    /// Organisation property.
    pub organisation: SeededProperty,
    /// Role property.
    pub role: SeededProperty,
    /// Headline property.
    pub headline: SeededProperty,
    /// Biography property.
    pub biography: SeededProperty,
    /// Profile visibility flag.
    pub profile_enabled: SeededFlag,
    /// Avatar block.
    pub avatar: AvatarInfo,
    /// Language section.
    pub language: LanguageInfo,
    /// Locale section.
    pub locale: LocaleInfo,
    /// Capability flags.
    pub capabilities: Capabilities,
}

impl AccountConfig {
    /// Parse the server-seeded bag.
    ///
    /// Required: every property block, `emailMap`, `languageMap`,
    /// `localeMap`. Optional: `avatar` (defaults to a private, version-0
    /// block) and all capability flags (default false).
    pub fn from_json(bag: &Value) -> Result<Self, ConfigError> {
        let obj = bag
            .as_object()
            .ok_or(ConfigError::InvalidField {
                field: "<root>",
                reason: "expected object".into(),
            })?;

        Ok(Self {
            display_name: required(obj, "displayName")?,
            emails: required(obj, "emailMap")?,
            phone: required(obj, "phone")?,
            address: required(obj, "location")?,
            website: required(obj, "website")?,
            twitter: required(obj, "twitter")?,
            fediverse: required(obj, "fediverse")?,
            organisation: required(obj, "organisation")?,
            role: required(obj, "role")?,
            headline: required(obj, "headline")?,
            biography: required(obj, "biography")?,
            profile_enabled: required(obj, "profileEnabled")?,
            avatar: optional(obj, "avatar")?.unwrap_or(AvatarInfo {
                scope: Scope::Private,
                version: 0,
                generated: true,
            }),
            language: required(obj, "languageMap")?,
            locale: required(obj, "localeMap")?,
            capabilities: Capabilities {
                federation_enabled: flag(obj, "federationEnabled"),
                lookup_server_upload_enabled: flag(obj, "lookupServerUploadEnabled"),
                display_name_change_supported: flag(obj, "displayNameChangeSupported"),
                avatar_change_supported: flag(obj, "avatarChangeSupported"),
            },
        })
    }

    /// Record a confirmed avatar change (new version, no longer generated).
    pub fn apply_avatar_version(&mut self, version: u64) {
        self.avatar.version = version;
        self.avatar.generated = false;
    }

    /// Flip a capability flag after a live server config change.
    pub fn set_capability(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }
}

fn required<T: for<'de> Deserialize<'de>>(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<T, ConfigError> {
    let value = obj.get(field).ok_or(ConfigError::MissingField(field))?;
    serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

fn optional<T: for<'de> Deserialize<'de>>(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>, ConfigError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| ConfigError::InvalidField {
                field,
                reason: e.to_string(),
            }),
    }
}

fn flag(obj: &serde_json::Map<String, Value>, field: &str) -> bool {
    obj.get(field).and_then(Value::as_bool).unwrap_or(false)
}
