//! Persisted WestFax account settings.
//!
//! Five string fields (username, password, product id, login URL, sender
//! number) plus the notification email cached after the first user-info
//! fetch. Stored as TOML under the platform config dir.
//!
//! The password is stored base64-obfuscated. This is NOT secure, only a
//! shoulder-surfing deterrent; a keyring backend would be the real fix.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub username: String,
    /// Held in plaintext in memory; obfuscated on disk.
    #[serde(with = "obfuscated")]
    pub password: String,
    pub product_id: String,
    pub login_url: String,
    /// Sending fax number (ANI), digits with optional punctuation.
    pub ani: String,
    /// Delivery-receipt email, cached from Security_GetUserInfo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Where these settings were loaded from; `save` writes back here.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Default settings file location: `<config dir>/westfax/settings.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory on this platform")
        })?;
        Ok(base.join("westfax").join(SETTINGS_FILE))
    }

    /// Load settings from `path`. A missing file yields defaults so first
    /// run works without any setup step.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&raw)?
        } else {
            tracing::debug!("no settings file at {}, using defaults", path.display());
            Self::default()
        };
        settings.source = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Write settings to `path`, trimming whitespace from everything except
    /// the password and obfuscating the password.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(&self.trimmed())?;
        std::fs::write(path, body)?;
        tracing::debug!("settings saved to {}", path.display());
        Ok(())
    }

    /// Save back to where the settings came from, or the default location.
    pub fn save(&self) -> Result<()> {
        match &self.source {
            Some(path) => self.save_to(path),
            None => self.save_to(&Self::default_path()?),
        }
    }

    /// Save, swallowing any persistence error. The send workflow must never
    /// fail because the settings file could not be written.
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::debug!("ignoring settings save failure: {e}");
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            product_id: self.product_id.trim().to_string(),
            login_url: self.login_url.trim().to_string(),
            ani: self.ani.trim().to_string(),
            user_email: self
                .user_email
                .as_ref()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            source: self.source.clone(),
        }
    }
}

/// Obfuscate a stored credential (base64). Not encryption.
pub fn obfuscate(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    BASE64.encode(s.as_bytes())
}

/// Reverse [`obfuscate`]. Values that do not decode as base64/UTF-8 are
/// returned unchanged so a hand-edited or legacy plaintext value still works.
pub fn deobfuscate(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    match BASE64.decode(s.as_bytes()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| s.to_string()),
        Err(_) => s.to_string(),
    }
}

mod obfuscated {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &str, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::obfuscate(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        let stored = String::deserialize(de)?;
        Ok(super::deobfuscate(&stored))
    }
}
