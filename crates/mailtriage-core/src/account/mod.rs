//! Account configuration and credentials.

pub mod credentials;

pub use credentials::{CredentialError, CredentialResult};

use crate::{Error, Result};

/// Standard IMAPS port.
pub const DEFAULT_IMAP_PORT: u16 = 993;

/// An email account the engine can synchronize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Login address, e.g. `user@example.com`.
    pub address: String,
    /// IMAP server hostname.
    pub host: String,
    /// IMAP server port.
    pub port: u16,
    /// Whether to use implicit TLS.
    pub tls: bool,
}

impl Account {
    /// Creates an account with the default IMAPS port and TLS enabled.
    #[must_use]
    pub fn new(address: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            host: host.into(),
            port: DEFAULT_IMAP_PORT,
            tls: true,
        }
    }

    /// Checks the account for obviously unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] on an empty address, an address without
    /// `@`, or an empty host.
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(Error::Input("account address is empty".to_string()));
        }
        if !self.address.contains('@') {
            return Err(Error::Input(format!(
                "account address '{}' is not an email address",
                self.address
            )));
        }
        if self.host.trim().is_empty() {
            return Err(Error::Input("IMAP host is empty".to_string()));
        }
        Ok(())
    }
}

/// A validated account plus its resolved password, ready to open sessions.
///
/// The password is resolved once, at construction, so later reconnects
/// never block on the keyring.
#[derive(Clone)]
pub struct SessionConfig {
    /// Login address.
    pub address: String,
    /// IMAP server hostname.
    pub host: String,
    /// IMAP server port.
    pub port: u16,
    /// Whether to use implicit TLS.
    pub tls: bool,
    password: String,
}

impl SessionConfig {
    /// Builds a session config, resolving the password from the keyring
    /// or the environment.
    ///
    /// # Errors
    ///
    /// Fails on an invalid account or when no password can be resolved.
    pub fn from_account(account: &Account) -> Result<Self> {
        account.validate()?;
        let password = credentials::resolve_password(&account.address)?;
        Ok(Self::with_password(account, password))
    }

    /// Builds a session config with an explicitly supplied password.
    #[must_use]
    pub fn with_password(account: &Account, password: impl Into<String>) -> Self {
        Self {
            address: account.address.clone(),
            host: account.host.clone(),
            port: account.port,
            tls: account.tls,
            password: password.into(),
        }
    }

    /// Returns the resolved password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("address", &self.address)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("password", &"<redacted>")
            .finish()
    }
}
