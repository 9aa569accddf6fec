//! Secure credential storage using the system keyring.
//!
//! Passwords live in the platform's native credential store:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager
//!
//! For headless environments without a keyring, the `MAILTRIAGE_PASSWORD`
//! environment variable acts as a fallback.

use keyring::Entry;
use tracing::debug;

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "mailtriage";

/// Environment variable consulted when the keyring has no entry.
pub const PASSWORD_ENV: &str = "MAILTRIAGE_PASSWORD";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// No password found in the keyring or the environment.
    #[error("No password stored for account '{0}'")]
    Missing(String),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Stores the IMAP password for an account address.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn store_password(address: &str, password: &str) -> CredentialResult<()> {
    let entry = Entry::new(SERVICE_NAME, address)?;
    entry.set_password(password)?;
    debug!(address, "Stored password");
    Ok(())
}

/// Retrieves the IMAP password for an account address from the keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn get_password(address: &str) -> CredentialResult<Option<String>> {
    let entry = Entry::new(SERVICE_NAME, address)?;
    match entry.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => {
            debug!(address, "No keyring entry");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes the stored password for an account address.
///
/// Missing entries are not an error.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn delete_password(address: &str) -> CredentialResult<()> {
    let entry = Entry::new(SERVICE_NAME, address)?;
    match entry.delete_credential() {
        Ok(()) => {
            debug!(address, "Deleted password");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Resolves the password for an account address.
///
/// Checks the keyring first, then the [`PASSWORD_ENV`] environment
/// variable.
///
/// # Errors
///
/// Returns [`CredentialError::Missing`] when neither source has a
/// password, or a keyring error other than a missing entry.
pub fn resolve_password(address: &str) -> CredentialResult<String> {
    // A broken keyring backend should not mask the env fallback.
    let from_keyring = match get_password(address) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(?e, "Keyring unavailable, trying environment");
            None
        }
    };

    if let Some(password) = from_keyring {
        return Ok(password);
    }

    std::env::var(PASSWORD_ENV).map_or_else(
        |_| Err(CredentialError::Missing(address.to_string())),
        Ok,
    )
}
