//! Mail store abstraction and its IMAP implementation.

use mailtriage_imap::{
    Authenticated, Client, Flag, ImapStream, Mailbox, Selected, SequenceSet, StoreAction, connect,
};
use mailtriage_mime::{decoded_field, parse_header_block};
use tracing::{debug, info};

use crate::account::SessionConfig;
use crate::{Error, Result};

/// Header fields fetched for classification.
const TRIAGE_HEADERS: &[&str] = &["Subject", "From"];

/// A message located by sequence number, with the headers triage needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    /// Sequence number in the currently selected folder.
    pub seq: u32,
    /// Decoded Subject header, empty if absent.
    pub subject: String,
    /// Decoded From header, empty if absent.
    pub sender: String,
}

/// The mailbox operations the synchronizer needs from a backend.
///
/// The IMAP implementation is [`ImapStore`]; tests use scripted
/// implementations to exercise sequencing without a server.
#[allow(async_fn_in_trait)]
pub trait MailStore {
    /// Opens a connection and authenticates. A no-op when connected.
    async fn connect(&mut self) -> Result<()>;

    /// Whether a live connection is believed to exist.
    fn is_connected(&self) -> bool;

    /// Logs out and drops the connection. A no-op when disconnected.
    async fn disconnect(&mut self) -> Result<()>;

    /// Names of all folders on the server.
    async fn list_folders(&mut self) -> Result<Vec<String>>;

    /// Creates a folder. Fails if it already exists.
    async fn create_folder(&mut self, name: &str) -> Result<()>;

    /// Selects a folder, returning its message count.
    async fn select_folder(&mut self, name: &str) -> Result<u32>;

    /// Searches the selected folder, returning sequence numbers.
    async fn search(&mut self, criteria: &str) -> Result<Vec<u32>>;

    /// Fetches the triage headers of one message in the selected folder.
    async fn fetch_headers(&mut self, seq: u32) -> Result<MessageHandle>;

    /// Copies a message from the selected folder into another folder.
    async fn copy_message(&mut self, seq: u32, folder: &str) -> Result<()>;

    /// Flags a message in the selected folder as `\Deleted`.
    async fn mark_deleted(&mut self, seq: u32) -> Result<()>;

    /// Expunges the selected folder.
    async fn expunge(&mut self) -> Result<()>;
}

enum ImapState {
    Disconnected,
    Connected(Client<ImapStream, Authenticated>),
    Selected {
        client: Client<ImapStream, Selected>,
        folder: String,
    },
}

impl ImapState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected(_) => "connected",
            Self::Selected { .. } => "selected",
        }
    }
}

/// [`MailStore`] backed by a real IMAP connection.
///
/// The connection is opened lazily and reopened on demand: any operation
/// on a disconnected store dials and logs in first. A failed operation
/// that consumes the underlying client leaves the store disconnected, so
/// the next operation reconnects rather than erroring again.
pub struct ImapStore {
    config: SessionConfig,
    state: ImapState,
}

impl std::fmt::Debug for ImapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImapStore")
            .field("config", &self.config)
            .field("state", &self.state.name())
            .finish()
    }
}

impl ImapStore {
    /// Creates a disconnected store for the given session.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: ImapState::Disconnected,
        }
    }

    /// The currently selected folder, if any.
    #[must_use]
    pub fn selected_folder(&self) -> Option<&str> {
        match &self.state {
            ImapState::Selected { folder, .. } => Some(folder),
            _ => None,
        }
    }

    async fn ensure_connected(&mut self) -> Result<()> {
        if matches!(self.state, ImapState::Disconnected) {
            self.connect().await?;
        }
        Ok(())
    }

    /// Returns the selected-state client, or an invalid-state error.
    fn selected_client(&mut self) -> Result<&mut Client<ImapStream, Selected>> {
        match &mut self.state {
            ImapState::Selected { client, .. } => Ok(client),
            other => Err(Error::Imap(mailtriage_imap::Error::InvalidState(format!(
                "no folder selected (state: {})",
                other.name()
            )))),
        }
    }
}

impl MailStore for ImapStore {
    async fn connect(&mut self) -> Result<()> {
        if !matches!(self.state, ImapState::Disconnected) {
            return Ok(());
        }

        let stream = connect(self.config.host.as_str(), self.config.port, self.config.tls).await?;
        let client = Client::from_stream(stream).await?;
        let client = client
            .login(&self.config.address, self.config.password())
            .await?;

        info!(host = %self.config.host, address = %self.config.address, "Connected");
        self.state = ImapState::Connected(client);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !matches!(self.state, ImapState::Disconnected)
    }

    async fn disconnect(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, ImapState::Disconnected);
        let result = match state {
            ImapState::Disconnected => return Ok(()),
            ImapState::Connected(client) => client.logout().await,
            ImapState::Selected { client, .. } => client.logout().await,
        };
        if let Err(e) = result {
            debug!(?e, "Logout failed, connection dropped anyway");
        }
        Ok(())
    }

    async fn list_folders(&mut self) -> Result<Vec<String>> {
        self.ensure_connected().await?;
        let items = match &mut self.state {
            ImapState::Connected(client) => client.list("", "*").await?,
            ImapState::Selected { client, .. } => client.list("", "*").await?,
            ImapState::Disconnected => return Err(not_connected()),
        };
        Ok(items
            .into_iter()
            .map(|item| item.mailbox.0)
            .collect())
    }

    async fn create_folder(&mut self, name: &str) -> Result<()> {
        self.ensure_connected().await?;
        let mailbox = Mailbox::new(name);
        match &mut self.state {
            ImapState::Connected(client) => client.create(&mailbox).await?,
            ImapState::Selected { client, .. } => client.create(&mailbox).await?,
            ImapState::Disconnected => return Err(not_connected()),
        }
        info!(folder = name, "Created folder");
        Ok(())
    }

    async fn select_folder(&mut self, name: &str) -> Result<u32> {
        self.ensure_connected().await?;
        let mailbox = Mailbox::new(name);

        // SELECT consumes the typestate client; on failure the store is
        // left disconnected and the next operation reconnects.
        let state = std::mem::replace(&mut self.state, ImapState::Disconnected);
        let (client, status) = match state {
            ImapState::Connected(client) => client.select(&mailbox).await?,
            ImapState::Selected { client, .. } => client.select(&mailbox).await?,
            ImapState::Disconnected => return Err(not_connected()),
        };

        debug!(folder = name, exists = status.exists, "Selected folder");
        self.state = ImapState::Selected {
            client,
            folder: name.to_string(),
        };
        Ok(status.exists)
    }

    async fn search(&mut self, criteria: &str) -> Result<Vec<u32>> {
        let client = self.selected_client()?;
        let hits = client.search(criteria).await?;
        Ok(hits.into_iter().map(mailtriage_imap::SeqNum::get).collect())
    }

    async fn fetch_headers(&mut self, seq: u32) -> Result<MessageHandle> {
        let sequence = sequence_set(seq)?;
        let client = self.selected_client()?;

        let mut fetched = client.fetch_header_fields(sequence, TRIAGE_HEADERS).await?;
        let (_, raw) = fetched
            .drain(..)
            .next()
            .ok_or_else(|| Error::Input(format!("no such message: {seq}")))?;

        let fields = parse_header_block(&raw);
        let from = decoded_field(&fields, "From").unwrap_or_default();
        Ok(MessageHandle {
            seq,
            subject: decoded_field(&fields, "Subject").unwrap_or_default(),
            sender: sender_address(&from),
        })
    }

    async fn copy_message(&mut self, seq: u32, folder: &str) -> Result<()> {
        let sequence = sequence_set(seq)?;
        let mailbox = Mailbox::new(folder);
        let client = self.selected_client()?;
        client.copy(sequence, &mailbox).await?;
        Ok(())
    }

    async fn mark_deleted(&mut self, seq: u32) -> Result<()> {
        let sequence = sequence_set(seq)?;
        let client = self.selected_client()?;
        client
            .store(sequence, StoreAction::AddFlags(vec![Flag::Deleted]), true)
            .await?;
        Ok(())
    }

    async fn expunge(&mut self) -> Result<()> {
        let client = self.selected_client()?;
        let expunged = client.expunge().await?;
        debug!(count = expunged.len(), "Expunged");
        Ok(())
    }
}

/// Reduces a From header to the bare address when it carries a display
/// name, e.g. `"Ada L" <ada@example.com>` becomes `ada@example.com`.
fn sender_address(from: &str) -> String {
    if let Some(start) = from.find('<')
        && let Some(end) = from[start..].find('>')
    {
        return from[start + 1..start + end].trim().to_string();
    }
    from.trim().to_string()
}

fn not_connected() -> Error {
    Error::Imap(mailtriage_imap::Error::InvalidState(
        "not connected".to_string(),
    ))
}

fn sequence_set(seq: u32) -> Result<SequenceSet> {
    SequenceSet::single(seq)
        .ok_or_else(|| Error::Input("sequence number must be nonzero".to_string()))
}
