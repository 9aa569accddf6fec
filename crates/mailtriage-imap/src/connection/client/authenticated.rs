//! Commands valid after login.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, LoggedIn, Selected};
use crate::Result;
use crate::command::Command;
use crate::parser::{Response, ResponseParser, UntaggedResponse};
use crate::types::{ListItem, Mailbox, MailboxStatus};

impl<S, State> Client<S, State>
where
    S: AsyncRead + AsyncWrite + Unpin,
    State: LoggedIn,
{
    /// Lists mailboxes matching `pattern` under `reference`.
    ///
    /// # Errors
    ///
    /// Fails if the command is rejected.
    pub async fn list(&mut self, reference: &str, pattern: &str) -> Result<Vec<ListItem>> {
        let command = Command::List {
            reference: reference.to_string(),
            pattern: pattern.to_string(),
        };
        let (tag, responses) = self.exchange(&command).await?;

        let mut items = Vec::new();
        for frame in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::List(item))) =
                ResponseParser::parse(frame)
            {
                items.push(item);
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        Ok(items)
    }

    /// Creates a mailbox.
    ///
    /// # Errors
    ///
    /// Fails if the server rejects the CREATE, including when the mailbox
    /// already exists.
    pub async fn create(&mut self, mailbox: &Mailbox) -> Result<()> {
        let command = Command::Create {
            mailbox: mailbox.clone(),
        };
        let (tag, responses) = self.exchange(&command).await?;
        Self::check_tagged_ok(&responses, &tag)
    }

    /// Logs out, consuming the client.
    ///
    /// The server closes the connection after its BYE; read failures while
    /// draining it are ignored.
    ///
    /// # Errors
    ///
    /// Fails only if the LOGOUT command cannot be written.
    pub async fn logout(mut self) -> Result<()> {
        let tag = self.tag_gen.next();
        let cmd = Command::Logout.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let _ = self.stream.read_until_tagged(&tag).await;
        Ok(())
    }
}

impl<S> Client<S, Authenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Selects a mailbox for read-write access.
    ///
    /// Consumes self and returns a selected client with the mailbox counts
    /// reported by the server.
    ///
    /// # Errors
    ///
    /// Fails if the mailbox does not exist or the command is rejected.
    pub async fn select(
        mut self,
        mailbox: &Mailbox,
    ) -> Result<(Client<S, Selected>, MailboxStatus)> {
        let command = Command::Select {
            mailbox: mailbox.clone(),
        };
        let (tag, responses) = self.exchange(&command).await?;

        let status = parse_mailbox_status(&responses);
        Self::check_tagged_ok(&responses, &tag)?;

        Ok((self.transition(), status))
    }
}

/// Extracts EXISTS/RECENT counts from SELECT responses.
pub(super) fn parse_mailbox_status(responses: &[Vec<u8>]) -> MailboxStatus {
    let mut status = MailboxStatus::default();

    for frame in responses {
        if let Ok(Response::Untagged(untagged)) = ResponseParser::parse(frame) {
            match untagged {
                UntaggedResponse::Exists(n) => status.exists = n,
                UntaggedResponse::Recent(n) => status.recent = n,
                _ => {}
            }
        }
    }

    status
}
