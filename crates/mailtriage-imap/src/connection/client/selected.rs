//! Commands valid with a mailbox selected.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::authenticated::parse_mailbox_status;
use super::states::{Authenticated, Selected};
use crate::Result;
use crate::command::{Command, FetchItems, StoreAction};
use crate::parser::{Response, ResponseParser, UntaggedResponse};
use crate::types::{Mailbox, MailboxStatus, SeqNum, SequenceSet};

impl<S> Client<S, Selected>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Searches the selected mailbox.
    ///
    /// `criteria` uses the standard IMAP search grammar ("ALL", "UNSEEN",
    /// "SINCE 1-Jan-2026", ...). Returns matching sequence numbers in
    /// server order.
    ///
    /// # Errors
    ///
    /// Fails if the server rejects the criteria.
    pub async fn search(&mut self, criteria: &str) -> Result<Vec<SeqNum>> {
        let command = Command::Search {
            criteria: criteria.to_string(),
        };
        let (tag, responses) = self.exchange(&command).await?;

        let mut results = Vec::new();
        for frame in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::Search(ids))) =
                ResponseParser::parse(frame)
            {
                results.extend(ids);
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        Ok(results)
    }

    /// Fetches selected header fields of one message without marking it
    /// read, returning the raw header block per fetched message.
    ///
    /// # Errors
    ///
    /// Fails if the message does not exist or the fetch is rejected.
    pub async fn fetch_header_fields(
        &mut self,
        sequence: SequenceSet,
        fields: &[&str],
    ) -> Result<Vec<(SeqNum, Vec<u8>)>> {
        let command = Command::Fetch {
            sequence,
            items: FetchItems::HeaderFields(fields.iter().map(ToString::to_string).collect()),
        };
        let (tag, responses) = self.exchange(&command).await?;

        let mut headers = Vec::new();
        for frame in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::Fetch { seq, section })) =
                ResponseParser::parse(frame)
            {
                headers.push((seq, section));
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        Ok(headers)
    }

    /// Modifies flags on messages.
    ///
    /// # Errors
    ///
    /// Fails if the store is rejected.
    pub async fn store(
        &mut self,
        sequence: SequenceSet,
        action: StoreAction,
        silent: bool,
    ) -> Result<()> {
        let command = Command::Store {
            sequence,
            action,
            silent,
        };
        let (tag, responses) = self.exchange(&command).await?;
        Self::check_tagged_ok(&responses, &tag)
    }

    /// Copies messages to another mailbox.
    ///
    /// # Errors
    ///
    /// Fails if the target does not exist or the copy is rejected.
    pub async fn copy(&mut self, sequence: SequenceSet, mailbox: &Mailbox) -> Result<()> {
        let command = Command::Copy {
            sequence,
            mailbox: mailbox.clone(),
        };
        let (tag, responses) = self.exchange(&command).await?;
        Self::check_tagged_ok(&responses, &tag)
    }

    /// Permanently removes messages flagged `\Deleted`, returning the
    /// expunged sequence numbers.
    ///
    /// # Errors
    ///
    /// Fails if the expunge is rejected.
    pub async fn expunge(&mut self) -> Result<Vec<SeqNum>> {
        let (tag, responses) = self.exchange(&Command::Expunge).await?;

        let mut expunged = Vec::new();
        for frame in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::Expunge(seq))) =
                ResponseParser::parse(frame)
            {
                expunged.push(seq);
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        Ok(expunged)
    }

    /// Switches to a different mailbox without an intermediate CLOSE.
    ///
    /// # Errors
    ///
    /// Fails if the mailbox does not exist or the command is rejected.
    pub async fn select(mut self, mailbox: &Mailbox) -> Result<(Self, MailboxStatus)> {
        let command = Command::Select {
            mailbox: mailbox.clone(),
        };
        let (tag, responses) = self.exchange(&command).await?;

        let status = parse_mailbox_status(&responses);
        Self::check_tagged_ok(&responses, &tag)?;

        Ok((self, status))
    }

    /// Closes the selected mailbox, returning to the authenticated state.
    ///
    /// CLOSE also expunges flagged messages, so callers that want explicit
    /// control should expunge first.
    ///
    /// # Errors
    ///
    /// Fails if the close is rejected.
    pub async fn close(mut self) -> Result<Client<S, Authenticated>> {
        let (tag, responses) = self.exchange(&Command::Close).await?;
        Self::check_tagged_ok(&responses, &tag)?;
        Ok(self.transition())
    }
}
