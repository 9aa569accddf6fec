//! Type-state IMAP client.
//!
//! The type parameter tracks the protocol state at compile time:
//!
//! - [`NotAuthenticated`]: greeting received, LOGIN not yet issued
//! - [`Authenticated`]: logged in, no mailbox selected
//! - [`Selected`]: a mailbox is open for read-write access
//!
//! Each state exposes only the commands valid in that state, so a CREATE
//! before LOGIN or a STORE without a selected mailbox cannot compile.

mod authenticated;
mod not_authenticated;
mod selected;
mod states;

use std::marker::PhantomData;

use tokio::io::{AsyncRead, AsyncWrite};

pub use self::states::{Authenticated, LoggedIn, NotAuthenticated, Selected};
use super::framed::FramedStream;
use crate::command::{Command, TagGenerator};
use crate::parser::{Response, ResponseParser};
use crate::types::Status;
use crate::{Error, Result};

/// IMAP client in state `State`.
pub struct Client<S, State> {
    pub(crate) stream: FramedStream<S>,
    pub(crate) tag_gen: TagGenerator,
    _state: PhantomData<State>,
}

impl<S, State> std::fmt::Debug for Client<S, State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("tag_gen", &self.tag_gen)
            .finish_non_exhaustive()
    }
}

impl<S, State> Client<S, State>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Rebuilds the client in a different state after a transition.
    pub(crate) fn transition<Next>(self) -> Client<S, Next> {
        Client {
            stream: self.stream,
            tag_gen: self.tag_gen,
            _state: PhantomData,
        }
    }

    /// Sends a NOOP, useful as a connection liveness probe.
    ///
    /// # Errors
    ///
    /// Fails if the connection is down or the server rejects the command.
    pub async fn noop(&mut self) -> Result<()> {
        let tag = self.tag_gen.next();
        let cmd = Command::Noop.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let responses = self.stream.read_until_tagged(&tag).await?;
        Self::check_tagged_ok(&responses, &tag)
    }

    /// Sends a command and collects all response frames up to its tagged
    /// completion.
    pub(crate) async fn exchange(&mut self, command: &Command) -> Result<(String, Vec<Vec<u8>>)> {
        let tag = self.tag_gen.next();
        let cmd = command.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let responses = self.stream.read_until_tagged(&tag).await?;
        Ok((tag, responses))
    }

    /// Verifies the tagged completion is OK, mapping NO/BAD/BYE to errors.
    pub(crate) fn check_tagged_ok(responses: &[Vec<u8>], tag: &str) -> Result<()> {
        for frame in responses.iter().rev() {
            if let Ok(Response::Tagged {
                tag: resp_tag,
                status,
                text,
            }) = ResponseParser::parse(frame)
                && resp_tag == tag
            {
                return match status {
                    Status::Ok | Status::PreAuth => Ok(()),
                    Status::No => Err(Error::No(text)),
                    Status::Bad => Err(Error::Bad(text)),
                    Status::Bye => Err(Error::Bye(text)),
                };
            }
        }

        Err(Error::Protocol("missing tagged response".to_string()))
    }
}
