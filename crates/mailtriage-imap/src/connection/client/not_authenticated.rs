//! Greeting handling and login.

use std::marker::PhantomData;

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, NotAuthenticated};
use crate::command::{Command, TagGenerator};
use crate::connection::framed::FramedStream;
use crate::parser::{Response, ResponseParser, UntaggedResponse};
use crate::types::Status;
use crate::{Error, Result};

impl<S> Client<S, NotAuthenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a freshly opened stream and consumes the server greeting.
    ///
    /// # Errors
    ///
    /// Fails if the greeting is a BYE, or is not a recognizable untagged
    /// status line.
    pub async fn from_stream(stream: S) -> Result<Self> {
        let mut framed = FramedStream::new(stream);
        let greeting = framed.read_frame().await?;

        match ResponseParser::parse(&greeting)? {
            Response::Untagged(UntaggedResponse::Status { status, text }) => match status {
                Status::Ok | Status::PreAuth => Ok(Self {
                    stream: framed,
                    tag_gen: TagGenerator::default(),
                    _state: PhantomData,
                }),
                Status::Bye => Err(Error::Bye(text)),
                Status::No | Status::Bad => {
                    Err(Error::Protocol(format!("unexpected greeting: {text}")))
                }
            },
            other => Err(Error::Protocol(format!("unexpected greeting: {other:?}"))),
        }
    }

    /// Authenticates with LOGIN.
    ///
    /// Consumes self and returns an authenticated client on success.
    ///
    /// # Errors
    ///
    /// A NO completion becomes [`Error::Auth`]; transport and protocol
    /// failures are passed through.
    pub async fn login(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<S, Authenticated>> {
        tracing::debug!(username, "Authenticating");
        let command = Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        };
        let (tag, responses) = self.exchange(&command).await?;

        match Self::check_tagged_ok(&responses, &tag) {
            Ok(()) => Ok(self.transition()),
            Err(Error::No(text)) => Err(Error::Auth(text)),
            Err(e) => Err(e),
        }
    }
}
