//! Connection layer: transports, framing, and the type-state client.

mod client;
mod framed;
mod stream;

pub use client::{Authenticated, Client, LoggedIn, NotAuthenticated, Selected};
pub use stream::{ImapStream, connect};
