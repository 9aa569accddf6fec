//! Connection state markers.

/// Connected but not yet logged in.
#[derive(Debug)]
pub struct NotAuthenticated;

/// Logged in, no mailbox selected.
#[derive(Debug)]
pub struct Authenticated;

/// A mailbox is selected for read-write access.
#[derive(Debug)]
pub struct Selected;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Authenticated {}
    impl Sealed for super::Selected {}
}

/// States in which the client is logged in and may issue mailbox
/// management commands.
pub trait LoggedIn: sealed::Sealed {}

impl LoggedIn for Authenticated {}
impl LoggedIn for Selected {}
