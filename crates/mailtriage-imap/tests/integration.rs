//! Integration tests for the IMAP client.
//!
//! A mock stream plays back scripted server responses and captures every
//! command the client sends, so full sessions can be exercised without a
//! server.

use std::io::{self, Cursor};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use mailtriage_imap::{Client, Error, Flag, Mailbox, SequenceSet, StoreAction};

/// Mock stream returning predefined responses and capturing sent bytes.
struct MockStream {
    responses: Cursor<Vec<u8>>,
    sent: Vec<u8>,
}

impl MockStream {
    fn new(responses: &[u8]) -> Self {
        Self {
            responses: Cursor::new(responses.to_vec()),
            sent: Vec::new(),
        }
    }
}

impl AsyncRead for MockStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let pos = usize::try_from(self.responses.position()).unwrap();
        let data = self.responses.get_ref();

        if pos >= data.len() {
            return Poll::Ready(Ok(()));
        }

        let remaining = &data[pos..];
        let to_read = remaining.len().min(buf.remaining());
        buf.put_slice(&remaining[..to_read]);
        self.responses.set_position((pos + to_read) as u64);

        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.sent.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn greeting_then_login() {
    let stream = MockStream::new(
        b"* OK IMAP4rev1 server ready\r\n\
          A0000 OK LOGIN completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user@example.com", "secret").await.unwrap();
    drop(client);
}

#[tokio::test]
async fn bye_greeting_is_rejected() {
    let stream = MockStream::new(b"* BYE too many connections\r\n");

    let err = Client::from_stream(stream).await.unwrap_err();
    assert!(matches!(err, Error::Bye(_)));
}

#[tokio::test]
async fn failed_login_maps_to_auth_error() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 NO [AUTHENTICATIONFAILED] bad credentials\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let err = client.login("user", "wrong").await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn list_collects_mailboxes() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * LIST (\\HasNoChildren) \"/\" INBOX\r\n\
          * LIST (\\HasNoChildren) \"/\" \"Receipts\"\r\n\
          A0001 OK LIST completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let mut client = client.login("user", "pass").await.unwrap();

    let folders = client.list("", "*").await.unwrap();
    let names: Vec<&str> = folders.iter().map(|f| f.mailbox.as_str()).collect();
    assert_eq!(names, vec!["INBOX", "Receipts"]);
}

#[tokio::test]
async fn create_existing_folder_is_no() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          A0001 NO [ALREADYEXISTS] Mailbox already exists\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let mut client = client.login("user", "pass").await.unwrap();

    let err = client.create(&Mailbox::new("Urgent")).await.unwrap_err();
    assert!(matches!(err, Error::No(_)));
}

#[tokio::test]
async fn select_reports_mailbox_counts() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * 17 EXISTS\r\n\
          * 2 RECENT\r\n\
          A0001 OK [READ-WRITE] SELECT completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();

    let (_client, status) = client.select(&Mailbox::inbox()).await.unwrap();
    assert_eq!(status.exists, 17);
    assert_eq!(status.recent, 2);
}

#[tokio::test]
async fn search_returns_sequence_numbers() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * 3 EXISTS\r\n\
          A0001 OK SELECT completed\r\n\
          * SEARCH 1 3\r\n\
          A0002 OK SEARCH completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();
    let (mut client, _) = client.select(&Mailbox::inbox()).await.unwrap();

    let hits = client.search("UNSEEN").await.unwrap();
    let hits: Vec<u32> = hits.into_iter().map(|s| s.get()).collect();
    assert_eq!(hits, vec![1, 3]);
}

#[tokio::test]
async fn fetch_header_fields_returns_literal() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * 1 EXISTS\r\n\
          A0001 OK SELECT completed\r\n\
          * 1 FETCH (BODY[HEADER.FIELDS (SUBJECT FROM)] {30}\r\nSubject: Hi\r\nFrom: a@b.com\r\n\r\n)\r\n\
          A0002 OK FETCH completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();
    let (mut client, _) = client.select(&Mailbox::inbox()).await.unwrap();

    let headers = client
        .fetch_header_fields(SequenceSet::single(1).unwrap(), &["Subject", "From"])
        .await
        .unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].0.get(), 1);
    assert_eq!(headers[0].1, b"Subject: Hi\r\nFrom: a@b.com\r\n\r\n");
}

#[tokio::test]
async fn move_sequence_issues_copy_store_expunge() {
    // COPY, then \Deleted, then EXPUNGE, matching a client-side move.
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * 5 EXISTS\r\n\
          A0001 OK SELECT completed\r\n\
          A0002 OK COPY completed\r\n\
          A0003 OK STORE completed\r\n\
          * 2 EXPUNGE\r\n\
          A0004 OK EXPUNGE completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();
    let (mut client, _) = client.select(&Mailbox::inbox()).await.unwrap();

    let seq = SequenceSet::single(2).unwrap();
    client.copy(seq.clone(), &Mailbox::new("Receipts")).await.unwrap();
    client
        .store(seq, StoreAction::AddFlags(vec![Flag::Deleted]), false)
        .await
        .unwrap();
    let expunged = client.expunge().await.unwrap();
    assert_eq!(expunged.len(), 1);
    assert_eq!(expunged[0].get(), 2);
}

#[tokio::test]
async fn copy_to_missing_folder_is_no() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * 5 EXISTS\r\n\
          A0001 OK SELECT completed\r\n\
          A0002 NO [TRYCREATE] No such mailbox\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();
    let (mut client, _) = client.select(&Mailbox::inbox()).await.unwrap();

    let err = client
        .copy(SequenceSet::single(1).unwrap(), &Mailbox::new("Nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::No(_)));
}

#[tokio::test]
async fn reselect_from_selected_state() {
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n\
          * 5 EXISTS\r\n\
          A0001 OK SELECT completed\r\n\
          * 9 EXISTS\r\n\
          A0002 OK SELECT completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();
    let (client, first) = client.select(&Mailbox::inbox()).await.unwrap();
    assert_eq!(first.exists, 5);

    let (_client, second) = client.select(&Mailbox::new("Receipts")).await.unwrap();
    assert_eq!(second.exists, 9);
}

#[tokio::test]
async fn logout_ignores_dropped_connection() {
    // No BYE or tagged response; the server just hangs up.
    let stream = MockStream::new(
        b"* OK ready\r\n\
          A0000 OK LOGIN completed\r\n",
    );

    let client = Client::from_stream(stream).await.unwrap();
    let client = client.login("user", "pass").await.unwrap();
    client.logout().await.unwrap();
}
