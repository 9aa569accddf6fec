//! End-to-end demo: classify the inbox and file messages into folders.
//!
//! Configuration comes from the environment:
//! - `MAILTRIAGE_ADDRESS`: login address
//! - `MAILTRIAGE_HOST`: IMAP hostname (implicit TLS, port 993)
//! - `MAILTRIAGE_PASSWORD`: password (or store one in the keyring)
//! - `MAILTRIAGE_CONTACTS`: optional comma-separated known contacts
//!
//! Run with: `cargo run --example triage_inbox`

use mailtriage_core::{
    Account, Action, FolderMapping, FolderSynchronizer, ImapStore, KnownContacts, Message,
    RuleBased, SessionConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let address = std::env::var("MAILTRIAGE_ADDRESS")?;
    let host = std::env::var("MAILTRIAGE_HOST")?;
    let contacts = std::env::var("MAILTRIAGE_CONTACTS").unwrap_or_default();

    let account = Account::new(address, host);
    let config = SessionConfig::from_account(&account)?;

    let classifier = RuleBased::new(KnownContacts::new(contacts.split(',')));
    let mapping = FolderMapping::default();
    let mut sync = FolderSynchronizer::new(ImapStore::new(config), mapping);

    sync.ensure_folders_exist().await?;

    let mut handles = sync.search_messages("ALL", "INBOX", 100).await?;
    println!("Triaging {} messages", handles.len());

    // Expunge renumbers everything after the removed message, so walk
    // from the highest sequence number down.
    handles.sort_unstable_by(|a, b| b.seq.cmp(&a.seq));

    for handle in handles {
        let message = Message::new(&handle.subject, "", &handle.sender);
        let result = classifier.classify(&message);

        println!(
            "#{} [{}] {} ({})",
            handle.seq, result.category, handle.subject, result.justification
        );

        match result.action {
            Action::MoveToFolder(folder) if !folder.eq_ignore_ascii_case("inbox") => {
                sync.file_by_category(handle.seq, "INBOX", result.category)
                    .await?;
            }
            // Priority flags and inbox-bound messages stay put.
            _ => {}
        }
    }

    sync.disconnect().await?;
    Ok(())
}
