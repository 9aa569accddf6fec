//! Synchronizer behavior tests over a scripted in-memory store.
//!
//! These verify sequencing semantics: provisioning is re-runnable, moves
//! issue their steps in order, and a failed step stops the sequence.

use mailtriage_core::{
    Category, Error, FolderMapping, FolderSynchronizer, MailStore, MessageHandle, MoveStep, Result,
};

/// The operation a scripted store should fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailOn {
    Create,
    Select,
    Copy,
    MarkDeleted,
    Expunge,
}

/// In-memory store that records every operation and can fail on cue.
#[derive(Debug, Default)]
struct ScriptedStore {
    folders: Vec<String>,
    connected: bool,
    selected: Option<String>,
    fail_on: Option<FailOn>,
    log: Vec<String>,
}

impl ScriptedStore {
    fn with_folders(folders: &[&str]) -> Self {
        Self {
            folders: folders.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    fn failing_on(mut self, op: FailOn) -> Self {
        self.fail_on = Some(op);
        self
    }

    fn scripted_failure(&self, op: FailOn) -> Result<()> {
        if self.fail_on == Some(op) {
            return Err(Error::Imap(mailtriage_imap::Error::No(format!(
                "scripted failure at {op:?}"
            ))));
        }
        Ok(())
    }
}

impl MailStore for ScriptedStore {
    async fn connect(&mut self) -> Result<()> {
        if !self.connected {
            self.log.push("connect".to_string());
            self.connected = true;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn disconnect(&mut self) -> Result<()> {
        if self.connected {
            self.log.push("disconnect".to_string());
            self.connected = false;
            self.selected = None;
        }
        Ok(())
    }

    async fn list_folders(&mut self) -> Result<Vec<String>> {
        self.connect().await?;
        self.log.push("list".to_string());
        Ok(self.folders.clone())
    }

    async fn create_folder(&mut self, name: &str) -> Result<()> {
        self.connect().await?;
        self.log.push(format!("create {name}"));
        self.scripted_failure(FailOn::Create)?;
        self.folders.push(name.to_string());
        Ok(())
    }

    async fn select_folder(&mut self, name: &str) -> Result<u32> {
        self.connect().await?;
        self.log.push(format!("select {name}"));
        self.scripted_failure(FailOn::Select)?;
        self.selected = Some(name.to_string());
        Ok(1)
    }

    async fn search(&mut self, criteria: &str) -> Result<Vec<u32>> {
        self.log.push(format!("search {criteria}"));
        Ok(vec![1, 2, 3])
    }

    async fn fetch_headers(&mut self, seq: u32) -> Result<MessageHandle> {
        self.log.push(format!("fetch {seq}"));
        Ok(MessageHandle {
            seq,
            subject: "Your Order Receipt #12345".to_string(),
            sender: "orders@shop-example.com".to_string(),
        })
    }

    async fn copy_message(&mut self, seq: u32, folder: &str) -> Result<()> {
        self.log.push(format!("copy {seq} -> {folder}"));
        self.scripted_failure(FailOn::Copy)
    }

    async fn mark_deleted(&mut self, seq: u32) -> Result<()> {
        self.log.push(format!("mark_deleted {seq}"));
        self.scripted_failure(FailOn::MarkDeleted)
    }

    async fn expunge(&mut self) -> Result<()> {
        self.log.push("expunge".to_string());
        self.scripted_failure(FailOn::Expunge)
    }
}

fn synchronizer(store: ScriptedStore) -> FolderSynchronizer<ScriptedStore> {
    FolderSynchronizer::new(store, FolderMapping::default())
}

#[tokio::test]
async fn provisioning_creates_only_missing_folders() {
    let store = ScriptedStore::with_folders(&["INBOX", "Urgent", "newsletters"]);
    let mut sync = synchronizer(store);

    sync.ensure_folders_exist().await.unwrap();

    let creates: Vec<&String> = sync
        .store_mut()
        .log
        .iter()
        .filter(|l| l.starts_with("create"))
        .collect();
    // "Urgent" exists, "newsletters" matches case-insensitively.
    assert_eq!(
        creates,
        vec!["create Important", "create Promotions", "create Receipts", "create Archive"]
    );
}

#[tokio::test]
async fn provisioning_is_rerunnable_without_creates() {
    let store = ScriptedStore::with_folders(&["INBOX"]);
    let mut sync = synchronizer(store);

    sync.ensure_folders_exist().await.unwrap();
    let creates_first = sync
        .store_mut()
        .log
        .iter()
        .filter(|l| l.starts_with("create"))
        .count();
    assert_eq!(creates_first, 5);

    sync.store_mut().log.clear();
    sync.ensure_folders_exist().await.unwrap();
    let creates_second = sync
        .store_mut()
        .log
        .iter()
        .filter(|l| l.starts_with("create"))
        .count();
    assert_eq!(creates_second, 0);
}

#[tokio::test]
async fn provisioning_stops_at_first_failure() {
    let store = ScriptedStore::with_folders(&["INBOX"]).failing_on(FailOn::Create);
    let mut sync = synchronizer(store);

    let err = sync.ensure_folders_exist().await.unwrap_err();
    let Error::Folder { folder, .. } = err else {
        panic!("expected folder error, got {err:?}");
    };
    assert_eq!(folder, "Urgent");

    // Exactly one create was attempted.
    let creates = sync
        .store_mut()
        .log
        .iter()
        .filter(|l| l.starts_with("create"))
        .count();
    assert_eq!(creates, 1);
}

#[tokio::test]
async fn move_issues_steps_in_order() {
    let store = ScriptedStore::with_folders(&["INBOX", "Receipts"]);
    let mut sync = synchronizer(store);

    sync.move_message(7, "INBOX", "Receipts").await.unwrap();

    assert_eq!(
        sync.store_mut().log,
        vec![
            "connect",
            "select INBOX",
            "copy 7 -> Receipts",
            "mark_deleted 7",
            "expunge",
        ]
    );
}

#[tokio::test]
async fn failed_copy_stops_before_delete() {
    let store = ScriptedStore::with_folders(&["INBOX"]).failing_on(FailOn::Copy);
    let mut sync = synchronizer(store);

    let err = sync.move_message(3, "INBOX", "Receipts").await.unwrap_err();
    let Error::Move { step, .. } = err else {
        panic!("expected move error, got {err:?}");
    };
    assert_eq!(step, MoveStep::Copy);

    let log = &sync.store_mut().log;
    assert!(log.iter().any(|l| l.starts_with("copy")));
    assert!(!log.iter().any(|l| l.starts_with("mark_deleted")));
    assert!(!log.iter().any(|l| l == "expunge"));
}

#[tokio::test]
async fn failed_mark_deleted_stops_before_expunge() {
    let store = ScriptedStore::with_folders(&["INBOX"]).failing_on(FailOn::MarkDeleted);
    let mut sync = synchronizer(store);

    let err = sync.move_message(3, "INBOX", "Receipts").await.unwrap_err();
    let Error::Move { step, .. } = err else {
        panic!("expected move error, got {err:?}");
    };
    assert_eq!(step, MoveStep::MarkDeleted);
    assert!(!sync.store_mut().log.iter().any(|l| l == "expunge"));
}

#[tokio::test]
async fn failed_select_attempts_nothing_else() {
    let store = ScriptedStore::default().failing_on(FailOn::Select);
    let mut sync = synchronizer(store);

    let err = sync.move_message(3, "INBOX", "Receipts").await.unwrap_err();
    let Error::Move { step, .. } = err else {
        panic!("expected move error, got {err:?}");
    };
    assert_eq!(step, MoveStep::Select);
    assert!(!sync.store_mut().log.iter().any(|l| l.starts_with("copy")));
}

#[tokio::test]
async fn file_by_category_uses_mapping() {
    let store = ScriptedStore::with_folders(&["INBOX"]);
    let mut sync = synchronizer(store);

    sync.file_by_category(2, "INBOX", Category::OtpReceipt)
        .await
        .unwrap();

    assert!(
        sync.store_mut()
            .log
            .iter()
            .any(|l| l == "copy 2 -> Receipts")
    );
}

#[tokio::test]
async fn search_selects_then_fetches_in_server_order() {
    let store = ScriptedStore::with_folders(&["INBOX"]);
    let mut sync = synchronizer(store);

    let handles = sync.search_messages("ALL", "INBOX", 10).await.unwrap();
    assert_eq!(
        handles.iter().map(|h| h.seq).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(
        sync.store_mut().log,
        vec![
            "connect",
            "select INBOX",
            "search ALL",
            "fetch 1",
            "fetch 2",
            "fetch 3",
        ]
    );
}

#[tokio::test]
async fn search_respects_the_limit() {
    let store = ScriptedStore::with_folders(&["INBOX"]);
    let mut sync = synchronizer(store);

    let handles = sync.search_messages("ALL", "INBOX", 2).await.unwrap();
    assert_eq!(handles.len(), 2);
    assert!(!sync.store_mut().log.iter().any(|l| l == "fetch 3"));
}

#[tokio::test]
async fn operations_connect_on_demand() {
    let store = ScriptedStore::with_folders(&["INBOX"]);
    let mut sync = synchronizer(store);
    assert!(!sync.store_mut().is_connected());

    sync.select_folder("INBOX").await.unwrap();
    assert!(sync.store_mut().is_connected());
    assert_eq!(sync.store_mut().log[0], "connect");
}

#[tokio::test]
async fn disconnect_is_idempotent() {
    let store = ScriptedStore::with_folders(&["INBOX"]);
    let mut sync = synchronizer(store);

    sync.select_folder("INBOX").await.unwrap();
    sync.disconnect().await.unwrap();
    sync.disconnect().await.unwrap();

    let disconnects = sync
        .store_mut()
        .log
        .iter()
        .filter(|l| *l == "disconnect")
        .count();
    assert_eq!(disconnects, 1);
}
