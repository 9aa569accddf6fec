//! Delegate classifier backed by an external model endpoint.
//!
//! The delegate receives the message as JSON and must answer with a JSON
//! object matching the triage schema. Replies are validated strictly; any
//! transport failure or schema violation falls back to the rule-based
//! classifier, so classification never fails outright.

use serde::Deserialize;
use tracing::warn;

use crate::{Error, Result};

use super::model::{Action, Category, Message, TriageResult};
use super::rules::RuleBased;

/// Wire shape of a delegate reply.
#[derive(Debug, Deserialize)]
struct DelegateReply {
    category: String,
    action: String,
    justification: String,
}

/// Classifier that consults an external endpoint, with a rule-based
/// fallback.
#[derive(Debug)]
pub struct DelegateBacked {
    endpoint: String,
    client: reqwest::Client,
    fallback: RuleBased,
}

impl DelegateBacked {
    /// Creates a delegate-backed classifier.
    ///
    /// `endpoint` is the URL of a service accepting a POSTed message and
    /// returning `{"category", "action", "justification"}`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, fallback: RuleBased) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            fallback,
        }
    }

    /// Classifies a message, falling back to rules on any delegate
    /// failure.
    pub async fn classify(&self, message: &Message) -> TriageResult {
        match self.ask_delegate(message).await {
            Ok(result) => result,
            Err(e) => {
                warn!(?e, "Delegate classification failed, using rule-based fallback");
                self.fallback.classify(message)
            }
        }
    }

    async fn ask_delegate(&self, message: &Message) -> Result<TriageResult> {
        let reply: DelegateReply = self
            .client
            .post(&self.endpoint)
            .json(message)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        validate_reply(&reply)
    }
}

/// Validates a delegate reply against the triage schema.
fn validate_reply(reply: &DelegateReply) -> Result<TriageResult> {
    let category = Category::parse(&reply.category)
        .ok_or_else(|| Error::Delegate(format!("unknown category '{}'", reply.category)))?;
    let action = Action::parse(&reply.action)
        .ok_or_else(|| Error::Delegate(format!("unparseable action '{}'", reply.action)))?;
    if reply.justification.trim().is_empty() {
        return Err(Error::Delegate("empty justification".to_string()));
    }

    Ok(TriageResult {
        category,
        action,
        justification: reply.justification.clone(),
    })
}

/// A triage classifier: pure rules, or a delegate with rules as fallback.
#[derive(Debug)]
pub enum Classifier {
    /// Deterministic keyword rules only.
    Rules(RuleBased),
    /// External delegate with rule-based fallback.
    Delegate(DelegateBacked),
}

impl Classifier {
    /// Classifies a message. Total: always produces a result.
    pub async fn classify(&self, message: &Message) -> TriageResult {
        match self {
            Self::Rules(rules) => rules.classify(message),
            Self::Delegate(delegate) => delegate.classify(message).await,
        }
    }
}
