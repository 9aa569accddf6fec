//! Email triage: deterministic rules plus an optional delegate classifier.

mod delegate;
mod model;
mod rules;

pub use delegate::{Classifier, DelegateBacked};
pub use model::{Action, Category, Message, TriageResult};
pub use rules::RuleBased;
