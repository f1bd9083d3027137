//! Context assembly: documents and live activity as one bounded blob.
//!
//! Up to three labeled sections, each truncated independently by characters
//! before joining. Empty sections are left out entirely.
//!
//! # Determinism
//!
//! For identical documents and activity text the output is identical; the
//! assembler itself has no random or time-dependent logic.

use std::sync::Arc;

use tracing::debug;

use crate::context::activity::ActivitySource;
use crate::context::documents::{DocumentStore, JOURNEY_DOC, RESUME_DOC};

// ── Profiles ──────────────────────────────────────────────────────────────

/// Per-consumer section labels and character limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextProfile {
    pub journey_label: &'static str,
    pub journey_limit: usize,
    pub resume_label: &'static str,
    pub resume_limit: usize,
    pub activity_label: &'static str,
    pub activity_limit: usize,
}

impl ContextProfile {
    /// Context for haiku generation.
    pub const POEMS: Self = Self {
        journey_label: "=== JOURNEY DOCUMENT ===",
        journey_limit: 20_000,
        resume_label: "=== MASTER RESUME ===",
        resume_limit: 8_000,
        activity_label: "=== GITHUB CONTEXT ===",
        activity_limit: 4_000,
    };

    /// Context for the chat assistant.
    pub const CHAT: Self = Self {
        journey_label: "=== PRANAV'S JOURNEY (complete) ===",
        journey_limit: 25_000,
        resume_label: "=== MASTER RESUME ===",
        resume_limit: 8_000,
        activity_label: "=== GITHUB ACTIVITY (live) ===",
        activity_limit: 4_000,
    };
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// Combines the document store and an activity source.
#[derive(Clone)]
pub struct ContextAssembler {
    documents: DocumentStore,
    activity: Arc<dyn ActivitySource>,
}

impl ContextAssembler {
    pub fn new(documents: DocumentStore, activity: Arc<dyn ActivitySource>) -> Self {
        Self {
            documents,
            activity,
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Build the context blob for a profile. Never fails.
    pub async fn assemble(&self, profile: &ContextProfile) -> String {
        let (journey, resume, activity) = tokio::join!(
            self.documents.load(JOURNEY_DOC),
            self.documents.load(RESUME_DOC),
            self.activity.summary(),
        );

        let sections = [
            (profile.journey_label, journey, profile.journey_limit),
            (profile.resume_label, resume, profile.resume_limit),
            (profile.activity_label, activity, profile.activity_limit),
        ];

        let parts: Vec<String> = sections
            .into_iter()
            .filter(|(_, body, _)| !body.is_empty())
            .map(|(label, body, limit)| format!("{label}\n{}", truncate_chars(&body, limit)))
            .collect();

        let blob = parts.join("\n\n");
        debug!(sections = parts.len(), chars = blob.chars().count(), "Context assembled");
        blob
    }
}

/// The first `limit` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
