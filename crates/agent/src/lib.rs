//! The AI side of folio.
//!
//! - **Context**: journey and resume documents plus live GitHub activity,
//!   assembled into one bounded blob per consumer
//! - **Poems**: haiku generated through the haiku chain, validated, padded
//!   from a built-in set, and cached for a TTL
//! - **Assistant**: Pai, answering visitor questions through the chat chain
//!
//! Nothing here fails loudly except the assistant: poems degrade to the
//! built-in set and context degrades to whatever could be read.

pub mod assistant;
pub mod context;
pub mod poems;
pub mod prompts;

#[cfg(test)]
mod test_support;

pub use assistant::{Assistant, AssistantError, AssistantReply};
pub use context::{ActivitySource, ContextAssembler, ContextProfile, DocumentStore, GithubActivity, NoActivity};
pub use poems::{BatchSource, PoemBatch, PoemCache, PoemGenerator, PoemService};
