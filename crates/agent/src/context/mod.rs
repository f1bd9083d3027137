//! Context for the language model: static documents plus live activity.
//!
//! | Section | Source | Poems limit | Chat limit |
//! |---------|--------|-------------|------------|
//! | Journey | `journey.txt` | 20 000 chars | 25 000 chars |
//! | Resume | `resume.txt` | 8 000 chars | 8 000 chars |
//! | Activity | GitHub REST API | 4 000 chars | 4 000 chars |

pub mod activity;
pub mod assembler;
pub mod documents;

pub use activity::{ActivitySource, GithubActivity, NoActivity};
pub use assembler::{ContextAssembler, ContextProfile, truncate_chars};
pub use documents::{DocumentStore, JOURNEY_DOC, RESUME_DOC};
