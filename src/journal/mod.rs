//! Journal access is organized around [storage::JournalStorage].
//! The basic idea is:
//!  - There is a directory with one markdown file per local day, `YYYY_MM_DD.md`.
//!  - Tasks are `- TODO ...` and `- DONE ...` lines with optional hour annotations.
//!  - Generated sections are only ever appended, existing content is never rewritten.

pub mod entry;
pub mod lookback;
pub mod storage;
pub mod writer;
