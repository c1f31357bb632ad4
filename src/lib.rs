//! Reads yesterday's journal, measures how the project is going against a fixed phase calendar
//! and asks a language model for a short review and today's plan. Both are appended to today's
//! journal, so the plan is picked up as regular `TODO` blocks by Logseq and by the next run.
//!

pub mod cli;
pub mod coach;
pub mod config;
pub mod journal;
pub mod llm;
pub mod progress;
pub mod utils;
