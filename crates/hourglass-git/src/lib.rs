//! External git collaborators: repository fetcher and log producer.
//!
//! Both shell out to the `git` binary. The fetcher mirrors a repository
//! into a temporary directory that is removed on drop; the log producer
//! yields the raw header/numstat line sequence the estimation engine
//! consumes.

pub mod fetch;
pub mod log;

pub use fetch::{clone_repository, ClonedRepo};
pub use log::commit_log;
