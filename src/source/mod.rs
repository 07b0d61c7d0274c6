//! Streaming history input
//!
//! Reads the export files of one account and turns them into plays.

pub(crate) mod loader;

pub(crate) use loader::DataLoader;
