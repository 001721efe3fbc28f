//! Deterministic, pure logic shared by the replay tool.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod command;
pub mod commit;
