//! Product output: tag-prefixed lines on stdout.
//!
//! Everything the user is meant to read goes through here. `RUST_LOG`
//! tracing on stderr is dev diagnostics only and never replaces these lines.

use std::fmt;

/// Phase tag prefixed to every product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Info,
    Build,
    Run,
    Cleanup,
    Error,
    Done,
    Exit,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Info => "[INFO]",
            Tag::Build => "[BUILD]",
            Tag::Run => "[RUN]",
            Tag::Cleanup => "[CLEANUP]",
            Tag::Error => "[ERROR]",
            Tag::Done => "[DONE]",
            Tag::Exit => "[EXIT]",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Print one `[TAG] message` line.
pub fn line(tag: Tag, message: impl fmt::Display) {
    println!("{tag} {message}");
}
