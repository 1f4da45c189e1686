use std::fmt;

/// Severity of a log record.
///
/// The ordering is the filtering order: a record is written only when its
/// severity is at least the logger's minimum level. [`Severity::Print`] and
/// [`Severity::Printf`] are raw records and bypass the filter entirely.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    /// Raw content written as given.
    Print = 4,
    /// Raw content produced from a format string.
    Printf = 5,
    /// Terminates the process after being written.
    Fatal = 6,
}

const TAGS: [&str; 7] = ["D", "I", "W", "E", "P", "PF", "F"];

impl Severity {
    /// Short display tag used in formatted lines.
    pub const fn tag(self) -> &'static str {
        TAGS[self as usize]
    }

    /// Raw records are enqueued without formatting and are never filtered.
    pub const fn is_raw(self) -> bool {
        matches!(self, Severity::Print | Severity::Printf)
    }

    pub const fn is_fatal(self) -> bool {
        matches!(self, Severity::Fatal)
    }

    /// Whether a record of this severity passes the given minimum level.
    pub fn passes(self, min_level: Severity) -> bool {
        self.is_raw() || self >= min_level
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
