use {
    crate::Severity,
    chrono::{DateTime, FixedOffset, Local, Utc},
    std::{panic::Location, path::Path},
};

/// Specifies the time zone used for record timestamps, the date in rotated
/// file names and the midnight that age-based rotation counts from.
///
/// # Examples
/// ```
/// use spoolog::TimeZone;
/// use chrono::FixedOffset;
///
/// // Use UTC time for global deployments
/// let utc = TimeZone::UTC;
///
/// // Use local system time zone
/// let local = TimeZone::Local;
///
/// // Use a fixed offset for a specific region (e.g., UTC+8)
/// let china = TimeZone::Fix(FixedOffset::east_opt(8 * 3600).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub enum TimeZone {
    /// Use UTC time zone.
    UTC,
    /// Use the system's local time zone, as observed when the logger is built.
    #[default]
    Local,
    /// Use a fixed time zone offset.
    Fix(FixedOffset),
}

impl TimeZone {
    pub(crate) fn offset(self) -> FixedOffset {
        match self {
            TimeZone::UTC => Utc::now().fixed_offset().offset().to_owned(),
            TimeZone::Local => Local::now().offset().to_owned(),
            TimeZone::Fix(fixed_offset) => fixed_offset,
        }
    }
}

/// Current time in the given offset.
pub(crate) fn now(offset: &FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(offset)
}

/// Render a leveled record as one line:
///
/// `[2026/10/18 08:08:08] [I] [main.rs:188] content`
///
/// The caller location is reduced to its file name. The returned line always
/// ends with a newline.
pub fn format_line(
    severity: Severity,
    timestamp: DateTime<FixedOffset>,
    location: &Location<'_>,
    message: &str,
) -> String {
    let file = Path::new(location.file())
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| "???".into());
    format!(
        "[{}] [{}] [{}:{}] {}\n",
        timestamp.format("%Y/%m/%d %H:%M:%S"),
        severity.tag(),
        file,
        location.line(),
        message
    )
}
