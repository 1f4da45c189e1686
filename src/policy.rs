use chrono::{DateTime, Days, FixedOffset};

/// Days kept in one file when no threshold is configured.
pub const DEFAULT_MAX_AGE_DAYS: u32 = 1;
/// Lines kept in one file when no threshold is configured.
pub const DEFAULT_MAX_LINES: u64 = 1_000_000;
/// Bytes kept in one file when no threshold is configured (100 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;
/// Absolute ceiling on the byte threshold (1 GiB).
pub const MAX_BYTES_CEILING: u64 = 1024 * 1024 * 1024;

/// Defines size thresholds for rotating log files in various units.
///
/// * `Bytes` - Direct byte count (e.g., 1048576 bytes)
/// * `KB` - Kilobytes (1 KB = 1024 bytes)
/// * `MB` - Megabytes (1 MB = 1024 KB)
/// * `GB` - Gigabytes (1 GB = 1024 MB)
///
/// Whatever unit is used, the effective threshold never exceeds
/// [`MAX_BYTES_CEILING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSize {
    /// Raw byte count
    Bytes(u64),
    /// Kilobytes (1 KB = 1024 bytes)
    KB(u64),
    /// Megabytes (1 MB = 1024 KB = 1,048,576 bytes)
    MB(u64),
    /// Gigabytes (1 GB = 1024 MB = 1,073,741,824 bytes)
    GB(u64),
}

impl RotationSize {
    /// Get the threshold in bytes.
    pub fn bytes(&self) -> u64 {
        match self {
            RotationSize::Bytes(b) => *b,
            RotationSize::KB(kb) => kb.saturating_mul(1024),
            RotationSize::MB(mb) => mb.saturating_mul(1024 * 1024),
            RotationSize::GB(gb) => gb.saturating_mul(1024 * 1024 * 1024),
        }
    }
}

/// Thresholds deciding when the active log file rolls over.
///
/// A zero on any axis disables that axis. The triggers are independent and
/// OR'd together. The policy is normalized once in [`RotationPolicy::new`]:
///
/// * all three axes zero: the defaults (1 day, 1,000,000 lines, 100 MiB)
///   are substituted;
/// * the byte threshold is clamped to [`MAX_BYTES_CEILING`].
///
/// # Examples
/// ```
/// use spoolog::{RotationPolicy, RotationSize};
///
/// // Rotate at 1000 lines or 10 MB, never by age.
/// let policy = RotationPolicy::new(0, 1000, RotationSize::MB(10));
/// assert_eq!(policy.max_lines(), 1000);
/// assert_eq!(policy.max_age_days(), 0);
///
/// // Nothing requested: defaults apply.
/// let policy = RotationPolicy::new(0, 0, RotationSize::Bytes(0));
/// assert_eq!(policy, RotationPolicy::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_age_days: u32,
    max_lines: u64,
    max_bytes: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy {
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            max_lines: DEFAULT_MAX_LINES,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl RotationPolicy {
    pub fn new(max_age_days: u32, max_lines: u64, max_bytes: RotationSize) -> Self {
        let max_bytes = max_bytes.bytes();
        if max_age_days == 0 && max_lines == 0 && max_bytes == 0 {
            return RotationPolicy::default();
        }
        RotationPolicy {
            max_age_days,
            max_lines,
            max_bytes: max_bytes.min(MAX_BYTES_CEILING),
        }
    }

    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    pub fn max_lines(&self) -> u64 {
        self.max_lines
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Check whether the active file must be rotated before the next write.
    /// # Arguments
    /// * `lines` - Lines written to the active file so far.
    /// * `bytes` - Bytes in the active file so far.
    /// * `now` - The current time in the logger's time zone.
    /// * `deadline` - The next age-based rotation time, if any.
    pub fn should_rotate(
        &self,
        lines: u64,
        bytes: u64,
        now: DateTime<FixedOffset>,
        deadline: Option<DateTime<FixedOffset>>,
    ) -> bool {
        (self.max_lines > 0 && lines > self.max_lines)
            || (self.max_bytes > 0 && bytes > self.max_bytes)
            || (self.max_age_days > 0 && deadline.is_some_and(|deadline| now >= deadline))
    }

    /// Get the next age-based rotation time: local midnight of the day of
    /// `now`, plus `max_age_days` days. `None` when age rotation is disabled.
    pub fn next_deadline(&self, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        next_rotation_deadline(now, self.max_age_days)
    }
}

/// Start of the day of `now` (in `now`'s offset) plus `days` days.
pub(crate) fn next_rotation_deadline(now: DateTime<FixedOffset>, days: u32) -> Option<DateTime<FixedOffset>> {
    if days == 0 {
        return None;
    }
    now.date_naive()
        .checked_add_days(Days::new(u64::from(days)))?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(*now.offset())
        .single()
}
