//! Pure time formatters for millisecond counts.
//!
//! Two independent renderings of the same value: a fixed-width compact form
//! for the live readout and lap table, and a verbose unit-by-unit form for
//! summaries. Neither mutates anything and neither is involved in timing
//! arithmetic.

/// Compact `MM:SS.CC` form.
///
/// Minutes are zero-padded to two digits and uncapped (100+ minutes simply
/// widens the field), seconds are zero-padded to two, and the trailing pair
/// is centiseconds (`(ms % 1000) / 10`).
///
/// # Examples
///
/// ```
/// use tally_core::format_compact;
///
/// assert_eq!(format_compact(125_340), "02:05.34");
/// assert_eq!(format_compact(0), "00:00.00");
/// ```
#[must_use]
pub fn format_compact(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let centis = (ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// Verbose `Nh Nm Ns Nms` form.
///
/// Leading zero-valued units are omitted; once a larger unit has been
/// emitted, smaller zero units stay so the reading is unambiguous
/// (`1h 0m 2s 0ms`, not `1h 2s`). Zero renders as `"0ms"`.
///
/// # Examples
///
/// ```
/// use tally_core::format_verbose;
///
/// assert_eq!(format_verbose(45_200), "45s 200ms");
/// assert_eq!(format_verbose(125_010), "2m 5s 10ms");
/// ```
#[must_use]
pub fn format_verbose(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;

    let mut parts = Vec::with_capacity(4);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 || !parts.is_empty() {
        parts.push(format!("{seconds}s"));
    }
    parts.push(format!("{millis}ms"));
    parts.join(" ")
}
