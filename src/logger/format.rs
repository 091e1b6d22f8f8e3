//! Formatter contract and the built-in presets

use std::fmt;

use chrono::Utc;
use serde_json::json;

use super::Level;

/// Formatting function turning a level plus the caller's arguments into the
/// line to write. Returning `None` suppresses the write entirely, hooks
/// included.
pub type FormatFn = dyn for<'a> Fn(Level, fmt::Arguments<'a>) -> Option<String> + Send + Sync;

/// Default preset: renders the arguments and ignores the level
pub fn plain_format(_level: Level, args: fmt::Arguments<'_>) -> Option<String> {
    Some(args.to_string())
}

/// JSON preset: one `{"ts","level","message"}` object per line
pub fn json_format(level: Level, args: fmt::Arguments<'_>) -> Option<String> {
    let line = json!({
        "ts": Utc::now().to_rfc3339(),
        "level": level.to_string(),
        "message": args.to_string(),
    });
    Some(line.to_string())
}
