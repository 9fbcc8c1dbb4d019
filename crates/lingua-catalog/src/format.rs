//! Positional placeholder substitution (`%1`..`%9`).
//!
//! # Invariants
//!
//! 1. **Single pass**: substitution scans the template exactly once;
//!    argument values are never re-scanned for placeholders.
//!
//! 2. **Nothing is blanked**: a placeholder with no corresponding argument
//!    stays literal in the output so malformed calls surface visibly.
//!
//! 3. **Literal `%` passes through**: there is no escape form; `%` not
//!    followed by a digit `1`-`9` is ordinary text.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing argument | `%3` with two args | Token left as-is, [`FormatError`] reported |
//! | Surplus arguments | ten args, template uses `%1` | Surplus unused, no report |
//! | `%0` / `%x` | not a placeholder | Passed through verbatim |

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashSet;

/// Highest placeholder index a template can reference.
pub const MAX_PLACEHOLDER: usize = 9;

/// A caller-supplied substitution value.
///
/// A closed set of display-convertible variants stands in for the loose
/// "anything printable" arguments UI call sites pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating-point number.
    Float(f64),
    /// Plain text.
    Str(String),
    /// A duration rendered as `H:MM:SS` (or `M:SS` under an hour).
    Duration(Duration),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
            Self::Duration(d) => {
                let total = d.as_secs();
                let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
                if h > 0 {
                    write!(f, "{h}:{m:02}:{s:02}")
                } else {
                    write!(f, "{m}:{s:02}")
                }
            }
        }
    }
}

impl From<i64> for Argument {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Argument {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<u32> for Argument {
    fn from(v: u32) -> Self {
        Self::UInt(u64::from(v))
    }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Duration> for Argument {
    fn from(v: Duration) -> Self {
        Self::Duration(v)
    }
}

/// A placeholder referenced an argument the caller did not supply.
///
/// Never raised to callers; reported through [`report_once`] and the
/// best-effort string is returned anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatError {
    /// 1-based index of the first unmatched placeholder.
    pub index: u8,
    /// Number of arguments the caller supplied.
    pub supplied: usize,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "placeholder %{} has no argument ({} supplied)",
            self.index, self.supplied
        )
    }
}

impl std::error::Error for FormatError {}

/// Substitute `%1`..`%9` in `template` with `args`, in order.
///
/// Returns the substituted string and the first unmatched-placeholder
/// error, if any. Pure: no logging, no global state.
#[must_use]
pub fn interpolate(template: &str, args: &[Argument]) -> (String, Option<FormatError>) {
    let mut out = String::with_capacity(template.len());
    let mut first_missing = None;
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some(d @ '1'..='9') => {
                chars.next();
                let idx = (d as usize) - ('1' as usize);
                if let Some(arg) = args.get(idx) {
                    out.push_str(&arg.to_string());
                } else {
                    if first_missing.is_none() {
                        first_missing = Some(FormatError {
                            index: (idx + 1) as u8,
                            supplied: args.len(),
                        });
                    }
                    out.push('%');
                    out.push(d);
                }
            }
            _ => out.push('%'),
        }
    }
    (out, first_missing)
}

/// The set of placeholder indices a template references, sorted, deduplicated.
///
/// Audit tooling compares source and translation sets to catch translations
/// that dropped or invented a placeholder.
#[must_use]
pub fn placeholder_indices(template: &str) -> Vec<u8> {
    let mut seen = [false; MAX_PLACEHOLDER];
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            continue;
        }
        if let Some(d @ '1'..='9') = chars.peek().copied() {
            chars.next();
            seen[(d as usize) - ('1' as usize)] = true;
        }
    }
    (0..MAX_PLACEHOLDER)
        .filter(|&i| seen[i])
        .map(|i| (i + 1) as u8)
        .collect()
}

/// Report a format error for `(context, source)`, at most once per process.
///
/// Repeated malformed calls from a render loop would otherwise flood the
/// log at frame rate.
pub(crate) fn report_once(context: &str, source: &str, err: &FormatError) -> bool {
    static REPORTED: OnceLock<Mutex<FxHashSet<(String, String)>>> = OnceLock::new();
    let reported = REPORTED.get_or_init(|| Mutex::new(FxHashSet::default()));
    let mut reported = reported.lock().unwrap_or_else(PoisonError::into_inner);
    let fresh = reported.insert((context.to_string(), source.to_string()));
    if fresh {
        tracing::warn!(context = %context, source = %source, %err, "format error");
    }
    fresh
}
