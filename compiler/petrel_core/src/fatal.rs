//! Process-fatal invariant failures.
//!
//! A failed tree invariant means the parser or an earlier pass handed over
//! a corrupt tree. No caller can meaningfully handle that, so it is not
//! modeled as a recoverable error: the failure is logged with structured
//! context and the process aborts.

/// Log a structured diagnostic and abort the process.
pub fn raise(condition: &str, file: &str, line: u32) -> ! {
    tracing::error!(condition, file, line, "enforced tree invariant failed");
    std::process::abort();
}
