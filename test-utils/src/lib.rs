//! Shared fixture helpers for the integration tests under `tests/`. These
//! call directly into the `wacc` library and assert on the resulting
//! `Result` -- there is no codegen stage here to run a compiled program
//! against and diff its output.

use wacc::error::ErrorKind;

/// Asserts that analyzing the given source succeeds outright.
pub fn check_valid(source: &str) {
    if let Err(e) = wacc::compile(source) {
        panic!("expected '{source}' to compile cleanly, got: {e}");
    }
}

/// Asserts that analyzing the given source fails with the given error kind,
/// and (if `contains` is non-empty) that the message contains `contains`.
pub fn check_fails(source: &str, kind: ErrorKind, contains: &str) {
    let err = match wacc::compile(source) {
        Ok(_) => panic!("expected '{source}' to fail, but it compiled cleanly"),
        Err(e) => e,
    };
    assert_eq!(err.kind, kind, "wrong error kind for '{source}': {err}");
    if !contains.is_empty() {
        assert!(
            err.message.contains(contains),
            "expected message for '{source}' to contain '{contains}', got '{}'",
            err.message
        );
    }
}
