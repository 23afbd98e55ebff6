//! Tab completion tests.

use lcd_shell::console::{command_names, Completer};

#[test]
fn test_unique_prefix_completes() {
    let mut completer = Completer::new();

    assert_eq!(completer.complete("wr", command_names()), Some("write"));
}

#[test]
fn test_no_match_returns_none() {
    let mut completer = Completer::new();

    assert_eq!(completer.complete("zz", command_names()), None);
}

#[test]
fn test_empty_prefix_matches_everything() {
    let mut completer = Completer::new();

    // First candidate in table order.
    assert_eq!(completer.complete("", command_names()), Some("help"));
}

#[test]
fn test_repeated_tab_cycles_matches() {
    let mut completer = Completer::new();

    // "c" matches char, clear, cursor (table order).
    assert_eq!(completer.complete("c", command_names()), Some("char"));
    assert_eq!(completer.complete("c", command_names()), Some("clear"));
    assert_eq!(completer.complete("c", command_names()), Some("cursor"));
    // Wraps around.
    assert_eq!(completer.complete("c", command_names()), Some("char"));
}

#[test]
fn test_changing_prefix_restarts_cycle() {
    let mut completer = Completer::new();

    assert_eq!(completer.complete("c", command_names()), Some("char"));
    assert_eq!(completer.complete("c", command_names()), Some("clear"));

    assert_eq!(completer.complete("cl", command_names()), Some("clear"));
}

#[test]
fn test_reset_restarts_cycle() {
    let mut completer = Completer::new();

    assert_eq!(completer.complete("c", command_names()), Some("char"));
    assert_eq!(completer.complete("c", command_names()), Some("clear"));

    completer.reset();
    assert_eq!(completer.complete("c", command_names()), Some("char"));
}
