//! Command history tests.

use lcd_shell::console::History;
use lcd_shell::console::history::HISTORY_SIZE;

#[test]
fn test_empty_history_has_no_prev() {
    let mut history = History::new();

    assert_eq!(history.get_prev(), None);
    assert_eq!(history.get_next(), None);
}

#[test]
fn test_prev_walks_from_newest_to_oldest() {
    let mut history = History::new();

    history.push("first");
    history.push("second");
    history.push("third");

    assert_eq!(history.get_prev(), Some("third"));
    assert_eq!(history.get_prev(), Some("second"));
    assert_eq!(history.get_prev(), Some("first"));
    // Stays at the oldest entry.
    assert_eq!(history.get_prev(), Some("first"));
}

#[test]
fn test_next_walks_back_to_current_input() {
    let mut history = History::new();

    history.push("one");
    history.push("two");

    assert_eq!(history.get_prev(), Some("two"));
    assert_eq!(history.get_prev(), Some("one"));
    assert_eq!(history.get_next(), Some("two"));
    // Past the newest entry: back to the empty input line.
    assert_eq!(history.get_next(), None);
}

#[test]
fn test_push_resets_navigation() {
    let mut history = History::new();

    history.push("one");
    assert_eq!(history.get_prev(), Some("one"));

    history.push("two");
    assert_eq!(history.get_prev(), Some("two"));
}

#[test]
fn test_ring_overwrites_oldest() {
    let mut history = History::new();

    for i in 0..(HISTORY_SIZE + 2) {
        let line = format!("cmd{}", i);
        history.push(&line);
    }

    // Walk all the way back: the oldest surviving entry is cmd2.
    let mut oldest = None;
    for _ in 0..(HISTORY_SIZE + 2) {
        if let Some(entry) = history.get_prev() {
            oldest = Some(entry.to_string());
        }
    }
    assert_eq!(oldest.as_deref(), Some("cmd2"));
}

#[test]
fn test_reset_nav_restarts_at_newest() {
    let mut history = History::new();

    history.push("a");
    history.push("b");

    assert_eq!(history.get_prev(), Some("b"));
    assert_eq!(history.get_prev(), Some("a"));

    history.reset_nav();
    assert_eq!(history.get_prev(), Some("b"));
}
