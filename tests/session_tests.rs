//! Session tests: connection wait, spinner animation, shell hand-over.

mod common;

use common::{DisplayOp, MockDisplay, MockSerial};
use lcd_shell::event::EventLoop;
use lcd_shell::session::{Phase, Session, WAIT_GLYPHS};

fn new_session() -> (Session<MockDisplay, MockSerial>, EventLoop<Session<MockDisplay, MockSerial>>) {
    let session = Session::new(MockDisplay::new(), MockSerial::new());
    let lp = EventLoop::new();
    (session, lp)
}

#[test]
fn test_initialize_brings_up_serial_and_display() {
    let (mut session, mut lp) = new_session();

    session.initialize(&mut lp).unwrap();

    assert!(session.serial_mut().initialized);
    assert_eq!(session.phase(), Phase::WaitingForConnection);

    let ops = &session.display().ops;
    assert!(ops.contains(&DisplayOp::Backlight(true)));
    assert!(ops.contains(&DisplayOp::WriteText("Waiting for".to_string())));
    assert!(ops.contains(&DisplayOp::WriteText("USB serial...".to_string())));

    // Exactly the animation event is scheduled.
    assert_eq!(lp.len(), 1);
}

#[test]
fn test_first_frame_waits_out_the_delay_on_an_absolute_clock() {
    let (mut session, mut lp) = new_session();

    // The target drives the loop with timer milliseconds; the clock is
    // seeded before initialization schedules the first frame.
    lp.set_time(7000);
    session.initialize(&mut lp).unwrap();

    lp.loop_once(&mut session, 7001);
    lp.loop_once(&mut session, 7299);
    assert!(session.display().written_chars().is_empty());

    lp.loop_once(&mut session, 7300);
    assert_eq!(session.display().written_chars(), "^");
}

#[test]
fn test_spinner_cycles_four_glyphs_in_order() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    let mut now = 0;
    for _ in 0..9 {
        now += 300;
        lp.loop_once(&mut session, now);
    }

    // Two full revolutions plus one glyph, in fixed order.
    assert_eq!(session.display().written_chars(), "^>v<^>v<^");
    assert_eq!(session.phase(), Phase::WaitingForConnection);
}

#[test]
fn test_spinner_runs_indefinitely_without_a_peer() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    let mut now = 0;
    for _ in 0..100 {
        now += 300;
        lp.loop_once(&mut session, now);
    }

    assert_eq!(session.phase(), Phase::WaitingForConnection);
    // The wait event keeps re-arming itself; nothing else accumulates.
    assert_eq!(lp.len(), 1);
    assert_eq!(session.display().written_chars().len(), 100);
}

#[test]
fn test_animation_frame_draws_at_fixed_position() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    lp.loop_once(&mut session, 300);

    let ops = &session.display().ops;
    let glyph_pos = ops
        .iter()
        .position(|op| matches!(op, DisplayOp::WriteChar(_)))
        .unwrap();
    assert_eq!(ops[glyph_pos - 1], DisplayOp::SetCursor(0, 2));
}

#[test]
fn test_ready_peer_activates_the_shell() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    // A couple of frames first, then the peer attaches.
    lp.loop_once(&mut session, 300);
    lp.loop_once(&mut session, 600);
    session.serial_mut().ready = true;
    lp.loop_once(&mut session, 900);

    assert_eq!(session.phase(), Phase::ShellActive);
    assert!(session
        .display()
        .ops
        .contains(&DisplayOp::WriteText("OK!".to_string())));

    let output = &session.serial_mut().output;
    assert!(output.contains("*** Welcome to the LCD demo! ***"));
    assert!(output.contains("Use the command 'help' to get help."));
    assert!(output.contains("lcd-demo> "));
}

#[test]
fn test_wait_event_is_not_rescheduled_after_hand_over() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    session.serial_mut().ready = true;
    lp.loop_once(&mut session, 300);

    let glyphs_at_handover = session.display().written_chars();

    // Plenty of further frames: only the shell poll event remains.
    let mut now = 300;
    for _ in 0..20 {
        now += 300;
        lp.loop_once(&mut session, now);
    }

    assert_eq!(lp.len(), 1);
    assert_eq!(session.display().written_chars(), glyphs_at_handover);
    assert_eq!(session.phase(), Phase::ShellActive);
}

#[test]
fn test_transition_is_one_way() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    session.serial_mut().ready = true;
    lp.loop_once(&mut session, 300);
    assert_eq!(session.phase(), Phase::ShellActive);

    // A dropped connection does not bring the spinner back.
    session.serial_mut().ready = false;
    lp.loop_once(&mut session, 600);
    lp.loop_once(&mut session, 900);

    assert_eq!(session.phase(), Phase::ShellActive);
}

#[test]
fn test_shell_serves_input_from_the_serial_line() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    session.serial_mut().ready = true;
    lp.loop_once(&mut session, 300);

    session.serial_mut().feed("clear\r");
    lp.loop_once(&mut session, 310);

    assert!(session.display().ops.contains(&DisplayOp::Clear));
}

#[test]
fn test_shell_commands_print_over_serial() {
    let (mut session, mut lp) = new_session();
    session.initialize(&mut lp).unwrap();

    session.serial_mut().ready = true;
    lp.loop_once(&mut session, 300);
    session.serial_mut().output.clear();

    session.serial_mut().feed("help\r");
    lp.loop_once(&mut session, 310);

    let output = &session.serial_mut().output;
    assert!(output.contains("help, write, char, clear, reset, enable, disable, scroll, cursor, backlight, freeram"));
}

#[test]
fn test_glyph_table_matches_the_animation() {
    assert_eq!(WAIT_GLYPHS, b"^>v<");
}
