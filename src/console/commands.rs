//! Command table and handlers.
//!
//! The table is a static ordered list searched linearly; lookup misses
//! resolve to the unknown-command branch. Handlers either fully apply
//! their effect or reject before touching display state.

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::display::{CharacterDisplay, CursorMode, Direction};

/// Command descriptor.
pub struct CommandDescriptor {
    pub name: &'static str,
    pub handler:
        fn(&ParsedCommand<'_>, &mut dyn CharacterDisplay, &mut dyn Write) -> Result<(), ConsoleError>,
}

/// All available commands.
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", handler: cmd_help },
    CommandDescriptor { name: "write", handler: cmd_write },
    CommandDescriptor { name: "char", handler: cmd_char },
    CommandDescriptor { name: "clear", handler: cmd_clear },
    CommandDescriptor { name: "reset", handler: cmd_reset },
    CommandDescriptor { name: "enable", handler: cmd_enable },
    CommandDescriptor { name: "disable", handler: cmd_disable },
    CommandDescriptor { name: "scroll", handler: cmd_scroll },
    CommandDescriptor { name: "cursor", handler: cmd_cursor },
    CommandDescriptor { name: "backlight", handler: cmd_backlight },
    CommandDescriptor { name: "freeram", handler: cmd_freeram },
];

/// What a `scroll` argument means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollAction {
    None,
    On,
    Off,
    Left,
    Right,
    Up,
    Down,
}

/// Scroll argument names. Misses resolve to `None` (silently ignored).
static SCROLL_ACTIONS: &[(&str, ScrollAction)] = &[
    ("on", ScrollAction::On),
    ("off", ScrollAction::Off),
    ("left", ScrollAction::Left),
    ("right", ScrollAction::Right),
    ("up", ScrollAction::Up),
    ("down", ScrollAction::Down),
];

/// Cursor mode names. Misses resolve to `Off`.
static CURSOR_MODES: &[(&str, CursorMode)] = &[
    ("off", CursorMode::Off),
    ("block", CursorMode::Block),
    ("line", CursorMode::Line),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str, default: T) -> T {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

/// Execute a parsed command against the display.
///
/// An empty line does nothing. Any output (diagnostics, echoes) goes to
/// `out`, which is the serial line in production.
pub fn execute(
    cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(());
    }

    let descriptor = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (descriptor.handler)(cmd, display, out)
}

/// All command names, for `help` and tab completion.
pub fn command_names() -> impl Iterator<Item = &'static str> + Clone {
    COMMANDS.iter().map(|c| c.name)
}

// --- Command Implementations ---

fn cmd_help(
    _cmd: &ParsedCommand<'_>,
    _display: &mut dyn CharacterDisplay,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let _ = write!(out, "Available commands: ");
    for (i, name) in command_names().enumerate() {
        if i > 0 {
            let _ = write!(out, ", ");
        }
        let _ = write!(out, "{}", name);
    }
    let _ = writeln!(out);
    Ok(())
}

fn cmd_write(
    cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    display.write_text(cmd.tail)?;
    Ok(())
}

/// `char <begin> [<end>]`: write every character code in `[begin, end)`.
///
/// With no end argument the range is empty; a bare `char 65` writes
/// nothing. Malformed numbers reject before any display write.
fn cmd_char(
    cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let begin: u8 = cmd
        .arg(0)
        .ok_or(ConsoleError::CharUsage)?
        .parse()
        .map_err(|_| ConsoleError::CharUsage)?;

    let end: u8 = match cmd.arg(1) {
        Some(text) => text.parse().map_err(|_| ConsoleError::CharUsage)?,
        None => begin,
    };

    for code in begin..end {
        display.write_char(char::from(code))?;
    }
    Ok(())
}

fn cmd_clear(
    _cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    display.clear()?;
    Ok(())
}

fn cmd_reset(
    _cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    display.reset()?;
    Ok(())
}

fn cmd_enable(
    _cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    display.set_enabled(true)?;
    Ok(())
}

fn cmd_disable(
    _cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    display.set_enabled(false)?;
    Ok(())
}

fn cmd_scroll(
    cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let action = lookup(SCROLL_ACTIONS, cmd.arg(0).unwrap_or(""), ScrollAction::None);
    match action {
        ScrollAction::On => display.set_auto_scroll_enabled(true)?,
        ScrollAction::Off => display.set_auto_scroll_enabled(false)?,
        ScrollAction::Left => display.scroll(Direction::Left)?,
        ScrollAction::Right => display.scroll(Direction::Right)?,
        ScrollAction::Up => display.scroll(Direction::Up)?,
        ScrollAction::Down => display.scroll(Direction::Down)?,
        ScrollAction::None => {} // Unrecognized argument: ignore.
    }
    Ok(())
}

/// `cursor <x> <y>` moves the cursor, `cursor <off|block|line>` sets the
/// style. A numeric first argument selects the coordinate form; the mode
/// table is never consulted in that case.
fn cmd_cursor(
    cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let first = cmd.arg(0).ok_or(ConsoleError::CursorUsage)?;

    if let Ok(column) = first.parse::<u8>() {
        let row: u8 = cmd
            .arg(1)
            .ok_or(ConsoleError::CursorUsage)?
            .parse()
            .map_err(|_| ConsoleError::CursorUsage)?;
        let _ = writeln!(out, "Move cursor to column: {} row: {}", column, row);
        display.set_cursor(column, row)?;
    } else {
        let mode = lookup(CURSOR_MODES, first, CursorMode::Off);
        let _ = writeln!(out, "Set cursor mode to: {}", first);
        display.set_cursor_mode(mode)?;
    }
    Ok(())
}

fn cmd_backlight(
    cmd: &ParsedCommand<'_>,
    display: &mut dyn CharacterDisplay,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let enabled = match cmd.arg(0) {
        Some("on") => true,
        Some("off") => false,
        _ => return Err(ConsoleError::BacklightUsage),
    };
    display.set_backlight_enabled(enabled)?;
    Ok(())
}

fn cmd_freeram(
    _cmd: &ParsedCommand<'_>,
    _display: &mut dyn CharacterDisplay,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    #[cfg(all(not(test), target_arch = "xtensa"))]
    {
        let free = unsafe { esp_idf_svc::sys::esp_get_free_heap_size() };
        let _ = writeln!(out, "{} bytes free RAM.", free);
    }

    #[cfg(any(test, not(target_arch = "xtensa")))]
    {
        let _ = writeln!(out, "freeram: running on host");
    }

    Ok(())
}
