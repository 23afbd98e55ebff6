//! Line-based command shell on the serial line.
//!
//! Each received line is tokenized and dispatched against a static command
//! table; handlers mutate display state or report diagnostics. All input
//! processing is byte-wise and non-blocking, driven from a poll event.
//! No heap allocation anywhere, all buffers are fixed-size.

pub mod commands;
pub mod completion;
pub mod error;
pub mod history;
pub mod line_buffer;
pub mod parser;
pub mod shell;

pub use commands::{command_names, execute, COMMANDS};
pub use completion::Completer;
pub use error::ConsoleError;
pub use history::History;
pub use line_buffer::{LineBuffer, LINE_SIZE};
pub use parser::{parse_line, ParsedCommand};
pub use shell::Shell;
