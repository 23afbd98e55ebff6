//! Tab completion over command names, with cycling.

/// Longest completable prefix. Command names are all shorter.
const PREFIX_SIZE: usize = 16;

/// Most matches a prefix can have (bounded by the command table).
const MAX_MATCHES: usize = 16;

/// Tab completion state.
pub struct Completer {
    /// Prefix being completed (stored for cycle detection).
    prefix: [u8; PREFIX_SIZE],
    prefix_len: usize,
    /// Current match index for cycling.
    match_idx: usize,
    /// Whether we're actively cycling.
    cycling: bool,
}

impl Completer {
    /// Create new completer.
    pub const fn new() -> Self {
        Self {
            prefix: [0u8; PREFIX_SIZE],
            prefix_len: 0,
            match_idx: 0,
            cycling: false,
        }
    }

    /// Complete `prefix`, cycling through matches on repeated calls.
    ///
    /// Returns the completed string, or None if no candidate matches.
    pub fn complete<'a, I>(&mut self, prefix: &str, candidates: I) -> Option<&'a str>
    where
        I: Iterator<Item = &'a str>,
    {
        let prefix_bytes = prefix.as_bytes();

        // A changed prefix restarts the cycle.
        let same_prefix = prefix_bytes.len() == self.prefix_len
            && prefix_bytes == &self.prefix[..self.prefix_len];

        if !same_prefix {
            self.prefix_len = prefix_bytes.len().min(PREFIX_SIZE);
            self.prefix[..self.prefix_len].copy_from_slice(&prefix_bytes[..self.prefix_len]);
            self.match_idx = 0;
            self.cycling = false;
        } else if self.cycling {
            self.match_idx += 1;
        }

        let mut matches: [Option<&str>; MAX_MATCHES] = [None; MAX_MATCHES];
        let mut match_count = 0;

        for c in candidates {
            if c.starts_with(prefix) && match_count < MAX_MATCHES {
                matches[match_count] = Some(c);
                match_count += 1;
            }
        }

        if match_count == 0 {
            self.cycling = false;
            return None;
        }

        // Wrap around
        if self.match_idx >= match_count {
            self.match_idx = 0;
        }

        self.cycling = true;
        matches[self.match_idx]
    }

    /// Reset completion state (call when the user types anything but tab).
    pub fn reset(&mut self) {
        self.cycling = false;
        self.match_idx = 0;
    }
}
