//! Terminal rendering of core events.

use std::io::{self, Write};
use wayx_core::event::{Event, EventSink};
use wayx_core::locale::Messages;

/// Prints each event as one localized line: problems on stderr, the rest on stdout.
pub struct ConsoleSink {
    messages: &'static Messages,
}

impl ConsoleSink {
    pub fn new(messages: &'static Messages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: Event) {
        let line = event.render(self.messages);
        if event.is_error() {
            let _ = writeln!(io::stderr().lock(), "{}", line);
        } else {
            let _ = writeln!(io::stdout().lock(), "{}", line);
        }
    }
}
