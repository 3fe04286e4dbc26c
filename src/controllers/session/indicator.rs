use crate::controllers::session::ports::StatusSink;

const SEGMENTS: usize = 8;
const ACTIVE_SEGMENTS: usize = 3;
const ACTIVE: char = '●';
const INACTIVE: char = '○';
const LABEL: &str = "Computing...";

/// Cosmetic busy spinner, advanced once per tick while the session is busy.
#[derive(Debug, Default)]
pub struct BusyIndicator {
    frame: usize,
    showing: bool,
}

impl BusyIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the next frame while busy; clears the sink once when idle returns.
    pub fn tick(&mut self, busy: bool, sink: &dyn StatusSink) {
        if busy {
            sink.show_progress(&self.render());
            self.frame = (self.frame + 1) % SEGMENTS;
            self.showing = true;
        } else if self.showing {
            sink.clear();
            self.frame = 0;
            self.showing = false;
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let segments: String = (0..SEGMENTS)
            .map(|i| {
                if (i + SEGMENTS - self.frame) % SEGMENTS < ACTIVE_SEGMENTS {
                    ACTIVE
                } else {
                    INACTIVE
                }
            })
            .collect();

        format!("{LABEL} {segments}")
    }
}
