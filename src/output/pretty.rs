/// The unit of indentation, written once per level of depth.
pub const INDENT: &str = "\t";

/// Indentation and newline state of a rendering session.
///
/// This only tracks and decides; the [`Document`](crate::Document) performs
/// the writes and reports every one of them back through [`observe`].
///
/// [`observe`]: FormatState::observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormatState {
    auto_newline: bool,
    indent: bool,
    depth: usize,
    at_newline: bool,
}

/// A snapshot of the formatting flags, restored when a scope ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Saved {
    auto_newline: bool,
    indent: bool,
    depth: usize,
}

impl FormatState {
    pub(crate) fn new(auto_newline: bool, indent: bool) -> Self {
        FormatState {
            auto_newline,
            indent,
            depth: 0,
            // nothing written yet counts as the start of a line
            at_newline: true,
        }
    }

    pub(crate) fn auto_newline(&self) -> bool {
        self.auto_newline
    }

    pub(crate) fn indent(&self) -> bool {
        self.indent
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn at_newline(&self) -> bool {
        self.at_newline
    }

    pub(crate) fn set_auto_newline(&mut self, auto_newline: bool) {
        self.auto_newline = auto_newline;
    }

    pub(crate) fn set_indent(&mut self, indent: bool) {
        self.indent = indent;
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Record a write. `at_newline` follows the last character written.
    pub(crate) fn observe(&mut self, written: &str) {
        if let Some(last) = written.as_bytes().last() {
            self.at_newline = *last == b'\n';
        }
    }

    /// Whether an automatic newline is due before the next token.
    pub(crate) fn newline_due(&self) -> bool {
        self.auto_newline && !self.at_newline
    }

    /// Whether automatic indentation applies at all.
    pub(crate) fn indenting(&self) -> bool {
        self.auto_newline && self.indent
    }

    /// The number of indentation units for `depth + offset`, clamped at zero.
    pub(crate) fn width(&self, offset: isize) -> usize {
        self.depth.saturating_add_signed(offset)
    }

    fn save(&self) -> Saved {
        Saved {
            auto_newline: self.auto_newline,
            indent: self.indent,
            depth: self.depth,
        }
    }

    /// Enter an indented body. Restore with the returned snapshot.
    pub(crate) fn push_depth(&mut self) -> Saved {
        let saved = self.save();
        self.depth += 1;
        saved
    }

    /// Snapshot without changing anything, for bodies that are not indented.
    pub(crate) fn keep(&self) -> Saved {
        self.save()
    }

    /// Enter a verbatim region: no automatic newlines, no indentation, and
    /// depth reset to zero.
    pub(crate) fn suppress(&mut self) -> Saved {
        let saved = self.save();
        self.auto_newline = false;
        self.indent = false;
        self.depth = 0;
        saved
    }

    /// Put back what a scope changed. `at_newline` is left alone, since it
    /// describes output that has already been written.
    pub(crate) fn restore(&mut self, saved: Saved) {
        self.auto_newline = saved.auto_newline;
        self.indent = saved.indent;
        self.depth = saved.depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_newline() {
        let state = FormatState::new(true, true);
        assert!(state.at_newline());
        assert!(!state.newline_due());
    }

    #[test]
    fn test_observe_tracks_last_character() {
        let mut state = FormatState::new(true, true);
        state.observe("<p>");
        assert!(!state.at_newline());
        assert!(state.newline_due());
        state.observe("text\n");
        assert!(state.at_newline());
        // empty writes change nothing
        state.observe("");
        assert!(state.at_newline());
        state.observe("\n\t");
        assert!(!state.at_newline());
    }

    #[test]
    fn test_no_newline_due_when_disabled() {
        let mut state = FormatState::new(false, true);
        state.observe("x");
        assert!(!state.newline_due());
        assert!(!state.indenting());
    }

    #[test]
    fn test_width_is_clamped() {
        let mut state = FormatState::new(true, true);
        state.set_depth(2);
        assert_eq!(state.width(0), 2);
        assert_eq!(state.width(-1), 1);
        assert_eq!(state.width(-5), 0);
        assert_eq!(state.width(3), 5);
    }

    #[test]
    fn test_push_and_restore_depth() {
        let mut state = FormatState::new(true, true);
        let outer = state.push_depth();
        let inner = state.push_depth();
        assert_eq!(state.depth(), 2);
        state.restore(inner);
        assert_eq!(state.depth(), 1);
        state.restore(outer);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn test_suppress_round_trip() {
        let mut state = FormatState::new(true, true);
        state.set_depth(3);
        let saved = state.suppress();
        assert!(!state.auto_newline());
        assert!(!state.indent());
        assert_eq!(state.depth(), 0);
        // changes made inside the region are discarded
        state.set_depth(7);
        state.set_auto_newline(true);
        state.restore(saved);
        assert!(state.auto_newline());
        assert!(state.indent());
        assert_eq!(state.depth(), 3);
    }
}
