//! Hand-off of a record cut by a window boundary to the next window.

/// Receives the incomplete tail of one window and stitches it onto the head
/// of the next.
pub trait PartialRecordHandler {
    /// Return `first` with any pending fragment prepended, consuming the fragment.
    fn prepend_partial_record_to(&mut self, first: &str) -> String;

    /// Keep `last` as the pending fragment for the next window.
    fn handle_partial_record(&mut self, last: String);

    /// The window's last line was yielded as a complete record before its
    /// newline was seen. Whitespace up to the next newline still belongs to it.
    fn mark_unterminated(&mut self) {}

    /// Whether the previous window ended inside an already yielded line,
    /// clearing the mark.
    fn take_unterminated(&mut self) -> bool {
        false
    }
}

impl<H: PartialRecordHandler + ?Sized> PartialRecordHandler for &mut H {
    fn prepend_partial_record_to(&mut self, first: &str) -> String {
        (**self).prepend_partial_record_to(first)
    }

    fn handle_partial_record(&mut self, last: String) {
        (**self).handle_partial_record(last);
    }

    fn mark_unterminated(&mut self) {
        (**self).mark_unterminated();
    }

    fn take_unterminated(&mut self) -> bool {
        (**self).take_unterminated()
    }
}

/// Single-slot carry shared by every window of one pass over a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCarry {
    pending: Option<String>,
    unterminated: bool,
}

impl PartialCarry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }

    /// Whether the last yielded record is still waiting for its newline.
    #[must_use]
    pub fn is_unterminated(&self) -> bool {
        self.unterminated
    }
}

impl PartialRecordHandler for PartialCarry {
    fn prepend_partial_record_to(&mut self, first: &str) -> String {
        match self.pending.take() {
            Some(mut fragment) => {
                tracing::trace!(carry.len = fragment.len(), "stitching partial record");
                fragment.push_str(first);
                fragment
            }
            None => first.to_owned(),
        }
    }

    fn handle_partial_record(&mut self, last: String) {
        tracing::trace!(carry.len = last.len(), "holding partial record");
        self.pending = Some(last);
        self.unterminated = false;
    }

    fn mark_unterminated(&mut self) {
        self.unterminated = true;
    }

    fn take_unterminated(&mut self) -> bool {
        std::mem::take(&mut self.unterminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_first_line_through_when_nothing_pending() {
        let mut carry = PartialCarry::new();
        assert_eq!(carry.prepend_partial_record_to("abc"), "abc");
        assert_eq!(carry.pending(), None);
    }

    #[test]
    fn fragment_is_consumed_exactly_once() {
        let mut carry = PartialCarry::new();
        carry.handle_partial_record(r#"{"ns":"app.orders""#.to_owned());
        assert_eq!(carry.pending(), Some(r#"{"ns":"app.orders""#));

        let stitched = carry.prepend_partial_record_to(r#","op":"u"}}"#);
        assert_eq!(stitched, r#"{"ns":"app.orders","op":"u"}}"#);
        assert_eq!(carry.pending(), None);
        assert_eq!(carry.prepend_partial_record_to("next"), "next");
    }

    #[test]
    fn later_fragment_replaces_slot() {
        let mut carry = PartialCarry::new();
        carry.handle_partial_record("a".to_owned());
        carry.handle_partial_record("b".to_owned());
        assert_eq!(carry.take().as_deref(), Some("b"));
        assert_eq!(carry.take(), None);
    }

    #[test]
    fn unterminated_mark_is_read_once() {
        let mut carry = PartialCarry::new();
        assert!(!carry.take_unterminated());
        carry.mark_unterminated();
        assert!(carry.is_unterminated());
        assert!(carry.take_unterminated());
        assert!(!carry.take_unterminated());

        carry.mark_unterminated();
        carry.handle_partial_record("{".to_owned());
        assert!(!carry.is_unterminated());
    }
}
