use std::collections::HashMap;

/// Buffers remark lines until the access-list entry that consumes them.
///
/// Remarks are forward declarations: they precede the entry they
/// annotate and are tied to it only by sharing the same list name.
#[derive(Debug, Default)]
pub struct RemarkBuffer {
    pending: HashMap<String, Vec<String>>,
}

impl RemarkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a remark for the next entry of `list_name`.
    pub fn add(&mut self, list_name: &str, text: &str) {
        self.pending
            .entry(list_name.to_string())
            .or_default()
            .push(text.to_string());
    }

    /// Take everything pending for `list_name`, joined with `"; "`.
    ///
    /// The bucket is cleared, so a second drain without intervening
    /// `add` calls returns an empty string.
    pub fn drain(&mut self, list_name: &str) -> String {
        self.pending
            .remove(list_name)
            .map(|texts| texts.join("; "))
            .unwrap_or_default()
    }
}
