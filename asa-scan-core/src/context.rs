use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^context\s+(\S+)").unwrap());
static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^hostname\s+(\S+)").unwrap());

/// Default context present before any `context` directive is seen.
pub const SYSTEM_CONTEXT: &str = "System";

/// Tracks the active administrative context while scanning a config.
///
/// Multi-context appliances announce `context <name>` in the system
/// configuration and `hostname <name>` inside each context. Records
/// created while a context is active carry that context's hostname,
/// falling back to the context name when none was announced.
#[derive(Debug)]
pub struct ContextTracker {
    current: String,
    hostnames: HashMap<String, String>,
}

impl ContextTracker {
    pub fn new() -> Self {
        let mut hostnames = HashMap::new();
        hostnames.insert(SYSTEM_CONTEXT.to_string(), SYSTEM_CONTEXT.to_string());
        Self {
            current: SYSTEM_CONTEXT.to_string(),
            hostnames,
        }
    }

    /// Feed one stripped line. Returns `true` when it was a context or
    /// hostname directive and has been consumed.
    pub fn observe(&mut self, line: &str) -> bool {
        if let Some(caps) = CONTEXT_RE.captures(line) {
            let name = caps[1].to_string();
            // Entering a context resets resolution to its own name
            // until a hostname directive follows.
            self.hostnames.insert(name.clone(), name.clone());
            self.current = name;
            return true;
        }
        if let Some(caps) = HOSTNAME_RE.captures(line) {
            self.hostnames
                .insert(self.current.clone(), caps[1].to_string());
            return true;
        }
        false
    }

    /// Hostname of the current context, or the context name itself.
    pub fn resolve(&self) -> String {
        self.hostnames
            .get(&self.current)
            .cloned()
            .unwrap_or_else(|| self.current.clone())
    }
}

impl Default for ContextTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ContextTracker;

    #[test]
    fn resolves_system_before_any_directive() {
        let tracker = ContextTracker::new();
        assert_eq!(tracker.resolve(), "System");
    }

    #[test]
    fn hostname_applies_to_current_context() {
        let mut tracker = ContextTracker::new();
        assert!(tracker.observe("hostname FW1"));
        assert_eq!(tracker.resolve(), "FW1");

        assert!(tracker.observe("context admin"));
        assert_eq!(tracker.resolve(), "admin");
        assert!(tracker.observe("hostname admin-fw"));
        assert_eq!(tracker.resolve(), "admin-fw");
    }

    #[test]
    fn reentering_a_context_resets_its_hostname() {
        let mut tracker = ContextTracker::new();
        tracker.observe("context dmz");
        tracker.observe("hostname dmz-fw");
        tracker.observe("context admin");
        tracker.observe("context dmz");
        assert_eq!(tracker.resolve(), "dmz");
    }

    #[test]
    fn unmatched_lines_are_ignored() {
        let mut tracker = ContextTracker::new();
        assert!(!tracker.observe("interface GigabitEthernet0/0"));
        assert!(!tracker.observe(""));
        assert_eq!(tracker.resolve(), "System");
    }
}
