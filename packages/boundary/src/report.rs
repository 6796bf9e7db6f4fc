//! Unresolved sub-district report.

use constituency_map_boundary_models::UnresolvedEntry;

/// How many constituencies the summary lists before collapsing the rest
/// into a count.
pub const DEFAULT_LISTING_LIMIT: usize = 10;

/// Constituencies with one or more unresolved sub-district names, in
/// mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedReport {
    entries: Vec<UnresolvedEntry>,
}

impl UnresolvedReport {
    /// Records an entry. Entries with nothing missing are ignored.
    pub fn push(&mut self, entry: UnresolvedEntry) {
        if !entry.missing.is_empty() {
            self.entries.push(entry);
        }
    }

    /// All entries, in mapping order.
    #[must_use]
    pub fn entries(&self) -> &[UnresolvedEntry] {
        &self.entries
    }

    /// Number of constituencies with unresolved names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if every name resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of unresolved names across all constituencies.
    #[must_use]
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|e| e.missing.len()).sum()
    }

    /// Unresolved names for the constituency with `code`.
    #[must_use]
    pub fn missing_for(&self, code: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.missing.as_slice())
    }

    /// Renders the report as text lines, listing at most `limit`
    /// constituencies followed by a count of the remainder.
    #[must_use]
    pub fn summary_lines(&self, limit: usize) -> Vec<String> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![format!(
            "Warnings ({} constituencies with missing upazilas):",
            self.entries.len()
        )];

        lines.extend(
            self.entries
                .iter()
                .take(limit)
                .map(|e| format!("  {} - {}: {:?}", e.code, e.name, e.missing)),
        );

        if self.entries.len() > limit {
            lines.push(format!("  ... and {} more", self.entries.len() - limit));
        }

        lines
    }
}
