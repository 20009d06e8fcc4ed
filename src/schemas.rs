/// JSON Schema Draft version
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Draft {
    /// JSON Schema Draft 4
    Draft4,
    /// JSON Schema Draft 6
    Draft6,
}

impl Default for Draft {
    fn default() -> Self {
        Draft::Draft6
    }
}

impl Draft {
    /// Draft 6 widened `integer` to also accept floats with a zero
    /// fractional part.
    pub(crate) const fn accepts_whole_floats_as_integers(self) -> bool {
        matches!(self, Draft::Draft6)
    }

    /// Format tags that only exist from draft 6 on. Using them under draft 4
    /// is reported instead of being silently ignored.
    pub(crate) fn format_is_draft6_only(format: &str) -> bool {
        matches!(format, "uri-reference" | "uri-template" | "json-pointer")
    }
}
