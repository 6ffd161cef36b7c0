/// Direction of a feature relative to the record's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    pub fn flip(self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
            Strand::Unknown => Strand::Unknown,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Strand::Forward => "+",
            _ => "-",
        }
    }
}

/// Outer bounds of a feature: 0-based `start`, exclusive `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
}

impl Location {
    pub fn new(start: i64, end: i64, strand: Strand) -> Self {
        Self { start, end, strand }
    }
}

/// Qualifier values in file order. A name may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    entries: Vec<(String, String)>,
}

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value recorded for `name`, if it is non-empty. Later values are never consulted.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn first_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.first(name).unwrap_or(default)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Qualifiers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut qualifiers = Qualifiers::new();
        for (name, value) in iter {
            qualifiers.push(name, value);
        }
        qualifiers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub kind: String,
    pub location: Location,
    pub qualifiers: Qualifiers,
}

/// One GenBank entry, reduced to what the tables need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceRecord {
    pub description: Option<String>,
    pub id: Option<String>,
    pub sequence_length: usize,
    pub features: Vec<Feature>,
}

impl SequenceRecord {
    /// Description, else identifier, else `fallback`. Empty strings count as absent.
    pub fn display_description<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reads_only_the_first_value() {
        let qualifiers: Qualifiers = vec![("note", "x"), ("gene", "dnaA"), ("gene", "dnaB")]
            .into_iter()
            .collect();

        assert_eq!(qualifiers.first("gene"), Some("dnaA"));
        assert_eq!(qualifiers.first_or("product", "-"), "-");
    }

    #[test]
    fn test_blank_first_value_hides_later_values() {
        let qualifiers: Qualifiers = vec![("gene", ""), ("gene", "abc")].into_iter().collect();

        assert_eq!(qualifiers.first("gene"), None);
        assert_eq!(qualifiers.first_or("gene", "-"), "-");
    }

    #[test]
    fn test_first_or_on_blank_only() {
        let qualifiers: Qualifiers = vec![("locus_tag", "")].into_iter().collect();
        assert_eq!(qualifiers.first_or("locus_tag", "-"), "-");
    }

    #[test]
    fn test_display_description_fallbacks() {
        let mut record = SequenceRecord {
            description: Some("Test genome".to_string()),
            id: Some("NC_000001.1".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_description("n/a"), "Test genome");

        record.description = Some(String::new());
        assert_eq!(record.display_description("n/a"), "NC_000001.1");

        record.id = None;
        assert_eq!(record.display_description("n/a"), "n/a");
    }

    #[test]
    fn test_strand_symbols() {
        assert_eq!(Strand::Forward.symbol(), "+");
        assert_eq!(Strand::Reverse.symbol(), "-");
        assert_eq!(Strand::Unknown.symbol(), "-");
        assert_eq!(Strand::Unknown.flip(), Strand::Unknown);
    }
}
