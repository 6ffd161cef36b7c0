//! Reads GenBank record streams with [gb_io](https://docs.rs/gb-io/latest/gb_io) and adapts
//! each `Seq` into a [`SequenceRecord`]. Compressed inputs are unwrapped with `niffler`.

use crate::error::ConvertError;
use crate::record::{Feature, Location, Qualifiers, SequenceRecord, Strand};
use gb_io::reader::SeqReader;
use gb_io::seq::{Location as GbLocation, Seq};
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct GenbankReader {
    path: PathBuf,
    // `None` for inputs too short to hold a single record.
    records: Option<SeqReader<Box<dyn Read>>>,
    failed: bool,
}

impl GenbankReader {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        let (inner_reader, _compression) = match niffler::get_reader(Box::new(file)) {
            Ok(opened) => opened,
            // Under five bytes there is no LOCUS line, so no records either.
            Err(niffler::Error::FileTooShort) => return Ok(Self::empty(path)),
            Err(e) => return Err(ConvertError::parse(path, e)),
        };
        Ok(Self::new(path, inner_reader))
    }

    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: None,
            failed: false,
        }
    }

    /// Wraps an already-open stream; `path` is only used in error messages.
    pub fn new(path: impl Into<PathBuf>, reader: Box<dyn Read>) -> Self {
        Self {
            path: path.into(),
            records: Some(SeqReader::new(reader)),
            failed: false,
        }
    }
}

impl Iterator for GenbankReader {
    type Item = Result<SequenceRecord, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.records.as_mut()?.next()? {
            Ok(seq) => Some(Ok(SequenceRecord::from(seq))),
            Err(e) => {
                // The stream position is undefined after a syntax error.
                self.failed = true;
                Some(Err(ConvertError::parse(&self.path, e)))
            }
        }
    }
}

impl From<Seq> for SequenceRecord {
    fn from(seq: Seq) -> Self {
        let sequence_length = if seq.seq.is_empty() {
            seq.len.map(|len| len as usize).unwrap_or(0)
        } else {
            seq.seq.len()
        };

        SequenceRecord {
            description: seq.definition.as_deref().map(definition_text),
            id: record_id(&seq),
            sequence_length,
            features: seq.features.iter().filter_map(adapt_feature).collect(),
        }
    }
}

/// DEFINITION on one line with the closing period dropped.
fn definition_text(definition: &str) -> String {
    let text = join_lines(definition);
    match text.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// VERSION, else the primary ACCESSION, else the LOCUS name.
fn record_id(seq: &Seq) -> Option<String> {
    let first_token = |field: &Option<String>| {
        field
            .as_deref()
            .and_then(|value| value.split_whitespace().next())
            .map(str::to_string)
    };
    first_token(&seq.version)
        .or_else(|| first_token(&seq.accession))
        .or_else(|| seq.name.clone())
}

/// Joins continuation lines with single spaces. Spacing within a line is kept.
fn join_lines(value: &str) -> String {
    value.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

fn adapt_feature(feature: &gb_io::seq::Feature) -> Option<Feature> {
    let kind = feature.kind.to_string();
    let Some(location) = adapt_location(&feature.location) else {
        warn!(
            "Skipping {} feature without local coordinates: {:?}",
            kind, feature.location
        );
        return None;
    };

    let qualifiers: Qualifiers = feature
        .qualifiers
        .iter()
        .map(|(key, value)| {
            (
                key.to_string(),
                value.as_deref().map(join_lines).unwrap_or_default(),
            )
        })
        .collect();

    Some(Feature {
        kind,
        location,
        qualifiers,
    })
}

/// Outer bounds and overall strand of a gb_io location. `None` when nothing in it
/// refers to this record's sequence.
pub(crate) fn adapt_location(location: &GbLocation) -> Option<Location> {
    match location {
        // gb_io starts are already 0-based, ends are exclusive.
        GbLocation::Range((start, _), (end, _)) => Some(Location::new(*start, *end, Strand::Forward)),
        GbLocation::Between(a, b) => {
            let at = (*a).max(*b);
            Some(Location::new(at, at, Strand::Forward))
        }
        GbLocation::Complement(inner) => adapt_location(inner).map(|loc| Location {
            strand: loc.strand.flip(),
            ..loc
        }),
        GbLocation::Join(parts)
        | GbLocation::Order(parts)
        | GbLocation::Bond(parts)
        | GbLocation::OneOf(parts) => merge_parts(parts),
        GbLocation::External(_, inner) => inner.as_deref().and_then(adapt_location),
        GbLocation::Gap(_) => None,
    }
}

fn merge_parts(parts: &[GbLocation]) -> Option<Location> {
    parts
        .iter()
        .filter_map(adapt_location)
        .reduce(|acc, part| {
            let strand = if acc.strand == part.strand {
                acc.strand
            } else {
                Strand::Unknown
            };
            Location::new(acc.start.min(part.start), acc.end.max(part.end), strand)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_io::seq::{After, Before};

    fn range(start: i64, end: i64) -> GbLocation {
        GbLocation::Range((start, Before(false)), (end, After(false)))
    }

    #[test]
    fn test_plain_range_is_forward() {
        let loc = adapt_location(&range(0, 300)).unwrap();
        assert_eq!(loc, Location::new(0, 300, Strand::Forward));
    }

    #[test]
    fn test_complement_is_reverse() {
        let loc = adapt_location(&GbLocation::Complement(Box::new(range(99, 402)))).unwrap();
        assert_eq!(loc, Location::new(99, 402, Strand::Reverse));
    }

    #[test]
    fn test_join_spans_outer_bounds() {
        let join = GbLocation::Join(vec![range(10, 20), range(40, 90)]);
        assert_eq!(
            adapt_location(&join).unwrap(),
            Location::new(10, 90, Strand::Forward)
        );

        let reversed = GbLocation::Complement(Box::new(join));
        assert_eq!(adapt_location(&reversed).unwrap().strand, Strand::Reverse);
    }

    #[test]
    fn test_mixed_strand_join_is_unknown() {
        let join = GbLocation::Join(vec![
            range(10, 20),
            GbLocation::Complement(Box::new(range(40, 90))),
        ]);
        let loc = adapt_location(&join).unwrap();
        assert_eq!(loc.strand, Strand::Unknown);
        assert_eq!(loc.strand.symbol(), "-");
    }

    #[test]
    fn test_remote_only_location_has_no_bounds() {
        let remote = GbLocation::External("J00194.1".to_string(), None);
        assert!(adapt_location(&remote).is_none());
    }

    #[test]
    fn test_remote_location_keeps_its_coordinates() {
        let remote =
            GbLocation::External("J00194.1".to_string(), Some(Box::new(range(99, 202))));
        assert_eq!(
            adapt_location(&remote).unwrap(),
            Location::new(99, 202, Strand::Forward)
        );
    }

    #[test]
    fn test_join_lines_keeps_inner_spacing() {
        assert_eq!(
            join_lines("putative  membrane\n                     protein"),
            "putative  membrane protein"
        );
        assert_eq!(join_lines("DNA polymerase III"), "DNA polymerase III");
    }

    #[test]
    fn test_empty_reader_yields_nothing() {
        assert_eq!(GenbankReader::empty("empty.gb").count(), 0);
    }

    #[test]
    fn test_definition_drops_trailing_period() {
        assert_eq!(
            definition_text("Escherichia coli str. K-12\n            substr. MG1655."),
            "Escherichia coli str. K-12 substr. MG1655"
        );
        assert_eq!(definition_text("Test genome"), "Test genome");
    }
}
