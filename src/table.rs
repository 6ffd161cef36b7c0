use crate::config::Config;
use crate::error::ConvertError;
use crate::record::Feature;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const COLUMN_HEADER: &str = "Location\tStrand\tLength\tPID\tGene\tSynonym\tCode\tCOG\tProduct";
const LINE_END: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Protein,
    Rna,
}

impl TableKind {
    /// Which table a feature of type `kind` belongs to, if any.
    pub fn classify(kind: &str, config: &Config) -> Option<TableKind> {
        if config.is_protein_type(kind) {
            Some(TableKind::Protein)
        } else if config.is_rna_type(kind) {
            Some(TableKind::Rna)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TableKind::Protein => "ptt",
            TableKind::Rna => "rnt",
        }
    }

    pub fn row_label(&self) -> &'static str {
        match self {
            TableKind::Protein => "proteins",
            TableKind::Rna => "RNAs",
        }
    }

    /// Length column value. Protein rows count codons minus the stop codon; the
    /// result is rounded half-to-even when the span is not a whole number of codons.
    pub fn feature_length(&self, start: i64, end: i64) -> i64 {
        let span = end - start;
        match self {
            TableKind::Protein => (span as f64 / 3.0 - 1.0).round_ties_even() as i64,
            TableKind::Rna => span - 1,
        }
    }
}

/// One line of a `.ptt` or `.rnt` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub location: String,
    pub strand: &'static str,
    pub length: i64,
    pub pid: String,
    pub gene: String,
    pub synonym: String,
    pub code: String,
    pub cog: String,
    pub product: String,
}

impl TableRow {
    pub fn from_feature(feature: &Feature, kind: TableKind, config: &Config) -> Self {
        let location = &feature.location;
        let placeholder = config.placeholder.as_str();
        let qualifier = |name: &str| feature.qualifiers.first_or(name, placeholder).to_string();

        TableRow {
            location: format!("{}..{}", location.start + 1, location.end),
            strand: location.strand.symbol(),
            length: kind.feature_length(location.start, location.end),
            pid: placeholder.to_string(),
            gene: qualifier("gene"),
            synonym: qualifier("locus_tag"),
            code: placeholder.to_string(),
            cog: placeholder.to_string(),
            product: qualifier("product"),
        }
    }
}

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.location,
            self.strand,
            self.length,
            self.pid,
            self.gene,
            self.synonym,
            self.code,
            self.cog,
            self.product
        )
    }
}

#[derive(Debug, Clone)]
pub struct OutputTable {
    pub kind: TableKind,
    pub description: String,
    pub sequence_length: usize,
    pub rows: Vec<TableRow>,
}

impl OutputTable {
    pub fn new(kind: TableKind, description: impl Into<String>, sequence_length: usize) -> Self {
        Self {
            kind,
            description: description.into(),
            sequence_length,
            rows: Vec::new(),
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write!(
            writer,
            "{} - 0..{}{LINE_END}",
            self.description, self.sequence_length
        )?;
        write!(
            writer,
            "{} {}{LINE_END}",
            self.rows.len(),
            self.kind.row_label()
        )?;
        write!(writer, "{COLUMN_HEADER}{LINE_END}")?;
        for row in &self.rows {
            write!(writer, "{row}{LINE_END}")?;
        }
        Ok(())
    }

    /// Creates or truncates `path` and writes the whole table to it.
    pub fn write(&self, path: &Path) -> Result<(), ConvertError> {
        let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| ConvertError::io(path, e))
    }
}
