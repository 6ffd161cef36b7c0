use crate::config::Config;
use crate::error::ConvertError;
use crate::genbank::GenbankReader;
use crate::record::SequenceRecord;
use crate::table::{OutputTable, TableKind, TableRow};
use crate::utils::progress::FileProgress;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// What was written for one record of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub index: usize,
    pub ptt_path: PathBuf,
    pub rnt_path: PathBuf,
    pub protein_rows: usize,
    pub rna_rows: usize,
}

/// Converts every input in order, stopping at the first failure.
pub fn run(inputs: &[PathBuf], output_dir: &Path, config: &Config) -> Result<()> {
    let mut total_records = 0;

    for input in inputs {
        let file_name = display_name(input);
        let progress = FileProgress::start(&file_name)?;

        let result = process_file_with(input, output_dir, config, |summary| {
            progress.record_done(summary.index + 1);
            progress.log(|| log_summary(summary));
        });

        match result {
            Ok(summaries) => {
                total_records += summaries.len();
                progress.finish(summaries.len());
            }
            Err(e) => {
                progress.abandon();
                return Err(e).with_context(|| format!("Failed to convert {}", input.display()));
            }
        }
    }

    info!(
        "Converted {} file(s), {} record(s)",
        inputs.len(),
        total_records
    );
    Ok(())
}

/// Writes one `.ptt`/`.rnt` pair per record of `path` into `output_dir`.
pub fn process_file(
    path: &Path,
    output_dir: &Path,
    config: &Config,
) -> Result<Vec<RecordSummary>, ConvertError> {
    process_file_with(path, output_dir, config, log_summary)
}

fn process_file_with(
    path: &Path,
    output_dir: &Path,
    config: &Config,
    mut on_record: impl FnMut(&RecordSummary),
) -> Result<Vec<RecordSummary>, ConvertError> {
    info!("Processing file {}", display_name(path));

    let base = file_base_name(path);
    let mut summaries = Vec::new();

    for (index, record) in GenbankReader::open(path)?.enumerate() {
        let (ptt, rnt) = build_tables(&record?, config);
        let (ptt_path, rnt_path) = output_paths(output_dir, &base, index);

        let summary = RecordSummary {
            index,
            ptt_path,
            rnt_path,
            protein_rows: ptt.rows.len(),
            rna_rows: rnt.rows.len(),
        };
        on_record(&summary);

        ptt.write(&summary.ptt_path)?;
        rnt.write(&summary.rnt_path)?;
        summaries.push(summary);
    }

    Ok(summaries)
}

/// Splits a record's features into its protein and RNA tables, keeping feature order.
pub fn build_tables(record: &SequenceRecord, config: &Config) -> (OutputTable, OutputTable) {
    let description = record.display_description(&config.missing_description);
    let mut ptt = OutputTable::new(TableKind::Protein, description, record.sequence_length);
    let mut rnt = OutputTable::new(TableKind::Rna, description, record.sequence_length);

    for feature in &record.features {
        match TableKind::classify(&feature.kind, config) {
            Some(kind @ TableKind::Protein) => {
                ptt.rows.push(TableRow::from_feature(feature, kind, config))
            }
            Some(kind @ TableKind::Rna) => {
                rnt.rows.push(TableRow::from_feature(feature, kind, config))
            }
            None => {}
        }
    }

    (ptt, rnt)
}

/// File name up to its first `.`: `NC_000913.3.gbk.gz` becomes `NC_000913`.
pub fn file_base_name(path: &Path) -> String {
    let name = display_name(path);
    name.split('.').next().unwrap_or_default().to_string()
}

/// First record is unsuffixed, later ones get `-{index}`.
pub fn output_paths(output_dir: &Path, base: &str, index: usize) -> (PathBuf, PathBuf) {
    let stem = if index == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, index)
    };
    (
        output_dir.join(format!("{}.{}", stem, TableKind::Protein.extension())),
        output_dir.join(format!("{}.{}", stem, TableKind::Rna.extension())),
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn log_summary(summary: &RecordSummary) {
    info!(
        "number of ptt rows:\t{}\t({})",
        summary.protein_rows,
        summary.ptt_path.display()
    );
    info!(
        "number of rnt rows:\t{}\t({})",
        summary.rna_rows,
        summary.rnt_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Feature, Location, Qualifiers, Strand};

    fn feature(kind: &str, start: i64, end: i64) -> Feature {
        Feature {
            kind: kind.to_string(),
            location: Location::new(start, end, Strand::Forward),
            qualifiers: Qualifiers::new(),
        }
    }

    #[test]
    fn test_file_base_name_truncates_at_first_dot() {
        assert_eq!(file_base_name(Path::new("data/NC_000913.3.gbk")), "NC_000913");
        assert_eq!(file_base_name(Path::new("sequence.gb.gz")), "sequence");
        assert_eq!(file_base_name(Path::new("plain")), "plain");
    }

    #[test]
    fn test_output_paths_indexing() {
        let dir = Path::new("out");
        assert_eq!(
            output_paths(dir, "seq", 0),
            (dir.join("seq.ptt"), dir.join("seq.rnt"))
        );
        assert_eq!(
            output_paths(dir, "seq", 2),
            (dir.join("seq-2.ptt"), dir.join("seq-2.rnt"))
        );
    }

    #[test]
    fn test_build_tables_routes_and_keeps_order() {
        let record = SequenceRecord {
            description: Some("Test genome".to_string()),
            id: None,
            sequence_length: 5000,
            features: vec![
                feature("source", 0, 5000),
                feature("CDS", 0, 300),
                feature("tRNA", 400, 476),
                feature("gene", 500, 800),
                feature("CDS", 500, 800),
                feature("rRNA", 900, 2400),
                feature("repeat_region", 2500, 2600),
            ],
        };
        let (ptt, rnt) = build_tables(&record, &Config::default());

        let ptt_locations: Vec<_> = ptt.rows.iter().map(|r| r.location.as_str()).collect();
        let rnt_locations: Vec<_> = rnt.rows.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(ptt_locations, vec!["1..300", "501..800"]);
        assert_eq!(rnt_locations, vec!["401..476", "901..2400"]);
        assert_eq!(ptt.description, "Test genome");
        assert_eq!(rnt.sequence_length, 5000);
    }

    #[test]
    fn test_build_tables_without_description() {
        let record = SequenceRecord::default();
        let (ptt, rnt) = build_tables(&record, &Config::default());

        assert_eq!(ptt.description, "Description not available");
        assert!(ptt.rows.is_empty());
        assert!(rnt.rows.is_empty());
    }
}
