use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, info_span};

use wordlat_core::lattice::format_times;
use wordlat_core::settings::settings;
use wordlat_core::{Lattice, LatticeError, ParseError, Reference};

use super::stdout_error;

/// One line of the lattice list: a lattice file and its reference transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOfWork {
    pub lattice: PathBuf,
    pub reference: PathBuf,
}

/// Per-utterance record written to the `--report` JSONL file.
#[derive(Debug, Serialize)]
pub struct UtteranceReport {
    pub utterance_id: String,
    pub lattice: PathBuf,
    pub reference: String,
    pub hypothesis: String,
    pub path_score: f64,
    pub wer: f64,
    /// Decimal string; counts routinely exceed 64 bits.
    pub path_count: String,
    pub density: f64,
    pub words_at_time: Vec<String>,
    pub hits: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub utterances: usize,
    /// Mean WER over all utterances; `None` for an empty list.
    pub average_wer: Option<f64>,
}

/// Parse the lattice list: whitespace-separated `<lattice> <reference>` pairs.
pub fn read_work_list(path: &Path) -> Result<Vec<UnitOfWork>, LatticeError> {
    let text = fs::read_to_string(path).map_err(|source| LatticeError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let mut tokens = text.split_whitespace();
    let mut units = Vec::new();
    while let Some(lattice) = tokens.next() {
        let reference = tokens.next().ok_or_else(|| LatticeError::Malformed {
            path: path.to_path_buf(),
            source: ParseError::UnexpectedEof {
                expected: "reference path",
            },
        })?;
        units.push(UnitOfWork {
            lattice: PathBuf::from(lattice),
            reference: PathBuf::from(reference),
        });
    }
    Ok(units)
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Refuse to write `output` over any of `inputs`.
pub fn check_output_path(output: &Path, inputs: &[&Path]) -> Result<(), LatticeError> {
    if inputs.iter().any(|input| same_file(output, input)) {
        return Err(LatticeError::OutputPathConflict {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}

fn write_word_set(path: &Path, words: &[String]) -> Result<(), LatticeError> {
    let file_error = |source| LatticeError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(file_error)?;
    let mut writer = BufWriter::new(file);
    for w in words {
        writeln!(writer, "{w}").map_err(file_error)?;
    }
    writer.flush().map_err(file_error)
}

/// Decode one lattice, print its statistics and write its output files.
///
/// No output may land on the unit's own inputs or on any path in `protected`.
pub fn process_unit(
    unit: &UnitOfWork,
    lm_scale: f64,
    output_dir: &Path,
    protected: &[&Path],
    out: &mut impl Write,
) -> Result<UtteranceReport, LatticeError> {
    let s = settings();
    let lattice = Lattice::open(&unit.lattice)?;
    let id = lattice.utterance_id().to_string();
    let _span = info_span!("utterance", id = %id).entered();

    writeln!(out, "\nUtterance {id}").map_err(stdout_error)?;
    let reference = Reference::open(&unit.reference)?;
    writeln!(out, "Reference: {}", reference.text()).map_err(stdout_error)?;

    let hypothesis = lattice.decode(lm_scale)?;
    let hypothesis_string = hypothesis.hypothesis_string();
    writeln!(out, "Hypothesis: {hypothesis_string}").map_err(stdout_error)?;

    let wer = hypothesis.compute_wer(&reference)?;
    let wer_prec = s.report.wer_precision;
    writeln!(out, "WER : {wer:.wer_prec$}").map_err(stdout_error)?;

    let path_count = lattice.count_all_paths();
    writeln!(out, "Number of unique paths: {path_count}").map_err(stdout_error)?;
    let density = lattice.density();
    let density_prec = s.report.density_precision;
    writeln!(out, "Lattice density: {density:.density_prec$}").map_err(stdout_error)?;

    let words_out = output_dir.join(format!("{id}.wordsAtTime"));
    let dot_out = output_dir.join(format!("{id}.dot"));
    let lattice_out = output_dir.join(format!("{id}.lattice"));
    let mut inputs = vec![unit.lattice.as_path(), unit.reference.as_path()];
    inputs.extend_from_slice(protected);
    for output in [&words_out, &dot_out, &lattice_out] {
        check_output_path(output, &inputs)?;
    }

    let words_at_time: Vec<String> = lattice
        .unique_words_at_time(s.report.words_at_time)
        .into_iter()
        .collect();
    write_word_set(&words_out, &words_at_time)?;

    let mut hits = BTreeMap::new();
    for word in &s.report.hit_words {
        let times = lattice.occurrence_times(word);
        writeln!(
            out,
            "Locations of {word}: {}",
            format_times(&times, s.report.time_precision)
        )
        .map_err(stdout_error)?;
        hits.insert(word.clone(), times);
    }

    lattice.write_dot(&dot_out)?;
    lattice.save(&lattice_out)?;

    info!(wer, density, paths = %path_count, "utterance done");
    Ok(UtteranceReport {
        utterance_id: id,
        lattice: unit.lattice.clone(),
        reference: reference.text().to_string(),
        hypothesis: hypothesis_string,
        path_score: hypothesis.path_score(),
        wer,
        path_count: path_count.to_string(),
        density,
        words_at_time,
        hits,
    })
}

/// Process every unit in `list_file`, stopping at the first error, then
/// print the average WER.
pub fn run_cmd(
    list_file: &Path,
    lm_scale: f64,
    output_dir: &Path,
    report: Option<&Path>,
    out: &mut impl Write,
) -> Result<RunSummary, LatticeError> {
    let units = read_work_list(list_file)?;
    info!(units = units.len(), lm_scale, "starting run");

    let mut protected = vec![list_file];
    protected.extend(report);

    let mut report_writer = match report {
        Some(path) => {
            let mut inputs = vec![list_file];
            for unit in &units {
                inputs.push(unit.lattice.as_path());
                inputs.push(unit.reference.as_path());
            }
            check_output_path(path, &inputs)?;
            let file = File::create(path).map_err(|source| LatticeError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
            Some((path, BufWriter::new(file)))
        }
        None => None,
    };

    let mut total_wer = 0.0;
    for unit in &units {
        let record = process_unit(unit, lm_scale, output_dir, &protected, out)?;
        total_wer += record.wer;
        if let Some((path, writer)) = report_writer.as_mut() {
            let line = serde_json::to_string(&record).expect("report serialization failed");
            writeln!(writer, "{line}").map_err(|source| LatticeError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    if let Some((path, mut writer)) = report_writer {
        writer.flush().map_err(|source| LatticeError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let average_wer = (!units.is_empty()).then(|| total_wer / units.len() as f64);
    let printed = match average_wer {
        Some(avg) => writeln!(out, "Avg WER = {avg}"),
        None => writeln!(out, "Avg WER = n/a"),
    };
    printed.map_err(stdout_error)?;

    Ok(RunSummary {
        utterances: units.len(),
        average_wer,
    })
}
