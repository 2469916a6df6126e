use std::io::Write;
use std::path::Path;

use serde::Serialize;

use wordlat_core::lattice::format_times;
use wordlat_core::settings::settings;
use wordlat_core::{BestPath, Hypothesis, Lattice, LatticeError};

use super::stdout_error;

#[derive(Serialize)]
struct DecodeOutput<'a> {
    utterance_id: &'a str,
    lm_scale: f64,
    hypothesis: String,
    words: &'a [String],
    best_path: &'a BestPath,
}

/// Print the best path with a per-edge score breakdown.
pub fn decode_cmd(
    lattice_file: &Path,
    lm_scale: f64,
    json: bool,
    out: &mut impl Write,
) -> Result<(), LatticeError> {
    let lattice = Lattice::open(lattice_file)?;
    let best = lattice.shortest_path(lm_scale)?;
    let hyp = Hypothesis::from_path(&best);

    if json {
        let output = DecodeOutput {
            utterance_id: lattice.utterance_id(),
            lm_scale,
            hypothesis: hyp.hypothesis_string(),
            words: hyp.words(),
            best_path: &best,
        };
        let text = serde_json::to_string_pretty(&output).expect("JSON serialization failed");
        writeln!(out, "{text}").map_err(stdout_error)?;
        return Ok(());
    }

    let mut print = || -> std::io::Result<()> {
        writeln!(out, "=== {} (lm_scale={lm_scale}) ===", lattice.utterance_id())?;
        writeln!(out, "Hypothesis: {}", hyp.hypothesis_string())?;
        writeln!(out)?;
        writeln!(
            out,
            "  {:>5} {:>5}  {:<20} {:>8} {:>8} {:>10}",
            "src", "dst", "label", "am", "lm", "combined"
        )?;
        for e in &best.edges {
            writeln!(
                out,
                "  {:>5} {:>5}  {:<20} {:>8} {:>8} {:>10}",
                e.src, e.dst, e.label, e.am_score, e.lm_score, e.combined_score
            )?;
        }
        writeln!(out)?;
        writeln!(out, "Path cost: {}", best.cost)
    };
    print().map_err(stdout_error)
}

/// Print id, sizes, path count and density of one lattice.
pub fn stats_cmd(lattice_file: &Path, out: &mut impl Write) -> Result<(), LatticeError> {
    let lattice = Lattice::open(lattice_file)?;
    let prec = settings().report.density_precision;
    let mut print = || -> std::io::Result<()> {
        writeln!(out, "Utterance: {}", lattice.utterance_id())?;
        writeln!(out, "  start:   {}", lattice.start())?;
        writeln!(out, "  end:     {}", lattice.end())?;
        writeln!(out, "  nodes:   {}", lattice.num_nodes())?;
        writeln!(out, "  edges:   {}", lattice.num_edges())?;
        writeln!(out, "  paths:   {}", lattice.count_all_paths())?;
        writeln!(out, "  density: {:.prec$}", lattice.density())
    };
    print().map_err(stdout_error)
}

/// Print the sorted midpoint times at which `word` occurs.
pub fn hits_cmd(lattice_file: &Path, word: &str, out: &mut impl Write) -> Result<(), LatticeError> {
    let lattice = Lattice::open(lattice_file)?;
    let times = lattice.occurrence_times(word);
    writeln!(
        out,
        "Locations of {word}: {}",
        format_times(&times, settings().report.time_precision)
    )
    .map_err(stdout_error)
}

/// Print each distinct label active at `time`, one per line.
pub fn words_at_cmd(lattice_file: &Path, time: f64, out: &mut impl Write) -> Result<(), LatticeError> {
    let lattice = Lattice::open(lattice_file)?;
    for word in lattice.unique_words_at_time(time) {
        writeln!(out, "{word}").map_err(stdout_error)?;
    }
    Ok(())
}

/// Export a lattice as Graphviz DOT.
pub fn dot_cmd(lattice_file: &Path, output: &Path) -> Result<(), LatticeError> {
    super::run_ops::check_output_path(output, &[lattice_file])?;
    let lattice = Lattice::open(lattice_file)?;
    lattice.write_dot(output)
}
