//! End-to-end tests of the batch driver against files in a temp directory.

use std::fs;
use std::path::PathBuf;

use wordlat_cli::commands::run_ops::run_cmd;
use wordlat_core::{Lattice, LatticeError};

const UTT1: &str = "\
id utt1
start 0
end 3
numNodes 4
numEdges 4
node 0 0.00
node 1 0.20
node 2 0.60
node 3 1.00
edge 0 1 -silence- 1 0
edge 1 2 i 2 1
edge 1 3 eye_sea 10 10
edge 2 3 see 3 2
";

const UTT2: &str = "\
id utt2
start 0
end 2
numNodes 3
numEdges 2
node 0 0.00
node 1 0.50
node 2 1.00
edge 0 1 hello 3 2
edge 1 2 world 1 1
";

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn list(&self, pairs: &[(&PathBuf, &PathBuf)]) -> PathBuf {
        let text: String = pairs
            .iter()
            .map(|(l, r)| format!("{} {}\n", l.display(), r.display()))
            .collect();
        self.write("list.txt", &text)
    }
}

#[test]
fn single_utterance_report() {
    let fx = Fixture::new();
    let lat = fx.write("utt1.lattice", UTT1);
    let reference = fx.write("utt1.ref", "i saw\nsecond line is ignored\n");
    let list = fx.list(&[(&lat, &reference)]);

    let mut out = Vec::new();
    let summary = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut out).unwrap();
    assert_eq!(summary.utterances, 1);
    assert_eq!(summary.average_wer, Some(0.5));

    let expected = "\nUtterance utt1\n\
                    Reference: i saw\n\
                    Hypothesis: i see \n\
                    WER : 0.500\n\
                    Number of unique paths: 2\n\
                    Lattice density: 3.000\n\
                    Locations of -silence-: 0.10\n\
                    Locations of i: 0.40\n\
                    Avg WER = 0.5\n";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn output_files_are_written() {
    let fx = Fixture::new();
    let lat = fx.write("utt1.lattice", UTT1);
    let reference = fx.write("utt1.ref", "i see\n");
    let list = fx.list(&[(&lat, &reference)]);

    run_cmd(&list, 1.0, &fx.out_dir(), None, &mut Vec::new()).unwrap();

    let words = fs::read_to_string(fx.out_dir().join("utt1.wordsAtTime")).unwrap();
    assert_eq!(words, "eye_sea\ni\n");

    let dot = fs::read_to_string(fx.out_dir().join("utt1.dot")).unwrap();
    assert!(dot.starts_with("digraph g {\n\trankdir=\"LR\"\n"));
    assert!(dot.contains("\t1 -> 3 [label = \"eye_sea\"]"));
    assert!(dot.ends_with("}\n"));

    let saved = fx.out_dir().join("utt1.lattice");
    assert_eq!(fs::read_to_string(&saved).unwrap(), UTT1);
    let reparsed = Lattice::open(&saved).unwrap();
    assert_eq!(reparsed.num_edges(), 4);
}

#[test]
fn average_over_several_utterances_and_jsonl_report() {
    let fx = Fixture::new();
    let lat1 = fx.write("utt1.lattice", UTT1);
    let ref1 = fx.write("utt1.ref", "i saw");
    let lat2 = fx.write("utt2.lattice", UTT2);
    let ref2 = fx.write("utt2.ref", "hello world");
    let list = fx.list(&[(&lat1, &ref1), (&lat2, &ref2)]);
    let report = fx.dir.path().join("report.jsonl");

    let mut out = Vec::new();
    let summary = run_cmd(&list, 1.0, &fx.out_dir(), Some(report.as_path()), &mut out).unwrap();
    assert_eq!(summary.utterances, 2);
    assert_eq!(summary.average_wer, Some(0.25));
    assert!(String::from_utf8(out).unwrap().ends_with("Avg WER = 0.25\n"));

    let lines: Vec<serde_json::Value> = fs::read_to_string(&report)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["utterance_id"], "utt1");
    assert_eq!(lines[0]["path_count"], "2");
    assert_eq!(lines[1]["hypothesis"], "hello world ");
    assert_eq!(lines[1]["wer"], 0.0);
}

#[test]
fn empty_list_has_no_average() {
    let fx = Fixture::new();
    let list = fx.write("list.txt", "\n");
    let mut out = Vec::new();
    let summary = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut out).unwrap();
    assert_eq!(summary.utterances, 0);
    assert_eq!(summary.average_wer, None);
    assert_eq!(String::from_utf8(out).unwrap(), "Avg WER = n/a\n");
}

#[test]
fn output_over_input_is_refused() {
    let fx = Fixture::new();
    // Lattice lives in the output directory under its own output name.
    let lat = fx.out_dir().join("utt1.lattice");
    fs::write(&lat, UTT1).unwrap();
    let reference = fx.write("utt1.ref", "i see");
    let list = fx.list(&[(&lat, &reference)]);

    let err = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, LatticeError::OutputPathConflict { .. }));
    assert_eq!(err.exit_code(), 5);
    assert_eq!(fs::read_to_string(&lat).unwrap(), UTT1);
    // Nothing was written before the conflict was detected.
    assert!(!fx.out_dir().join("utt1.wordsAtTime").exists());
}

#[test]
fn report_over_input_is_refused() {
    let fx = Fixture::new();
    let lat = fx.write("utt1.lattice", UTT1);
    let reference = fx.write("utt1.ref", "i see");
    let list = fx.list(&[(&lat, &reference)]);

    for target in [&lat, &reference, &list] {
        let err = run_cmd(&list, 1.0, &fx.out_dir(), Some(target.as_path()), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, LatticeError::OutputPathConflict { .. }));
    }
    assert_eq!(fs::read_to_string(&lat).unwrap(), UTT1);
    assert_eq!(fs::read_to_string(&reference).unwrap(), "i see");
}

#[test]
fn output_over_list_or_report_is_refused() {
    let fx = Fixture::new();
    let lat = fx.write("utt1.lattice", UTT1);
    let reference = fx.write("utt1.ref", "i see");
    let line = format!("{} {}\n", lat.display(), reference.display());

    // The list file sits where the DOT output would go.
    let list = fx.out_dir().join("utt1.dot");
    fs::write(&list, &line).unwrap();
    let err = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, LatticeError::OutputPathConflict { .. }));
    assert_eq!(fs::read_to_string(&list).unwrap(), line);

    // The report sits where the words-at-time output would go.
    let list = fx.write("list.txt", &line);
    let report = fx.out_dir().join("utt1.wordsAtTime");
    let err = run_cmd(&list, 1.0, &fx.out_dir(), Some(report.as_path()), &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, LatticeError::OutputPathConflict { .. }));
}

#[test]
fn stops_at_first_failing_unit() {
    let fx = Fixture::new();
    let lat1 = fx.write("utt1.lattice", UTT1);
    let empty_ref = fx.write("empty.ref", "\n");
    let lat2 = fx.write("utt2.lattice", UTT2);
    let ref2 = fx.write("utt2.ref", "hello world");
    let list = fx.list(&[(&lat1, &empty_ref), (&lat2, &ref2)]);

    let mut out = Vec::new();
    let err = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut out).unwrap_err();
    assert!(matches!(err, LatticeError::EmptyReference { .. }));
    assert_eq!(err.exit_code(), 3);
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Utterance utt1"));
    assert!(!printed.contains("Utterance utt2"));
    assert!(!printed.contains("Avg WER"));
}

#[test]
fn missing_and_malformed_inputs() {
    let fx = Fixture::new();
    let reference = fx.write("utt1.ref", "i see");

    let missing = fx.dir.path().join("nope.lattice");
    let list = fx.list(&[(&missing, &reference)]);
    let err = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, LatticeError::FileAccess { .. }));
    assert_eq!(err.exit_code(), 1);

    let broken = fx.write("broken.lattice", "id x\nstart zero\n");
    let list = fx.list(&[(&broken, &reference)]);
    let err = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, LatticeError::Malformed { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn unreachable_sink_fails_decode() {
    let fx = Fixture::new();
    let lat = fx.write(
        "gap.lattice",
        "id gap\nstart 0\nend 2\nnumNodes 3\nnumEdges 1\n\
         node 0 0.0\nnode 1 0.5\nnode 2 1.0\nedge 0 1 a 1 1\n",
    );
    let reference = fx.write("gap.ref", "a");
    let list = fx.list(&[(&lat, &reference)]);
    let err = run_cmd(&list, 1.0, &fx.out_dir(), None, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, LatticeError::NoPath { start: 0, end: 2 }));
    assert_eq!(err.exit_code(), 4);
}
