// Composition tests: the full pipeline over real files on disk.
//
// These tests exercise the data flow between modules:
//   corpus -> tokenize -> frequency -> top-K -> pairwise -> export
// Each test works in its own directory under the system temp dir and
// removes it afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use bookmatch::config::{Config, ExportFormat};
use bookmatch::output::export::{export, write_pairs_table, ExportPaths};
use bookmatch::pipeline;

/// A scratch directory removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("bookmatch-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Scratch(dir)
    }

    fn write(&self, file: &str, text: &str) {
        self.write_bytes(file, text.as_bytes());
    }

    fn write_bytes(&self, file: &str, bytes: &[u8]) {
        fs::write(self.0.join(file), bytes).unwrap();
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

const BOOKS: [(&str, &str); 5] = [
    (
        "alice.txt",
        "Alice was beginning to get very tired of sitting by her sister on the bank, \
         and of having nothing to do: once or twice she had peeped into the book her \
         sister was reading, but it had no pictures or conversations in it.",
    ),
    (
        "looking_glass.txt",
        "Alice was sitting curled up in a corner of the great arm-chair, half talking \
         to herself and half asleep. Alice had no sister to talk to, and the kitten \
         was reading nothing at all.",
    ),
    (
        "moby.txt",
        "Call me Ishmael. Some years ago, never mind how long precisely, having little \
         or no money in my purse, and nothing particular to interest me on shore, I \
         thought I would sail about a little and see the watery part of the world.",
    ),
    (
        "pride.txt",
        "It is a truth universally acknowledged, that a single man in possession of a \
         good fortune, must be in want of a wife. However little known the feelings or \
         views of such a man may be on his first entering a neighbourhood.",
    ),
    (
        "two_cities.txt",
        "It was the best of times, it was the worst of times, it was the age of \
         wisdom, it was the age of foolishness, it was the epoch of belief.",
    ),
];

fn write_books(scratch: &Scratch) {
    for (name, text) in BOOKS {
        scratch.write(name, text);
    }
}

#[test]
fn five_books_produce_ten_ranked_pairs() {
    let scratch = Scratch::new("five");
    write_books(&scratch);

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();

    assert_eq!(report.documents.len(), 5);
    assert!(report.empty_documents.is_empty());
    assert_eq!(report.pairs.len(), 10);
    for pair in &report.pairs {
        assert!(pair.common_count <= 15);
        assert!((0.0..=1.0).contains(&pair.jaccard));
    }
    for doc in &report.documents {
        assert!(doc.top_k.len() <= 15);
        assert_eq!(doc.top_k.len(), doc.distinct_tokens.min(15));
    }

    // The two Alice passages share the most vocabulary
    let best = report.most_similar().unwrap();
    assert_eq!(best.document_a, "alice.txt");
    assert_eq!(best.document_b, "looking_glass.txt");
}

#[test]
fn export_writes_both_tables() {
    let scratch = Scratch::new("export");
    write_books(&scratch);

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();
    let prefix = scratch.path().join("results");
    let paths = export(&report, prefix.to_str().unwrap(), ExportFormat::Csv).unwrap();

    assert_eq!(
        paths,
        ExportPaths {
            topk: scratch.path().join("results_topk.csv"),
            pairs: scratch.path().join("results_pairs.csv"),
        }
    );

    let pairs_csv = fs::read_to_string(&paths.pairs).unwrap();
    let lines: Vec<&str> = pairs_csv.lines().collect();
    assert_eq!(lines[0], "document_a,document_b,common_count,jaccard");
    assert_eq!(lines.len(), 1 + 10);
    assert!(lines[1].starts_with("alice.txt,looking_glass.txt,"));
    for line in &lines[1..] {
        let cols: Vec<&str> = line.split(',').collect();
        assert_eq!(cols.len(), 4);
        let common: usize = cols[2].parse().unwrap();
        assert!(common <= 15);
    }

    let topk_csv = fs::read_to_string(&paths.topk).unwrap();
    let mut rows = topk_csv.lines();
    assert_eq!(
        rows.next(),
        Some("document,rank,token,count,normalized_frequency")
    );
    let expected_rows: usize = report.documents.iter().map(|d| d.top_k.len()).sum();
    assert_eq!(rows.count(), expected_rows);
}

#[test]
fn tsv_export_uses_tabs() {
    let scratch = Scratch::new("tsv");
    write_books(&scratch);

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();
    let mut buf = Vec::new();
    write_pairs_table(&mut buf, &report, ExportFormat::Tsv).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("document_a\tdocument_b\tcommon_count\tjaccard\n"));
}

#[test]
fn identical_cat_dog_documents() {
    let scratch = Scratch::new("catdog");
    scratch.write("one.txt", "cat cat dog the a");
    scratch.write("two.txt", "cat cat dog the a");

    let config = Config::default().with_top_k(3).unwrap();
    let report = pipeline::run(scratch.path(), &config, false).unwrap();

    let doc = &report.documents[0];
    assert_eq!(doc.total_tokens, 3);
    assert_eq!(doc.top_k.len(), 2);
    assert_eq!(doc.top_k[0].token, "CAT");

    let best = report.most_similar().unwrap();
    assert_eq!(best.common_count, 2);
    assert!((best.jaccard - 1.0).abs() < 1e-9);
}

#[test]
fn stopword_only_document_is_flagged_not_fatal() {
    let scratch = Scratch::new("stopwords");
    scratch.write("empty.txt", "the a an of in and");
    scratch.write("full.txt", "whale ship sea");
    scratch.write("other.txt", "ship harbour sea");

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();

    assert_eq!(report.empty_documents, vec!["empty.txt"]);
    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.most_similar().unwrap().common_count, 2);

    let mut buf = Vec::new();
    bookmatch::output::export::write_topk_table(&mut buf, &report, ExportFormat::Csv).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(!text.contains("empty.txt"));
}

#[test]
fn only_txt_files_are_read() {
    let scratch = Scratch::new("ext");
    scratch.write("a.txt", "alpha beta");
    scratch.write("b.TXT", "alpha gamma");
    scratch.write("notes.md", "alpha beta gamma");
    fs::create_dir_all(scratch.path().join("sub.txt")).unwrap();

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();
    let names: Vec<&str> = report.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.TXT"]);
}

#[test]
fn invalid_utf8_bytes_do_not_split_words() {
    let scratch = Scratch::new("utf8");
    scratch.write_bytes("broken.txt", b"ca\xfft dog");
    scratch.write("clean.txt", "cat dog");

    let config = Config::default();
    let text = bookmatch::corpus::read_text(&scratch.path().join("broken.txt")).unwrap();
    assert_eq!(bookmatch::text::tokenize::tokenize(&text, &config), vec!["CAT", "DOG"]);

    let report = pipeline::run(scratch.path(), &config, false).unwrap();
    let best = report.most_similar().unwrap();
    assert_eq!(best.common_count, 2);
    assert!((best.jaccard - 1.0).abs() < 1e-9);
}

#[test]
fn bare_dot_txt_file_is_read() {
    let scratch = Scratch::new("dottxt");
    scratch.write(".txt", "alpha beta");
    scratch.write("b.txt", "alpha gamma");

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();
    let names: Vec<&str> = report.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec![".txt", "b.txt"]);
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn report_serializes_to_json() {
    let scratch = Scratch::new("json");
    scratch.write("empty.txt", "the a an of in and");
    scratch.write("full.txt", "whale ship sea");
    scratch.write("other.txt", "ship harbour sea");

    let config = Config::default().with_top_k(5).unwrap();
    let report = pipeline::run(scratch.path(), &config, false).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["config"]["top_k"], 5);
    assert_eq!(json["config"]["format"], "csv");
    assert_eq!(json["config"]["stopwords"].as_array().unwrap().len(), 6);
    assert_eq!(json["empty_documents"], serde_json::json!(["empty.txt"]));
    assert_eq!(json["tie_break_rule"], report.tie_break_rule);

    let pairs = json["pairs"].as_array().unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0]["document_a"], "full.txt");
    assert_eq!(pairs[0]["document_b"], "other.txt");
    assert_eq!(pairs[0]["common_count"], 2);
    assert_eq!(pairs[0]["common_words"], serde_json::json!(["SEA", "SHIP"]));

    let documents = json["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[1]["top_k"][0]["token"], "SEA");
}

#[test]
fn missing_directory_is_fatal() {
    let missing = std::env::temp_dir().join("bookmatch-no-such-dir-anywhere");
    let err = pipeline::run(&missing, &Config::default(), false).unwrap_err();
    assert!(err.to_string().contains("bookmatch-no-such-dir-anywhere"));
}

#[test]
fn fewer_than_two_files_is_fatal() {
    let scratch = Scratch::new("single");
    scratch.write("only.txt", "lonely words here");
    assert!(pipeline::run(scratch.path(), &Config::default(), false).is_err());
}

#[test]
fn unwritable_export_path_is_fatal() {
    let scratch = Scratch::new("unwritable");
    write_books(&scratch);

    let report = pipeline::run(scratch.path(), &Config::default(), false).unwrap();
    let prefix = scratch.path().join("missing-subdir").join("results");
    let err = export(&report, prefix.to_str().unwrap(), ExportFormat::Csv).unwrap_err();
    assert!(format!("{err:#}").contains("missing-subdir"));
}
