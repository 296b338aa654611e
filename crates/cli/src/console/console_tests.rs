use super::*;

use std::fs::{create_dir, write};

use shelf_fs::BasicProvider;

fn basic_catalog() -> Catalog {
    Catalog::with_provider(Box::new(BasicProvider))
}

/// Run a console over `input` and return everything it wrote.
fn run_console(catalog: &mut Catalog, input: &str, pause: bool) -> String {
    let mut out = Vec::new();
    {
        let cfg = ConsoleConfig { pause };
        let mut console = Console::new(catalog, input.as_bytes(), &mut out, cfg);
        console.run().expect("console run");
    }
    String::from_utf8(out).expect("utf8 output")
}

fn fruit_dir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    for name in ["banana", "Apple", "cherry.txt"] {
        write(tmp.path().join(name), name.as_bytes()).expect("write file");
    }
    create_dir(tmp.path().join("seeds")).expect("create dir");
    tmp
}

#[test]
fn parse_recognizes_every_command() {
    let cases: &[(&str, ShellCommand)] = &[
        ("e", ShellCommand::Exit),
        ("E", ShellCommand::Exit),
        ("h", ShellCommand::Help),
        ("H", ShellCommand::Help),
        ("a", ShellCommand::ShowAll),
        ("A", ShellCommand::ShowAll),
        ("o", ShellCommand::ShowSorted),
        ("O", ShellCommand::ShowSorted),
        ("s", ShellCommand::Search),
        ("  s  ", ShellCommand::Search),
        ("add", ShellCommand::Add(None)),
        ("add   ", ShellCommand::Add(None)),
        ("add /tmp/x", ShellCommand::Add(Some("/tmp/x".into()))),
        ("add    /a b/c ", ShellCommand::Add(Some("/a b/c".into()))),
        ("adder", ShellCommand::Unknown),
        ("3", ShellCommand::Select(3)),
        ("0", ShellCommand::Select(0)),
        ("-1", ShellCommand::Unknown),
        ("", ShellCommand::Unknown),
        ("quit", ShellCommand::Unknown),
    ];

    for (input, expected) in cases {
        assert_eq!(ShellCommand::parse(input), *expected, "input: {:?}", input);
    }
}

#[test]
fn exits_on_e_and_on_end_of_input() {
    let mut catalog = basic_catalog();

    let out = run_console(&mut catalog, "e\n", false);
    assert_eq!(out.matches(PROMPT).count(), 1);

    let out = run_console(&mut catalog, "", false);
    assert_eq!(out.matches(PROMPT).count(), 1);
}

#[test]
fn help_lists_commands() {
    let mut catalog = basic_catalog();
    let out = run_console(&mut catalog, "h\ne\n", false);

    assert!(out.contains("add [path]"));
    assert!(out.contains("[number]"));
}

#[test]
fn add_ingests_and_lists_numbered_entries() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    let input = format!("add {}\ne\n", tmp.path().display());

    let out = run_console(&mut catalog, &input, false);

    assert!(out.contains("Directory added (4 entries)."), "{out}");
    assert_eq!(catalog.len(), 4);
    for i in 1..=4 {
        assert!(out.contains(&format!("  {i}. ")), "missing row {i}: {out}");
    }
}

#[test]
fn add_reports_usage_missing_and_non_directory() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    let input = format!(
        "add\nadd {}\nadd {}\ne\n",
        tmp.path().join("nope").display(),
        tmp.path().join("banana").display()
    );

    let out = run_console(&mut catalog, &input, false);

    assert!(out.contains("Usage: add [absolute_path]"));
    assert!(out.contains("Directory does not exist."));
    assert!(out.contains("Path is not a directory."));
    assert!(catalog.is_empty());
}

#[test]
fn select_shows_metadata_or_rejects_out_of_range() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    catalog.ingest_directory(tmp.path()).expect("ingest");
    let first = catalog.get_by_position(1).expect("first").filename.clone();

    let out = run_console(&mut catalog, "1\n0\n5\nbogus\ne\n", false);

    assert!(out.contains(&format!("Filename: {first}")));
    assert_eq!(
        out.matches("Invalid selection. Please enter a valid entry number.")
            .count(),
        2
    );
    assert!(out.contains("Invalid input. Type 'h' for help."));
}

#[test]
fn search_prints_matches_or_not_found() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    catalog.ingest_directory(tmp.path()).expect("ingest");

    let out = run_console(&mut catalog, "s\n*.TXT\ns\n*.zip\ne\n", false);

    assert!(out.contains(SEARCH_PROMPT));
    assert!(out.contains("Filename: cherry.txt"));
    assert!(!out.contains("Filename: banana"));
    assert!(out.contains("No entries found matching pattern."));
}

#[test]
fn sorted_view_is_bytewise_and_listing_keeps_insertion_order() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    catalog.ingest_directory(tmp.path()).expect("ingest");
    let before: Vec<String> = catalog
        .list_all()
        .iter()
        .map(|e| e.filename.clone())
        .collect();

    let out = run_console(&mut catalog, "o\ne\n", false);

    let order: Vec<&str> = out
        .lines()
        .filter_map(|l| l.strip_prefix("Filename: "))
        .collect();
    assert_eq!(order, vec!["Apple", "banana", "cherry.txt", "seeds"]);

    let after: Vec<String> = catalog
        .list_all()
        .iter()
        .map(|e| e.filename.clone())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn show_all_prints_every_entry() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    catalog.ingest_directory(tmp.path()).expect("ingest");

    let out = run_console(&mut catalog, "a\ne\n", false);

    assert_eq!(out.matches("Filename: ").count(), 4);
    assert!(out.contains("Folder: Yes"));
}

#[test]
fn pause_waits_for_a_line_after_detail_views() {
    let mut catalog = basic_catalog();

    // The blank line is consumed by the pause, so `e` still exits.
    let out = run_console(&mut catalog, "h\n\ne\n", true);

    assert_eq!(out.matches(PAUSE_PROMPT).count(), 1);
    assert_eq!(out.matches(PROMPT).count(), 2);
}

#[test]
fn detail_views_start_below_the_prompt() {
    let tmp = fruit_dir();
    let mut catalog = basic_catalog();
    catalog.ingest_directory(tmp.path()).expect("ingest");

    for input in ["a\ne\n", "o\ne\n"] {
        let out = run_console(&mut catalog, input, false);
        assert!(
            !out.contains(&format!("{PROMPT}Filename: ")),
            "metadata glued to prompt for {input:?}: {out}"
        );
        assert_eq!(
            out.lines().filter(|l| l.starts_with("Filename: ")).count(),
            4,
            "input {input:?}"
        );
    }
}

#[test]
fn detail_views_on_empty_catalog_say_so() {
    let mut catalog = basic_catalog();

    for input in ["a\ne\n", "o\ne\n"] {
        let out = run_console(&mut catalog, input, false);
        assert_eq!(out.matches("No entries available.").count(), 1, "input {input:?}");
        assert!(!out.contains(RULE));
    }
}
