//! Record and group views built from a document.

mod common;

use hostman::line::LEGACY_SEPARATOR;
use hostman::{Document, DEFAULT_GROUP};

#[test]
fn work_example_groups() {
    let doc = Document::parse(common::WORK_HOSTS);
    let groups = doc.groups();
    assert_eq!(groups.len(), 2);

    let work = &groups[0];
    assert_eq!(work.name, "Work");
    assert_eq!(work.active_count, 1);
    assert_eq!(work.members.len(), 1);
    assert_eq!(work.members[0].address, "10.0.0.1");
    assert_eq!(work.members[0].domain, "intra.work");

    let default = &groups[1];
    assert_eq!(default.name, DEFAULT_GROUP);
    assert_eq!(default.active_count, 1);
    assert_eq!(default.members[0].address, "127.0.0.1");
    assert_eq!(default.members[0].domain, "localhost");
}

#[test]
fn records_keep_file_order_and_group_tags() {
    let doc = Document::parse(common::WORK_HOSTS);
    let records = doc.records();
    let tags: Vec<_> = records
        .iter()
        .map(|r| (r.domain.as_str(), r.group.as_str()))
        .collect();
    assert_eq!(tags, [("localhost", "Default"), ("intra.work", "Work")]);
}

#[test]
fn commented_entries_are_listed_inactive() {
    let doc = Document::parse("#10.0.0.2\told.host\n10.0.0.3\tnew.host\n");
    let records = doc.records();
    assert_eq!(records.len(), 2);
    assert!(!records[0].is_active);
    assert!(records[0].is_commented_out);
    assert!(records[1].is_active);
    assert_eq!(doc.groups()[0].active_count, 1);
}

#[test]
fn raw_original_line_is_kept_verbatim() {
    let doc = Document::parse("  127.0.0.1   localhost  # loopback\n");
    let record = &doc.records()[0];
    assert_eq!(record.raw_original_line, "  127.0.0.1   localhost  # loopback");
    assert_eq!(record.comment, "# loopback");
}

#[test]
fn empty_file_has_single_empty_default_group() {
    let groups = Document::parse("").groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, DEFAULT_GROUP);
    assert!(groups[0].members.is_empty());
    assert_eq!(groups[0].active_count, 0);
}

#[test]
fn no_default_group_when_everything_is_grouped() {
    let doc = Document::parse("---[A]---\n1.1.1.1 a.test\n---[>A<]---\n");
    let names: Vec<_> = doc.groups().into_iter().map(|g| g.name).collect();
    assert_eq!(names, ["A"]);
}

#[test]
fn explicit_default_group_is_not_duplicated() {
    let doc =
        Document::parse("1.1.1.1 a.test\n---[Default]---\n2.2.2.2 b.test\n---[>Default<]---\n");
    let groups = doc.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Default");
    assert_eq!(groups[0].members.len(), 1);
}

#[test]
fn legacy_separator_closes_group() {
    let text = format!("---[Old]---\n1.1.1.1 a.test\n{LEGACY_SEPARATOR}\n2.2.2.2 b.test\n");
    let records = Document::parse(&text).records();
    assert_eq!(records[0].group, "Old");
    assert_eq!(records[1].group, DEFAULT_GROUP);
}

#[test]
fn unterminated_group_runs_to_next_start() {
    let doc = Document::parse("---[A]---\n1.1.1.1 a.test\n---[B]---\n2.2.2.2 b.test\n");
    let groups = doc.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "A");
    assert_eq!(groups[0].members.len(), 1);
    assert_eq!(groups[1].name, "B");
    assert_eq!(groups[1].members[0].domain, "b.test");
}

#[test]
fn lines_split_on_newline_only() {
    assert_eq!(Document::parse("a\r\nb\n").lines(), ["a\r", "b", ""]);
}

#[test]
fn round_trip_is_byte_identical() {
    let inputs = [
        common::WORK_HOSTS,
        "",
        "\n\n",
        "no trailing newline",
        "  # comment line\r\n127.0.0.1  localhost\r\n\t\n",
    ];
    for input in inputs {
        assert_eq!(Document::parse(input).to_text(), input);
    }
}
