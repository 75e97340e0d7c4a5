//! End-to-end checks of the basic template scenarios.

use ssb_compiler::{compile, scan, CompileError, FormatVersion, SegmentKind};
use ssb_storage::{FileSink, InMemorySink, OutputSink, TemplateSource};
use ssb_testkit::prelude::*;

fn contents(template: &str) -> Vec<(SegmentKind, String)> {
    let source = template.as_bytes();
    scan(source)
        .unwrap()
        .into_iter()
        .map(|s| {
            let text = String::from_utf8(s.content(source).to_vec()).unwrap();
            (s.kind, text)
        })
        .collect()
}

#[test]
fn literal_only() {
    assert_eq!(contents("hello"), [(SegmentKind::Literal, "hello".to_string())]);
}

#[test]
fn tag_only() {
    assert_eq!(contents("{{name}}"), [(SegmentKind::Tag, "name".to_string())]);
}

#[test]
fn tag_between_literals() {
    assert_eq!(
        contents("Hi {{name}}!"),
        [
            (SegmentKind::Literal, "Hi ".to_string()),
            (SegmentKind::Tag, "name".to_string()),
            (SegmentKind::Literal, "!".to_string()),
        ]
    );
}

#[test]
fn adjacent_tags() {
    assert_eq!(
        contents("{{a}}{{b}}"),
        [
            (SegmentKind::Tag, "a".to_string()),
            (SegmentKind::Tag, "b".to_string()),
        ]
    );
}

#[test]
fn unterminated_tag_loses_its_sigil() {
    let segments = contents("start {{oops");
    assert_eq!(
        segments,
        [
            (SegmentKind::Literal, "start ".to_string()),
            (SegmentKind::Literal, "oops".to_string()),
        ]
    );
    assert!(segments.iter().all(|(_, text)| !text.contains('{')));
}

#[test]
fn empty_template_halts_the_batch() {
    let dir = TemplateDir::with_templates([("a.html", ""), ("b.html", "hello")]);
    let report = dir.compile(FormatVersion::Inline);

    let halt = report.halted.expect("batch should halt");
    assert!(matches!(halt.error, CompileError::EmptySource));
    assert!(report.outcomes.is_empty());
    assert!(!dir.exists("a.ssb"));
    assert!(!dir.exists("b.ssb"));
}

#[test]
fn vectors_compile_to_expected_bytes_on_disk() {
    for v in scenario_vectors() {
        for (format, expected) in [
            (FormatVersion::Inline, &v.inline_hex),
            (FormatVersion::Table, &v.table_hex),
        ] {
            let dir = TemplateDir::new();
            dir.write("t.html", &v.template);
            let report = dir.compile(format);

            assert_eq!(report.total_segments(), u64::from(v.segments), "{}", v.id);
            assert_hex_eq(&dir.read("t.ssb"), expected);
        }
    }
}

#[test]
fn header_count_roundtrips_through_a_file() {
    let dir = TemplateDir::new();
    let input = dir.write("page.html", "<p>{{a}} and {{b}} and {{c}}</p>");
    let output = dir.join("page.ssb");

    let source = TemplateSource::open(&input).unwrap();
    let mut sink = FileSink::create(&output).unwrap();
    let count = compile(source.as_bytes(), &mut sink, FormatVersion::Inline).unwrap();
    assert_eq!(count, 7);

    let patched = sink.read_at(12, 4).unwrap();
    assert_eq!(read_u32_le(&patched, 0), count);
    drop(sink);

    let bytes = dir.read("page.ssb");
    assert_eq!(FormatVersion::from_magic(&bytes), Some(FormatVersion::Inline));
    assert_eq!(read_u32_le(&bytes, 12), 7);
}

#[test]
fn table_offset_points_at_the_table() {
    let mut sink = InMemorySink::new();
    let count = compile(b"Hello, {{user}}. Bye", &mut sink, FormatVersion::Table).unwrap();
    let bytes = sink.into_inner();

    let table_offset = read_u32_le(&bytes, 16) as usize;
    let table_start = FormatVersion::Table.header_len() + table_offset;
    assert_eq!(table_offset % 4, 0);
    assert_eq!(bytes.len(), table_start + 4 * count as usize);

    let entries: Vec<i32> = (0..count as usize)
        .map(|i| read_i32_le(&bytes, table_start + 4 * i))
        .collect();
    assert_eq!(entries, [7, -4, 5]);
}
