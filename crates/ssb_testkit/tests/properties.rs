//! Property tests across scanner and encoders.

use proptest::prelude::*;
use ssb_compiler::{compile, scan, FormatVersion, Segment, SegmentKind};
use ssb_storage::InMemorySink;
use ssb_testkit::prelude::*;

fn compile_bytes(source: &[u8], format: FormatVersion) -> (u32, Vec<u8>) {
    let mut sink = InMemorySink::new();
    let count = compile(source, &mut sink, format).unwrap();
    (count, sink.into_inner())
}

fn inline_len(segments: &[Segment]) -> usize {
    segments
        .iter()
        .map(|s| match s.kind {
            SegmentKind::Literal => 4 + s.len,
            SegmentKind::Tag => 5 + s.len,
        })
        .sum::<usize>()
        + FormatVersion::Inline.header_len()
}

proptest! {
    #[test]
    fn sigil_free_input_is_one_literal(bytes in sigil_free_strategy()) {
        let segments = scan(&bytes).unwrap();
        prop_assert_eq!(segments, vec![Segment::literal(0, bytes.len())]);
    }

    #[test]
    fn well_formed_templates_reconstruct(
        (template, expected) in well_formed_template_strategy()
    ) {
        let source = template.as_bytes();
        let segments = scan(source).unwrap();
        prop_assert_eq!(segments.len(), expected);

        let rebuilt: String = segments
            .iter()
            .map(|s| {
                let text = String::from_utf8_lossy(s.content(source));
                match s.kind {
                    SegmentKind::Literal => text.into_owned(),
                    SegmentKind::Tag => format!("{{{{{text}}}}}"),
                }
            })
            .collect();
        prop_assert_eq!(rebuilt, template);
    }

    #[test]
    fn segments_are_ordered_and_gaps_are_braces(template in template_strategy()) {
        let source = template.as_bytes();
        let segments = scan(source).unwrap();

        let mut cursor = 0;
        for segment in &segments {
            prop_assert!(segment.offset >= cursor);
            prop_assert!(source[cursor..segment.offset].iter().all(|b| *b == b'{' || *b == b'}'), "gap before segment must contain only brace bytes");
            if segment.is_literal() {
                prop_assert!(segment.len > 0);
            }
            cursor = segment.end();
        }
        prop_assert!(source[cursor..].iter().all(|b| *b == b'{' || *b == b'}'), "trailing bytes must contain only brace bytes");
    }

    #[test]
    fn header_count_matches_scan(template in template_strategy()) {
        prop_assume!(!template.is_empty());
        let source = template.as_bytes();
        let segments = scan(source).unwrap();

        for format in FormatVersion::ALL {
            let (count, bytes) = compile_bytes(source, format);
            prop_assert_eq!(count as usize, segments.len());
            prop_assert_eq!(read_u32_le(&bytes, 12), count);
        }
    }

    #[test]
    fn container_sizes(template in template_strategy()) {
        prop_assume!(!template.is_empty());
        let source = template.as_bytes();
        let segments = scan(source).unwrap();

        let (_, inline) = compile_bytes(source, FormatVersion::Inline);
        prop_assert_eq!(inline.len(), inline_len(&segments));

        let (count, table) = compile_bytes(source, FormatVersion::Table);
        let table_offset = read_u32_le(&table, 16) as usize;
        prop_assert_eq!(table.len() % 4, 0);
        prop_assert_eq!(
            table.len(),
            FormatVersion::Table.header_len() + table_offset + 4 * count as usize
        );
    }
}
