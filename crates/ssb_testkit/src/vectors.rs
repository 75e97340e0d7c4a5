//! Container test vectors.
//!
//! Each vector pairs a template with the exact bytes both container formats
//! must produce for it. Hex strings group header, body and table for
//! readability; whitespace is ignored when decoding.

use serde::{Deserialize, Serialize};

/// One template and its expected containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Template text.
    pub template: String,
    /// Expected segment count.
    pub segments: u32,
    /// Expected inline container (hex).
    pub inline_hex: String,
    /// Expected table container (hex).
    pub table_hex: String,
    /// Expected error message (if compiling should fail).
    pub expected_error: Option<String>,
}

const INLINE_MAGIC_HEX: &str = "5353425445 4d504c415445 31";
const TABLE_MAGIC_HEX: &str = "5353425445 4d504c415445 30";

fn vector(
    id: &str,
    description: &str,
    template: &str,
    segments: u32,
    inline_body: &str,
    table_rest: &str,
) -> TestVector {
    TestVector {
        id: id.into(),
        description: description.into(),
        template: template.into(),
        segments,
        inline_hex: format!("{INLINE_MAGIC_HEX} {:08x} {inline_body}", segments.swap_bytes()),
        table_hex: format!("{TABLE_MAGIC_HEX} {:08x} {table_rest}", segments.swap_bytes()),
        expected_error: None,
    }
}

/// Vectors for the basic template shapes.
pub fn scenario_vectors() -> Vec<TestVector> {
    vec![
        vector(
            "literal_only",
            "Template without tags is one literal",
            "hello",
            1,
            "05000000 68656c6c6f",
            "08000000 68656c6c6f 000000 05000000",
        ),
        vector(
            "tag_only",
            "Template that is a single tag",
            "{{name}}",
            1,
            "05000000 00 6e616d65",
            "04000000 6e616d65 fcffffff",
        ),
        vector(
            "literal_tag_literal",
            "Tag surrounded by text",
            "Hi {{name}}!",
            3,
            "03000000 486920 05000000 00 6e616d65 01000000 21",
            "08000000 486920 6e616d65 21 03000000 fcffffff 01000000",
        ),
        vector(
            "adjacent_tags",
            "Adjacent tags get no empty literal between them",
            "{{a}}{{b}}",
            2,
            "02000000 00 61 02000000 00 62",
            "04000000 6162 0000 ffffffff ffffffff",
        ),
        vector(
            "unterminated_tag",
            "Unterminated open sigil is dropped and the rest is literal",
            "start {{oops",
            2,
            "06000000 737461727420 04000000 6f6f7073",
            "0c000000 737461727420 6f6f7073 0000 06000000 04000000",
        ),
        vector(
            "empty_tag",
            "Empty tag name is kept as a zero-length tag",
            "a{{}}b",
            3,
            "01000000 61 01000000 00 01000000 62",
            "04000000 61 62 0000 01000000 00000000 01000000",
        ),
    ]
}

/// Vectors that must fail to compile.
pub fn error_vectors() -> Vec<TestVector> {
    vec![TestVector {
        id: "empty_template".into(),
        description: "Empty template is rejected before anything is written".into(),
        template: String::new(),
        segments: 0,
        inline_hex: String::new(),
        table_hex: String::new(),
        expected_error: Some("template source is empty".into()),
    }]
}

/// All vectors as pretty-printed JSON.
pub fn all_vectors_json() -> String {
    let all: Vec<TestVector> = scenario_vectors().into_iter().chain(error_vectors()).collect();
    serde_json::to_string_pretty(&all).expect("Failed to serialize vectors")
}
