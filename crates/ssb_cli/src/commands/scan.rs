//! Scan command implementation.

use serde::Serialize;
use ssb_compiler::{Scanner, Segment};
use ssb_storage::TemplateSource;
use std::path::Path;

/// Longest content preview shown per segment, in characters.
const PREVIEW_CHARS: usize = 40;

/// Scan result for one template.
#[derive(Debug, Serialize)]
pub struct ScanResult {
    /// Template path.
    pub path: String,
    /// Template size in bytes.
    pub size: usize,
    /// Segments found before the scan ended.
    pub segments: Vec<SegmentInfo>,
    /// Scan error, if the template is invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One segment of the stream.
#[derive(Debug, Serialize)]
pub struct SegmentInfo {
    /// `literal` or `tag`.
    pub kind: &'static str,
    /// Byte offset of the content in the template.
    pub offset: usize,
    /// Content length in bytes.
    pub len: usize,
    /// Escaped, possibly truncated content.
    pub preview: String,
}

/// Runs the scan command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = TemplateSource::open(path)?;
    let result = scan_source(&path.display().to_string(), source.as_bytes());

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    match result.error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn scan_source(path: &str, bytes: &[u8]) -> ScanResult {
    let mut result = ScanResult {
        path: path.to_string(),
        size: bytes.len(),
        segments: Vec::new(),
        error: None,
    };

    for segment in Scanner::new(bytes) {
        match segment {
            Ok(segment) => result.segments.push(describe(&segment, bytes)),
            Err(e) => result.error = Some(e.to_string()),
        }
    }

    result
}

fn describe(segment: &Segment, source: &[u8]) -> SegmentInfo {
    SegmentInfo {
        kind: segment.kind.as_str(),
        offset: segment.offset,
        len: segment.len,
        preview: preview(segment.content(source)),
    }
}

fn preview(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out.escape_debug().to_string()
}

fn print_text_output(result: &ScanResult) {
    println!("Template: {} ({} bytes)", result.path, result.size);
    println!();
    for (i, seg) in result.segments.iter().enumerate() {
        println!(
            "  #{i:<4} {:<7} @{:<8} len {:<6} \"{}\"",
            seg.kind, seg.offset, seg.len, seg.preview
        );
    }
    println!();
    match &result.error {
        Some(error) => println!("✗ {error}"),
        None => println!("✓ {} segments", result.segments.len()),
    }
}
