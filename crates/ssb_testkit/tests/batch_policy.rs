//! Which failures stop a batch and which only affect one template.

use ssb_compiler::{
    compile, compile_with, CompileError, CompilerConfig, ErrorClass, FileOutcome, FormatVersion,
};
use ssb_testkit::prelude::*;
use std::fs;

#[test]
fn failed_append_is_file_local() {
    for format in FormatVersion::ALL {
        let mut sink = FailingSink::new(FailPoint::AfterAppends(3));
        let err = compile(b"a {{b}} c {{d}} e", &mut sink, format).unwrap_err();

        assert_eq!(err.class(), ErrorClass::Io, "{format}");
        assert!(!err.is_batch_fatal());
    }
}

#[test]
fn failed_patch_leaves_header_unpatched() {
    let mut sink = FailingSink::new(FailPoint::WriteAt);
    let err = compile(b"hello", &mut sink, FormatVersion::Inline).unwrap_err();

    assert!(matches!(err, CompileError::Storage(_)));
    let bytes = sink.data();
    assert_eq!(&bytes[..12], b"SSBTEMPLATE1");
    assert_eq!(read_u32_le(&bytes, 12), 0);
}

#[test]
fn failed_sync_is_reported() {
    let mut sink = FailingSink::new(FailPoint::Sync);
    let config = CompilerConfig::new().sync_on_finish(true);
    assert!(compile_with(b"hello", &mut sink, &config).is_err());

    let mut sink = FailingSink::new(FailPoint::Sync);
    let config = CompilerConfig::new();
    assert_eq!(compile_with(b"hello", &mut sink, &config).unwrap(), 1);
}

#[test]
fn oversized_tag_does_not_stop_the_batch() {
    let dir = TemplateDir::with_templates([
        ("a.html", "ok"),
        ("b.html", "{{this_tag_is_too_long}}"),
        ("c.html", "{{short}}"),
    ]);
    let report = dir.compile_with(CompilerConfig::new().max_tag_length(8));

    assert!(!report.is_halted());
    assert_eq!(report.compiled(), 2);
    assert_eq!(report.failed(), 1);

    let failed: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| match o {
            FileOutcome::Failed { input, error, .. } => Some((input.clone(), error.class())),
            FileOutcome::Compiled { .. } => None,
        })
        .collect();
    assert_eq!(failed, [(dir.join("b.html"), ErrorClass::Format)]);
    assert!(dir.exists("c.ssb"));
}

#[test]
fn halt_stops_before_later_templates() {
    let dir = TemplateDir::with_templates([
        ("a.html", "one"),
        ("b.html", "two"),
        ("c.html", "three"),
    ]);
    fs::create_dir(dir.join("b.ssb")).unwrap();

    let report = dir.compile(FormatVersion::Table);

    assert_eq!(report.compiled(), 1);
    let halt = report.halted.unwrap();
    assert_eq!(halt.input, dir.join("b.html"));
    assert!(halt.error.is_batch_fatal());
    assert!(!dir.exists("c.ssb"));
}

#[test]
fn custom_extensions() {
    let dir = TemplateDir::with_templates([("mail.tpl", "Dear {{name}}"), ("index.html", "x")]);
    let config = CompilerConfig::new()
        .input_extension(".tpl")
        .output_extension(".bin");
    let report = dir.compile_with(config);

    assert_eq!(report.compiled(), 1);
    assert!(dir.exists("mail.bin"));
    assert!(!dir.exists("index.bin"));
    assert!(!dir.exists("index.ssb"));
}

#[test]
fn recompiling_overwrites_previous_output() {
    let dir = TemplateDir::with_templates([("a.html", "a much longer first version")]);
    dir.compile(FormatVersion::Inline);

    dir.write("a.html", "short");
    dir.compile(FormatVersion::Inline);

    assert_hex_eq(
        &dir.read("a.ssb"),
        "5353425445 4d504c415445 31 01000000 05000000 73686f7274",
    );
}
