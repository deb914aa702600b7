// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::TempDir;

fn write(tmp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn pattern(pattern: &str, skip_comments: bool) -> Entry {
    EntrySpec::Pattern {
        pattern: pattern.into(),
        skip_comments,
    }
    .compile()
    .unwrap()
}

#[test]
fn deserializes_tagged_entries() {
    let spec: EntrySpec = serde_yaml::from_str("type: line-length\nmax: 80\n").unwrap();
    assert_eq!(spec, EntrySpec::LineLength { max: 80 });

    let spec: EntrySpec = serde_yaml::from_str("type: command\nprogram: chktex\n").unwrap();
    assert_eq!(
        spec,
        EntrySpec::Command {
            program: "chktex".into(),
            args: vec![],
            ok_codes: vec![0, 1],
        }
    );
}

#[test]
fn unknown_entry_type_fails_to_deserialize() {
    assert!(serde_yaml::from_str::<EntrySpec>("type: python\nmodule: x\n").is_err());
}

#[test]
fn pattern_reports_each_match_with_line() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "a.tex", "{\\bf bold}\nplain\n\\it x \\tt y\n");

    let findings = pattern(r"\\(bf|it|tt)\b", false).invoke(&path).unwrap();
    let lines: Vec<_> = findings.iter().map(|f| f.line.unwrap()).collect();
    assert_eq!(lines, vec![1, 3, 3]);
    assert_eq!(findings[0].detail.as_deref(), Some("\\bf"));
}

#[test]
fn pattern_skips_comment_lines_when_asked() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "a.tex", "% $$x$$ in a comment\n$$y$$\n");

    assert_eq!(pattern(r"\$\$", false).invoke(&path).unwrap().len(), 4);
    let findings = pattern(r"\$\$", true).invoke(&path).unwrap();
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.line == Some(2)));
}

#[test]
fn whitespace_matches_have_no_detail() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "a.tex", "text   \n");

    let findings = pattern("[ \t]+$", false).invoke(&path).unwrap();
    assert_eq!(findings, vec![Finding::at_line(1)]);
}

#[test]
fn invalid_pattern_does_not_compile() {
    let spec = EntrySpec::Pattern {
        pattern: "(unclosed".into(),
        skip_comments: false,
    };
    assert!(spec.compile().is_err());
}

#[test]
fn pattern_on_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let err = pattern("x", false)
        .invoke(&tmp.path().join("gone.tex"))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Io { .. }));
}

#[test]
fn line_length_counts_characters() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "a.tex", "short\nexactly10!\nthis one is longer\nüüüüüüüüüü\n");

    let entry = EntrySpec::LineLength { max: 10 }.compile().unwrap();
    let findings = entry.invoke(&path).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, Some(3));
    assert_eq!(findings[0].detail.as_deref(), Some("18 > 10"));
}

#[test]
fn line_length_zero_is_rejected() {
    assert!(EntrySpec::LineLength { max: 0 }.compile().is_err());
}

#[test]
fn empty_command_is_rejected() {
    let spec = EntrySpec::Command {
        program: " ".into(),
        args: vec![],
        ok_codes: vec![0],
    };
    assert!(spec.compile().is_err());
}

#[cfg(unix)]
mod command {
    use super::*;

    fn sh(script: &str, ok_codes: Vec<i32>) -> Entry {
        EntrySpec::Command {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            ok_codes,
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn stdout_lines_become_findings() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "a.tex", "");

        let entry = sh(r#"echo "$0:3: bad spacing"; echo; echo "general remark""#, vec![0]);
        let findings = entry.invoke(&path).unwrap();

        assert_eq!(
            findings,
            vec![
                Finding::at_line(3).with_detail("bad spacing"),
                Finding::new().with_detail("general remark"),
            ]
        );
    }

    #[test]
    fn ok_exit_code_with_no_output_is_clean() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "a.tex", "");

        assert!(sh("exit 1", vec![0, 1]).invoke(&path).unwrap().is_empty());
    }

    #[test]
    fn other_exit_code_is_a_failure() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "a.tex", "");

        let err = sh("echo broken >&2; exit 4", vec![0, 1])
            .invoke(&path)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exit code 4"), "{msg}");
        assert!(msg.contains("broken"), "{msg}");
    }

    #[test]
    fn missing_program_is_a_failure() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "a.tex", "");

        let entry = EntrySpec::Command {
            program: "texcheck-no-such-program".into(),
            args: vec![],
            ok_codes: vec![0],
        }
        .compile()
        .unwrap();
        assert!(matches!(
            entry.invoke(&path),
            Err(AnalysisError::Command { .. })
        ));
    }
}
