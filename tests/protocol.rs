// tests/protocol.rs

use fcu_launcher::exec::protocol::{EXECUTION_FAILED, OUTPUT_PATH_MISSING};
use fcu_launcher::exec::{LineFold, OutputLine, classify, reduce_lines};
use fcu_launcher::types::{FailureKind, ProgressEvent, RunOutcome};

fn progress(percent: u8) -> ProgressEvent {
    ProgressEvent { percent }
}

#[test]
fn classify_distinguishes_progress_candidates_and_blanks() {
    assert_eq!(classify(""), None);
    assert_eq!(classify("   \r"), None);
    assert_eq!(
        classify("PROGRESS:40"),
        Some(OutputLine::Progress(Some(progress(40))))
    );
    assert_eq!(
        classify("  PROGRESS: 7 \r\n"),
        Some(OutputLine::Progress(Some(progress(7))))
    );
    assert_eq!(
        classify("PROGRESS:notanumber"),
        Some(OutputLine::Progress(None))
    );
    assert_eq!(
        classify("  /tmp/out/result.ldi.xml \n"),
        Some(OutputLine::Candidate("/tmp/out/result.ldi.xml".to_string()))
    );
    // Prefix match is case sensitive.
    assert_eq!(
        classify("progress:10"),
        Some(OutputLine::Candidate("progress:10".to_string()))
    );
}

#[test]
fn progress_values_are_clamped() {
    assert_eq!(classify("PROGRESS:150"), Some(OutputLine::Progress(Some(progress(100)))));
    assert_eq!(classify("PROGRESS:-5"), Some(OutputLine::Progress(Some(progress(0)))));
    assert_eq!(classify("PROGRESS:+20"), Some(OutputLine::Progress(Some(progress(20)))));
}

#[test]
fn successful_run_reports_progress_and_last_candidate() {
    let mut seen = Vec::new();
    let outcome = reduce_lines(
        ["PROGRESS:10", "PROGRESS:55", "hello", "/tmp/out.bin"],
        Some(0),
        |event| seen.push(event.percent),
    );

    assert_eq!(
        outcome,
        RunOutcome::Success {
            output_path: "/tmp/out.bin".to_string()
        }
    );
    assert_eq!(seen, vec![10, 55]);
}

#[test]
fn clean_exit_without_candidate_has_no_output() {
    let mut seen = Vec::new();
    let outcome = reduce_lines(
        ["PROGRESS:10", "", "PROGRESS:100"],
        Some(0),
        |event| seen.push(event.percent),
    );

    assert_eq!(
        outcome,
        RunOutcome::Failure {
            kind: FailureKind::NoOutputProduced,
            message: OUTPUT_PATH_MISSING.to_string(),
        }
    );
    assert_eq!(seen, vec![10, 100]);
}

#[test]
fn non_zero_exit_keeps_only_last_five_lines() {
    let outcome = reduce_lines(["a", "b", "c", "d", "e", "f", "g"], Some(1), |_| {});

    assert_eq!(
        outcome,
        RunOutcome::Failure {
            kind: FailureKind::ProcessExitNonZero,
            message: "c\nd\ne\nf\ng".to_string(),
        }
    );
}

#[test]
fn failure_tail_includes_progress_lines() {
    let outcome = reduce_lines(
        ["PROGRESS:10", "loading", "PROGRESS:20", "panic: boom"],
        Some(2),
        |_| {},
    );

    assert_eq!(
        outcome.to_string(),
        "PROGRESS:10\nloading\nPROGRESS:20\npanic: boom"
    );
}

#[test]
fn non_zero_exit_without_output_uses_generic_message() {
    let outcome = reduce_lines(Vec::<String>::new(), Some(3), |_| {});
    assert_eq!(
        outcome,
        RunOutcome::Failure {
            kind: FailureKind::ProcessExitNonZero,
            message: EXECUTION_FAILED.to_string(),
        }
    );
}

#[test]
fn signal_termination_is_a_failure_even_with_candidate() {
    let outcome = reduce_lines(["/tmp/out.bin"], None, |_| {});
    assert_eq!(outcome.failure_kind(), Some(FailureKind::ProcessExitNonZero));
}

#[test]
fn malformed_progress_emits_nothing_and_keeps_candidate() {
    let mut fold = LineFold::new();
    assert_eq!(fold.push("/tmp/out.bin"), None);
    assert_eq!(fold.push("PROGRESS:notanumber"), None);
    assert_eq!(fold.candidate(), Some("/tmp/out.bin"));

    assert_eq!(
        fold.finish(Some(0)),
        RunOutcome::Success {
            output_path: "/tmp/out.bin".to_string()
        }
    );
}

#[test]
fn later_diagnostic_line_replaces_the_result() {
    // The last candidate always wins, even if it is not a path.
    let outcome = reduce_lines(["/tmp/out.bin", "warning: cleanup skipped"], Some(0), |_| {});
    assert_eq!(
        outcome,
        RunOutcome::Success {
            output_path: "warning: cleanup skipped".to_string()
        }
    );
}

#[test]
fn blank_lines_are_not_retained() {
    let mut fold = LineFold::new();
    for line in ["", "x", "  ", "\n", "y"] {
        fold.push(line);
    }
    assert_eq!(fold.tail().collect::<Vec<_>>(), vec!["x", "y"]);
}
