//! End-to-end behaviour of the logger through its public API.

use dbglog::{CallSite, CaptureBuffer, Config, Level, LogError, Logger};

fn no_date(level: &str) -> Config {
    Config { show_date_time: false, ..Config::with_level(level).unwrap() }
}

fn logger_with_file(config: Config) -> (Logger, CaptureBuffer, tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let console = CaptureBuffer::new();
    let config = Config { log_file: Some(path.clone()), ..config };
    let logger = Logger::with_console(config, Box::new(console.clone())).unwrap();
    (logger, console, dir, path)
}

#[test]
fn err_line_carries_file_function_and_line() {
    let (mut log, console, _dir, path) = logger_with_file(no_date("err"));
    log.err(CallSite::new("x", Some("f"), 42), "boom").unwrap();
    log.close().unwrap();

    assert_eq!(console.lines(), vec!["[x:f():42] boom"]);
    assert_eq!(std::fs::read_to_string(path).unwrap(), "[x:f():42] boom\n");
}

#[test]
fn debug_below_threshold_produces_nothing() {
    let (mut log, console, _dir, path) = logger_with_file(no_date("wrn"));
    dbglog::dbg!(log, "hidden").unwrap();
    log.close().unwrap();

    assert!(console.is_empty());
    assert_eq!(std::fs::read_to_string(path).unwrap(), "");
}

#[test]
fn log_only_without_file_is_a_configuration_error() {
    let config = Config { log_only: true, ..Config::default() };
    match Logger::new(config) {
        Err(LogError::LogOnlyWithoutFile) => {}
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("logger should not be constructed"),
    }
}

#[test]
fn function_allow_list_selects_callers() {
    let console = CaptureBuffer::new();
    let config = Config { func_name_filter: Some("f,g".into()), ..no_date("dbg") };
    let mut log = Logger::with_console(config, Box::new(console.clone())).unwrap();

    log.dbg(CallSite::new("x", Some("h"), 1), "from h").unwrap();
    log.dbg(CallSite::new("x", Some("f"), 2), "from f").unwrap();
    assert_eq!(console.lines(), vec!["[x:f():2] from f"]);
}

#[test]
fn enter_and_leave_bracket_with_matching_indent() {
    let console = CaptureBuffer::new();
    let config = Config { trace: true, ..no_date("dbg") };
    let mut log = Logger::with_console(config, Box::new(console.clone())).unwrap();

    log.enter(CallSite::new("x", Some("outer"), 1), "").unwrap();
    log.enter(CallSite::new("x", Some("f"), 10), "x").unwrap();
    log.leave(CallSite::new("x", Some("f"), 20), "y").unwrap();
    log.leave(CallSite::new("x", Some("outer"), 30), "").unwrap();

    let lines = console.lines();
    let (open, close) = (&lines[1], &lines[2]);
    assert!(open.ends_with('{'));
    assert!(close.trim_start().starts_with('}'));
    let indent = |s: &str| s.len() - s.trim_start().len();
    assert_eq!(indent(open), indent(close));
    assert_eq!(indent(open), 2);
}

#[test]
fn replay_matches_direct_output_for_each_level() {
    for level in Level::ALL {
        let direct_console = CaptureBuffer::new();
        let mut direct = Logger::with_console(no_date("log"), Box::new(direct_console.clone())).unwrap();
        direct.emit(level, CallSite::new("x", Some("f"), 5), "msg").unwrap();

        let replay_console = CaptureBuffer::new();
        let mut replay = Logger::with_console(no_date("log"), Box::new(replay_console.clone())).unwrap();
        replay.record(level, CallSite::new("x", Some("f"), 5), "msg");
        replay.drain(CallSite::new("x", Some("main"), 9), None, None).unwrap();

        assert_eq!(direct_console.contents(), replay_console.contents());
    }
}

#[test]
fn appends_to_existing_log_across_loggers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.log");
    for text in ["first run", "second run"] {
        let config = Config { log_file: Some(path.clone()), log_only: true, ..no_date("out") };
        let mut log = Logger::new(config).unwrap();
        log.out(CallSite::top_level("main.rs", 3), text).unwrap();
    }
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[main.rs:__main__:3] first run\n[main.rs:__main__:3] second run\n"
    );
}
