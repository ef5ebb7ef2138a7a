use std::fs::{self, File};
use std::io::Write;

use tempfile::TempDir;
use tez_log_parser::*;

fn create_temp_file_with_content(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let file_path = dir.path().join(name);
    let mut file = File::create(&file_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file_path
}

const QUERY_ONLY: &str = "\
INFO  : Query Execution Summary
INFO  : ----------------------------------------------------------------------------------------------
INFO  : OPERATION                            DURATION
INFO  : ----------------------------------------------------------------------------------------------
INFO  : Compile Query                           7.43s
INFO  : Compile Query                           9.10s
INFO  : broken line
INFO  : ----------------------------------------------------------------------------------------------
";

const DETAILED_ONLY: &str = "\
INFO  : org.apache.tez.common.counters.DAGCounter:
INFO  :    NUM_SUCCEEDED_TASKS: 58
INFO  : Completed executing command(queryId=hive_1); Time taken: 1.0 seconds
";

#[test]
fn test_parse_log_from_string_orders_errors() {
    let parsed = parse_log_from_string(QUERY_ONLY).unwrap();
    let query = parsed.query.unwrap();

    assert_eq!(query.data.len(), 1);
    assert_eq!(query.data["Compile Query"], "9.10");
    assert_eq!(query.errors.len(), 6);
    assert_eq!(
        query.errors[0],
        "Err parsing idx: 7, line: 'INFO  : broken line'. Line has corrupt structure... skipped"
    );
    assert_eq!(
        query.errors[1],
        "Critical operation: 'Prepare Plan' missing in the log data."
    );
    assert!(query.errors[1..].iter().all(|e| e.starts_with("Critical operation")));
}

#[test]
fn test_parse_log_file_missing() {
    let err = parse_log_file("/no/such/beeline.log").unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound { .. }));
}

#[test]
fn test_crlf_log_file() {
    let dir = TempDir::new().unwrap();
    let path = create_temp_file_with_content(&dir, "crlf.log", &DETAILED_ONLY.replace('\n', "\r\n"));
    let parsed = parse_log_file(&path).unwrap();
    let detailed = parsed.detailed.unwrap();
    assert!(detailed.errors.is_empty());
    assert_eq!(
        detailed.data["org.apache.tez.common.counters.DAGCounter"]["NUM_SUCCEEDED_TASKS"],
        58.0
    );
}

#[test]
fn test_parse_log_files_in_parallel_keeps_order() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        create_temp_file_with_content(&dir, "a.log", QUERY_ONLY),
        create_temp_file_with_content(&dir, "b.log", "nothing to see here\n"),
        create_temp_file_with_content(&dir, "c.log", DETAILED_ONLY),
    ];

    let results = parse_log_files(&paths, &ParserConfig::default());
    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().unwrap().query.is_some());
    assert_eq!(results[1].as_ref().unwrap_err(), &ParseError::NoHeadersFound);
    assert!(results[2].as_ref().unwrap().detailed.is_some());
}

#[test]
fn test_custom_marker_config() {
    let dir = TempDir::new().unwrap();
    let path = create_temp_file_with_content(&dir, "debug.log", &DETAILED_ONLY.replace("INFO", "DEBUG"));

    let config = ParserConfig::with_marker("DEBUG");
    let parsed = parse_log_file_with_config(&path, &config).unwrap();
    assert!(parsed.detailed.is_some());

    // 默认 marker 下找不到任何 header
    assert_eq!(parse_log_file(&path).unwrap_err(), ParseError::NoHeadersFound);
}

#[test]
fn test_save_reports_for_parsed_log() {
    let dir = TempDir::new().unwrap();
    let parsed = parse_log_from_string(DETAILED_ONLY).unwrap();
    let writer = ReportWriter::new(dir.path().join("RunResults"));
    writer.save(&parsed).unwrap();

    let summaries = dir.path().join("RunResults").join("Summaries");
    assert_eq!(fs::read_to_string(summaries.join("query_summary.txt")).unwrap(), "None");
    assert_eq!(
        fs::read_to_string(summaries.join("detailed_summary.txt")).unwrap(),
        "{'org.apache.tez.common.counters.DAGCounter': {'NUM_SUCCEEDED_TASKS': 58.0}}"
    );

    let error_log = fs::read_to_string(
        dir.path()
            .join("RunResults")
            .join("ParserLogs")
            .join("parser_error_logs.txt"),
    )
    .unwrap();
    let titles: Vec<&str> = error_log.lines().filter(|l| l.ends_with("Errors:")).collect();
    assert_eq!(
        titles,
        vec!["Query Summary Errors:", "Task Execution Errors:", "Detailed Metrics Errors:"]
    );
}
