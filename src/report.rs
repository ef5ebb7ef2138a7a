//! 解析结果落盘
//!
//! 在指定根目录下写出三个摘要文件和一个汇总错误日志：
//!
//! ```text
//! <root>/Summaries/query_summary.txt
//! <root>/Summaries/task_summary.txt
//! <root>/Summaries/detailed_summary.txt
//! <root>/ParserLogs/parser_error_logs.txt
//! ```

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ParseError;
use crate::summary::{DetailedSummary, ParsedLog, QuerySummary, TaskSummary};

const SUMMARIES_DIR: &str = "Summaries";
const PARSER_LOGS_DIR: &str = "ParserLogs";

const QUERY_SUMMARY_FILE: &str = "query_summary.txt";
const TASK_SUMMARY_FILE: &str = "task_summary.txt";
const DETAILED_SUMMARY_FILE: &str = "detailed_summary.txt";
const ERROR_LOG_FILE: &str = "parser_error_logs.txt";

const BANNER: &str = "===============================";

/// 默认输出根目录
pub const DEFAULT_OUTPUT_DIR: &str = "./RunResults";

/// 解析结果写出器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn summaries_dir(&self) -> PathBuf {
        self.root.join(SUMMARIES_DIR)
    }

    pub fn parser_logs_dir(&self) -> PathBuf {
        self.root.join(PARSER_LOGS_DIR)
    }

    /// 写出的全部文件路径：三个摘要 + 错误日志
    pub fn artifact_paths(&self) -> [PathBuf; 4] {
        let summaries = self.summaries_dir();
        [
            summaries.join(QUERY_SUMMARY_FILE),
            summaries.join(TASK_SUMMARY_FILE),
            summaries.join(DETAILED_SUMMARY_FILE),
            self.parser_logs_dir().join(ERROR_LOG_FILE),
        ]
    }

    /// 创建目录、清理旧文件并写出本次结果
    pub fn save(&self, parsed: &ParsedLog) -> Result<(), ParseError> {
        for dir in [self.summaries_dir(), self.parser_logs_dir()] {
            fs::create_dir_all(&dir).map_err(|e| report_error(&dir, e))?;
        }
        self.delete()?;

        let [query_path, task_path, detailed_path, errors_path] = self.artifact_paths();
        write_file(&query_path, &render_query(parsed.query.as_ref().map(|r| &r.data)))?;
        write_file(&task_path, &render_task(parsed.task.as_ref().map(|r| &r.data)))?;
        write_file(
            &detailed_path,
            &render_detailed(parsed.detailed.as_ref().map(|r| &r.data)),
        )?;
        write_file(&errors_path, &render_error_log(parsed))?;

        info!(root = %self.root.display(), "reports saved");
        Ok(())
    }

    /// 删除之前写出的文件，不存在的文件直接跳过
    pub fn delete(&self) -> Result<(), ParseError> {
        for path in self.artifact_paths() {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed previous report"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(report_error(&path, e)),
            }
        }
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ParseError> {
    fs::write(path, content).map_err(|e| report_error(path, e))
}

fn report_error(path: &Path, e: std::io::Error) -> ParseError {
    ParseError::ReportError {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// 汇总错误日志，固定按 查询 / 任务 / 详细 的顺序输出
pub fn render_error_log(parsed: &ParsedLog) -> String {
    let sections = [
        ("Query Summary Errors:", parsed.query_errors()),
        ("Task Execution Errors:", parsed.task_errors()),
        ("Detailed Metrics Errors:", parsed.detailed_errors()),
    ];

    let mut out = String::new();
    for (i, (title, errors)) in sections.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{BANNER}\n{title}\n{BANNER}");
        for error in errors.unwrap_or_default() {
            let _ = writeln!(out, "{error}");
        }
    }
    out
}

pub fn render_query(summary: Option<&QuerySummary>) -> String {
    let Some(summary) = summary else {
        return "None".to_string();
    };
    render_map(summary.iter().map(|(op, duration)| (op, format!("'{duration}'"))))
}

pub fn render_task(summary: Option<&TaskSummary>) -> String {
    let Some(summary) = summary else {
        return "None".to_string();
    };
    render_map(summary.iter().map(|(vertex, m)| {
        let fields = [
            ("DURATION", m.duration),
            ("CPU_TIME", m.cpu_time),
            ("GC_TIME", m.gc_time),
            ("INPUT_RECORDS", m.input_records),
            ("OUTPUT_RECORDS", m.output_records),
        ];
        (vertex, render_map(fields.iter().map(|(k, v)| (k, format!("{v:?}")))))
    }))
}

pub fn render_detailed(summary: Option<&DetailedSummary>) -> String {
    let Some(summary) = summary else {
        return "None".to_string();
    };
    render_map(summary.iter().map(|(category, metrics)| {
        (category, render_map(metrics.iter().map(|(k, v)| (k, format!("{v:?}")))))
    }))
}

fn render_map<K, I>(entries: I) -> String
where
    K: AsRef<str>,
    I: Iterator<Item = (K, String)>,
{
    let body: Vec<String> = entries
        .map(|(k, v)| format!("'{}': {}", k.as_ref(), v))
        .collect();
    format!("{{{}}}", body.join(", "))
}
