//! Query Execution Summary 解析
//!
//! 每一行形如 `INFO  : Compile Query                           7.43s`，
//! 解析为 操作名 -> 两位小数耗时。解析完成后检查关键操作是否齐全。

use crate::parser::constants::CORRUPT_STRUCTURE_SUFFIX;
use crate::summary::{IndexedLine, QuerySummary, SectionResult};
use crate::tools::LineGrammar;

/// 解析查询执行摘要
///
/// # 参数
///
/// * `lines` - section 正文（不含 header 和表格边框）
/// * `grammar` - 行语法
/// * `critical_operations` - 必须出现的操作，缺失时按此顺序追加错误
///
/// # 返回
///
/// 成功解析的操作耗时，以及错误列表：先是按行顺序的结构错误，再是缺失的关键操作。
/// 同名操作以最后一次出现为准。
pub fn parse_query_summary(
    lines: &[IndexedLine],
    grammar: &LineGrammar,
    critical_operations: &[&str],
) -> SectionResult<QuerySummary> {
    let mut summary = QuerySummary::new();
    let mut errors = Vec::new();

    for line in lines {
        match parse_query_line(&line.text, grammar) {
            Some((operation, duration)) => {
                summary.insert(operation, duration);
            }
            None => errors.push(corrupt_line_error(line.line_number, line.text.trim())),
        }
    }

    for op in critical_operations {
        if !summary.contains_key(*op) {
            errors.push(format!("Critical operation: '{op}' missing in the log data."));
        }
    }

    SectionResult::new(summary, errors)
}

/// 解析单行，返回 (操作名, 格式化后的耗时)
fn parse_query_line(text: &str, grammar: &LineGrammar) -> Option<(String, String)> {
    let (label, seconds) = grammar.match_query(text)?;
    let duration: f64 = seconds.parse().ok()?;
    Some((label.trim().to_string(), format!("{duration:.2}")))
}

pub(crate) fn corrupt_line_error(line_number: usize, text: &str) -> String {
    format!("Err parsing idx: {line_number}, line: '{text}'. {CORRUPT_STRUCTURE_SUFFIX}")
}
