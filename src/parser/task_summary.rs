//! Task Execution Summary 解析
//!
//! 每一行形如
//! `INFO  :      Map 1          65013.00        516,890          7,624      13,119,189            1,200`，
//! 依次为 VERTICES、DURATION(ms)、CPU_TIME(ms)、GC_TIME(ms)、INPUT_RECORDS、OUTPUT_RECORDS。

use crate::parser::query_summary::corrupt_line_error;
use crate::summary::{IndexedLine, SectionResult, TaskMetrics, TaskSummary};
use crate::tools::{LineGrammar, strip_digit_separators};

/// 解析任务执行摘要
///
/// 匹配前先去掉千位分隔符，错误信息中也使用去掉逗号后的文本。
/// 同一顶点出现多次时以最后一次为准，不做跨字段校验。
pub fn parse_task_summary(lines: &[IndexedLine], grammar: &LineGrammar) -> SectionResult<TaskSummary> {
    let mut summary = TaskSummary::new();
    let mut errors = Vec::new();

    for line in lines {
        let text = strip_digit_separators(&line.text);
        match parse_task_line(&text, grammar) {
            Some((vertex, metrics)) => {
                summary.insert(vertex, metrics);
            }
            None => errors.push(corrupt_line_error(line.line_number, &text)),
        }
    }

    SectionResult::new(summary, errors)
}

fn parse_task_line(text: &str, grammar: &LineGrammar) -> Option<(String, TaskMetrics)> {
    let m = grammar.match_task(text)?;
    let [duration, cpu_time, gc_time, input_records, output_records] = m.columns;

    let metrics = TaskMetrics {
        duration: duration.parse().ok()?,
        cpu_time: cpu_time.parse().ok()?,
        gc_time: gc_time.parse().ok()?,
        input_records: input_records.parse().ok()?,
        output_records: output_records.parse().ok()?,
    };

    Some((format!("{} {}", m.name, m.index), metrics))
}
