use std::borrow::Cow;

use memchr::memchr;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::parser::constants::DEFAULT_MARKER;

// 行语法模板，`{m}` 会被替换为转义后的 marker
const HEADER_TEMPLATE: &str = r"^{m}\s{2}:\s([A-Za-z0-9_\s.]+):$";
const METRIC_TEMPLATE: &str = r"^{m}\s{2}:\s{4}([A-Za-z0-9_]+):\s(\d+\.?\d*|\d*)$";
const QUERY_TEMPLATE: &str = r"^{m}\s{2}:\s([A-Za-z()]+(?: [A-Za-z()]+)*)\s{2,}(\d+(?:\.\d+)?)s$";
const TASK_TEMPLATE: &str = r"^{m}\s{2}:\s+([A-Za-z]+)\s(\d+)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s*$";

const DIGIT_SEPARATOR: u8 = b',';

/// 默认 marker（"INFO"）对应的语法，只编译一次
pub static DEFAULT_GRAMMAR: Lazy<LineGrammar> = Lazy::new(|| {
    LineGrammar::new(DEFAULT_MARKER).expect("built-in line patterns must compile")
});

/// 任务摘要行的匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLineMatch<'a> {
    /// 顶点名，如 "Map"、"Reducer"
    pub name: &'a str,
    /// 顶点序号
    pub index: &'a str,
    /// DURATION, CPU_TIME, GC_TIME, INPUT_RECORDS, OUTPUT_RECORDS
    pub columns: [&'a str; 5],
}

/// 各 section 共用的行语法
///
/// 每个解析器只使用属于自己的模式：查询摘要用 query，任务摘要用 task，
/// 详细计数器用 header 和 metric。
#[derive(Debug, Clone)]
pub struct LineGrammar {
    header: Regex,
    metric: Regex,
    query: Regex,
    task: Regex,
}

impl LineGrammar {
    /// 根据 marker 编译全部行语法
    pub fn new(marker: &str) -> Result<Self, ParseError> {
        let escaped = regex::escape(marker);
        Ok(Self {
            header: compile(HEADER_TEMPLATE, &escaped)?,
            metric: compile(METRIC_TEMPLATE, &escaped)?,
            query: compile(QUERY_TEMPLATE, &escaped)?,
            task: compile(TASK_TEMPLATE, &escaped)?,
        })
    }

    /// 默认 marker 直接复用预编译的语法
    pub fn for_marker(marker: &str) -> Result<Self, ParseError> {
        if marker == DEFAULT_MARKER {
            Ok((*DEFAULT_GRAMMAR).clone())
        } else {
            Self::new(marker)
        }
    }

    /// 判断是否为详细计数器中的分类 header，如 `INFO  : File System Counters:`
    pub fn is_header_line(&self, line: &str) -> bool {
        self.header.is_match(line)
    }

    /// 匹配指标行，返回 (指标名, 数值文本)；数值文本可能为空
    pub fn match_metric<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.metric.captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    /// 匹配查询摘要行，返回 (操作名, 秒数文本)
    pub fn match_query<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.query.captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    /// 匹配任务摘要行，调用前应先去掉千位分隔符
    pub fn match_task<'a>(&self, line: &'a str) -> Option<TaskLineMatch<'a>> {
        let caps = self.task.captures(line)?;
        let column = |i: usize| caps.get(i).map(|m| m.as_str());
        Some(TaskLineMatch {
            name: column(1)?,
            index: column(2)?,
            columns: [column(3)?, column(4)?, column(5)?, column(6)?, column(7)?],
        })
    }
}

impl Default for LineGrammar {
    fn default() -> Self {
        (*DEFAULT_GRAMMAR).clone()
    }
}

fn compile(template: &str, escaped_marker: &str) -> Result<Regex, ParseError> {
    let pattern = template.replace("{m}", escaped_marker);
    Regex::new(&pattern).map_err(|e| ParseError::InvalidPattern {
        pattern,
        reason: e.to_string(),
    })
}

/// 去掉数字中的千位分隔符（逗号）
///
/// 大多数行不含逗号，此时直接借用原字符串。
#[inline]
pub fn strip_digit_separators(line: &str) -> Cow<'_, str> {
    if memchr(DIGIT_SEPARATOR, line.as_bytes()).is_some() {
        Cow::Owned(line.replace(DIGIT_SEPARATOR as char, ""))
    } else {
        Cow::Borrowed(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod header_tests {
        use super::*;

        #[test]
        fn valid_headers() {
            let g = LineGrammar::default();
            let cases = [
                "INFO  : org.apache.tez.common.counters.DAGCounter:",
                "INFO  : File System Counters:",
                "INFO  : TaskCounter_Map_1_INPUT_a:",
            ];
            for line in cases {
                assert!(g.is_header_line(line), "Failed for: {line}");
            }
        }

        #[test]
        fn invalid_headers() {
            let g = LineGrammar::default();
            let cases = [
                "INFO  : File System Counters",
                "INFO  :    HDFS_OP_OPEN: 44012",
                "WARN  : File System Counters:",
                "INFO : File System Counters:",
                "INFO  : Bad-Label:",
            ];
            for line in cases {
                assert!(!g.is_header_line(line), "Should fail for: {line}");
            }
        }
    }

    mod metric_tests {
        use super::*;

        #[test]
        fn integer_and_decimal_values() {
            let g = LineGrammar::default();
            assert_eq!(
                g.match_metric("INFO  :    NUM_SUCCEEDED_TASKS: 58"),
                Some(("NUM_SUCCEEDED_TASKS", "58"))
            );
            assert_eq!(
                g.match_metric("INFO  :    AM_GC_TIME: 4.25"),
                Some(("AM_GC_TIME", "4.25"))
            );
        }

        #[test]
        fn empty_value_matches_grammar() {
            let g = LineGrammar::default();
            assert_eq!(g.match_metric("INFO  :    EMPTY: "), Some(("EMPTY", "")));
        }

        #[test]
        fn trailing_garbage_rejected() {
            let g = LineGrammar::default();
            assert!(g.match_metric("INFO  :    HDFS_OP_OPEN: 44012asdf").is_none());
            assert!(g.match_metric("INFO  :    TOTAL: 58 extra").is_none());
            assert!(g.match_metric("INFO  :   THREE_SPACES: 1").is_none());
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn operation_with_parentheses() {
            let g = LineGrammar::default();
            let (label, value) = g
                .match_query("INFO  : Get Query Coordinator (AM)              0.00s")
                .unwrap();
            assert_eq!(label.trim(), "Get Query Coordinator (AM)");
            assert_eq!(value, "0.00");
        }

        #[test]
        fn requires_seconds_suffix_at_end() {
            let g = LineGrammar::default();
            assert!(g.match_query("INFO  : Run DAG                                80.54").is_none());
            assert!(g.match_query("INFO  : Some Operation       123.45dsad").is_none());
            assert!(g.match_query("INFO  : Run DAG                                80.54s ").is_none());
        }

        #[test]
        fn requires_two_spaces_before_duration() {
            let g = LineGrammar::default();
            assert!(g.match_query("INFO  : Run DAG 80.54s").is_none());
            assert!(g.match_query("INFO  : Run DAG  80.54s").is_some());
        }
    }

    mod task_tests {
        use super::*;

        #[test]
        fn task_line_columns() {
            let g = LineGrammar::default();
            let line = strip_digit_separators(
                "INFO  :      Map 1          65013.00        516,890          7,624      13,119,189            1,200",
            );
            let m = g.match_task(&line).unwrap();
            assert_eq!(m.name, "Map");
            assert_eq!(m.index, "1");
            assert_eq!(m.columns, ["65013.00", "516890", "7624", "13119189", "1200"]);
        }

        #[test]
        fn unit_suffix_rejected() {
            let g = LineGrammar::default();
            assert!(g
                .match_task("INFO  :  Map 4          40112.00s        110070          1460           1200                0")
                .is_none());
            assert!(g
                .match_task("INFO  :  Map 4          40112.00        110070          1460           1200                0s")
                .is_none());
        }
    }

    #[test]
    fn strip_separators_borrows_when_clean() {
        assert!(matches!(strip_digit_separators("no commas"), Cow::Borrowed(_)));
        assert_eq!(strip_digit_separators("1,200,300"), "1200300");
    }

    #[test]
    fn custom_marker_is_escaped() {
        let g = LineGrammar::new("[main]").unwrap();
        assert!(g.is_header_line("[main]  : File System Counters:"));
        assert!(!g.is_header_line("m  : File System Counters:"));
    }
}
