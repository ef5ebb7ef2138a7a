//! DAGCounter 详细计数器解析
//!
//! 正文由若干分类组成，每个分类以 header 行开头，后面跟着缩进四个空格的指标行：
//!
//! ```text
//! INFO  : org.apache.tez.common.counters.DAGCounter:
//! INFO  :    NUM_SUCCEEDED_TASKS: 58
//! INFO  : File System Counters:
//! INFO  :    FILE_BYTES_READ: 954341
//! ```

use std::collections::BTreeMap;

use crate::parser::constants::CORRUPT_METRIC_SUFFIX;
use crate::summary::{DetailedSummary, IndexedLine, SectionResult};
use crate::tools::LineGrammar;

/// 解析详细计数器
///
/// # 参数
///
/// * `lines` - section 正文，第一行应当是 DAGCounter header
/// * `grammar` - 行语法
/// * `line_prefix` - marker 加分隔符（如 `"INFO  : "`），用于切出分类名
///
/// # 返回
///
/// 分类 -> 指标名 -> 数值。出现过 header 的分类即使没有指标也会保留为空映射；
/// 第一个 header 之前的指标行记为错误。
pub fn parse_detailed_metrics(
    lines: &[IndexedLine],
    grammar: &LineGrammar,
    line_prefix: &str,
) -> SectionResult<DetailedSummary> {
    let mut data = DetailedSummary::new();
    let mut errors = Vec::new();
    let mut current: Option<String> = None;

    for line in lines {
        let idx = line.line_number;
        let text = line.text.as_str();

        if grammar.is_header_line(text) {
            match header_label(text, line_prefix) {
                Some(label) => {
                    data.insert(label.clone(), BTreeMap::new());
                    current = Some(label);
                }
                None => errors.push(format!("Unexpected header format at idx: {idx}, line: '{text}'.")),
            }
            continue;
        }

        if let Some(category) = current.as_ref().and_then(|c| data.get_mut(c)) {
            if let Some((name, value)) = grammar.match_metric(text) {
                // 空数值能通过语法但无法转换，按损坏行处理
                if let Ok(value) = value.parse::<f64>() {
                    category.insert(name.to_string(), value);
                    continue;
                }
            }
        }

        errors.push(format!("Err parsing idx: {idx}, line: '{text}'. {CORRUPT_METRIC_SUFFIX}"));
    }

    SectionResult::new(data, errors)
}

/// 取 marker 之后、第一个冒号之前的文本作为分类名
fn header_label(text: &str, line_prefix: &str) -> Option<String> {
    let (_, rest) = text.split_once(line_prefix)?;
    let label = rest.split(':').next()?.trim();
    Some(label.to_string())
}
