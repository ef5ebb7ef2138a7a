//! Parser 配置模块
//!
//! 提供 section 定义和解析器配置，使得日志格式变化（例如 marker 不同）时只需更新配置，
//! 而不需要修改核心解析逻辑。配置在构造后不可变，由 `LogSectionExtractor` 持有。

use crate::parser::constants::*;

/// 日志中的三个 section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionKind {
    /// Query Execution Summary
    Query,
    /// Task Execution Summary
    Task,
    /// DAGCounter 详细计数器
    Detailed,
}

impl SectionKind {
    /// 声明顺序，header 缺失警告也按这个顺序列出
    pub const ALL: [SectionKind; 3] = [SectionKind::Query, SectionKind::Task, SectionKind::Detailed];

    pub fn index(self) -> usize {
        match self {
            SectionKind::Query => 0,
            SectionKind::Task => 1,
            SectionKind::Detailed => 2,
        }
    }
}

/// Section 定义
///
/// 定义一个 section 的 header、终止标记以及正文起始位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDef {
    /// section 类型
    pub kind: SectionKind,

    /// header 行全文（整行精确匹配）
    pub header: String,

    /// 终止标记（子串匹配，终止行不包含在 section 中）
    pub terminator: &'static str,

    /// 起始偏移：header 行号（从 1 开始）加上该值后作为行列表下标（从 0 开始）
    pub start_offset: isize,
}

/// Parser 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// 行首的日志级别 marker，如 "INFO"
    pub marker: String,

    /// 三个 section 的定义，顺序与 `SectionKind::ALL` 一致
    pub sections: [SectionDef; 3],

    /// 查询摘要中必须出现的操作
    pub critical_operations: Vec<&'static str>,
}

impl ParserConfig {
    /// Hive on Tez（beeline 输出）的默认配置
    pub fn hive_default() -> Self {
        Self::with_marker(DEFAULT_MARKER)
    }

    /// 使用自定义 marker 构建配置，header 文本随 marker 一起生成
    pub fn with_marker(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        let header = |label: &str| format!("{marker}{MARKER_SEPARATOR}{label}");

        let sections = [
            SectionDef {
                kind: SectionKind::Query,
                header: header(QUERY_HEADER_LABEL),
                terminator: TABLE_TERMINATOR,
                start_offset: QUERY_START_OFFSET,
            },
            SectionDef {
                kind: SectionKind::Task,
                header: header(TASK_HEADER_LABEL),
                terminator: TABLE_TERMINATOR,
                start_offset: TASK_START_OFFSET,
            },
            SectionDef {
                kind: SectionKind::Detailed,
                header: header(DETAILED_HEADER_LABEL),
                terminator: DETAILED_TERMINATOR,
                start_offset: DETAILED_START_OFFSET,
            },
        ];

        Self {
            marker,
            sections,
            critical_operations: CRITICAL_OPERATIONS.to_vec(),
        }
    }

    pub fn section(&self, kind: SectionKind) -> &SectionDef {
        &self.sections[kind.index()]
    }

    /// marker 加分隔符，详细计数器的 header 用它切出分类名
    pub fn line_prefix(&self) -> String {
        format!("{}{MARKER_SEPARATOR}", self.marker)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::hive_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.marker, "INFO");
        assert_eq!(config.critical_operations.len(), 6);
        assert_eq!(
            config.section(SectionKind::Query).header,
            "INFO  : Query Execution Summary"
        );
        assert_eq!(
            config.section(SectionKind::Task).header,
            "INFO  : Task Execution Summary"
        );
        assert_eq!(
            config.section(SectionKind::Detailed).header,
            "INFO  : org.apache.tez.common.counters.DAGCounter:"
        );
    }

    #[test]
    fn test_section_order_matches_kind_index() {
        let config = ParserConfig::default();
        for kind in SectionKind::ALL {
            assert_eq!(config.section(kind).kind, kind);
        }
    }

    #[test]
    fn test_custom_marker() {
        let config = ParserConfig::with_marker("DEBUG");
        assert_eq!(config.line_prefix(), "DEBUG  : ");
        assert_eq!(
            config.section(SectionKind::Task).header,
            "DEBUG  : Task Execution Summary"
        );
        assert_eq!(config.section(SectionKind::Detailed).start_offset, -1);
        assert_eq!(config.section(SectionKind::Detailed).terminator, DETAILED_TERMINATOR);
    }
}
