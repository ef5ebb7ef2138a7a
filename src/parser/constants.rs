//! 解析器使用的常量定义
//!
//! 定义了 header 文本、section 终止标记、起始偏移量、关键操作列表和错误信息模板。

// Marker 相关常量

/// 默认的日志级别前缀
pub const DEFAULT_MARKER: &str = "INFO";

/// marker 与正文之间的分隔符（两个空格 + 冒号 + 一个空格）
pub const MARKER_SEPARATOR: &str = "  : ";

// Header 文本（不含 marker 前缀）

/// 查询执行摘要的 header
pub const QUERY_HEADER_LABEL: &str = "Query Execution Summary";

/// 任务执行摘要的 header
pub const TASK_HEADER_LABEL: &str = "Task Execution Summary";

/// 详细计数器的 header，同时也是第一个分类 header
pub const DETAILED_HEADER_LABEL: &str = "org.apache.tez.common.counters.DAGCounter:";

// Section 终止标记（子串匹配）

/// 表格边框，查询和任务摘要都以它结束
pub const TABLE_TERMINATOR: &str = "-------";

/// 详细计数器以命令完成行结束
pub const DETAILED_TERMINATOR: &str = "Completed executing command(queryId=";

// 起始偏移量：header 行号（从 1 开始）加上偏移后作为行列表的下标（从 0 开始）

/// 跳过 header 以及其后的边框、表头、边框三行
pub const QUERY_START_OFFSET: isize = 3;

/// 同上
pub const TASK_START_OFFSET: isize = 3;

/// 落在 header 行本身，它是第一个分类 header
pub const DETAILED_START_OFFSET: isize = -1;

/// 查询摘要中必须出现的操作，按报告顺序排列
pub const CRITICAL_OPERATIONS: [&str; 6] = [
    "Compile Query",
    "Prepare Plan",
    "Get Query Coordinator (AM)",
    "Submit Plan",
    "Start DAG",
    "Run DAG",
];

// 错误信息模板

/// 查询/任务摘要中无法匹配的行
pub const CORRUPT_STRUCTURE_SUFFIX: &str = "Line has corrupt structure... skipped";

/// 详细计数器中既不是 header 也不是指标的行
pub const CORRUPT_METRIC_SUFFIX: &str =
    "Corrupt line, failed to match either header or metric pattern... skipped";
