use std::collections::BTreeMap;

use crate::error::ParseWarning;

/// 带行号的日志行
///
/// 行号从 1 开始，在整个解析过程中保持不变，仅用于错误信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLine {
    /// 行号（从 1 开始）
    pub line_number: usize,

    /// 行原文（已去掉换行符）
    pub text: String,
}

impl IndexedLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}

/// 单个 Tez 顶点（vertex）的任务执行指标
///
/// 所有字段都以浮点数保存，与日志中的列保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskMetrics {
    /// DURATION(ms)
    pub duration: f64,

    /// CPU_TIME(ms)
    pub cpu_time: f64,

    /// GC_TIME(ms)
    pub gc_time: f64,

    /// INPUT_RECORDS
    pub input_records: f64,

    /// OUTPUT_RECORDS
    pub output_records: f64,
}

/// 查询执行摘要：操作名 -> 保留两位小数的耗时（秒）
pub type QuerySummary = BTreeMap<String, String>;

/// 任务执行摘要：顶点标识（如 "Map 1"）-> 指标
pub type TaskSummary = BTreeMap<String, TaskMetrics>;

/// 详细计数器：分类 -> 指标名 -> 数值
pub type DetailedSummary = BTreeMap<String, BTreeMap<String, f64>>;

/// 单个 section 的解析结果
///
/// `data` 只包含成功解析的行，`errors` 按出现顺序记录被跳过的行。
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionResult<T> {
    pub data: T,
    pub errors: Vec<String>,
}

impl<T> SectionResult<T> {
    pub fn new(data: T, errors: Vec<String>) -> Self {
        Self { data, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 拆成 `(data, errors)` 二元组
    pub fn into_parts(self) -> (T, Vec<String>) {
        (self.data, self.errors)
    }
}

/// 一次完整解析的汇总结果
///
/// 某个 section 的 header 不存在时对应字段为 `None`；
/// header 存在但 section 为空时为 `Some` 且 `data` 为空。
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedLog {
    /// Query Execution Summary
    pub query: Option<SectionResult<QuerySummary>>,

    /// Task Execution Summary
    pub task: Option<SectionResult<TaskSummary>>,

    /// DAGCounter 及其后的详细计数器
    pub detailed: Option<SectionResult<DetailedSummary>>,

    /// header 查找阶段产生的警告
    pub warnings: Vec<ParseWarning>,
}

impl ParsedLog {
    /// 三个 section 的错误总数
    pub fn error_count(&self) -> usize {
        self.query.as_ref().map_or(0, |r| r.errors.len())
            + self.task.as_ref().map_or(0, |r| r.errors.len())
            + self.detailed.as_ref().map_or(0, |r| r.errors.len())
    }

    pub fn query_errors(&self) -> Option<&[String]> {
        self.query.as_ref().map(|r| r.errors.as_slice())
    }

    pub fn task_errors(&self) -> Option<&[String]> {
        self.task.as_ref().map(|r| r.errors.as_slice())
    }

    pub fn detailed_errors(&self) -> Option<&[String]> {
        self.detailed.as_ref().map(|r| r.errors.as_slice())
    }
}
