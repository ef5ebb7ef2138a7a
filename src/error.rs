//! 错误类型定义
//!
//! 定义了解析过程中可能出现的致命错误，以及不会中断解析的警告。
//! 行级别的解析错误不在这里，它们以字符串形式记录在各个 section 的结果中。

use thiserror::Error;

/// 解析错误类型
///
/// 只有这些错误会中断一次解析；其余问题都会被收集到结果中返回。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// 日志中一个预期的 header 都没有找到
    #[error("No headers found in the log file.")]
    NoHeadersFound,

    /// 文件未找到或无法访问
    #[error("file not found or inaccessible: {path}")]
    FileNotFound {
        /// 文件路径（附带底层错误信息）
        path: String,
    },

    /// 读取文件时的 IO 错误
    #[error("I/O error: {0}")]
    IoError(String),

    /// 根据配置的 marker 构建正则失败
    #[error("invalid line pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// 出错的正则表达式
        pattern: String,
        /// regex 给出的原因
        reason: String,
    },

    /// 写出报告失败
    #[error("failed to write report {path}: {reason}")]
    ReportError {
        /// 目标路径
        path: String,
        /// 底层错误信息
        reason: String,
    },
}

/// 解析警告
///
/// 警告不会中断解析，随结果一起返回，由调用方决定如何展示。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// 同一个 header 出现了多次，只保留第一次
    #[error(
        "Header: {header} | found multiple times in the log file... ignoring all but the first instance ..."
    )]
    DuplicateHeader {
        /// header 原文
        header: String,
        /// 第一次出现的行号
        first_line: usize,
        /// 被忽略的重复行号
        line: usize,
    },

    /// 部分 header 缺失
    #[error("Headers not found: {}. Headers found: {}.", .missing.join(", "), .found.join(", "))]
    MissingHeaders {
        /// 缺失的 header（按声明顺序）
        missing: Vec<String>,
        /// 找到的 header（按声明顺序）
        found: Vec<String>,
    },
}
