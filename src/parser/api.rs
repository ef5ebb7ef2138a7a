//! 便捷 API 函数
//!
//! 提供了一组方便使用的高层 API，用于加载日志文件并一次性完成解析。

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use rayon::prelude::*;

use crate::error::ParseError;
use crate::parser::extractor::LogSectionExtractor;
use crate::parser_config::ParserConfig;
use crate::summary::{IndexedLine, ParsedLog};

/// 把日志文本切分为带行号的行（行号从 1 开始）
///
/// 同时支持 `\n` 和 `\r\n` 换行。
pub fn index_lines(content: &str) -> Vec<IndexedLine> {
    content
        .lines()
        .enumerate()
        .map(|(i, text)| IndexedLine::new(i + 1, text))
        .collect()
}

/// 读取整个日志文件并切分为带行号的行
///
/// 文件在函数返回前关闭。非 UTF-8 字节按替换字符处理，不做编码校验。
///
/// # 错误
///
/// * `FileNotFound` - 文件不存在
/// * `IoError` - 其它读取失败
pub fn load_indexed_lines<P: AsRef<Path>>(path: P) -> Result<Vec<IndexedLine>, ParseError> {
    let path_ref = path.as_ref();
    let mut file = File::open(path_ref).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ParseError::FileNotFound {
            path: format!("{}: {}", path_ref.display(), e),
        },
        _ => ParseError::IoError(format!("Failed to open {}: {}", path_ref.display(), e)),
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ParseError::IoError(format!("Failed to read {}: {}", path_ref.display(), e)))?;

    Ok(index_lines(&String::from_utf8_lossy(&bytes)))
}

/// 从内存中的日志文本解析
///
/// # 示例
///
/// ```
/// use tez_log_parser::parse_log_from_string;
///
/// let log = "INFO  : org.apache.tez.common.counters.DAGCounter:\n\
///            INFO  :    NUM_SUCCEEDED_TASKS: 58\n\
///            INFO  : Completed executing command(queryId=hive_1)";
/// let parsed = parse_log_from_string(log).unwrap();
///
/// let detailed = parsed.detailed.unwrap();
/// assert_eq!(detailed.data["org.apache.tez.common.counters.DAGCounter"]["NUM_SUCCEEDED_TASKS"], 58.0);
/// assert!(parsed.query.is_none());
/// ```
pub fn parse_log_from_string(content: &str) -> Result<ParsedLog, ParseError> {
    let mut extractor = LogSectionExtractor::from_content(content);
    extractor.parse()?;
    extractor.into_result().ok_or(ParseError::NoHeadersFound)
}

/// 从文件读取并解析
///
/// # 示例
///
/// ```no_run
/// use tez_log_parser::parse_log_file;
///
/// let parsed = parse_log_file("beeline.log")?;
/// for warning in &parsed.warnings {
///     eprintln!("{warning}");
/// }
/// println!("共 {} 个解析错误", parsed.error_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_log_file<P: AsRef<Path>>(path: P) -> Result<ParsedLog, ParseError> {
    parse_log_file_with_config(path, &ParserConfig::default())
}

/// 使用自定义配置从文件读取并解析
pub fn parse_log_file_with_config<P: AsRef<Path>>(
    path: P,
    config: &ParserConfig,
) -> Result<ParsedLog, ParseError> {
    let mut extractor = LogSectionExtractor::from_path_with_config(path, config.clone())?;
    extractor.parse()?;
    extractor.into_result().ok_or(ParseError::NoHeadersFound)
}

/// 并行解析多个日志文件
///
/// 每个文件使用独立的提取器，互不共享状态。返回结果与输入顺序一致。
pub fn parse_log_files<P>(paths: &[P], config: &ParserConfig) -> Vec<Result<ParsedLog, ParseError>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| parse_log_file_with_config(path, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lines_is_one_based() {
        let lines = index_lines("a\r\nb\n\nc");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], IndexedLine::new(1, "a"));
        assert_eq!(lines[1], IndexedLine::new(2, "b"));
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[3].line_number, 4);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_indexed_lines("/definitely/not/here.log").unwrap_err();
        assert!(matches!(err, ParseError::FileNotFound { .. }));
    }
}
