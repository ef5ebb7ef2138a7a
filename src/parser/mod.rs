//! Parser 模块 - 解析 Hive on Tez 查询日志
//!
//! 此模块提供了完整的日志解析功能,包括:
//! - 定位 section 并切分正文
//! - 查询执行摘要、任务执行摘要、详细计数器三个解析器
//! - 便捷 API 函数

mod api;
pub(crate) mod constants;
pub mod detailed_metrics;
pub mod extractor;
pub mod query_summary;
pub mod task_summary;

pub use api::{
    index_lines, load_indexed_lines, parse_log_file, parse_log_file_with_config, parse_log_files,
    parse_log_from_string,
};
pub use detailed_metrics::parse_detailed_metrics;
pub use extractor::{HeaderTable, LogSectionExtractor, SectionSlices};
pub use query_summary::parse_query_summary;
pub use task_summary::parse_task_summary;
