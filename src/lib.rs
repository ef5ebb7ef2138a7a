//! # Tez Log Parser
//!
//! 一个 Hive on Tez 查询日志（beeline 控制台输出）的指标提取库。
//!
//! ## 功能特性
//!
//! - **Section 定位**: 按整行精确匹配查找 header，按终止标记切分正文
//! - **三类摘要**: 查询执行摘要、任务执行摘要、DAG 详细计数器
//! - **容错解析**: 损坏的行被记录并跳过，不会中断整个解析
//! - **结构化警告**: 重复或缺失的 header 以 [`ParseWarning`] 返回
//! - **并行批量**: 多个日志文件可以并行解析
//!
//! ## 快速开始
//!
//! ```rust
//! use tez_log_parser::parse_log_from_string;
//!
//! let log = "\
//! INFO  : Query Execution Summary
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  : OPERATION                            DURATION
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  : Compile Query                           7.43s
//! INFO  : Run DAG                                80.54s
//! INFO  : ----------------------------------------------------------------------------------------------";
//!
//! let parsed = parse_log_from_string(log).unwrap();
//! let query = parsed.query.unwrap();
//! assert_eq!(query.data["Run DAG"], "80.54");
//! // 缺少的关键操作会记录为错误
//! assert_eq!(query.errors.len(), 4);
//! // 另外两个 header 缺失，产生一条警告
//! assert_eq!(parsed.warnings.len(), 1);
//! ```
//!
//! ### 保存结果
//!
//! ```rust,no_run
//! use tez_log_parser::{LogSectionExtractor, ReportWriter};
//!
//! let mut extractor = LogSectionExtractor::from_path("beeline.log")?;
//! let parsed = extractor.parse()?;
//! ReportWriter::new("./RunResults").save(parsed)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## 日志格式
//!
//! ```text
//! INFO  : Query Execution Summary
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  : OPERATION                            DURATION
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  : Compile Query                           7.43s
//! ...
//! INFO  : Task Execution Summary
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  :   VERTICES      DURATION(ms)   CPU_TIME(ms)    GC_TIME(ms)   INPUT_RECORDS   OUTPUT_RECORDS
//! INFO  : ----------------------------------------------------------------------------------------------
//! INFO  :      Map 1          65013.00        516,890          7,624      13,119,189            1,200
//! ...
//! INFO  : org.apache.tez.common.counters.DAGCounter:
//! INFO  :    NUM_SUCCEEDED_TASKS: 58
//! INFO  : File System Counters:
//! INFO  :    FILE_BYTES_READ: 954341
//! INFO  : Completed executing command(queryId=hive_20231010_0001); Time taken: 98.55 seconds
//! ```

pub mod error;
pub mod parser;
pub mod parser_config;
pub mod report;
pub mod summary;
pub mod tools;

pub use error::{ParseError, ParseWarning};
pub use parser::{
    HeaderTable,
    LogSectionExtractor,
    SectionSlices,
    index_lines,
    load_indexed_lines,
    parse_detailed_metrics,
    parse_log_file,
    parse_log_file_with_config,
    parse_log_files,
    parse_log_from_string,
    parse_query_summary,
    parse_task_summary,
};
pub use parser_config::{ParserConfig, SectionDef, SectionKind};
pub use report::ReportWriter;
pub use summary::{
    DetailedSummary, IndexedLine, ParsedLog, QuerySummary, SectionResult, TaskMetrics, TaskSummary,
};
pub use tools::LineGrammar;
