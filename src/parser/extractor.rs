//! LogSectionExtractor - 定位 section 并分发给各个解析器
//!
//! 解析分三步：
//! 1. 扫描所有行，按整行精确匹配找到三个 header 的首次出现位置
//! 2. 根据各 section 的起始偏移和终止标记切出正文
//! 3. 把正文交给对应的解析器，汇总成 [`ParsedLog`]

use std::path::Path;

use memchr::memmem::Finder;
use tracing::{debug, warn};

use crate::error::{ParseError, ParseWarning};
use crate::parser::api::{index_lines, load_indexed_lines};
use crate::parser::detailed_metrics::parse_detailed_metrics;
use crate::parser::query_summary::parse_query_summary;
use crate::parser::task_summary::parse_task_summary;
use crate::parser_config::{ParserConfig, SectionDef, SectionKind};
use crate::summary::{IndexedLine, ParsedLog};
use crate::tools::LineGrammar;

/// header 首次出现的行号（从 1 开始），按 `SectionKind` 索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderTable {
    positions: [Option<usize>; 3],
}

impl HeaderTable {
    pub fn get(&self, kind: SectionKind) -> Option<usize> {
        self.positions[kind.index()]
    }

    /// 找到的 header 数量
    pub fn found_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.found_count() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.found_count() == self.positions.len()
    }
}

/// 三个 section 的正文切片
///
/// header 不存在时为 `None`；header 存在但正文为空时为 `Some(&[])`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionSlices<'a> {
    pub query: Option<&'a [IndexedLine]>,
    pub task: Option<&'a [IndexedLine]>,
    pub detailed: Option<&'a [IndexedLine]>,
}

/// 日志 section 提取器
///
/// 持有整份日志的行、配置和最近一次成功解析的结果。每次调用 [`parse`](Self::parse)
/// 都会从头重新计算，不保留上一次的中间状态。
#[derive(Debug, Clone)]
pub struct LogSectionExtractor {
    config: ParserConfig,
    grammar: LineGrammar,
    lines: Vec<IndexedLine>,
    result: Option<ParsedLog>,
}

impl LogSectionExtractor {
    /// 使用默认配置创建提取器
    pub fn new(lines: Vec<IndexedLine>) -> Self {
        Self {
            config: ParserConfig::default(),
            grammar: LineGrammar::default(),
            lines,
            result: None,
        }
    }

    /// 使用自定义配置创建提取器，marker 对应的行语法在这里编译
    pub fn with_config(lines: Vec<IndexedLine>, config: ParserConfig) -> Result<Self, ParseError> {
        let grammar = LineGrammar::for_marker(&config.marker)?;
        Ok(Self {
            config,
            grammar,
            lines,
            result: None,
        })
    }

    /// 从文件加载全部行
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use tez_log_parser::LogSectionExtractor;
    ///
    /// let mut extractor = LogSectionExtractor::from_path("beeline.log")?;
    /// let parsed = extractor.parse()?;
    /// if let Some(query) = &parsed.query {
    ///     println!("Run DAG: {:?}", query.data.get("Run DAG"));
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Ok(Self::new(load_indexed_lines(path)?))
    }

    pub fn from_path_with_config<P: AsRef<Path>>(
        path: P,
        config: ParserConfig,
    ) -> Result<Self, ParseError> {
        Self::with_config(load_indexed_lines(path)?, config)
    }

    /// 从内存中的日志文本创建提取器
    pub fn from_content(content: &str) -> Self {
        Self::new(index_lines(content))
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn lines(&self) -> &[IndexedLine] {
        &self.lines
    }

    /// 最近一次成功解析的结果
    pub fn result(&self) -> Option<&ParsedLog> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<ParsedLog> {
        self.result
    }

    /// 查找 header
    ///
    /// # 返回
    ///
    /// * `Ok((HeaderTable, warnings))` - 至少找到一个 header
    /// * `Err(ParseError::NoHeadersFound)` - 一个都没找到
    ///
    /// 重复出现的 header 只保留第一次并产生警告；部分缺失时产生一条汇总警告。
    pub fn extract_headers(&self) -> Result<(HeaderTable, Vec<ParseWarning>), ParseError> {
        let mut table = HeaderTable::default();
        let mut warnings = Vec::new();

        for line in &self.lines {
            let Some(def) = self.config.sections.iter().find(|def| line.text == def.header) else {
                continue;
            };

            let slot = &mut table.positions[def.kind.index()];
            match *slot {
                None => *slot = Some(line.line_number),
                Some(first_line) => {
                    let warning = ParseWarning::DuplicateHeader {
                        header: def.header.clone(),
                        first_line,
                        line: line.line_number,
                    };
                    warn!(line = line.line_number, "{warning}");
                    warnings.push(warning);
                }
            }
        }

        if table.is_empty() {
            return Err(ParseError::NoHeadersFound);
        }

        if !table.is_complete() {
            let (found, missing): (Vec<&SectionDef>, Vec<&SectionDef>) = self
                .config
                .sections
                .iter()
                .partition(|def| table.get(def.kind).is_some());
            let warning = ParseWarning::MissingHeaders {
                missing: missing.iter().map(|def| def.header.clone()).collect(),
                found: found.iter().map(|def| def.header.clone()).collect(),
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        Ok((table, warnings))
    }

    /// 根据 header 位置切出三个 section 的正文
    pub fn extract_sections(&self, headers: &HeaderTable) -> SectionSlices<'_> {
        SectionSlices {
            query: self.slice_section(SectionKind::Query, headers),
            task: self.slice_section(SectionKind::Task, headers),
            detailed: self.slice_section(SectionKind::Detailed, headers),
        }
    }

    /// 起点为 header 行号加偏移（作为下标），终点为起点之后第一条包含终止标记的行（不含）
    fn slice_section(&self, kind: SectionKind, headers: &HeaderTable) -> Option<&[IndexedLine]> {
        let header_line = headers.get(kind)?;
        let def = self.config.section(kind);
        let len = self.lines.len();
        let start = header_line
            .checked_add_signed(def.start_offset)
            .unwrap_or(0)
            .min(len);

        let finder = Finder::new(def.terminator);
        let end = self.lines[start..]
            .iter()
            .position(|line| finder.find(line.text.as_bytes()).is_some())
            .map_or(len, |offset| start + offset);

        debug!(
            section = ?def.kind,
            header_line,
            start,
            end,
            "section bounds"
        );
        Some(&self.lines[start..end])
    }

    /// 执行完整解析
    ///
    /// 没有找到任何 header 时返回错误，且不保留任何结果（包括上一次的结果）。
    pub fn parse(&mut self) -> Result<&ParsedLog, ParseError> {
        self.result = None;

        let parsed = {
            let (headers, warnings) = self.extract_headers()?;
            let slices = self.extract_sections(&headers);
            let prefix = self.config.line_prefix();

            ParsedLog {
                query: slices.query.map(|lines| {
                    parse_query_summary(lines, &self.grammar, &self.config.critical_operations)
                }),
                task: slices.task.map(|lines| parse_task_summary(lines, &self.grammar)),
                detailed: slices
                    .detailed
                    .map(|lines| parse_detailed_metrics(lines, &self.grammar, &prefix)),
                warnings,
            }
        };

        debug!(errors = parsed.error_count(), warnings = parsed.warnings.len(), "log parsed");
        Ok(&*self.result.insert(parsed))
    }
}
