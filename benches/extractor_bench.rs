use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tez_log_parser::{LogSectionExtractor, index_lines};

const VALID_LOG: &str = include_str!("../tests/test_data/test_log_valid.txt");

/// 在真实日志前后填充无关行，模拟较大的 beeline 输出
fn padded_log(filler_lines: usize) -> String {
    let filler = "INFO  : Map 1: 12(+3)/58	Reducer 2: 0/1	Map 3: 1/1	Map 4: 1/1\n";
    let mut content = filler.repeat(filler_lines);
    content.push_str(VALID_LOG);
    content.push_str(&filler.repeat(filler_lines));
    content
}

/// Benchmark: 完整解析（header 查找 + 切分 + 三个解析器）
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("extractor_parse");

    for filler_lines in [0usize, 1_000, 100_000] {
        let lines = index_lines(&padded_log(filler_lines));
        group.bench_with_input(
            BenchmarkId::from_parameter(filler_lines),
            &lines,
            |b, lines| {
                b.iter(|| {
                    let mut extractor = LogSectionExtractor::new(black_box(lines.clone()));
                    extractor.parse().map(|p| p.error_count()).unwrap_or(usize::MAX)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: 只做 header 查找
fn bench_extract_headers(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_headers");
    group.sample_size(20);

    let extractor = LogSectionExtractor::from_content(&padded_log(100_000));
    group.bench_function("padded_100k", |b| {
        b.iter(|| black_box(extractor.extract_headers()).is_ok())
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_extract_headers);
criterion_main!(benches);
