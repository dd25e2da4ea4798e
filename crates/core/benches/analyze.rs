//! Criterion benchmarks for the markup analyzer and injector.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use gamebox::diagnostics::analyze;
use gamebox::enhance::inject;

fn sample_document(script_repeats: usize) -> String {
    let mut doc = String::from(
        "<html><head><meta charset=\"utf-8\"><title>catch</title></head>\
         <body><div id=\"game-container\"><canvas width=\"800\" height=\"600\"></canvas>\
         <div class=\"score\">正确:0 错误:0 进度:0</div></div><script>",
    );
    for i in 0..script_repeats {
        doc.push_str(&format!(
            "function tick{i}() {{ if (Math.abs(px - cx) < 24) {{ hit(); }} }}\
             document.addEventListener('keydown', e => e.key === 'ArrowLeft' && left());"
        ));
    }
    doc.push_str("</script></body></html>");
    doc
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for repeats in [1usize, 64, 512] {
        let doc = sample_document(repeats);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_function(format!("doc_{}b", doc.len()), |b| {
            b.iter(|| analyze(black_box(&doc)))
        });
    }
    group.finish();
}

fn bench_inject(c: &mut Criterion) {
    let doc = sample_document(64);
    c.bench_function("inject", |b| b.iter(|| inject(black_box(&doc))));
}

criterion_group!(benches, bench_analyze, bench_inject);
criterion_main!(benches);
