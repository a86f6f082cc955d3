//! Benchmarks for the cell cleaning pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover the string pipeline on representative dirty
//! inputs, whole-table fan-out at various sizes, and format detection.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabscrub::{
    clean_table, clean_text, count_dirty, detect_format_from_bytes, Cell, CleanOptions, Table,
};

/// Creates a synthetic table with the given number of rows, mixing the
/// contamination kinds the pipeline exists for.
fn create_dirty_table(row_count: usize) -> Table {
    let columns = vec![
        "id".to_string(),
        "html".to_string(),
        "entities".to_string(),
        "fused".to_string(),
    ];
    let rows = (0..row_count)
        .map(|i| {
            vec![
                Cell::Int(i as i64),
                Cell::Text(format!(
                    "<div><b>Item {i}</b><br>descri\u{e7}\u{e3}o do item</div>"
                )),
                Cell::Text(format!("Valor&nbsp;{i} &amp;amp; mais")),
                Cell::Text(format!("CampoNome{i}Cidade:Lisboa")),
            ]
        })
        .collect();
    Table { columns, rows }
}

/// Benchmark the string pipeline on representative inputs.
fn bench_text_cleaning(c: &mut Criterion) {
    let samples = [
        ("plain", "Texto simples sem nenhum problema detectado"),
        (
            "entities",
            "Ol\u{e1} &amp;amp; bem-vindo &lt;b&gt;caro&lt;/b&gt; leitor",
        ),
        (
            "markup",
            "<div><p>Nome: <b>Ana</b></p><br><span>Cidade: Lisboa</span></div>",
        ),
        (
            "css",
            "<style>p { color: red; }</style>{font-size: 2em;}Conte\u{fa}do real",
        ),
        ("fused", "NomeIdade30CidadeLisboaTotal:123Certo?Sim"),
    ];
    let options = CleanOptions::default();

    let mut group = c.benchmark_group("text_cleaning");
    for (name, text) in samples {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("input", name), &text, |b, text| {
            b.iter(|| clean_text(black_box(text), &options));
        });
    }
    group.finish();
}

/// Benchmark whole-table cleaning at various sizes, both fan-out modes.
fn bench_table_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_cleaning");

    for row_count in [10, 100, 1000] {
        let table = create_dirty_table(row_count);
        group.throughput(Throughput::Elements(table.cell_count() as u64));

        group.bench_with_input(BenchmarkId::new("parallel", row_count), &table, |b, table| {
            let options = CleanOptions::default();
            b.iter(|| clean_table(black_box(table), &options));
        });
        group.bench_with_input(
            BenchmarkId::new("sequential", row_count),
            &table,
            |b, table| {
                let options = CleanOptions::default().sequential();
                b.iter(|| clean_table(black_box(table), &options));
            },
        );
    }

    group.finish();
}

/// Benchmark the pre-clean dirty-cell census.
fn bench_dirty_census(c: &mut Criterion) {
    let table = create_dirty_table(1000);
    c.bench_function("count_dirty_1000_rows", |b| {
        b.iter(|| count_dirty(black_box(&table)));
    });
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let csv_data = b"name,age\nAna,30\nRui,25\n".to_vec();
    let json_data = br#"[{"name": "Ana", "age": 30}]"#.to_vec();

    c.bench_function("detect_csv", |b| {
        b.iter(|| detect_format_from_bytes(black_box(&csv_data)).unwrap());
    });

    c.bench_function("detect_json", |b| {
        b.iter(|| detect_format_from_bytes(black_box(&json_data)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_text_cleaning,
    bench_table_cleaning,
    bench_dirty_census,
);
criterion_main!(benches);
