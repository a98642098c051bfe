// Criterion benchmarks for meter compilation and phrase scanning.
//
// Run:
//   cargo bench -p taqti-urdu

use criterion::{Criterion, criterion_group, criterion_main};
use taqti_urdu::MeterScanner;

const METER: &str = "[=-==|--==][--=|==]+=(-)";
const PHRASE: &str = "jaa nii na jaa nii na jaa nii";

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_meter", |b| {
        b.iter(|| MeterScanner::new(std::hint::black_box(METER)).unwrap())
    });
}

fn bench_scan(c: &mut Criterion) {
    let scanner = MeterScanner::new(METER).unwrap();
    c.bench_function("scan_phrase", |b| {
        b.iter(|| scanner.scan_phrase(std::hint::black_box(PHRASE)).unwrap())
    });
}

criterion_group!(benches, bench_compile, bench_scan);
criterion_main!(benches);
