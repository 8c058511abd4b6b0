use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csvlint::{CsvReader, LintConfig, Record, Validator};
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_csv(rows: usize) -> String {
    let mut out = String::from("ID,Name,Value,Note\n");
    for i in 0..rows {
        if i % 10 == 0 {
            out.push_str(&format!("{},\"Name, {}\",{},\"said \"\"hi\"\"\"\n", i, i, i * 100));
        } else {
            out.push_str(&format!("{},Name_{},{},plain\n", i, i, i * 100));
        }
    }
    out
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [1000, 10000, 100000].iter() {
        let data = sample_csv(*size);

        group.bench_with_input(BenchmarkId::new("reuse_record", size), &data, |b, data| {
            b.iter(|| {
                let mut reader = CsvReader::from_reader(data.as_bytes());
                let mut record = Record::new();
                while reader.read_record(&mut record).unwrap() {
                    black_box(record.len());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("owned_rows", size), &data, |b, data| {
            b.iter(|| {
                let mut reader = CsvReader::from_reader(data.as_bytes());
                for row in reader.rows() {
                    black_box(row.unwrap());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let validator = Validator::new(LintConfig::csv()).unwrap();

    for size in [1000, 10000, 100000].iter() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(sample_csv(*size).as_bytes()).unwrap();
        temp.flush().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let report = validator.validate_path(temp.path()).unwrap();
                black_box(report);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_tokenize, benchmark_validate);
criterion_main!(benches);
