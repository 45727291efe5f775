use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use odsstream::styles::CellStyle;
use odsstream::{MemoryArchive, OdsFileWriter, WriterConfig, WriterMode};
use tempfile::NamedTempFile;

fn fill_rows(writer: &mut OdsFileWriter<MemoryArchive>, size: usize, flush_every: Option<usize>) {
    let style = CellStyle::new("ce1").bold(true);
    writer.add_table("Sheet1", size, 4).unwrap();

    for i in 0..size {
        let table = writer.document_mut().table_mut("Sheet1").unwrap();
        let row = table.append_row().unwrap();
        row.set_value(0, format!("Name_{}", i));
        row.set_value(1, i as f64);
        row.set_value(3, (i * 100) as f64);
        row.set_cell_style(0, &style);

        if let Some(every) = flush_every {
            if i % every == every - 1 {
                writer.flush().unwrap();
            }
        }
    }
}

fn benchmark_flush_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");
    group.sample_size(10); // Reduce samples for large benchmarks

    for size in [1000, 10000, 50000].iter() {
        group.bench_with_input(BenchmarkId::new("row_by_row", size), size, |b, &size| {
            b.iter(|| {
                let mut writer = OdsFileWriter::direct(MemoryArchive::new());
                fill_rows(&mut writer, size, Some(1));
                writer.close().unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("every_1000", size), size, |b, &size| {
            b.iter(|| {
                let mut writer = OdsFileWriter::direct(MemoryArchive::new());
                fill_rows(&mut writer, size, Some(1000));
                writer.close().unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("single_flush", size), size, |b, &size| {
            b.iter(|| {
                let mut writer = OdsFileWriter::direct(MemoryArchive::new());
                fill_rows(&mut writer, size, None);
                writer.close().unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("queued", size), size, |b, &size| {
            b.iter(|| {
                let config = WriterConfig::new().mode(WriterMode::Queued);
                let mut writer = OdsFileWriter::with_config(MemoryArchive::new(), config).unwrap();
                fill_rows(&mut writer, size, Some(1000));
                writer.close().unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_zip_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip");
    group.sample_size(10);

    for size in [10000, 50000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let temp = NamedTempFile::new().unwrap();
                let mut writer = OdsFileWriter::create(temp.path()).unwrap();
                let table = writer.add_table("Sheet1", 1024, 4).unwrap();
                for i in 0..size {
                    let row = table.append_row().unwrap();
                    row.set_value(0, black_box(i as f64));
                    row.set_value(1, format!("Name_{}", i));
                }
                writer.close().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_flush_strategies, benchmark_zip_output);
criterion_main!(benches);
