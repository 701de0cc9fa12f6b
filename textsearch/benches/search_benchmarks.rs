use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::{fs::File, io::Write};
use tempfile::tempdir;
use textsearch::{search, SearchRequest};

fn create_test_files(
    dir: &tempfile::TempDir,
    file_count: usize,
    lines_per_file: usize,
) -> std::io::Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("test_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(
                file,
                "Line {} TODO: fix bug {} FIXME: optimize line {} NOTE: important task {}",
                j, j, j, j
            )?;
        }
    }
    Ok(())
}

fn bench_terms(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    create_test_files(&dir, 50, 200).unwrap();

    let mut group = c.benchmark_group("Search Terms");
    for term in ["TODO", "important task 199", "absent", ""] {
        let request = SearchRequest::new(dir.path(), "*.txt", term);
        group.bench_function(format!("term_{:?}", term), |b| {
            b.iter(|| black_box(search(&request).unwrap()));
        });
    }
    group.finish();
}

fn bench_file_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("File Scaling");
    for file_count in [1, 10, 100, 1000] {
        let dir = tempdir().unwrap();
        create_test_files(&dir, file_count, 20).unwrap();
        let request = SearchRequest::new(dir.path(), "*", "FIXME");

        group.bench_function(format!("files_{}", file_count), |b| {
            b.iter(|| black_box(search(&request).unwrap()));
        });
    }
    group.finish();
}

fn bench_thread_counts(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    create_test_files(&dir, 500, 100).unwrap();

    let mut group = c.benchmark_group("Thread Count");
    for threads in [1, 2, 4, 8] {
        let request = SearchRequest::new(dir.path(), "*.txt", "NOTE").with_thread_count(threads);
        group.bench_function(format!("threads_{}", threads), |b| {
            b.iter(|| black_box(search(&request).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_terms, bench_file_scaling, bench_thread_counts);
criterion_main!(benches);
