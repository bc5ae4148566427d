//! Benchmarks for augur normalization performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover each fallback strategy with synthetic responses.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a detailed reading wrapped in a json fence.
fn create_detailed_response(paragraph_len: usize) -> String {
    let text = "Lá số cho thấy nhiều thuận lợi trong năm tới. ".repeat(paragraph_len);
    format!(
        "Đây là kết quả của bạn:\n```json\n{{\
         \"gioiThieuChung\": \"{text}\",\
         \"canChiVaLichAm\": \"{text}\",\
         \"napAmAmDuongMang\": \"{text}\",\
         \"vanMenhTongQuan\": {{\"congDanh\": \"{text}\", \"taiLoc\": \"{text}\"}},\
         \"luuY\": \"Thiếu giờ sinh.\"}}\n```"
    )
}

/// Creates prose with the given number of paragraphs.
fn create_prose_response(paragraphs: usize) -> String {
    let topics = ["Sự nghiệp", "Tài chính", "Sức khỏe", "Tình cảm", "Lưu ý", "Hôm nay"];
    (0..paragraphs)
        .map(|i| {
            format!(
                "{} của bạn trong giai đoạn {} có nhiều biến chuyển đáng kể và cần theo dõi.",
                topics[i % topics.len()],
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Benchmark the structured path.
fn bench_structured(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured");

    for size in [1, 10, 100].iter() {
        let raw = create_detailed_response(*size);
        group.bench_function(format!("detailed_x{}", size), |b| {
            b.iter(|| augur::normalize(black_box(&raw)));
        });
    }

    group.finish();
}

/// Benchmark the prose fallback paths.
fn bench_prose(c: &mut Criterion) {
    let mut group = c.benchmark_group("prose");

    for paragraphs in [5, 50, 500].iter() {
        let raw = create_prose_response(*paragraphs);
        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| augur::normalize(black_box(&raw)));
        });
    }

    let headings = (0..50)
        .map(|i| format!("## Phần {}\nNội dung dòng một.\nNội dung dòng hai.", i))
        .collect::<Vec<_>>()
        .join("\n");
    group.bench_function("50_headings", |b| {
        b.iter(|| augur::normalize(black_box(&headings)));
    });

    group.bench_function("short_notice", |b| {
        b.iter(|| augur::normalize(black_box("Dữ liệu không hợp lệ.")));
    });

    group.finish();
}

/// Benchmark batch normalization.
fn bench_batch(c: &mut Criterion) {
    let inputs: Vec<String> = (0..64)
        .map(|i| {
            if i % 2 == 0 {
                create_detailed_response(5)
            } else {
                create_prose_response(20)
            }
        })
        .collect();

    let parallel = augur::NormalizeOptions::default();
    let sequential = augur::NormalizeOptions::new().sequential();

    c.bench_function("batch_parallel", |b| {
        b.iter(|| augur::normalize_batch(black_box(&inputs), &parallel));
    });

    c.bench_function("batch_sequential", |b| {
        b.iter(|| augur::normalize_batch(black_box(&inputs), &sequential));
    });
}

criterion_group!(benches, bench_structured, bench_prose, bench_batch);
criterion_main!(benches);
