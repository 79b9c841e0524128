//! Benchmarks for the cleansing pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tweetclean::batch::{self, BatchOptions};
use tweetclean::cleanse::{self, CleanseOptions};
use tweetclean::Lexicon;

const SAMPLE_TWEETS: &[&str] = &[
    "RT @USER: Gw yang paling 100% benar!! https://t.co/abc",
    "USER USER kalo lo ga ngerti ya udah, kampret bgt sih",
    "Yang ini BAGUS bgt, cek www.contoh.com sekarang :)",
    "pic.twitter.com/xyz123 mantap jiwa gan \\xf0\\x9f\\x98\\x82",
    "\\n\\nudah makan belom?? jgn lupa yaa\\n",
];

fn create_lexicon() -> Lexicon {
    let mut builder = Lexicon::builder()
        .slang("gw", "saya")
        .slang("lo", "kamu")
        .slang("ga", "tidak")
        .slang("bgt", "banget")
        .slang("kalo", "kalau")
        .slang("jgn", "jangan")
        .profane("kampret")
        .profane("bego");
    for word in ["yang", "ini", "ya", "sih", "udah", "dan", "di", "ke"] {
        builder = builder.stopword(word);
    }
    builder.build()
}

/// Synthetic CSV with the given number of rows.
fn create_test_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("Tweet,HS,Abusive\n");
    for i in 0..rows {
        let tweet = SAMPLE_TWEETS[i % SAMPLE_TWEETS.len()].replace('"', "\"\"");
        csv.push_str(&format!("\"{tweet}\",{},0\n", i % 2));
    }
    csv.into_bytes()
}

/// Benchmark a single text through each stage.
fn bench_stages(c: &mut Criterion) {
    let lexicon = create_lexicon();
    let options = CleanseOptions::default();
    let input = SAMPLE_TWEETS[0];

    c.bench_function("stage2_strip_noise", |b| {
        b.iter(|| cleanse::stage2_strip_noise(black_box(input), &options));
    });

    let stripped = cleanse::stage2_strip_noise(input, &options);
    c.bench_function("stage4_normalize_slang", |b| {
        b.iter(|| cleanse::stage4_normalize_slang(black_box(&stripped), &lexicon));
    });

    c.bench_function("cleanse_default", |b| {
        b.iter(|| cleanse::cleanse_default(black_box(input), &lexicon));
    });
}

/// Benchmark batch cleansing at various file sizes.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_cleansing");
    let lexicon = create_lexicon();
    let batch_options = BatchOptions::default();
    let options = CleanseOptions::default();

    for row_count in [10, 100, 1000, 10000].iter() {
        let data = create_test_csv(*row_count);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &data, |b, data| {
            b.iter(|| {
                let _ = batch::cleanse_file(black_box(data), &lexicon, &batch_options, &options);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stages, bench_batch);
criterion_main!(benches);
