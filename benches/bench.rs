use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lagrange_ssss::{decode_value, secret, JsonShares, Point};
use num_bigint::BigInt;

// degree k - 1, coefficients of roughly 256 bits
fn shares(k: usize) -> Vec<Point> {
    let coeffs: Vec<BigInt> = (0..k)
        .map(|i| (BigInt::from(1u8) << 256) - BigInt::from(i as u64 * 977 + 3))
        .collect();
    (1..=k as i64)
        .map(|x| {
            let x = BigInt::from(x);
            let y = coeffs.iter().rev().fold(BigInt::from(0), |acc, c| acc * &x + c);
            Point { x, y }
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    for &k in &[3usize, 10, 30] {
        let points = shares(k);
        c.bench_function(&format!("secret k={}", k), |b| {
            b.iter(|| secret(black_box(&points)).unwrap())
        });
    }

    let digits = "f".repeat(512);
    c.bench_function("decode base 16, 512 digits", |b| {
        b.iter(|| decode_value(16, black_box(&digits)).unwrap())
    });

    let text = include_str!("../shares/t2.json");
    c.bench_function("parse t2.json", |b| {
        b.iter(|| black_box(text).parse::<JsonShares>().unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
