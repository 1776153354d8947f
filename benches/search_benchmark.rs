use criterion::{black_box, criterion_group, criterion_main, Criterion};
use courtside::{
    search::{match_players, rank, SUGGESTION_LIMIT},
    PlayerRecord,
};

/// Synthetic roster about the size of the real all-time player list
fn create_test_roster(count: usize) -> Vec<PlayerRecord> {
    let first_names = ["Stephen", "Klay", "Jayson", "Kyle", "Jalen", "Grayson"];
    let last_names = ["Curry", "Thompson", "Tatum", "Kuzma", "Brunson", "Allen"];

    (0..count)
        .map(|i| {
            let first = first_names[i % first_names.len()];
            let last = last_names[(i / first_names.len()) % last_names.len()];
            PlayerRecord::new(i as i64, format!("{} {} {}", first, last, i))
        })
        .collect()
}

fn bench_match_players(c: &mut Criterion) {
    let roster_500 = create_test_roster(500);
    let roster_5000 = create_test_roster(5000);

    c.bench_function("match_500", |b| {
        b.iter(|| black_box(match_players("jay", &roster_500)));
    });

    c.bench_function("match_5000", |b| {
        b.iter(|| black_box(match_players("jay", &roster_5000)));
    });
}

fn bench_autocomplete_pipeline(c: &mut Criterion) {
    let roster = create_test_roster(5000);

    c.bench_function("match_and_rank_5000", |b| {
        b.iter(|| {
            let matched = match_players("ste", &roster);
            black_box(rank(matched, "ste", SUGGESTION_LIMIT))
        });
    });
}

criterion_group!(benches, bench_match_players, bench_autocomplete_pipeline);
criterion_main!(benches);
