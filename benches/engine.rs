use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_match::core::{build_deck_into, ClockDriver, DeckRng, GameEngine, RoundSnapshot};
use memory_match::types::{Difficulty, Intent, Timings};

fn bench_deal(c: &mut Criterion) {
    let mut rng = DeckRng::new(12345);
    let mut deck = Vec::new();

    c.bench_function("deal_hard_deck", |b| {
        b.iter(|| {
            build_deck_into(black_box(Difficulty::Hard), &mut rng, &mut deck);
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345, Timings::default());
    engine.start_round(Difficulty::Hard);
    let mut clock = ClockDriver::for_engine(&engine);

    c.bench_function("frame_16ms", |b| {
        b.iter(|| {
            engine.advance(black_box(16));
            clock.advance(&mut engine, 16);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345, Timings::default());
    engine.start_round(Difficulty::Hard);
    let mut snap = RoundSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_play_through(c: &mut Criterion) {
    c.bench_function("play_hard_round", |b| {
        b.iter(|| {
            let mut engine = GameEngine::new(black_box(7), Timings::immediate());
            engine.start_round(Difficulty::Hard);
            let cards = engine.cards().to_vec();
            for card in &cards {
                if engine.card(card.id).is_some_and(|c| c.is_matched) {
                    continue;
                }
                let Some(partner) = cards
                    .iter()
                    .find(|o| o.id != card.id && o.symbol == card.symbol)
                else {
                    continue;
                };
                engine.apply(Intent::Select { id: card.id });
                engine.apply(Intent::Select { id: partner.id });
                engine.advance(0);
            }
            engine.advance(0);
            assert!(engine.won());
        })
    });
}

criterion_group!(
    benches,
    bench_deal,
    bench_frame,
    bench_snapshot,
    bench_play_through
);
criterion_main!(benches);
