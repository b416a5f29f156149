//! Benchmarks for dashboard rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rankboard::recap::Recap;
use rankboard::render::render_dashboard;
use rankboard::snapshot::{Account, LpChange, Match, RankInfo, Snapshot};

fn create_snapshot(accounts: usize, matches_per_account: usize) -> Snapshot {
    let accounts = (0..accounts)
        .map(|i| Account {
            game_name: format!("Player{}", i),
            tag_line: "EUW".to_string(),
            dpm: format!("https://dpm.lol/Player{}-EUW", i),
            rank_info: RankInfo {
                tier: "DIAMOND".to_string(),
                rank: "II".to_string(),
                lp: (i % 100) as i64,
                absolute_score: None,
            },
            winrate: Some(50.0),
            matches: Some(
                (0..matches_per_account)
                    .map(|m| Match {
                        id: Some(format!("EUW1_{}", m)),
                        champion: "Ahri".to_string(),
                        icon: "https://ddragon.leagueoflegends.com/cdn/14.1.1/img/champion/Ahri.png"
                            .to_string(),
                        resultat: if m % 2 == 0 { "Victoire" } else { "Défaite" }.to_string(),
                        kda: Some("4/3/8".to_string()),
                        lp_change: if m % 5 == 0 {
                            LpChange::Unknown
                        } else {
                            LpChange::Known(if m % 2 == 0 { 21 } else { -19 })
                        },
                        timestamp: None,
                    })
                    .collect(),
            ),
        })
        .collect();

    Snapshot {
        event_ended: false,
        accounts,
    }
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for accounts in [5, 50] {
        let snapshot = create_snapshot(accounts, 40);

        group.throughput(Throughput::Elements(accounts as u64));

        group.bench_function(format!("dashboard_{}", accounts), |b| {
            b.iter(|| render_dashboard(black_box(&snapshot)))
        });

        group.bench_function(format!("recap_{}", accounts), |b| {
            b.iter(|| Recap::compute(black_box(&snapshot)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let json = serde_json::to_string(&create_snapshot(5, 40)).unwrap();

    c.bench_function("parse_snapshot", |b| {
        b.iter(|| Snapshot::from_json(black_box(&json)).unwrap())
    });
}

criterion_group!(benches, bench_render, bench_parse);
criterion_main!(benches);
