use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexmap::IndexMap;
use trainsched::model::{Network, Section, TrainRequest};
use trainsched::{greedy, SolverMode};

fn build_scenario(num_trains: usize) -> (Network, Vec<TrainRequest>) {
    let sections = vec![
        Section::new("S1", 30, 100),
        Section::new("S2", 30, 80),
        Section::new("S3", 30, 60),
    ];
    let network = Network::new(sections).unwrap();

    let trains = (0..num_trains)
        .map(|i| TrainRequest {
            id: format!("T{i}"),
            priority: 1 + (i as u32 % 5),
            route_sections: vec!["S1".into(), "S2".into(), "S3".into()],
            planned_departure: (i as u64) * 17,
            dwell_before: IndexMap::new(),
            due_time: None,
        })
        .collect();

    (network, trains)
}

fn benchmark_greedy(c: &mut Criterion) {
    let (network, trains) = build_scenario(200);

    c.bench_function("greedy_schedule_200_trains", |b| {
        b.iter(|| greedy::schedule(black_box(&trains), black_box(&network)));
    });

    c.bench_function("dispatch_schedule_200_trains", |b| {
        b.iter(|| {
            trainsched::schedule(
                black_box(&trains),
                black_box(&network),
                SolverMode::Greedy,
                None,
            )
        });
    });
}

criterion_group!(benches, benchmark_greedy);
criterion_main!(benches);
