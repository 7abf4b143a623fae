use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ppc_corpus::analysis::{Analyze, PolishAnalyzerBuilder};
use ppc_corpus::pipelines::ppc::{process, WorkerPool};
use ppc_corpus::sources::{Record, RecordMetadata};

const SITTING: &str = "Marszałek: Otwieram posiedzenie Sejmu. Przystępujemy do rozpatrzenia punktu pierwszego porządku dziennego. \
Poseł sprawozdawca: Komisja wnosi o przyjęcie projektu ustawy o zmianie ustawy o ochronie zdrowia psychicznego wraz z poprawkami. \
Proszę o zabranie głosu. Głosowało 450 posłów, za było 230, przeciw 215, wstrzymało się 5. ";

fn records(nb: usize, repeat: usize) -> Vec<Record> {
    (0..nb)
        .map(|i| {
            Record::new(
                Some(SITTING.repeat(repeat)),
                RecordMetadata::new(Some("Sejm".to_string()), Some(format!("Posiedzenie {}", i))),
            )
        })
        .collect()
}

pub fn analyzer_benchmark(c: &mut Criterion) {
    let mut analyzer = PolishAnalyzerBuilder::default().build().unwrap();
    let limits = analyzer.default_limits();

    let mut group = c.benchmark_group("analyzer");
    for repeat in [1, 10, 100] {
        let text = SITTING.repeat(repeat);
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            b.iter(|| analyzer.analyze(black_box(text), limits).unwrap())
        });
    }
    group.finish();
}

pub fn pool_benchmark(c: &mut Criterion) {
    let records = records(200, 20);

    let mut group = c.benchmark_group("pool");
    for workers in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                let pool = WorkerPool::new(workers, 2 * workers);
                let mut words = 0;
                pool.run_iter(
                    records.iter().cloned(),
                    |_| PolishAnalyzerBuilder::default().build(),
                    |analyzer, record| process(&record, analyzer),
                    |processed| {
                        words += processed?.statistics.words;
                        Ok(())
                    },
                )
                .unwrap();
                words
            })
        });
    }
    group.finish();
}

criterion_group!(benches, analyzer_benchmark, pool_benchmark);
criterion_main!(benches);
