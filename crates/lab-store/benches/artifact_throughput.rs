use criterion::{criterion_group, criterion_main, Criterion};
use lab_store::{
    clear, initialize, load_data, save_data, ClearSelection, DataOptions, DataRoot,
    NotebookConfig, TimeSeries,
};
use tempfile::tempdir;

fn sample_series(rows: usize) -> TimeSeries {
    let mut series = TimeSeries::new(vec!["time".into(), "prey".into(), "predator".into()]);
    for idx in 0..rows {
        let t = idx as f64 * 0.1;
        series.push_row(vec![t, 10.0 + t.sin(), 5.0 + t.cos()]);
    }
    series
}

fn bench_artifacts(c: &mut Criterion) {
    let dir = tempdir().expect("bench dir");
    let root = DataRoot::new(dir.path()).expect("root");
    initialize(&root, "bench", false).expect("initialize");
    let notebook = NotebookConfig::new("bench");
    let series = sample_series(1_000);
    let opts = DataOptions::default();

    for format in ["pkl", "csv"] {
        c.bench_function(&format!("save_load_{format}"), |b| {
            b.iter(|| {
                save_data(&root, &notebook, &series, "series", format, &opts, false)
                    .expect("save");
                let loaded: TimeSeries =
                    load_data(&root, &notebook, "series", format, &opts, false).expect("load");
                assert_eq!(loaded.rows.len(), series.rows.len());
            });
        });
    }

    c.bench_function("clear_version", |b| {
        b.iter(|| {
            for idx in 0..16 {
                save_data(&root, &notebook, &(idx as u64), &format!("scalar_{idx}"), "pkl", &opts, false)
                    .expect("seed");
            }
            clear(&root, &notebook, ClearSelection::ALL, false).expect("clear");
        });
    });
}

criterion_group!(benches, bench_artifacts);
criterion_main!(benches);
