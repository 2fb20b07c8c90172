//! Benchmarks: Spark-style lazy DataFrame vs eager LocalFrame for
//! filter → group by month → mean burned area, on generated fire-like rows.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::{ChunkCompareIneq, DataFrame as PlDataFrame, NamedFrom, Series};
use spark_primer::fires::MONTHS;
use spark_primer::{col, lit_f64, LocalFrame, SparkSession};

fn fire_like(n: usize) -> PlDataFrame {
    let month: Vec<&str> = (0..n).map(|i| MONTHS[i % MONTHS.len()]).collect();
    let temp: Vec<f64> = (0..n).map(|i| 5.0 + (i % 300) as f64 / 10.0).collect();
    let area: Vec<f64> = (0..n)
        .map(|i| if i % 7 == 0 { (i % 50) as f64 * 1.3 } else { 0.0 })
        .collect();
    PlDataFrame::new(vec![
        Series::new("month".into(), month).into(),
        Series::new("temp".into(), temp).into(),
        Series::new("area".into(), area).into(),
    ])
    .expect("polars df")
}

fn bench_spark_style(c: &mut Criterion, n: usize) {
    let data = fire_like(n);
    let spark = SparkSession::builder().app_name("bench").get_or_create();
    c.bench_function(&format!("spark_filter_groupby_avg_{n}"), |b| {
        b.iter(|| {
            let df = spark
                .create_dataframe_from_polars(black_box(data.clone()))
                .expect("create_dataframe");
            let warm = df.filter(&col("temp").gt(&lit_f64(20.0))).expect("filter");
            let result = warm
                .group_by(&["month"])
                .expect("group_by")
                .avg("area")
                .expect("avg")
                .collect()
                .expect("collect");
            black_box(result)
        })
    });
}

fn bench_local(c: &mut Criterion, n: usize) {
    let data = fire_like(n);
    c.bench_function(&format!("local_filter_groupby_mean_{n}"), |b| {
        b.iter(|| {
            let df = black_box(data.clone());
            let mask = df
                .column("temp")
                .expect("temp")
                .as_materialized_series()
                .gt(20.0)
                .expect("mask");
            let warm = LocalFrame::new(df.filter(&mask).expect("filter"));
            black_box(warm.group_mean("month", "area").expect("group_mean"))
        })
    });
}

fn bench_filter_select_groupby(c: &mut Criterion) {
    bench_spark_style(c, 10_000);
    bench_local(c, 10_000);
    bench_spark_style(c, 100_000);
    bench_local(c, 100_000);
}

criterion_group!(benches, bench_filter_select_groupby);
criterion_main!(benches);
