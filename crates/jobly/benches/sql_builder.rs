use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jobly::company::{COMPANY_FILTER_COLUMNS, COMPANY_UPDATE_COLUMNS};
use jobly::{FieldUpdates, FilterCriteria, Sql, build_set_clause, build_where_clause};

/// Build an update map with `n` distinct fields.
fn build_updates(n: usize) -> FieldUpdates {
    (0..n).map(|i| (format!("field{i}"), i as i64)).collect()
}

fn bench_set_clause(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/set_clause");

    for n in [1, 5, 10, 50, 100] {
        let updates = build_updates(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &updates, |b, updates| {
            b.iter(|| black_box(build_set_clause(updates, &COMPANY_UPDATE_COLUMNS)));
        });
    }

    group.finish();
}

fn bench_where_clause(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/where_clause");

    let cases = [
        ("none", FilterCriteria::new()),
        ("min", FilterCriteria::new().min_bound(2)),
        ("pattern", FilterCriteria::new().name_pattern("net")),
        (
            "all",
            FilterCriteria::new().min_bound(1).max_bound(300).name_pattern("net"),
        ),
    ];

    for (name, criteria) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), criteria, |b, criteria| {
            b.iter(|| black_box(build_where_clause(criteria, &COMPANY_FILTER_COLUMNS)));
        });
    }

    group.finish();
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 10, 100] {
        let mut sql = Sql::new("WHERE ");
        for i in 0..n {
            if i > 0 {
                sql.push(" AND ");
            }
            sql.push_column(&format!("col{i}")).push("=").push_bind(i as i64);
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(sql.to_sql()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_set_clause, bench_where_clause, bench_to_sql);
criterion_main!(benches);
