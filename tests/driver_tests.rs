//! End-to-end pipeline driver tests: limits, cancellation, error propagation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rowtide_core::prelude::{Error, PipelineConfig, RawRow, Record, Result, Schema, Value};
use rowtide_exec::Pipeline;
use rowtide_io::{MemTable, RowCursor, RowSource};
use rowtide_stages::{BatchStream, RecordStream, RowStream, StageState};
use uuid::Uuid;

const SCENARIO_AGES: [i64; 7] = [19, 30, 45, 22, 61, 17, 28];

fn seeded_table(ages: &[i64]) -> MemTable {
    let table = MemTable::new();
    for (i, &age) in ages.iter().enumerate() {
        table.insert(&Record {
            id: Uuid::from_u128(i as u128 + 1),
            name: format!("user-{i}"),
            email: format!("user-{i}@example.com"),
            age,
        });
    }
    table
}

fn scenario_config() -> PipelineConfig {
    PipelineConfig {
        batch_size: 3,
        min_age: 25,
        limit: None,
    }
}

#[test]
fn full_traversal_summary_and_output() {
    let table = seeded_table(&SCENARIO_AGES);
    let pipeline = Pipeline::new(scenario_config()).expect("bad config");

    let mut ages = Vec::new();
    let summary = pipeline
        .run_with(&table, |record| ages.push(record.age))
        .expect("traversal failed");

    assert_eq!(ages, [30, 45, 61, 28]);
    assert_eq!(summary.rows_scanned, 7);
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.matched, 4);
    assert!(!summary.limited);
    assert_eq!(table.open_cursors(), 0);
}

#[test]
fn limit_stops_without_overfetching() {
    let table = seeded_table(&SCENARIO_AGES);
    let pipeline = Pipeline::new(PipelineConfig {
        limit: Some(2),
        ..scenario_config()
    })
    .expect("bad config");

    let matches = pipeline.collect(&table).expect("traversal failed");
    let ages: Vec<i64> = matches.iter().map(|r| r.age).collect();

    assert_eq!(ages, [30, 45]);
    // Both matches sit in the first batch; the second and third batches
    // must never have been fetched.
    assert_eq!(table.rows_served(), 3);
    assert_eq!(table.open_cursors(), 0);
}

#[test]
fn early_abandonment_releases_the_cursor_without_error() {
    let table = seeded_table(&SCENARIO_AGES);

    {
        let rows = RowStream::open(&table).expect("open failed");
        let mut records = BatchStream::new(rows, 3)
            .expect("bad batch size")
            .into_records();
        let first = records.next_record().expect("fetch failed");
        assert!(first.is_some());
        // Dropped here with five rows unconsumed.
    }

    assert_eq!(table.open_cursors(), 0);
}

#[test]
fn pulling_a_closed_stream_is_an_error() {
    let table = seeded_table(&SCENARIO_AGES);

    let mut rows = RowStream::open(&table).expect("open failed");
    rows.close().expect("close failed");
    assert!(matches!(rows.next_record(), Err(Error::Closed)));

    let rows = RowStream::open(&table).expect("open failed");
    let mut records = BatchStream::new(rows, 3)
        .expect("bad batch size")
        .into_records();
    records.close().expect("close failed");
    records.close().expect("second close failed"); // idempotent
    assert!(matches!(records.next_record(), Err(Error::Closed)));
}

#[test]
fn malformed_row_is_a_fetch_error_not_a_skip() {
    let table = seeded_table(&SCENARIO_AGES);
    // A row with an unparseable age; it must fail the traversal, not vanish.
    table.insert_raw(vec![
        ("id".into(), Value::Str(Uuid::from_u128(99).to_string())),
        ("name".into(), Value::Str("broken".into())),
        ("email".into(), Value::Str("broken@example.com".into())),
        ("age".into(), Value::Str("not-a-number".into())),
    ]);

    let pipeline = Pipeline::new(scenario_config()).expect("bad config");
    let err = pipeline.collect(&table).unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
    assert_eq!(table.open_cursors(), 0);
}

#[test]
fn two_pipelines_over_one_store_are_independent() {
    let table = seeded_table(&SCENARIO_AGES);
    let pipeline = Pipeline::new(scenario_config()).expect("bad config");

    let first = pipeline.collect(&table).expect("first traversal");
    let second = pipeline.collect(&table).expect("second traversal");
    assert_eq!(first, second);
}

#[test]
fn run_summary_serializes() {
    let table = seeded_table(&SCENARIO_AGES);
    let pipeline = Pipeline::new(scenario_config()).expect("bad config");
    let summary = pipeline.run_with(&table, |_| {}).expect("traversal failed");

    let json = serde_json::to_string(&summary).expect("serialize summary");
    assert!(json.contains("\"matched\":4"));
    assert!(json.contains("\"rows_scanned\":7"));
}

// A source whose cursor dies mid-traversal, for failure-path coverage.
struct FlakySource {
    schema: Schema,
    rows_before_failure: usize,
    closed: Arc<AtomicBool>,
}

impl FlakySource {
    fn new(rows_before_failure: usize) -> Self {
        Self {
            schema: Schema::user_table(),
            rows_before_failure,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl RowSource for FlakySource {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn open(&self) -> Result<Box<dyn RowCursor>> {
        Ok(Box::new(FlakyCursor {
            served: 0,
            rows_before_failure: self.rows_before_failure,
            closed: Arc::clone(&self.closed),
        }))
    }
}

struct FlakyCursor {
    served: usize,
    rows_before_failure: usize,
    closed: Arc<AtomicBool>,
}

impl RowCursor for FlakyCursor {
    fn fetch_next(&mut self) -> Result<Option<RawRow>> {
        if self.served >= self.rows_before_failure {
            return Err(Error::Fetch("connection dropped mid-traversal".into()));
        }
        self.served += 1;
        Ok(Some(
            Record {
                id: Uuid::from_u128(self.served as u128),
                name: format!("user-{}", self.served),
                email: format!("user-{}@example.com", self.served),
                age: 40,
            }
            .to_raw(),
        ))
    }

    fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn mid_traversal_failure_propagates_and_closes_the_cursor() {
    let source = FlakySource::new(2);
    let pipeline = Pipeline::new(scenario_config()).expect("bad config");

    let err = pipeline.collect(&source).unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
    assert!(source.closed.load(Ordering::SeqCst));
}

#[test]
fn failed_stream_re_raises_on_every_pull() {
    let source = FlakySource::new(1);
    let mut rows = RowStream::open(&source).expect("open failed");

    assert!(rows.next_record().expect("first row").is_some());
    assert!(matches!(rows.next_record(), Err(Error::Fetch(_))));
    assert!(matches!(rows.state(), StageState::Failed(_)));
    // No silent recovery: the failure is sticky.
    assert!(matches!(rows.next_record(), Err(Error::Fetch(_))));
    assert!(source.closed.load(Ordering::SeqCst));
}
