//! Batching-stage property tests: batch counts, sizes, and order.

use rowtide_core::prelude::Record;
use rowtide_io::MemTable;
use rowtide_stages::{BatchStream, RecordStream, RowStream};
use uuid::Uuid;

/// Sequential ids keep id order equal to insertion order.
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

fn drain_sizes(table: &MemTable, batch_size: usize) -> Vec<usize> {
    let rows = RowStream::open(table).expect("open failed");
    let mut batches = BatchStream::new(rows, batch_size).expect("bad batch size");
    let mut sizes = Vec::new();
    while let Some(batch) = batches.next_batch().expect("fetch failed") {
        sizes.push(batch.len());
    }
    sizes
}

#[test]
fn batch_count_and_size_laws() {
    for n in 0..=12usize {
        let ages: Vec<i64> = (0..n as i64).collect();
        let table = seeded_table(&ages);
        for batch_size in [1usize, 2, 3, 4, 5, 7, 25] {
            let sizes = drain_sizes(&table, batch_size);

            let expected_batches = n.div_ceil(batch_size);
            assert_eq!(sizes.len(), expected_batches, "N={n} B={batch_size}");
            assert_eq!(sizes.iter().sum::<usize>(), n, "N={n} B={batch_size}");
            assert!(sizes.iter().all(|&s| s > 0), "empty batch at N={n} B={batch_size}");

            if let Some((&last, full)) = sizes.split_last() {
                assert!(full.iter().all(|&s| s == batch_size));
                let expected_last = if n % batch_size == 0 {
                    batch_size
                } else {
                    n % batch_size
                };
                assert_eq!(last, expected_last, "N={n} B={batch_size}");
            }
        }
    }
}

#[test]
fn flatten_round_trip_preserves_stream_order() {
    let ages: Vec<i64> = (0..10).collect();
    let table = seeded_table(&ages);

    let mut direct = Vec::new();
    let mut rows = RowStream::open(&table).expect("open failed");
    while let Some(record) = rows.next_record().expect("fetch failed") {
        direct.push(record.age);
    }

    let rows = RowStream::open(&table).expect("open failed");
    let mut flattened = BatchStream::new(rows, 3).expect("bad batch size").into_records();
    let mut via_batches = Vec::new();
    while let Some(record) = flattened.next_record().expect("fetch failed") {
        via_batches.push(record.age);
    }

    assert_eq!(direct, ages);
    assert_eq!(via_batches, direct);
}

#[test]
fn empty_store_reports_exhaustion_immediately() {
    let table = MemTable::new();
    let rows = RowStream::open(&table).expect("open failed");
    let mut batches = BatchStream::new(rows, 4).expect("bad batch size");

    assert!(batches.next_batch().expect("first pull").is_none());
    // Exhaustion is sticky and never becomes an error.
    assert!(batches.next_batch().expect("second pull").is_none());
    assert_eq!(batches.batches_emitted(), 0);
}

#[test]
fn partial_final_batch_then_end() {
    let table = seeded_table(&[19, 30, 45, 22, 61, 17, 28]);
    let sizes = drain_sizes(&table, 3);
    assert_eq!(sizes, [3, 3, 1]);
}

#[test]
fn zero_batch_size_is_a_config_error() {
    let table = seeded_table(&[1, 2, 3]);
    let rows = RowStream::open(&table).expect("open failed");
    let err = BatchStream::new(rows, 0).err().expect("accepted size 0");
    assert!(matches!(err, rowtide_core::Error::Config(_)));
}

#[test]
fn independent_traversals_see_identical_sequences() {
    let ages: Vec<i64> = (0..10).map(|i| i * 3 % 7).collect();
    let table = seeded_table(&ages);

    let drain_ids = |table: &MemTable| -> Vec<Uuid> {
        let mut rows = RowStream::open(table).expect("open failed");
        let mut ids = Vec::new();
        while let Some(record) = rows.next_record().expect("fetch failed") {
            ids.push(record.id);
        }
        ids
    };

    assert_eq!(drain_ids(&table), drain_ids(&table));
}
