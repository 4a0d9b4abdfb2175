//! Pipeline driver: compose the stages and drive them to a sink.

use std::time::{SystemTime, UNIX_EPOCH};

use rowtide_core::prelude::{PipelineConfig, Record, Result};
use rowtide_io::RowSource;
use rowtide_stages::{age_over, BatchStream, FilterStage, RecordStream, RowStream};

use crate::summary::RunSummary;

/// One configured pipeline. The config is validated once at construction;
/// each `run_with`/`collect` call opens its own cursor, so a pipeline can
/// drive any number of independent traversals.
pub struct Pipeline {
    cfg: PipelineConfig,
}

impl Pipeline {
    pub fn new(cfg: PipelineConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Drive the full pipeline into `sink`, stopping early once the
    /// configured match limit is reached. The limit check happens before
    /// each pull, so nothing past the in-flight batch is ever fetched.
    ///
    /// On failure the traversal's cursor is already released by the failing
    /// stage; the driver closes the stack again (idempotent) and surfaces
    /// exactly one terminal error.
    pub fn run_with<F>(&self, source: &dyn RowSource, mut sink: F) -> Result<RunSummary>
    where
        F: FnMut(Record),
    {
        let mut summary = RunSummary::new(now_millis());

        let rows = RowStream::open(source)?;
        let batches = BatchStream::new(rows, self.cfg.batch_size)?;
        let mut filtered = FilterStage::new(batches.into_records(), age_over(self.cfg.min_age));

        loop {
            if let Some(limit) = self.cfg.limit {
                if summary.matched >= limit as u64 {
                    summary.limited = true;
                    break;
                }
            }
            match filtered.next_record() {
                Ok(Some(record)) => {
                    summary.matched += 1;
                    sink(record);
                }
                Ok(None) => break,
                Err(err) => {
                    let _ = filtered.close();
                    return Err(err);
                }
            }
        }

        summary.rows_scanned = filtered.inner().rows_pulled();
        summary.batches = filtered.inner().batches_emitted();
        filtered.close()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = summary.rows_scanned,
            batches = summary.batches,
            matched = summary.matched,
            limited = summary.limited,
            "traversal complete"
        );

        Ok(summary.finish(now_millis()))
    }

    /// Convenience sink: collect matches into a Vec.
    pub fn collect(&self, source: &dyn RowSource) -> Result<Vec<Record>> {
        let mut out = Vec::new();
        self.run_with(source, |record| out.push(record))?;
        Ok(out)
    }

    /// Stream every age once, unfiltered and unbatched, and return the
    /// mean. `None` for an empty table. Memory stays O(1) regardless of
    /// table size.
    pub fn average_age(&self, source: &dyn RowSource) -> Result<Option<f64>> {
        let mut rows = RowStream::open(source)?;
        let mut total: i64 = 0;
        let mut count: u64 = 0;
        while let Some(record) = rows.next_record()? {
            total += record.age;
            count += 1;
        }
        rows.close()?;
        if count == 0 {
            Ok(None)
        } else {
            Ok(Some(total as f64 / count as f64))
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowtide_core::prelude::Error;
    use rowtide_io::MemTable;
    use uuid::Uuid;

    fn table_with_ages(ages: &[i64]) -> MemTable {
        let table = MemTable::new();
        for (i, &age) in ages.iter().enumerate() {
            table.insert(&Record {
                id: Uuid::new_v4(),
                name: format!("user-{i}"),
                email: format!("user-{i}@example.com"),
                age,
            });
        }
        table
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = PipelineConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(Pipeline::new(cfg), Err(Error::Config(_))));
    }

    #[test]
    fn average_age_streams_the_mean() {
        let table = table_with_ages(&[10, 20, 30]);
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let avg = pipeline.average_age(&table).expect("traversal failed");
        assert_eq!(avg, Some(20.0));
        assert_eq!(table.open_cursors(), 0);
    }

    #[test]
    fn average_age_of_empty_table_is_none() {
        let table = MemTable::new();
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        assert_eq!(pipeline.average_age(&table).unwrap(), None);
    }
}
