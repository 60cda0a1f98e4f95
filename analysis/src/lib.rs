pub mod aggregator;
pub mod event;
pub mod finalize;
pub mod registrar;
pub mod round;
pub mod store;
pub mod ticks;
pub mod trace;

pub use aggregator::{AggregatorOptions, RoundAggregator, Summary};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] trace::DecodeError),
    #[error(transparent)]
    Store(#[from] store::StoreError),
}

/// Runs one event trace through a fresh aggregator, writing to `store`.
#[tracing::instrument(name = "Process", skip(buf, store))]
pub fn process(
    buf: &[u8],
    observed_at: chrono::DateTime<chrono::Utc>,
    options: AggregatorOptions,
    store: &mut dyn store::Store,
) -> Result<Summary, ProcessError> {
    let mut trace = trace::Trace::parse(buf)?;
    let mut aggregator = RoundAggregator::new(options, observed_at);

    while let Some(event) = trace.next_event() {
        let event = event?;
        aggregator.handle(&event, trace.state(), store)?;
    }

    let summary = aggregator.summary();
    tracing::info!(
        match_id = ?summary.match_id,
        rounds = summary.rounds_stored,
        skipped = summary.rounds_skipped,
        "Processed trace"
    );

    Ok(summary)
}
