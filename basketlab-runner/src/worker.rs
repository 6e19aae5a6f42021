//! Compute worker — the fetch/compute boundary.
//!
//! The packed batch crosses to a dedicated thread over an `mpsc` channel
//! (single producer, single consumer). The requesting side blocks on the
//! result receiver; the worker owns every piece of mutable simulation state
//! for the duration of the job, so concurrent runs never share anything.

use basketlab_core::codec::{CodecError, EncodedBatch};
use basketlab_core::domain::{BatchError, SeriesBatch};
use basketlab_core::engine::{run, SimulationOutcome, StrategyParams};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// A unit of compute work: the packed batch plus run parameters.
#[derive(Debug, Clone)]
pub struct ComputeJob {
    pub batch: EncodedBatch,
    pub params: StrategyParams,
    pub initial_capital: f64,
}

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("malformed buffer: {0}")]
    Codec(#[from] CodecError),

    #[error("batch rejected: {0}")]
    Batch(#[from] BatchError),

    #[error("compute worker terminated unexpectedly")]
    WorkerGone,
}

/// Spawn the compute thread. It drains jobs until the sender side hangs up.
pub fn spawn_worker(
    rx: Receiver<ComputeJob>,
    tx: Sender<Result<SimulationOutcome, ComputeError>>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("basketlab-compute".into())
        .spawn(move || {
            while let Ok(job) = rx.recv() {
                let _ = tx.send(run_job(job));
            }
        })
        .expect("failed to spawn compute worker thread")
}

/// Decode, validate, and simulate one job.
fn run_job(job: ComputeJob) -> Result<SimulationOutcome, ComputeError> {
    let series = job.batch.decode()?;
    let batch = SeriesBatch::try_new(series)?;
    tracing::debug!(
        symbols = batch.symbol_count(),
        bars = batch.bar_count(),
        "running simulation on worker thread"
    );
    Ok(run(&batch, &job.params, job.initial_capital))
}

/// One-shot hand-off: ship the job to a fresh worker thread and block until
/// its result comes back.
pub fn execute(job: ComputeJob) -> Result<SimulationOutcome, ComputeError> {
    let (job_tx, job_rx) = std::sync::mpsc::channel();
    let (result_tx, result_rx) = std::sync::mpsc::channel();

    let handle = spawn_worker(job_rx, result_tx);

    job_tx.send(job).map_err(|_| ComputeError::WorkerGone)?;
    drop(job_tx); // lets the worker loop exit after this job

    let result = result_rx.recv().map_err(|_| ComputeError::WorkerGone)?;
    let _ = handle.join();
    result
}
