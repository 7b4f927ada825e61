use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::family::FamilyRecord;
use crate::core::genome_set::GenomeSet;
use crate::core::types::{FamilyId, GenomeId, SetLabel};
use crate::signature::accumulator::FamilyAccumulator;
use crate::signature::annotation::annotate;
use crate::signature::config::{RetryPolicy, SignatureConfig, MIN_ATTEMPTS_FOR_MAJORITY};
use crate::signature::filter::{select, Thresholds};
use crate::signature::progress::{CancellationToken, ProgressSink};
use crate::signature::source::{AnnotationSource, MembershipSource, SourceError};

/// Fatal errors that abort a run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Data source unavailable for genome {genome} after {attempts} attempt(s): {reason}")]
    SourceUnavailable {
        genome: GenomeId,
        attempts: u32,
        reason: String,
    },

    #[error("Run cancelled")]
    Cancelled,

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// Why a genome was left out of the counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    DataError(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::DataError(reason) => write!(f, "malformed data: {reason}"),
        }
    }
}

/// A genome that could not be read; recorded rather than failing the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedGenome {
    pub genome: GenomeId,
    pub set: SetLabel,
    pub reason: SkipReason,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureReport {
    /// Signature families in output order
    pub families: Vec<FamilyRecord>,
    /// Genomes in the in-set, skipped ones included
    pub in_set_size: usize,
    /// Genomes in the out-set, skipped ones included
    pub out_set_size: usize,
    /// Genomes skipped because of per-genome failures
    pub skipped: Vec<SkippedGenome>,
}

/// Worker-local state, merged by summation once a set is scanned
#[derive(Debug, Default)]
struct ScanState {
    accumulator: FamilyAccumulator,
    skipped: Vec<SkippedGenome>,
}

impl ScanState {
    fn merge(mut self, other: ScanState) -> Self {
        self.accumulator.merge(other.accumulator);
        self.skipped.extend(other.skipped);
        self
    }
}

/// Run-wide fetch counters used to detect a mostly-unreachable source
#[derive(Debug, Default)]
struct FetchStats {
    attempts: AtomicUsize,
    unavailable: AtomicUsize,
}

/// Finds families common in an in-set of genomes and rare in an out-set
pub struct SignatureEngine<M, A> {
    membership: M,
    annotation: A,
    config: SignatureConfig,
}

impl<M: MembershipSource, A: AnnotationSource> SignatureEngine<M, A> {
    /// Create an engine; the configuration is validated before anything else happens
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::Configuration` if the configuration is invalid.
    pub fn new(membership: M, annotation: A, config: SignatureConfig) -> Result<Self, SignatureError> {
        config.validate()?;
        Ok(Self {
            membership,
            annotation,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    /// Count, filter and annotate signature families for two genome sets.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::Cancelled` if `cancel` fires (no partial
    /// output is produced), `SignatureError::SourceUnavailable` if the
    /// membership source stays unreachable, or `SignatureError::WorkerPool`
    /// if the thread pool cannot be created.
    pub fn run(
        &self,
        in_set: &GenomeSet,
        out_set: &GenomeSet,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<SignatureReport, SignatureError> {
        if cancel.is_cancelled() {
            return Err(SignatureError::Cancelled);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("famsig-worker-{i}"))
            .build()
            .map_err(|e| SignatureError::WorkerPool(e.to_string()))?;

        let stats = FetchStats::default();
        let scan_a = self.scan_set(&pool, in_set, SetLabel::InSet, progress, cancel, &stats)?;
        let scan_b = self.scan_set(&pool, out_set, SetLabel::OutSet, progress, cancel, &stats)?;
        let ScanState {
            accumulator,
            mut skipped,
        } = scan_a.merge(scan_b);

        if cancel.is_cancelled() {
            return Err(SignatureError::Cancelled);
        }

        let thresholds = Thresholds {
            min_in: self.config.min_in,
            max_out: self.config.max_out,
            size_a: in_set.len(),
            size_b: out_set.len(),
        };
        debug!(
            "{} families observed; thresholds {:?}",
            accumulator.len(),
            thresholds
        );

        let selected = select(accumulator.counts(), &thresholds);
        let families = annotate(selected, &self.annotation);

        skipped.sort_by(|a, b| a.set.cmp(&b.set).then_with(|| a.genome.cmp(&b.genome)));
        if !skipped.is_empty() {
            progress.report(&format!(
                "Skipped {} genome(s) that could not be read",
                skipped.len()
            ));
        }
        progress.report(&format!(
            "Found {} signature families ({} in-set, {} out-set genomes)",
            families.len(),
            thresholds.size_a,
            thresholds.size_b
        ));

        Ok(SignatureReport {
            families,
            in_set_size: thresholds.size_a,
            out_set_size: thresholds.size_b,
            skipped,
        })
    }

    fn scan_set(
        &self,
        pool: &rayon::ThreadPool,
        set: &GenomeSet,
        label: SetLabel,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
        stats: &FetchStats,
    ) -> Result<ScanState, SignatureError> {
        let total = set.len();
        let interval = self.config.progress_interval;
        let membership = &self.membership;
        let retry = &self.config.retry;
        let processed = AtomicUsize::new(0);

        progress.report(&format!(
            "Scanning {total} genomes from {label} '{}'",
            set.name
        ));

        let state = pool.install(|| {
            set.genomes
                .par_iter()
                .try_fold(ScanState::default, |mut state, genome| {
                    if cancel.is_cancelled() {
                        return Err(SignatureError::Cancelled);
                    }

                    match fetch_with_retry(membership, genome, retry, stats)? {
                        Ok(families) => state.accumulator.accumulate(genome, label, &families),
                        Err(reason) => {
                            warn!("Skipping {label} genome {genome}: {reason}");
                            state.skipped.push(SkippedGenome {
                                genome: genome.clone(),
                                set: label,
                                reason,
                            });
                        }
                    }

                    let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if interval > 0 && done % interval == 0 && done < total {
                        progress.report(&format!(
                            "Processed {done}/{total} genomes from {label} '{}'",
                            set.name
                        ));
                    }
                    Ok(state)
                })
                .try_reduce(ScanState::default, |a, b| Ok(a.merge(b)))
        })?;

        progress.report(&format!(
            "Finished {label} '{}': {} of {total} genomes accumulated",
            set.name,
            state.accumulator.genomes(label)
        ));

        Ok(state)
    }
}

/// Fetch one genome's families, retrying while the source is unavailable.
///
/// The outer `Result` carries fatal errors; the inner one carries per-genome
/// failures the caller records and skips.
fn fetch_with_retry<M: MembershipSource + ?Sized>(
    membership: &M,
    genome: &GenomeId,
    retry: &RetryPolicy,
    stats: &FetchStats,
) -> Result<Result<Vec<FamilyId>, SkipReason>, SignatureError> {
    let mut retries = 0u32;
    loop {
        let result = membership.families_of(genome);
        let attempts = stats.attempts.fetch_add(1, Ordering::Relaxed) + 1;

        let reason = match result {
            Ok(families) => return Ok(Ok(families)),
            Err(SourceError::NotFound(_)) => return Ok(Err(SkipReason::NotFound)),
            Err(SourceError::DataError { reason, .. }) => {
                return Ok(Err(SkipReason::DataError(reason)))
            }
            Err(SourceError::Unavailable(reason)) => reason,
        };

        let unavailable = stats.unavailable.fetch_add(1, Ordering::Relaxed) + 1;
        if attempts >= MIN_ATTEMPTS_FOR_MAJORITY && unavailable * 2 > attempts {
            return Err(SignatureError::SourceUnavailable {
                genome: genome.clone(),
                attempts: retries + 1,
                reason: format!(
                    "{unavailable} of {attempts} fetch attempts failed; last error: {reason}"
                ),
            });
        }
        if retries >= retry.max_retries {
            return Err(SignatureError::SourceUnavailable {
                genome: genome.clone(),
                attempts: retries + 1,
                reason,
            });
        }

        retries += 1;
        let delay = retry.backoff(retries);
        debug!("Source unavailable for {genome} ({reason}); retry {retries} in {delay:?}");
        std::thread::sleep(delay);
    }
}
