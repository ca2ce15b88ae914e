//! Report query service.

use std::sync::Arc;

use compta_shared::AppConfig;
use compta_shared::config::FecConfig;
use compta_shared::types::ExerciseId;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::balance::BalanceAggregator;
use super::cache::ReportCache;
use super::classifier::ResultClassifier;
use super::error::ReportError;
use super::general_ledger::LedgerBuilder;
use super::progressive::ProgressiveBalanceAggregator;
use super::types::{
    ClassifiedBalance, GeneralLedger, LedgerRow, ProgressiveBalance, TrialBalance,
};
use crate::fec::{FecCodec, FecDecodeOptions, FecEncodeOptions, FecImport};
use crate::ledger::{DEFAULT_VOUCHER_TOLERANCE, EntryLine, LineFilter};
use crate::source::{EntryLineSource, LedgerSnapshot};

/// Answers report queries over an [`EntryLineSource`].
///
/// Every query reads one fresh snapshot, then runs the pure aggregators on
/// it. Results are cached by snapshot version and filter.
pub struct ReportQueryService<S> {
    source: S,
    cache: ReportCache,
    voucher_tolerance: Decimal,
    fec: FecConfig,
}

impl<S: EntryLineSource> ReportQueryService<S> {
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: ReportCache::new(),
            voucher_tolerance: DEFAULT_VOUCHER_TOLERANCE,
            fec: FecConfig::default(),
        }
    }

    /// Creates a service from application configuration.
    #[must_use]
    pub fn from_config(source: S, config: &AppConfig) -> Self {
        Self {
            source,
            cache: ReportCache::from_config(&config.reports),
            voucher_tolerance: config.reports.voucher_tolerance,
            fec: config.fec.clone(),
        }
    }

    /// The result cache.
    #[must_use]
    pub const fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Reads a snapshot of the source.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    pub async fn load_snapshot(&self) -> Result<LedgerSnapshot, ReportError> {
        Ok(LedgerSnapshot::load(&self.source).await?)
    }

    /// Trial balance of the lines matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    #[instrument(skip(self))]
    pub async fn trial_balance(&self, filter: &LineFilter) -> Result<Arc<TrialBalance>, ReportError> {
        let snapshot = self.load_snapshot().await?;
        Ok(self.trial_balance_of(&snapshot, filter))
    }

    fn trial_balance_of(&self, snapshot: &LedgerSnapshot, filter: &LineFilter) -> Arc<TrialBalance> {
        self.cache.trial_balance(snapshot.version(), filter, || {
            BalanceAggregator::aggregate_with_tolerance(
                &snapshot.lines,
                &snapshot.catalog,
                filter,
                self.voucher_tolerance,
            )
        })
    }

    /// Trial balance split into balance sheet and income statement, with the
    /// net result.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    #[instrument(skip(self))]
    pub async fn classified_result(&self, filter: &LineFilter) -> Result<ClassifiedBalance, ReportError> {
        let balance = self.trial_balance(filter).await?;
        Ok(ResultClassifier::classify(&balance))
    }

    /// Month-by-month cumulative balance.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    #[instrument(skip(self))]
    pub async fn progressive_balance(
        &self,
        filter: &LineFilter,
    ) -> Result<Arc<ProgressiveBalance>, ReportError> {
        let snapshot = self.load_snapshot().await?;
        Ok(self.cache.progressive_balance(snapshot.version(), filter, || {
            ProgressiveBalanceAggregator::aggregate(
                &snapshot.lines,
                &snapshot.catalog,
                &snapshot.exercises,
                filter,
            )
        }))
    }

    /// General ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    #[instrument(skip(self))]
    pub async fn general_ledger(&self, filter: &LineFilter) -> Result<Arc<GeneralLedger>, ReportError> {
        let snapshot = self.load_snapshot().await?;
        Ok(self.cache.general_ledger(snapshot.version(), filter, || {
            LedgerBuilder::build(&snapshot.lines, &snapshot.catalog, filter)
        }))
    }

    /// All lines of the voucher a ledger row belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    pub async fn voucher_detail(&self, row: &LedgerRow) -> Result<Vec<EntryLine>, ReportError> {
        let snapshot = self.load_snapshot().await?;
        Ok(LedgerBuilder::voucher_detail(&snapshot.lines, row))
    }

    /// Balances of third-party accounts starting with one of `prefixes`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    pub async fn third_party_balances(
        &self,
        exercise_id: Option<ExerciseId>,
        prefixes: &[&str],
    ) -> Result<Arc<TrialBalance>, ReportError> {
        let mut filter = LineFilter::new().prefixes(prefixes.iter().copied());
        if let Some(exercise_id) = exercise_id {
            filter = filter.exercise(exercise_id);
        }
        self.trial_balance(&filter).await
    }

    /// FEC file of one exercise, lines in date order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails.
    #[instrument(skip(self))]
    pub async fn export_fec(&self, exercise_id: ExerciseId) -> Result<String, ReportError> {
        let snapshot = self.load_snapshot().await?;
        let mut lines: Vec<EntryLine> = snapshot
            .lines
            .into_iter()
            .filter(|line| line.exercise_id == exercise_id)
            .collect();
        lines.sort_by_key(|line| line.date);

        debug!(rows = lines.len(), "Exporting FEC");
        Ok(FecCodec::encode(
            &lines,
            &snapshot.catalog,
            &FecEncodeOptions::from_config(&self.fec),
        ))
    }

    /// Decodes a FEC file against the current chart of accounts.
    ///
    /// Nothing is written: the caller books the returned lines and creates
    /// the returned accounts.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] if the source fails, or
    /// [`ReportError::Fec`] if the file cannot be read.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn import_fec(&self, bytes: &[u8], exercise_id: ExerciseId) -> Result<FecImport, ReportError> {
        let snapshot = self.load_snapshot().await?;
        let options = FecDecodeOptions::from_config(exercise_id, &self.fec)
            .voucher_tolerance(self.voucher_tolerance);
        Ok(FecCodec::decode(bytes, &snapshot.catalog, &options)?)
    }
}
