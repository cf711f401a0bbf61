//! Statement service
//!
//! Runs the whole pipeline for one request: fetch, normalize, group,
//! accumulate, filter, paginate. Holds no state between calls.

use chrono::FixedOffset;
use tracing::{debug, info};

use super::accumulator::accumulate;
use super::filter::RecordFilter;
use super::grouper::DailyGrouper;
use super::normalizer::{MovementNormalizer, SkippedMovement};
use super::options::EngineOptions;
use super::paginator::paginate;
use crate::error::{StatementError, StatementResult};
use crate::models::{AccountId, DailyRecord, DateRange, Money, Page};
use crate::source::MovementSource;

/// Everything the caller supplies for one statement
#[derive(Debug, Clone)]
pub struct StatementRequest {
    pub account_id: AccountId,
    pub range: DateRange,
    /// Balance immediately before the range starts
    pub opening_balance: Money,
    pub page_size: i64,
    /// Caller-owned page state; clamped on every call
    pub page_number: i64,
    pub filter: RecordFilter,
}

impl StatementRequest {
    /// Create a request for the first page with no filter
    pub fn new(
        account_id: impl Into<AccountId>,
        range: DateRange,
        opening_balance: Money,
        page_size: i64,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            range,
            opening_balance,
            page_size,
            page_number: 1,
            filter: RecordFilter::default(),
        }
    }

    /// Request a specific page
    pub fn page(mut self, page_number: i64) -> Self {
        self.page_number = page_number;
        self
    }

    /// Replace the filter
    ///
    /// A new filter means a new record set, so the page resets to 1.
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        if filter != self.filter {
            self.page_number = 1;
        }
        self.filter = filter;
        self
    }
}

/// A computed statement plus the page the caller asked for
#[derive(Debug, Clone)]
pub struct Statement {
    pub account_id: AccountId,
    pub range: DateRange,
    /// Offset the days were cut in; times are shown in it too
    pub reporting_offset: FixedOffset,
    pub opening_balance: Money,
    /// Balance at the end of the last day of the range
    pub closing_balance: Money,
    /// Every day of the range, unfiltered
    pub records: Vec<DailyRecord>,
    /// Requested page of the filtered records
    pub page: Page<DailyRecord>,
    /// Raw records that could not be normalized
    pub skipped: Vec<SkippedMovement>,
    /// Sum of positive amounts over the range
    pub total_inflows: Money,
    /// Sum of negative amounts over the range
    pub total_outflows: Money,
}

impl Statement {
    /// Net change over the range
    pub fn net_change(&self) -> Money {
        self.total_inflows + self.total_outflows
    }

    /// Number of movements in the range
    pub fn movement_count(&self) -> usize {
        self.records.iter().map(|r| r.movements.len()).sum()
    }

    /// Whether some source records were left out
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Service producing account statements
pub struct StatementService<'a> {
    source: &'a dyn MovementSource,
    options: EngineOptions,
}

impl<'a> StatementService<'a> {
    /// Create a new statement service
    pub fn new(source: &'a dyn MovementSource, options: EngineOptions) -> Self {
        Self { source, options }
    }

    /// Build the statement for a request
    ///
    /// Page size is validated before the source is contacted. Source errors
    /// are returned as they are; malformed records are skipped and listed in
    /// `Statement::skipped`. A running balance that overflows fails with
    /// `BalanceOverflow`.
    pub fn build(&self, request: StatementRequest) -> StatementResult<Statement> {
        if request.page_size <= 0 {
            return Err(StatementError::InvalidPageSize(request.page_size));
        }

        let raws = self
            .source
            .fetch_movements(&request.account_id, &request.range)?;
        debug!(
            account = %request.account_id,
            range = %request.range,
            raw = raws.len(),
            "building statement"
        );

        let batch = MovementNormalizer::new(self.options.unknown_kind_policy).normalize_all(raws);
        let grouper = DailyGrouper::new(self.options.reporting_offset);
        let buckets = grouper.group_range(batch.movements, &request.range);
        let records = accumulate(buckets, request.opening_balance)?;

        let visible = request.filter.apply(&records);
        let page = paginate(&visible, request.page_size, request.page_number)?;

        let closing_balance = records
            .last()
            .map(|r| r.consolidated_balance)
            .unwrap_or(request.opening_balance);
        let total_inflows: Money = records.iter().map(DailyRecord::inflows).sum();
        let total_outflows: Money = records.iter().map(DailyRecord::outflows).sum();

        info!(
            account = %request.account_id,
            days = records.len(),
            skipped = batch.skipped.len(),
            page = page.page_number,
            total_pages = page.total_pages,
            "statement built"
        );

        Ok(Statement {
            account_id: request.account_id,
            range: request.range,
            reporting_offset: self.options.reporting_offset,
            opening_balance: request.opening_balance,
            closing_balance,
            records,
            page,
            skipped: batch.skipped,
            total_inflows,
            total_outflows,
        })
    }
}
