//! Statement report
//!
//! Presentation of one statement page for the terminal, CSV and JSON. This is
//! the only place amounts are rounded to cents.

use std::io::Write;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{StatementError, StatementResult};
use crate::models::{DailyRecord, Money, Movement};
use crate::services::Statement;

/// Display preferences for a report
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub currency_symbol: String,
    /// strftime format for dates
    pub date_format: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Renders a computed statement
#[derive(Debug, Clone)]
pub struct StatementReport<'a> {
    statement: &'a Statement,
    style: ReportStyle,
}

impl<'a> StatementReport<'a> {
    pub fn new(statement: &'a Statement) -> Self {
        Self {
            statement,
            style: ReportStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&format!("{} ", self.style.currency_symbol))
    }

    fn date(&self, record: &DailyRecord) -> String {
        record.date.format(&self.style.date_format).to_string()
    }

    /// Movement time in the offset the statement's days were cut in
    fn local_time(&self, movement: &Movement) -> DateTime<FixedOffset> {
        movement
            .timestamp()
            .with_timezone(&self.statement.reporting_offset)
    }

    /// Format the current page for terminal display
    pub fn format_terminal(&self) -> String {
        let st = self.statement;
        let page = &st.page;
        let mut output = String::new();

        output.push_str(&format!("Statement: account {}\n", st.account_id));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Period: {} to {}\n",
            st.range.start().format(&self.style.date_format),
            st.range.end().format(&self.style.date_format)
        ));
        output.push_str(&format!("Opening Balance: {}\n", self.money(st.opening_balance)));
        output.push_str(&format!("Closing Balance: {}\n\n", self.money(st.closing_balance)));

        output.push_str(&format!(
            "{:<12} {:<6} {:<14} {:<20} {:>16}\n",
            "Date", "Time", "Type", "Counterparty", "Amount"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if page.items.is_empty() {
            output.push_str("No movements found.\n");
        }

        for record in &page.items {
            if record.movements.is_empty() {
                output.push_str(&format!("{:<12} {}\n", self.date(record), "(no movements)"));
            }
            for movement in &record.movements {
                output.push_str(&format!(
                    "{:<12} {:<6} {:<14} {:<20} {:>16}\n",
                    self.date(record),
                    self.local_time(movement).format("%H:%M").to_string(),
                    movement.kind().to_string(),
                    truncate(movement.counterparty().unwrap_or(""), 20),
                    self.money(movement.amount())
                ));
            }
            output.push_str(&format!(
                "{:>56} {:>16}\n",
                "Day balance:",
                self.money(record.consolidated_balance)
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Inflows: {}  |  Outflows: {}  |  Movements: {}\n",
            self.money(st.total_inflows),
            self.money(st.total_outflows.abs()),
            st.movement_count()
        ));
        output.push_str(&format!(
            "Page {} of {} ({} days)\n",
            page.page_number, page.total_pages, page.total_items
        ));

        if st.is_partial() {
            output.push_str(&format!(
                "Warning: {} movement(s) could not be read and were left out:\n",
                st.skipped.len()
            ));
            for skipped in &st.skipped {
                output.push_str(&format!("  #{}: {}\n", skipped.index, skipped.error));
            }
        }

        output
    }

    /// Export the current page to CSV, one row per movement
    ///
    /// Days without movements get a single row with empty movement columns so
    /// their balance still appears.
    pub fn export_csv<W: Write>(&self, writer: W) -> StatementResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Date",
            "Timestamp",
            "Type",
            "Counterparty",
            "Amount",
            "Consolidated Balance",
        ])?;

        for record in &self.statement.page.items {
            let date = record.date.to_string();
            let balance = format!("{:.2}", record.consolidated_balance.rounded());

            if record.movements.is_empty() {
                csv.write_record([date.as_str(), "", "", "", "", balance.as_str()])?;
                continue;
            }
            for movement in &record.movements {
                csv.write_record([
                    date.clone(),
                    self.local_time(movement).to_rfc3339(),
                    movement.kind().to_string(),
                    movement.counterparty().unwrap_or("").to_string(),
                    format!("{:.2}", movement.amount().rounded()),
                    balance.clone(),
                ])?;
            }
        }

        csv.flush()
            .map_err(|e| StatementError::Export(e.to_string()))
    }

    /// Export the current page and statement summary as JSON
    pub fn export_json<W: Write>(&self, writer: W) -> StatementResult<()> {
        let st = self.statement;
        let document = StatementDocument {
            account_id: st.account_id.as_str(),
            start: st.range.start().to_string(),
            end: st.range.end().to_string(),
            opening_balance: st.opening_balance.rounded(),
            closing_balance: st.closing_balance.rounded(),
            total_inflows: st.total_inflows.rounded(),
            total_outflows: st.total_outflows.rounded(),
            page_number: st.page.page_number,
            total_pages: st.page.total_pages,
            page_size: st.page.page_size,
            total_items: st.page.total_items,
            records: st
                .page
                .items
                .iter()
                .map(|record| RecordDocument::new(record, st.reporting_offset))
                .collect(),
            skipped: st
                .skipped
                .iter()
                .map(|s| SkippedDocument {
                    index: s.index,
                    error: s.error.to_string(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(writer, &document)
            .map_err(|e| StatementError::Export(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatementDocument<'a> {
    account_id: &'a str,
    start: String,
    end: String,
    opening_balance: Decimal,
    closing_balance: Decimal,
    total_inflows: Decimal,
    total_outflows: Decimal,
    page_number: usize,
    total_pages: usize,
    page_size: usize,
    total_items: usize,
    records: Vec<RecordDocument<'a>>,
    skipped: Vec<SkippedDocument>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordDocument<'a> {
    date: String,
    net_change: Decimal,
    consolidated_balance: Decimal,
    movements: Vec<MovementDocument<'a>>,
}

impl<'a> RecordDocument<'a> {
    fn new(record: &'a DailyRecord, offset: FixedOffset) -> Self {
        Self {
            date: record.date.to_string(),
            net_change: record.net_change().rounded(),
            consolidated_balance: record.consolidated_balance.rounded(),
            movements: record
                .movements
                .iter()
                .map(|movement| MovementDocument::new(movement, offset))
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MovementDocument<'a> {
    timestamp: String,
    kind: crate::models::MovementKind,
    amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    counterparty: Option<&'a str>,
}

impl<'a> MovementDocument<'a> {
    fn new(movement: &'a Movement, offset: FixedOffset) -> Self {
        Self {
            timestamp: movement.timestamp().with_timezone(&offset).to_rfc3339(),
            kind: movement.kind(),
            amount: movement.amount().rounded(),
            counterparty: movement.counterparty(),
        }
    }
}

#[derive(Serialize)]
struct SkippedDocument {
    index: usize,
    error: String,
}

/// Truncate a string to a maximum character count
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
