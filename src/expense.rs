//! Expense entries and `/add` argument parsing
//!
//! An [`ExpenseEntry`] exists only for the duration of one `/add` command:
//! it is built from the parsed arguments and today's date, turned into a
//! single spreadsheet row and dropped.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::sheets::{SheetHandle, SheetsError};

/// Date format written to the spreadsheet and echoed in replies
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Failure of a single `/add` invocation.
///
/// Each variant maps to one fixed user-facing message; the wrapped backend
/// error is only ever logged.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("malformed /add command")]
    MalformedCommand,

    #[error("spreadsheet unavailable: {0}")]
    BackendUnavailable(#[source] SheetsError),

    #[error("failed to append row: {0}")]
    WriteFailed(#[source] SheetsError),
}

impl CommandError {
    /// Message id of the reply sent for this failure
    pub fn message_key(&self) -> &'static str {
        match self {
            CommandError::MalformedCommand => "add-usage",
            CommandError::BackendUnavailable(_) => "sheet-unreachable",
            CommandError::WriteFailed(_) => "sheet-write-failed",
        }
    }
}

/// Validated arguments of `/add <category> <amount>`
#[derive(Debug, Clone, PartialEq)]
pub struct AddArgs {
    pub category: String,
    pub amount: f64,
}

impl AddArgs {
    /// Parses the text following `/add`.
    ///
    /// The first whitespace-separated token is the category, the second the
    /// amount. Anything after the second token is ignored.
    pub fn parse(args: &str) -> Result<Self, CommandError> {
        let mut tokens = args.split_whitespace();
        let (Some(category), Some(amount)) = (tokens.next(), tokens.next()) else {
            return Err(CommandError::MalformedCommand);
        };

        let amount: f64 = amount.parse().map_err(|_| CommandError::MalformedCommand)?;
        // NaN and infinities cannot be stored as a JSON number
        if !amount.is_finite() {
            return Err(CommandError::MalformedCommand);
        }

        Ok(Self {
            category: category.to_string(),
            amount,
        })
    }
}

/// One expense, appended as `date | category | amount`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
}

impl ExpenseEntry {
    pub fn new(args: AddArgs, date: NaiveDate) -> Self {
        Self {
            date,
            category: args.category,
            amount: args.amount,
        }
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Row cells in column order. The amount is written as a number, not text.
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.date_string()),
            Value::from(self.category.clone()),
            Value::from(self.amount),
        ]
    }
}

/// Runs `/add`: validates the arguments, appends one row and returns the
/// entry that was written.
///
/// Nothing is retried. `today` is evaluated only once the sheet is reachable.
pub async fn record_expense<F>(args: &str, sheets: &SheetHandle, today: F) -> Result<ExpenseEntry, CommandError>
where
    F: FnOnce() -> NaiveDate,
{
    let args = AddArgs::parse(args)?;
    let sheet = sheets.get().await.map_err(CommandError::BackendUnavailable)?;

    let entry = ExpenseEntry::new(args, today());
    sheet
        .append_row(entry.to_row())
        .await
        .map_err(CommandError::WriteFailed)?;

    Ok(entry)
}

/// Renders an amount the way it is echoed back to the user.
///
/// Shortest round-trip digits. Whole numbers keep one decimal place (`12.0`);
/// magnitudes below `1e-4` or from `1e16` up switch to exponent form with a
/// signed two-digit exponent (`1e-05`, `1.5e+22`).
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let scientific = format!("{:e}", amount);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or_default()),
        None => (scientific.as_str(), 0),
    };

    if amount != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}
