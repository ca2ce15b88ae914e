//! FEC import.

use std::collections::BTreeMap;

use compta_shared::config::FecConfig;
use compta_shared::types::{EntryLineId, ExerciseId, parse_amount, parse_compact_date};
use encoding_rs::{UTF_8, WINDOWS_1252};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::FecCodec;
use super::error::{FecError, MalformedRow, RowRejection};
use super::layout::{FecLayout, col};
use super::repair::repair_mojibake;
use crate::ledger::{
    Account, AccountCatalog, DEFAULT_VOUCHER_TOLERANCE, DataIntegrityWarning, EntryLine,
    check_vouchers,
};

/// Character encoding of an imported file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecEncoding {
    /// Legacy single-byte Western encoding used by most accounting software.
    #[default]
    Windows1252,
    /// UTF-8, as written by this crate.
    Utf8,
}

/// Import options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FecDecodeOptions {
    /// Encoding of the input bytes.
    pub encoding: FecEncoding,
    /// Exercise the imported lines are booked in.
    pub exercise_id: ExerciseId,
    /// Debit/credit gap tolerated on a voucher.
    pub voucher_tolerance: Decimal,
}

impl FecDecodeOptions {
    /// Windows-1252 import into `exercise_id`.
    #[must_use]
    pub const fn new(exercise_id: ExerciseId) -> Self {
        Self {
            encoding: FecEncoding::Windows1252,
            exercise_id,
            voucher_tolerance: DEFAULT_VOUCHER_TOLERANCE,
        }
    }

    /// Options from the FEC configuration section.
    #[must_use]
    pub const fn from_config(exercise_id: ExerciseId, config: &FecConfig) -> Self {
        let encoding = if config.legacy_encoding {
            FecEncoding::Windows1252
        } else {
            FecEncoding::Utf8
        };
        Self::new(exercise_id).encoding(encoding)
    }

    /// Sets the input encoding.
    #[must_use]
    pub const fn encoding(mut self, encoding: FecEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the voucher tolerance.
    #[must_use]
    pub const fn voucher_tolerance(mut self, tolerance: Decimal) -> Self {
        self.voucher_tolerance = tolerance;
        self
    }
}

/// Result of decoding a FEC file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FecImport {
    /// Layout detected from the header.
    pub layout: FecLayout,
    /// Imported lines, in file order.
    pub lines: Vec<EntryLine>,
    /// Accounts referenced by the file but absent from the catalog, by number.
    pub accounts_to_create: Vec<Account>,
    /// Journal codes seen in the file with their label.
    pub journals: BTreeMap<String, String>,
    /// Rows left out of the import.
    pub rejected: Vec<MalformedRow>,
    /// Unbalanced vouchers among the imported lines.
    pub warnings: Vec<DataIntegrityWarning>,
}

/// Header marker, compared case-insensitively.
const HEADER_MARKER: &str = "journalcode";

/// UTF-8 byte order mark as it reads in Windows-1252.
const MISREAD_BOM: &str = "ï»¿";

fn decode_text(bytes: &[u8], encoding: FecEncoding) -> Result<String, FecError> {
    let text = match encoding {
        FecEncoding::Windows1252 => WINDOWS_1252.decode_without_bom_handling(bytes).0,
        FecEncoding::Utf8 => {
            let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
            if had_errors {
                return Err(FecError::InvalidEncoding("UTF-8"));
            }
            text
        }
    };

    let text = text
        .strip_prefix('\u{feff}')
        .or_else(|| text.strip_prefix(MISREAD_BOM))
        .unwrap_or(&text);
    Ok(text.to_string())
}

/// Fields of one data row, before validation.
struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    fn split(row: &str, separator: char, layout: FecLayout) -> Self {
        let width = layout.column_count();
        let mut fields: Vec<String> = row.splitn(width, separator).map(str::to_string).collect();
        fields.resize(width, String::new());
        for index in layout.free_text_columns() {
            fields[index] = repair_mojibake(&fields[index]);
        }
        Self { fields }
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |field| field.trim())
    }

    /// Free text keeps its surrounding spaces.
    fn text(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }

    fn invalid_amount(&self, index: usize) -> RowRejection {
        RowRejection::InvalidAmount(self.field(index).to_string())
    }

    fn amount(&self, index: usize) -> Result<Decimal, RowRejection> {
        parse_amount(self.field(index)).map_err(|_| self.invalid_amount(index))
    }

    fn into_line(self, exercise_id: ExerciseId) -> Result<EntryLine, RowRejection> {
        let date_text = self.field(col::ECRITURE_DATE);
        let date = parse_compact_date(date_text)
            .map_err(|_| RowRejection::InvalidDate(date_text.to_string()))?;

        let account_number = self.field(col::COMPTE_NUM);
        if account_number.is_empty() {
            return Err(RowRejection::MissingAccount);
        }

        let mut debit = self.amount(col::DEBIT)?;
        let mut credit = self.amount(col::CREDIT)?;
        // A negative amount belongs on the other side.
        if debit < Decimal::ZERO {
            credit = credit
                .checked_sub(debit)
                .ok_or_else(|| self.invalid_amount(col::DEBIT))?;
            debit = Decimal::ZERO;
        }
        if credit < Decimal::ZERO {
            debit = debit
                .checked_sub(credit)
                .ok_or_else(|| self.invalid_amount(col::CREDIT))?;
            credit = Decimal::ZERO;
        }
        if !debit.is_zero() && !credit.is_zero() {
            return Err(RowRejection::BothSides);
        }

        let piece_reference = match self.field(col::PIECE_REF) {
            "" => self.field(col::ECRITURE_NUM),
            reference => reference,
        };

        Ok(EntryLine {
            id: EntryLineId::new(),
            exercise_id,
            date,
            journal_code: self.field(col::JOURNAL_CODE).to_string(),
            piece_reference: piece_reference.to_string(),
            account_number: account_number.to_string(),
            label: self.text(col::ECRITURE_LIB).to_string(),
            debit,
            credit,
        })
    }
}

impl FecCodec {
    /// Reads a FEC file.
    ///
    /// Bad rows are reported in [`FecImport::rejected`] and decoding goes on.
    /// Accounts missing from `catalog` are returned in
    /// [`FecImport::accounts_to_create`]; the catalog itself is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`FecError`] when the input is empty, has no FEC header, or is
    /// not valid in the requested encoding.
    pub fn decode(
        bytes: &[u8],
        catalog: &AccountCatalog,
        options: &FecDecodeOptions,
    ) -> Result<FecImport, FecError> {
        let text = decode_text(bytes, options.encoding)?;
        if text.trim().is_empty() {
            return Err(FecError::Empty);
        }

        let mut rows = text
            .split('\n')
            .map(|row| row.strip_suffix('\r').unwrap_or(row))
            .enumerate();

        let header = rows.next().map_or("", |(_, header)| header);
        if !header
            .trim_start()
            .to_lowercase()
            .starts_with(HEADER_MARKER)
        {
            return Err(FecError::MissingHeader);
        }

        let separator = if !header.contains('\t') && header.contains('|') {
            '|'
        } else {
            '\t'
        };
        let layout = FecLayout::from_field_count(header.split(separator).count());

        let mut lines = Vec::new();
        let mut accounts_to_create: BTreeMap<String, Account> = BTreeMap::new();
        let mut journals: BTreeMap<String, String> = BTreeMap::new();
        let mut rejected = Vec::new();

        for (index, row) in rows {
            if row.trim().is_empty() {
                continue;
            }
            let line_number = index + 1;
            let raw = RawRow::split(row, separator, layout);
            let journal_label = raw.field(col::JOURNAL_LIB).to_string();
            let account_label = raw.field(col::COMPTE_LIB).to_string();

            match raw.into_line(options.exercise_id) {
                Ok(line) => {
                    if !line.journal_code.is_empty() {
                        journals
                            .entry(line.journal_code.clone())
                            .or_insert_with(|| match journal_label.as_str() {
                                "" => line.journal_code.clone(),
                                label => label.to_string(),
                            });
                    }
                    if !catalog.contains(&line.account_number) {
                        accounts_to_create
                            .entry(line.account_number.clone())
                            .or_insert_with(|| {
                                let label = if account_label.is_empty() {
                                    &line.account_number
                                } else {
                                    &account_label
                                };
                                Account::new(line.account_number.clone(), label.clone())
                            });
                    }
                    lines.push(line);
                }
                Err(reason) => {
                    warn!(line_number, %reason, "Rejected FEC row");
                    rejected.push(MalformedRow {
                        line_number,
                        reason,
                        content: row.to_string(),
                    });
                }
            }
        }

        let warnings = check_vouchers(&lines, options.voucher_tolerance);
        let accounts_to_create: Vec<Account> = accounts_to_create.into_values().collect();

        info!(
            ?layout,
            imported = lines.len(),
            rejected = rejected.len(),
            new_accounts = accounts_to_create.len(),
            warnings = warnings.len(),
            "FEC file decoded"
        );

        Ok(FecImport {
            layout,
            lines,
            accounts_to_create,
            journals,
            rejected,
            warnings,
        })
    }
}
