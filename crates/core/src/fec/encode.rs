//! FEC export.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use compta_shared::config::FecConfig;
use compta_shared::types::{format_amount_or_blank, format_compact_date};
use tracing::debug;

use super::FecCodec;
use super::layout::{FecLayout, col};
use crate::ledger::{AccountCatalog, EntryLine, VoucherKey};

/// Standard French journal codes and their labels.
const STANDARD_JOURNALS: [(&str, &str); 6] = [
    ("AC", "Achats"),
    ("VE", "Ventes"),
    ("BQ", "Banque"),
    ("CA", "Caisse"),
    ("OD", "Opérations diverses"),
    ("AN", "À-nouveaux"),
];

/// Label of a standard journal code.
#[must_use]
pub fn standard_journal_label(code: &str) -> Option<&'static str> {
    STANDARD_JOURNALS
        .iter()
        .find(|(standard, _)| *standard == code)
        .map(|(_, label)| *label)
}

/// FEC file name: `{SIREN}FEC{YYYYMMDD}.txt`, dated on the exercise closing day.
#[must_use]
pub fn fec_file_name(siren: &str, closing_date: NaiveDate) -> String {
    format!("{}FEC{}.txt", siren.trim(), format_compact_date(closing_date))
}

/// Export options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FecEncodeOptions {
    /// Column layout.
    pub layout: FecLayout,
    /// Render zero amounts as blank fields instead of `0,00`.
    pub emit_zero_as_blank: bool,
    /// Journal labels overriding the standard ones.
    pub journal_labels: BTreeMap<String, String>,
}

impl FecEncodeOptions {
    /// Options from the FEC configuration section.
    #[must_use]
    pub fn from_config(config: &FecConfig) -> Self {
        Self {
            layout: if config.extended_layout {
                FecLayout::Extended
            } else {
                FecLayout::Minimal
            },
            emit_zero_as_blank: config.emit_zero_as_blank,
            journal_labels: BTreeMap::new(),
        }
    }

    /// Sets the label of a journal.
    #[must_use]
    pub fn journal_label(mut self, code: impl Into<String>, label: impl Into<String>) -> Self {
        self.journal_labels.insert(code.into(), label.into());
        self
    }

    fn journal_lib<'a>(&'a self, code: &'a str) -> &'a str {
        self.journal_labels
            .get(code)
            .map(String::as_str)
            .or_else(|| standard_journal_label(code))
            .unwrap_or(code)
    }
}

/// Field separators and line breaks inside a field become spaces.
fn sanitize(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

impl FecCodec {
    /// Writes `lines` as a FEC file, header first, one row per line, in the
    /// given order.
    ///
    /// `EcritureNum` numbers vouchers from 1 in order of first appearance.
    #[must_use]
    pub fn encode(lines: &[EntryLine], catalog: &AccountCatalog, options: &FecEncodeOptions) -> String {
        let width = options.layout.column_count();
        let mut voucher_numbers: HashMap<VoucherKey, usize> = HashMap::new();
        let mut out = options.layout.header();
        out.push('\n');

        for line in lines {
            let next_number = voucher_numbers.len() + 1;
            let number = *voucher_numbers
                .entry(VoucherKey::of(line))
                .or_insert(next_number);
            let date = format_compact_date(line.date);
            let account_label = catalog
                .get(&line.account_number)
                .map_or(line.label.as_str(), |account| account.label.as_str());

            let mut fields = vec![String::new(); width];
            fields[col::JOURNAL_CODE] = sanitize(&line.journal_code);
            fields[col::JOURNAL_LIB] = sanitize(options.journal_lib(&line.journal_code));
            fields[col::ECRITURE_NUM] = number.to_string();
            fields[col::ECRITURE_DATE].clone_from(&date);
            fields[col::COMPTE_NUM] = sanitize(&line.account_number);
            fields[col::COMPTE_LIB] = sanitize(account_label);
            fields[col::PIECE_REF] = sanitize(&line.piece_reference);
            fields[col::PIECE_DATE].clone_from(&date);
            fields[col::ECRITURE_LIB] = sanitize(&line.label);
            fields[col::DEBIT] = format_amount_or_blank(line.debit, options.emit_zero_as_blank);
            fields[col::CREDIT] = format_amount_or_blank(line.credit, options.emit_zero_as_blank);
            fields[col::VALID_DATE] = date;

            out.push_str(&fields.join("\t"));
            out.push('\n');
        }

        debug!(
            rows = lines.len(),
            vouchers = voucher_numbers.len(),
            layout = ?options.layout,
            "FEC encoded"
        );
        out
    }
}
