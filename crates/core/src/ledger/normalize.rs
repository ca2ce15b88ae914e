//! Normalization adapter between stored source records and canonical types.
//!
//! Stored records spell the same concept several ways (`compteNumero`,
//! `compte_numero`, `accountNumber`...) and sometimes carry two spellings at
//! once. Each spelling family gets its own optional field; the adapter picks
//! the first one present. Reports only ever see the canonical types.

use chrono::NaiveDate;
use compta_shared::types::{EntrepriseId, EntryLineId, ExerciseId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use super::error::LineError;
use super::types::{Account, EntryLine};
use crate::fiscal::Exercise;

/// Entry line as stored by the application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RawEntryLine {
    pub id: Option<EntryLineId>,
    #[serde(rename = "exerciseId", alias = "exerciceId")]
    pub exercise_id_camel: Option<ExerciseId>,
    #[serde(rename = "exercise_id", alias = "exercice_id")]
    pub exercise_id_snake: Option<ExerciseId>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "journalCode", alias = "codeJournal")]
    pub journal_code_camel: Option<String>,
    #[serde(rename = "journal_code", alias = "code_journal", alias = "journal")]
    pub journal_code_snake: Option<String>,
    #[serde(rename = "pieceReference", alias = "pieceRef", alias = "numeroPiece")]
    pub piece_reference_camel: Option<String>,
    #[serde(rename = "piece_reference", alias = "piece_ref", alias = "numero_piece")]
    pub piece_reference_snake: Option<String>,
    #[serde(rename = "compteNumero", alias = "accountNumber")]
    pub account_number_camel: Option<String>,
    #[serde(rename = "compte_numero", alias = "account_number")]
    pub account_number_snake: Option<String>,
    pub libelle: Option<String>,
    pub label: Option<String>,
    #[serde(alias = "montantDebit", alias = "montant_debit")]
    pub debit: Option<Decimal>,
    #[serde(alias = "montantCredit", alias = "montant_credit")]
    pub credit: Option<Decimal>,
}

/// Chart-of-accounts record as stored by the application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RawAccount {
    pub numero: Option<String>,
    #[serde(alias = "numeroCompte", alias = "numero_compte")]
    pub number: Option<String>,
    pub libelle: Option<String>,
    pub label: Option<String>,
}

/// Exercise record as stored by the application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RawExercise {
    pub id: Option<ExerciseId>,
    #[serde(rename = "entrepriseId")]
    pub entreprise_id_camel: Option<EntrepriseId>,
    #[serde(rename = "entreprise_id")]
    pub entreprise_id_snake: Option<EntrepriseId>,
    #[serde(rename = "dateDebut", alias = "startDate")]
    pub start_date_camel: Option<NaiveDate>,
    #[serde(rename = "date_debut", alias = "start_date")]
    pub start_date_snake: Option<NaiveDate>,
    #[serde(rename = "dateFin", alias = "endDate")]
    pub end_date_camel: Option<NaiveDate>,
    #[serde(rename = "date_fin", alias = "end_date")]
    pub end_date_snake: Option<NaiveDate>,
    #[serde(alias = "cloture", alias = "cloturee")]
    pub closed: Option<bool>,
}

fn first_text(candidates: [Option<String>; 2]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn non_negative(amount: Option<Decimal>, field: &'static str) -> Result<Decimal, LineError> {
    let amount = amount.unwrap_or(Decimal::ZERO);
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LineError::NegativeAmount(field));
    }
    Ok(amount)
}

impl TryFrom<RawEntryLine> for EntryLine {
    type Error = LineError;

    fn try_from(raw: RawEntryLine) -> Result<Self, Self::Error> {
        let exercise_id = raw
            .exercise_id_camel
            .or(raw.exercise_id_snake)
            .ok_or(LineError::MissingField("exerciseId"))?;
        let date = raw.date.ok_or(LineError::MissingField("date"))?;
        let account_number = first_text([raw.account_number_camel, raw.account_number_snake])
            .ok_or(LineError::MissingAccount)?;

        let debit = non_negative(raw.debit, "debit")?;
        let credit = non_negative(raw.credit, "credit")?;
        if !debit.is_zero() && !credit.is_zero() {
            return Err(LineError::BothSides);
        }

        Ok(Self {
            id: raw.id.unwrap_or_default(),
            exercise_id,
            date,
            journal_code: first_text([raw.journal_code_camel, raw.journal_code_snake])
                .unwrap_or_default(),
            piece_reference: first_text([raw.piece_reference_camel, raw.piece_reference_snake])
                .unwrap_or_default(),
            account_number,
            label: first_text([raw.libelle, raw.label]).unwrap_or_default(),
            debit,
            credit,
        })
    }
}

impl TryFrom<RawAccount> for Account {
    type Error = LineError;

    fn try_from(raw: RawAccount) -> Result<Self, Self::Error> {
        let number = first_text([raw.numero, raw.number]).ok_or(LineError::MissingAccount)?;
        let label = first_text([raw.libelle, raw.label]).unwrap_or_else(|| number.clone());
        Ok(Self::new(number, label))
    }
}

impl TryFrom<RawExercise> for Exercise {
    type Error = LineError;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(LineError::MissingField("id"))?;
        let entreprise_id = raw
            .entreprise_id_camel
            .or(raw.entreprise_id_snake)
            .ok_or(LineError::MissingField("entrepriseId"))?;
        let start_date = raw
            .start_date_camel
            .or(raw.start_date_snake)
            .ok_or(LineError::MissingField("dateDebut"))?;
        let end_date = raw
            .end_date_camel
            .or(raw.end_date_snake)
            .ok_or(LineError::MissingField("dateFin"))?;
        if end_date < start_date {
            return Err(LineError::InvertedExercise);
        }

        Ok(Self {
            id,
            entreprise_id,
            start_date,
            end_date,
            closed: raw.closed.unwrap_or(false),
        })
    }
}

/// Outcome of normalizing a batch of records.
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    /// Records converted to canonical form, in input order.
    pub accepted: Vec<T>,
    /// Zero-based input position and reason of every rejected record.
    pub rejected: Vec<(usize, LineError)>,
}

/// Normalizes a batch of records, keeping going past bad ones.
pub fn normalize_all<R, T>(raws: impl IntoIterator<Item = R>) -> Normalized<T>
where
    T: TryFrom<R, Error = LineError>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (position, raw) in raws.into_iter().enumerate() {
        match T::try_from(raw) {
            Ok(value) => accepted.push(value),
            Err(err) => {
                warn!(position, code = err.error_code(), "Rejected source record: {err}");
                rejected.push((position, err));
            }
        }
    }

    Normalized { accepted, rejected }
}

/// Normalizes stored entry lines.
pub fn normalize_lines(raws: impl IntoIterator<Item = RawEntryLine>) -> Normalized<EntryLine> {
    normalize_all(raws)
}
