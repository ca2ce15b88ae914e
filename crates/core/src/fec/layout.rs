//! FEC column layouts.

use serde::{Deserialize, Serialize};

/// The 18 mandatory columns, in file order.
pub const MINIMAL_COLUMNS: [&str; 18] = [
    "JournalCode",
    "JournalLib",
    "EcritureNum",
    "EcritureDate",
    "CompteNum",
    "CompteLib",
    "CompAuxNum",
    "CompAuxLib",
    "PieceRef",
    "PieceDate",
    "EcritureLib",
    "Debit",
    "Credit",
    "EcritureLet",
    "DateLet",
    "ValidDate",
    "Montantdevise",
    "Idevise",
];

/// Columns appended by the extended layout.
pub const EXTENSION_COLUMNS: [&str; 4] = ["DateEcheance", "SectionCode", "SectionNom", "Reference"];

/// Column positions shared by both layouts.
#[allow(missing_docs)]
pub mod col {
    pub const JOURNAL_CODE: usize = 0;
    pub const JOURNAL_LIB: usize = 1;
    pub const ECRITURE_NUM: usize = 2;
    pub const ECRITURE_DATE: usize = 3;
    pub const COMPTE_NUM: usize = 4;
    pub const COMPTE_LIB: usize = 5;
    pub const COMP_AUX_NUM: usize = 6;
    pub const COMP_AUX_LIB: usize = 7;
    pub const PIECE_REF: usize = 8;
    pub const PIECE_DATE: usize = 9;
    pub const ECRITURE_LIB: usize = 10;
    pub const DEBIT: usize = 11;
    pub const CREDIT: usize = 12;
    pub const VALID_DATE: usize = 15;
    pub const SECTION_NOM: usize = 20;
}

/// Free-text columns that go through mojibake repair on import.
const FREE_TEXT_COLUMNS: [usize; 5] = [
    col::JOURNAL_LIB,
    col::COMPTE_LIB,
    col::COMP_AUX_LIB,
    col::PIECE_REF,
    col::ECRITURE_LIB,
];

/// FEC layout variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FecLayout {
    /// 18 columns.
    #[default]
    Minimal,
    /// 22 columns.
    Extended,
}

impl FecLayout {
    /// Number of columns.
    #[must_use]
    pub const fn column_count(self) -> usize {
        match self {
            Self::Minimal => MINIMAL_COLUMNS.len(),
            Self::Extended => MINIMAL_COLUMNS.len() + EXTENSION_COLUMNS.len(),
        }
    }

    /// Column names, in file order.
    pub fn columns(self) -> impl Iterator<Item = &'static str> {
        let extension: &'static [&'static str] = match self {
            Self::Minimal => &[],
            Self::Extended => &EXTENSION_COLUMNS,
        };
        MINIMAL_COLUMNS.iter().chain(extension).copied()
    }

    /// Header line, without line terminator.
    #[must_use]
    pub fn header(self) -> String {
        self.columns().collect::<Vec<_>>().join("\t")
    }

    /// Layout implied by the number of header fields.
    ///
    /// Anything wider than the minimal layout is read as extended.
    #[must_use]
    pub const fn from_field_count(count: usize) -> Self {
        if count > MINIMAL_COLUMNS.len() {
            Self::Extended
        } else {
            Self::Minimal
        }
    }

    /// Positions of the free-text columns of this layout.
    #[must_use]
    pub fn free_text_columns(self) -> Vec<usize> {
        let mut columns = FREE_TEXT_COLUMNS.to_vec();
        if self == Self::Extended {
            columns.push(col::SECTION_NOM);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_counts() {
        assert_eq!(FecLayout::Minimal.column_count(), 18);
        assert_eq!(FecLayout::Extended.column_count(), 22);
        assert_eq!(FecLayout::Extended.columns().count(), 22);
        assert_eq!(FecLayout::Extended.columns().last(), Some("Reference"));
    }

    #[test]
    fn test_header() {
        let header = FecLayout::Minimal.header();
        assert!(header.starts_with("JournalCode\tJournalLib\tEcritureNum\tEcritureDate"));
        assert!(header.ends_with("Montantdevise\tIdevise"));
    }

    #[test]
    fn test_from_field_count() {
        assert_eq!(FecLayout::from_field_count(18), FecLayout::Minimal);
        assert_eq!(FecLayout::from_field_count(12), FecLayout::Minimal);
        assert_eq!(FecLayout::from_field_count(22), FecLayout::Extended);
    }

    #[test]
    fn test_column_positions() {
        let names: Vec<&str> = FecLayout::Extended.columns().collect();
        assert_eq!(names[col::ECRITURE_DATE], "EcritureDate");
        assert_eq!(names[col::COMPTE_NUM], "CompteNum");
        assert_eq!(names[col::PIECE_REF], "PieceRef");
        assert_eq!(names[col::DEBIT], "Debit");
        assert_eq!(names[col::CREDIT], "Credit");
        assert_eq!(names[col::VALID_DATE], "ValidDate");
        assert_eq!(names[col::SECTION_NOM], "SectionNom");
    }
}
