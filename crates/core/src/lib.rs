//! Core business logic for Compta.
//!
//! This crate contains pure bookkeeping logic with no web or database
//! dependencies. Storage is reached through the [`source::EntryLineSource`]
//! trait only.
//!
//! # Modules
//!
//! - `ledger` - Entry lines, accounts, filters and voucher checks
//! - `fiscal` - Exercises and monthly periods
//! - `reports` - Trial balance, result, progressive balance and general ledger
//! - `fec` - Fichier des Écritures Comptables import and export
//! - `source` - Entry line source boundary and snapshots

pub mod fec;
pub mod fiscal;
pub mod ledger;
pub mod reports;
pub mod source;
