//! Balance sheet / income statement split.

use rust_decimal::Decimal;

use super::types::{BalanceTotals, ClassifiedBalance, NetResult, TrialBalance};
use crate::ledger::StatementSide;

/// Partitions a trial balance by financial statement.
pub struct ResultClassifier;

impl ResultClassifier {
    /// Splits `balance` by account class and computes the net result.
    ///
    /// The net result is the income statement creditor total minus its
    /// debtor total: positive is a profit, negative a loss.
    #[must_use]
    pub fn classify(balance: &TrialBalance) -> ClassifiedBalance {
        let mut balance_sheet_lines = Vec::new();
        let mut income_statement_lines = Vec::new();
        let mut special_lines = Vec::new();

        for line in &balance.lines {
            match line.class.side() {
                StatementSide::BalanceSheet => balance_sheet_lines.push(line.clone()),
                StatementSide::IncomeStatement => income_statement_lines.push(line.clone()),
                StatementSide::Special | StatementSide::Other => special_lines.push(line.clone()),
            }
        }

        let balance_sheet: BalanceTotals = balance_sheet_lines.iter().collect();
        let income_statement: BalanceTotals = income_statement_lines.iter().collect();
        let net_result: Decimal = income_statement
            .creditor_balance
            .saturating_sub(income_statement.debtor_balance);

        ClassifiedBalance {
            balance_sheet_lines,
            income_statement_lines,
            special_lines,
            balance_sheet,
            income_statement,
            net_result,
            outcome: NetResult::of(net_result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::types::TrialBalanceLine;
    use rust_decimal_macros::dec;

    fn balance(lines: Vec<TrialBalanceLine>) -> TrialBalance {
        TrialBalance {
            totals: lines.iter().collect(),
            balance_sheet: BalanceTotals::default(),
            income_statement: BalanceTotals::default(),
            lines,
            warnings: Vec::new(),
        }
    }

    fn tb(number: &str, debit: Decimal, credit: Decimal) -> TrialBalanceLine {
        TrialBalanceLine::from_totals(number.to_string(), number.to_string(), debit, credit)
    }

    #[test]
    fn test_profit() {
        let classified = ResultClassifier::classify(&balance(vec![
            tb("411000", dec!(120), Decimal::ZERO),
            tb("445710", Decimal::ZERO, dec!(20)),
            tb("607000", dec!(40), Decimal::ZERO),
            tb("707000", Decimal::ZERO, dec!(100)),
            tb("801000", dec!(5), Decimal::ZERO),
        ]));

        assert_eq!(classified.balance_sheet_lines.len(), 2);
        assert_eq!(classified.income_statement_lines.len(), 2);
        assert_eq!(classified.special_lines.len(), 1);
        assert_eq!(classified.net_result, dec!(60));
        assert_eq!(classified.outcome, NetResult::Profit);
        assert_eq!(classified.balance_sheet.debtor_balance, dec!(120));
    }

    #[test]
    fn test_loss_and_breakeven() {
        let loss = ResultClassifier::classify(&balance(vec![
            tb("606000", dec!(80), Decimal::ZERO),
            tb("706000", Decimal::ZERO, dec!(50)),
        ]));
        assert_eq!(loss.net_result, dec!(-30));
        assert_eq!(loss.outcome, NetResult::Loss);

        let empty = ResultClassifier::classify(&balance(Vec::new()));
        assert_eq!(empty.net_result, Decimal::ZERO);
        assert_eq!(empty.outcome, NetResult::Breakeven);
    }
}
