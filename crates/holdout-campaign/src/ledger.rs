use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient funds: have {balance}, need {cost}")]
    InsufficientFunds { balance: u32, cost: u32 },
}

/// Coin balance for one session. Never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u32,
}

impl Ledger {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Add coins. Returns true if the balance changed.
    pub fn credit(&mut self, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        self.balance = self.balance.saturating_add(amount);
        debug!(amount, balance = self.balance, "coins credited");
        true
    }

    /// Spend `cost` coins, all or nothing. Returns the new balance.
    pub fn try_spend(&mut self, cost: u32) -> Result<u32, LedgerError> {
        if self.balance < cost {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                cost,
            });
        }
        self.balance -= cost;
        debug!(cost, balance = self.balance, "coins spent");
        Ok(self.balance)
    }

    /// Set the balance directly. Returns true if it changed.
    pub fn set_balance(&mut self, balance: u32) -> bool {
        let changed = self.balance != balance;
        self.balance = balance;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_accumulates() {
        let mut ledger = Ledger::default();
        assert!(ledger.credit(5));
        assert!(ledger.credit(10));
        assert_eq!(ledger.balance(), 15);
    }

    #[test]
    fn zero_credit_is_not_a_change() {
        let mut ledger = Ledger::new(3);
        assert!(!ledger.credit(0));
        assert_eq!(ledger.balance(), 3);
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut ledger = Ledger::new(10);
        let err = ledger.try_spend(11).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: 10,
                cost: 11
            }
        );
        assert_eq!(ledger.balance(), 10);

        assert_eq!(ledger.try_spend(10), Ok(0));
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn credit_saturates() {
        let mut ledger = Ledger::new(u32::MAX - 1);
        ledger.credit(5);
        assert_eq!(ledger.balance(), u32::MAX);
    }

    #[test]
    fn set_balance_reports_change() {
        let mut ledger = Ledger::new(4);
        assert!(!ledger.set_balance(4));
        assert!(ledger.set_balance(0));
        assert_eq!(ledger.balance(), 0);
    }
}
