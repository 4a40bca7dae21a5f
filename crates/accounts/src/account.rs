use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use purse_core::{DomainError, DomainResult, Email, Entity, Money};

/// A single-owner account: an email identifier and a non-negative balance.
///
/// Every mutating operation validates its input fully before touching the
/// balance, so a failed call leaves the account exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    email: Email,
    balance: Money,
}

impl Account {
    /// Open an account from raw input.
    ///
    /// The identifier is checked first, then the initial balance.
    pub fn new(email: &str, initial_balance: Decimal) -> DomainResult<Self> {
        let email = Email::parse(email)?;
        let balance = Money::from_decimal(initial_balance)?;
        Ok(Self::open(email, balance))
    }

    /// Open an account from already-validated parts.
    pub fn open(email: Email, balance: Money) -> Self {
        tracing::debug!(account = %email, balance = %balance, "account opened");
        Self { email, balance }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Add `amount` to the balance and return the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> DomainResult<Money> {
        let amount = self.validate_amount(amount, "deposit")?;
        self.credit(amount)
    }

    /// Take `amount` out of the balance and return the new balance.
    pub fn withdraw(&mut self, amount: Decimal) -> DomainResult<Money> {
        let amount = self.validate_amount(amount, "withdraw")?;
        self.debit(amount)
    }

    /// Move `amount` from this account into `target`.
    ///
    /// The withdrawal happens first; if it fails neither account changes.
    pub fn transfer(&mut self, amount: Decimal, target: Option<&mut Account>) -> DomainResult<()> {
        let Some(target) = target else {
            tracing::debug!(account = %self.email, "transfer rejected: missing target");
            return Err(DomainError::missing_target());
        };
        let amount = self.validate_amount(amount, "transfer")?;

        self.debit(amount)?;
        if let Err(err) = target.credit(amount) {
            // Put the money back so the pair stays balanced.
            self.balance = self
                .balance
                .checked_add(amount)
                .ok_or_else(|| DomainError::invalid_amount("balance overflow on revert"))?;
            return Err(err);
        }

        tracing::debug!(
            account = %self.email,
            target = %target.email,
            amount = %amount,
            balance = %self.balance,
            "transfer completed"
        );
        Ok(())
    }

    fn validate_amount(&self, amount: Decimal, operation: &'static str) -> DomainResult<Money> {
        Money::from_decimal(amount).inspect_err(|err| {
            tracing::debug!(account = %self.email, operation, error = %err, "amount rejected");
        })
    }

    fn credit(&mut self, amount: Money) -> DomainResult<Money> {
        let Some(balance) = self.balance.checked_add(amount) else {
            return Err(DomainError::invalid_amount(format!(
                "depositing {amount} would overflow balance {}",
                self.balance
            )));
        };
        self.balance = balance;
        tracing::debug!(account = %self.email, amount = %amount, balance = %balance, "credited");
        Ok(balance)
    }

    fn debit(&mut self, amount: Money) -> DomainResult<Money> {
        let Some(balance) = self.balance.checked_sub(amount) else {
            tracing::debug!(
                account = %self.email,
                balance = %self.balance,
                requested = %amount,
                "insufficient funds"
            );
            return Err(DomainError::insufficient_funds(self.balance, amount));
        };
        self.balance = balance;
        tracing::debug!(account = %self.email, amount = %amount, balance = %balance, "debited");
        Ok(balance)
    }
}

impl Entity for Account {
    type Id = Email;

    fn id(&self) -> &Self::Id {
        &self.email
    }
}
