//! Accounts module (single-owner balances).
//!
//! Pure domain logic only: no IO, no persistence, no locking. An embedding
//! application that shares accounts across threads must provide its own
//! synchronization, including a consistent lock order for transfers.

pub mod account;

pub use account::Account;
pub use purse_core::{DomainError, DomainResult, Email, Money};
