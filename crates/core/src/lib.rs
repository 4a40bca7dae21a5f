//! `purse-core` — domain building blocks for single-owner accounts.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! validated money amounts, validated email identifiers and the error model
//! shared by everything built on top of them.

pub mod email;
pub mod entity;
pub mod error;
pub mod money;
pub mod value_object;

pub use email::{is_email_valid, Email};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use money::{is_amount_valid, is_float_amount_valid, Money};
pub use value_object::ValueObject;
