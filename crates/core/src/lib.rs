//! # Duobank Core
//!
//! Core domain types for the Duobank ledger. This crate carries no I/O:
//! it defines the account model, the caller identity handed in by the
//! request layer, and the core error taxonomy.

pub mod account;
pub mod auth;
pub mod error;

pub use account::{Account, AccountType};
pub use auth::AuthUser;
pub use error::{CoreError, CoreResult};
