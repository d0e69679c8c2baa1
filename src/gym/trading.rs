pub mod action;
pub mod env;
pub mod ledger;
