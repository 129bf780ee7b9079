//! Read-only network diagnostics
//!
//! Degree counting, degree-distribution balance checking, edge-censoring
//! tables, and the mean partnership-age series. None of these touch
//! simulation state, and none raise on well-formed input.

pub mod ages;
pub mod balance;
pub mod censoring;
pub mod degree;

pub use ages::mean_partnership_ages;
pub use balance::{BalanceCheck, check_degree_balance};
pub use censoring::CensoringTable;
pub use degree::{degree_counts, network_degree_counts};
