//! Lending policy and borrow outcome

use chrono::{DateTime, Duration, Utc};

use crate::config::LendingConfig;

/// Rules applied by the borrow workflow
#[derive(Debug, Clone)]
pub struct LoanPolicy {
    pub loan_period: Duration,
    /// `None` means no cap
    pub max_active_borrows: Option<usize>,
    pub auto_register_students: bool,
}

impl From<&LendingConfig> for LoanPolicy {
    fn from(config: &LendingConfig) -> Self {
        Self {
            loan_period: Duration::days(config.loan_period_days),
            max_active_borrows: (config.max_active_borrows > 0).then_some(config.max_active_borrows),
            auto_register_students: config.auto_register_students,
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::from(&LendingConfig::default())
    }
}

/// Result of a successful borrow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowReceipt {
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
}
