//! Free/premium tier gate
//!
//! A pure classification over the caller's plan, read from their profile at
//! call time. No caching, no state: the account's current plan alone decides
//! which analytics entry points are allowed.

use crate::models::Plan;

use super::AnalyticsError;

/// Reject free-tier callers before any aggregation work happens
pub fn require_premium(plan: Plan) -> Result<(), AnalyticsError> {
    if plan.is_premium() {
        Ok(())
    } else {
        Err(AnalyticsError::PremiumRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_premium() {
        assert_eq!(require_premium(Plan::Premium), Ok(()));
        assert_eq!(
            require_premium(Plan::Free),
            Err(AnalyticsError::PremiumRequired)
        );
    }
}
