//! Billing service
//!
//! Applies subscription webhook events to profile plan state. Only plan
//! flips are modeled: subscription created means premium, subscription
//! deleted or paused means free. Webhook signature verification belongs to
//! the HTTP layer; events with no matching profile are acknowledged and
//! dropped, since retrying cannot make an unknown customer known.

use tracing::{info, warn};

use crate::db::Database;
use crate::models::{Plan, Profile};

use super::ServiceResult;

/// Subscription lifecycle events the backend reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEvent {
    /// A subscription became active for a known Stripe customer
    SubscriptionCreated { customer_id: String },
    /// A subscription ended or was paused
    SubscriptionEnded { customer_id: String },
    /// Checkout finished; links the Stripe customer to our user id
    CheckoutCompleted {
        user_id: String,
        customer_id: String,
    },
}

/// Apply one webhook event to profile state
pub fn apply_event(db: &Database, event: &SubscriptionEvent) -> ServiceResult<()> {
    match event {
        SubscriptionEvent::SubscriptionCreated { customer_id } => {
            flip_plan(db, customer_id, Plan::Premium)
        }
        SubscriptionEvent::SubscriptionEnded { customer_id } => {
            flip_plan(db, customer_id, Plan::Free)
        }
        SubscriptionEvent::CheckoutCompleted {
            user_id,
            customer_id,
        } => {
            let linked =
                db.with_conn(|conn| Profile::set_stripe_customer(conn, user_id, customer_id))?;
            if linked {
                info!(user_id, customer_id, "stripe customer linked");
            } else {
                warn!(user_id, customer_id, "checkout for unknown profile");
            }
            Ok(())
        }
    }
}

fn flip_plan(db: &Database, customer_id: &str, plan: Plan) -> ServiceResult<()> {
    let profile = db.with_conn(|conn| Profile::get_by_stripe_customer(conn, customer_id))?;
    match profile {
        Some(profile) => {
            db.with_conn(|conn| Profile::set_plan(conn, &profile.id, plan))?;
            info!(user_id = %profile.id, plan = plan.as_str(), "plan updated");
        }
        None => warn!(customer_id, "subscription event for unknown customer"),
    }
    Ok(())
}
