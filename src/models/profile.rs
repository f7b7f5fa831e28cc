//! Profile model
//!
//! One profile per authenticated user. The `plan` column is the single
//! source of truth for free/premium feature gating and is read fresh at
//! call time, never cached.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Subscription plan enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(Plan::Free),
            "premium" => Some(Plan::Premium),
            _ => None,
        }
    }

    /// Tier gate predicate: does this plan unlock premium features?
    pub fn is_premium(&self) -> bool {
        matches!(self, Plan::Premium)
    }
}

/// A user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub plan: Plan,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub is_admin: bool,
    pub created_at: String,
}

impl Profile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let plan_str: String = row.get("plan")?;
        let plan = Plan::from_str(&plan_str).unwrap_or(Plan::Free);

        Ok(Self {
            id: row.get("id")?,
            plan,
            stripe_customer_id: row.get("stripe_customer_id")?,
            stripe_subscription_id: row.get("stripe_subscription_id")?,
            is_admin: row.get::<_, i32>("is_admin")? != 0,
            created_at: row.get("created_at")?,
        })
    }

    /// Get a profile by user id
    pub fn get(conn: &Connection, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profiles WHERE id = ?1")?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a profile by user id, creating a free-plan row on first sight
    pub fn get_or_create(conn: &Connection, user_id: &str) -> DbResult<Self> {
        if let Some(profile) = Self::get(conn, user_id)? {
            return Ok(profile);
        }

        conn.execute("INSERT INTO profiles (id) VALUES (?1)", [user_id])?;
        Self::get(conn, user_id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Look up a profile by its Stripe customer id
    pub fn get_by_stripe_customer(conn: &Connection, customer_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profiles WHERE stripe_customer_id = ?1")?;

        let result = stmt.query_row([customer_id], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Flip a profile's plan. Returns false when the user is unknown.
    pub fn set_plan(conn: &Connection, user_id: &str, plan: Plan) -> DbResult<bool> {
        let rows = conn.execute(
            "UPDATE profiles SET plan = ?1 WHERE id = ?2",
            params![plan.as_str(), user_id],
        )?;
        Ok(rows > 0)
    }

    /// Record the Stripe customer id after checkout completes
    pub fn set_stripe_customer(
        conn: &Connection,
        user_id: &str,
        customer_id: &str,
    ) -> DbResult<bool> {
        let rows = conn.execute(
            "UPDATE profiles SET stripe_customer_id = ?1 WHERE id = ?2",
            params![customer_id, user_id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, Database};

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| migrations::run_migrations(conn))
            .unwrap();
        db
    }

    #[test]
    fn test_plan_round_trip() {
        assert_eq!(Plan::from_str("premium"), Some(Plan::Premium));
        assert_eq!(Plan::from_str("FREE"), Some(Plan::Free));
        assert_eq!(Plan::from_str("gold"), None);
        assert!(Plan::Premium.is_premium());
        assert!(!Plan::Free.is_premium());
    }

    #[test]
    fn test_get_or_create_defaults_to_free() {
        let db = test_db();
        db.with_conn(|conn| {
            let profile = Profile::get_or_create(conn, "user-1")?;
            assert_eq!(profile.plan, Plan::Free);
            assert!(!profile.is_admin);

            // Second call returns the same row, no duplicate insert
            let again = Profile::get_or_create(conn, "user-1")?;
            assert_eq!(again.id, profile.id);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_plan_flip_by_customer_id() {
        let db = test_db();
        db.with_conn(|conn| {
            Profile::get_or_create(conn, "user-1")?;
            Profile::set_stripe_customer(conn, "user-1", "cus_123")?;

            let found = Profile::get_by_stripe_customer(conn, "cus_123")?.unwrap();
            assert_eq!(found.id, "user-1");

            Profile::set_plan(conn, &found.id, Plan::Premium)?;
            let upgraded = Profile::get(conn, "user-1")?.unwrap();
            assert_eq!(upgraded.plan, Plan::Premium);
            Ok(())
        })
        .unwrap();
    }
}
