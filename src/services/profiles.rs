//! Profile service
//!
//! The HTTP layer verifies the caller's JWT and hands this module the
//! resulting user id; a free-plan profile row is created the first time a
//! verified id is seen.

use tracing::info;

use crate::db::Database;
use crate::models::Profile;

use super::ServiceResult;

/// Load the caller's profile, creating a free-plan row on first sight
pub fn current_profile(db: &Database, user_id: &str) -> ServiceResult<Profile> {
    let existed = db.with_conn(|conn| Profile::get(conn, user_id))?.is_some();
    let profile = db.with_conn(|conn| Profile::get_or_create(conn, user_id))?;
    if !existed {
        info!(user_id, "profile created");
    }
    Ok(profile)
}
