//! Analytics service
//!
//! Fetches a user's session history (the single I/O step) and hands it to
//! the pure aggregation core. Basic stats are open to every tier; the full
//! chart payload is premium-gated before anything is fetched or computed.

use tracing::debug;

use crate::analytics::{self, BasicStats, FullAnalytics};
use crate::models::Profile;

use super::sessions::SessionRepository;
use super::ServiceResult;

/// Basic stats for any authenticated tier
pub fn basic(repo: &dyn SessionRepository, user_id: &str) -> ServiceResult<BasicStats> {
    let sessions = repo.list_chronological(user_id)?;
    debug!(user_id, sessions = sessions.len(), "computing basic analytics");
    Ok(analytics::basic_stats(&sessions))
}

/// Full analytics for premium users. The tier gate runs before the session
/// fetch so rejected callers cost neither a query nor an aggregation pass.
pub fn full(repo: &dyn SessionRepository, profile: &Profile) -> ServiceResult<FullAnalytics> {
    analytics::require_premium(profile.plan)?;

    let sessions = repo.list_chronological(&profile.id)?;
    debug!(
        user_id = %profile.id,
        sessions = sessions.len(),
        "computing full analytics"
    );
    Ok(analytics::full_analytics(&sessions, profile.plan)?)
}
