//! App config service
//!
//! Publicly readable key/value settings (ad frequency, free tier limits).
//! Writes are reserved for the admin surface; the API layer checks
//! `profile.is_admin` before calling `set_config`.

use std::collections::BTreeMap;

use crate::db::Database;
use crate::models::AppConfig;

use super::ServiceResult;

/// All config entries as a key -> value map (the public config payload)
pub fn get_config(db: &Database) -> ServiceResult<BTreeMap<String, serde_json::Value>> {
    let entries = db.with_conn(AppConfig::list)?;
    Ok(entries.into_iter().map(|e| (e.key, e.value)).collect())
}

/// Upsert one config entry, recording which admin changed it
pub fn set_config(
    db: &Database,
    key: &str,
    value: &serde_json::Value,
    updated_by: Option<&str>,
) -> ServiceResult<AppConfig> {
    Ok(db.with_conn(|conn| AppConfig::set(conn, key, value, updated_by))?)
}
