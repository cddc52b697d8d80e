//! View (profile) resolution

use crate::services::analytics::ReportingApi;
use crate::types::Result;

/// First view of the first property of the first account, or `None` as soon
/// as any level lists nothing.
pub fn resolve_profile_id(api: &dyn ReportingApi) -> Result<Option<String>> {
    let accounts = api.accounts()?;
    let Some(account) = accounts.first_id() else {
        tracing::warn!("no analytics accounts visible");
        return Ok(None);
    };

    let properties = api.web_properties(account)?;
    let Some(property) = properties.first_id() else {
        tracing::warn!(account, "account has no web properties");
        return Ok(None);
    };

    let profiles = api.profiles(account, property)?;
    let profile = profiles.first_id().map(str::to_string);
    match &profile {
        Some(id) => tracing::info!(account, property, profile = %id, "resolved view"),
        None => tracing::warn!(account, property, "web property has no views"),
    }

    Ok(profile)
}
