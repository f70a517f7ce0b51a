//! Multi-step profile operations built on top of [`Store`].

use crate::{Error, Result, Store};
use beacon_types::Profile;
use tracing::info;

/// Save `profile`, then remove the record it replaces when the name changed.
///
/// The new record is written first; a failed write leaves the old record untouched.
pub fn save_replacing<S: Store + ?Sized>(
    store: &S,
    profile: &Profile,
    replaces: Option<&str>,
) -> Result<()> {
    store.save_profile(profile)?;

    if let Some(old_name) = replaces
        && old_name != profile.name
    {
        // A case-only rename on a case-insensitive store overwrites the old record in place.
        match store.load_profile(old_name) {
            Ok(old) if old.name == old_name => store.delete_profile(old_name)?,
            Ok(_) | Err(Error::ProfileNotFound(_)) => {}
            Err(err) => return Err(err),
        }
        info!(from = %old_name, to = %profile.name, "profile renamed");
    }
    Ok(())
}

/// Delete `name`; if it was the default, promote the first remaining profile.
///
/// Returns the name of the promoted profile, if any.
pub fn delete_and_promote<S: Store + ?Sized>(store: &S, name: &str) -> Result<Option<String>> {
    let was_default = store.load_profile(name)?.is_default;
    store.delete_profile(name)?;

    if !was_default {
        return Ok(None);
    }

    let remaining = store.list_profiles()?;
    let Some(next) = remaining.first() else {
        return Ok(None);
    };

    store.set_default(&next.name)?;
    info!(profile = %next.name, "promoted to default");
    Ok(Some(next.name.clone()))
}
