//! Update timestamp policy
//!
//! A pizza's `updatedAt` is only stamped when a mutation happens in a later
//! wall-clock second than its creation. Mutations made during the creation
//! second (typically the field assignments of the create request itself)
//! leave `updatedAt` unset.

use chrono::{DateTime, SubsecRound, Utc};

/// Decide which `updatedAt` value a mutation at `now` should record.
///
/// Both instants are compared at whole-second precision. Returns `None` when
/// they fall within the same second, otherwise the instant to store, which is
/// never earlier than `created_at`.
pub fn touch(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if created_at.trunc_subsecs(0) == now.trunc_subsecs(0) {
        return None;
    }

    Some(now.max(created_at))
}
