use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::ReminderSettings;
use crate::models::Item;

/// Staleness policy for listings
///
/// A listing untouched for one of `reminder_days` earns a reminder to its
/// owner; once untouched for `hide_after_days` it stops appearing in
/// rankings. Listings without an `updatedAt` are never reminded or hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPolicy {
    reminder_days: Vec<u32>,
    hide_after_days: u32,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self::new(vec![10, 20, 30, 45], 45)
    }
}

impl From<&ReminderSettings> for ReminderPolicy {
    fn from(settings: &ReminderSettings) -> Self {
        Self::new(settings.reminder_days.clone(), settings.hide_after_days)
    }
}

impl ReminderPolicy {
    pub fn new(mut reminder_days: Vec<u32>, hide_after_days: u32) -> Self {
        reminder_days.sort_unstable();
        reminder_days.dedup();
        Self {
            reminder_days,
            hide_after_days,
        }
    }

    pub fn reminder_days(&self) -> &[u32] {
        &self.reminder_days
    }

    pub fn hide_after_days(&self) -> u32 {
        self.hide_after_days
    }

    /// Whole days since the update, zero for updates in the future
    pub fn days_since_update(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        let days = (now - updated_at).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    pub fn is_hidden(&self, item: &Item, now: DateTime<Utc>) -> bool {
        match item.updated_at {
            Some(updated_at) => Self::days_since_update(updated_at, now) >= self.hide_after_days,
            None => false,
        }
    }

    /// Highest threshold reached that has not been sent yet
    ///
    /// Lower thresholds skipped over (e.g. after downtime) are not sent late.
    pub fn due_reminder(&self, item: &Item, now: DateTime<Utc>, sent: &BTreeSet<u32>) -> Option<u32> {
        let updated_at = item.updated_at?;
        let age = Self::days_since_update(updated_at, now);

        let reached = self
            .reminder_days
            .iter()
            .copied()
            .filter(|day| *day <= age)
            .max()?;

        if sent.iter().any(|day| *day >= reached) {
            None
        } else {
            Some(reached)
        }
    }
}

/// A reminder that should be delivered to a listing owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub listing_id: String,
    pub days_since_update: u32,
}

/// In-memory record of reminders already produced
///
/// Markers belong to one `updatedAt` value; touching the listing starts a
/// fresh reminder cycle.
#[derive(Debug, Clone, Default)]
pub struct SentMarkers {
    markers: HashMap<String, (DateTime<Utc>, BTreeSet<u32>)>,
}

impl SentMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thresholds already sent for the listing's current update cycle
    pub fn sent_for(&self, listing_id: &str, updated_at: DateTime<Utc>) -> BTreeSet<u32> {
        match self.markers.get(listing_id) {
            Some((cycle, days)) if *cycle == updated_at => days.clone(),
            _ => BTreeSet::new(),
        }
    }

    pub fn mark(&mut self, listing_id: &str, updated_at: DateTime<Utc>, day: u32) {
        let entry = self
            .markers
            .entry(listing_id.to_string())
            .or_insert_with(|| (updated_at, BTreeSet::new()));

        if entry.0 != updated_at {
            *entry = (updated_at, BTreeSet::new());
        }
        entry.1.insert(day);
    }

    pub fn clear(&mut self, listing_id: &str) {
        self.markers.remove(listing_id);
    }

    /// Forget listings outside `listing_ids`
    pub fn retain_ids(&mut self, listing_ids: &HashSet<&str>) {
        self.markers.retain(|id, _| listing_ids.contains(id.as_str()));
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
