use std::collections::HashMap;

use log::{debug, info};
use uuid::Uuid;

use crate::models::HoursEntry;

/// Per-organization, append-only record of volunteer hours.
///
/// Entries are kept in submission order and never aggregated on insert;
/// totals are computed on read.
#[derive(Debug, Default, Clone)]
pub struct HoursLedger {
    entries: HashMap<Uuid, Vec<HoursEntry>>,
    // organization ids in the order they first received hours
    order: Vec<Uuid>,
}

impl HoursLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `hours_text` and appends an entry. Text that is not a
    /// non-negative integer is dropped without error.
    pub fn add_hours(
        &mut self,
        organization_id: Uuid,
        volunteer_name: &str,
        hours_text: &str,
    ) -> Option<&HoursEntry> {
        let hours = match hours_text.parse::<u32>() {
            Ok(hours) => hours,
            Err(e) => {
                debug!(
                    "Ignoring hours input {:?} for organization {}: {}",
                    hours_text, organization_id, e
                );
                return None;
            }
        };

        info!(
            "Logging {} hours for {} in organization {}",
            hours, volunteer_name, organization_id
        );

        let entries = self.entries_mut(organization_id);
        entries.push(HoursEntry::new(volunteer_name, hours));
        entries.last()
    }

    /// Appends already-built entries, used for sample data.
    pub fn seed(&mut self, organization_id: Uuid, entries: impl IntoIterator<Item = HoursEntry>) {
        self.entries_mut(organization_id).extend(entries);
    }

    pub fn entries(&self, organization_id: Uuid) -> &[HoursEntry] {
        self.entries
            .get(&organization_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of a volunteer's hours within one organization
    pub fn total_for(&self, organization_id: Uuid, volunteer_name: &str) -> u64 {
        self.entries(organization_id)
            .iter()
            .filter(|e| e.volunteer_name == volunteer_name)
            .map(|e| u64::from(e.hours))
            .sum()
    }

    /// Per-organization totals for one volunteer, skipping organizations
    /// where they logged nothing.
    pub fn breakdown_for(&self, volunteer_name: &str) -> Vec<(Uuid, u64)> {
        self.order
            .iter()
            .filter(|id| {
                self.entries(**id)
                    .iter()
                    .any(|e| e.volunteer_name == volunteer_name)
            })
            .map(|id| (*id, self.total_for(*id, volunteer_name)))
            .collect()
    }

    fn entries_mut(&mut self, organization_id: Uuid) -> &mut Vec<HoursEntry> {
        if !self.entries.contains_key(&organization_id) {
            self.order.push(organization_id);
        }
        self.entries.entry(organization_id).or_default()
    }
}
