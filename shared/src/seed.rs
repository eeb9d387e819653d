use crate::directory::Directory;
use crate::ledger::HoursLedger;
use crate::models::{HoursEntry, Organization};

/// Organizations shipped with the app
pub fn sample_organizations() -> Vec<Organization> {
    vec![
        Organization::new(
            "SAVE Animal Shelter",
            "Play with kittens and puppies while also helping to clean up the shelter - Located in Montgomery, New Jersey",
            "https://savehomelessanimals.org/",
            "SAVE3",
        ),
        Organization::new(
            "CIEL Assisted Living",
            "Contribute to your community by working with senior citizens - Located in Princeton, New Jersey",
            "https://cielseniorliving.com/community/ciel-of-princeton/",
            "CIEL1",
        ),
        Organization::new(
            "South Brunswick Public Library",
            "Help reorganize books and set up events at the South Brunswick Public Library! Located in Kendall Park, New Jersey",
            "https://sbpl.info/",
            "SBPL4",
        ),
    ]
}

fn sample_hours() -> Vec<HoursEntry> {
    vec![
        HoursEntry::new("Adhithi Uppalapati", 10),
        HoursEntry::new("Srihita Nuthalapati", 8),
    ]
}

/// Fills an empty directory and ledger with the sample data.
pub fn seed(directory: &mut Directory, ledger: &mut HoursLedger) {
    for organization in sample_organizations() {
        ledger.seed(organization.id, sample_hours());
        directory.insert(organization);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_directory_and_ledger() {
        let mut directory = Directory::new();
        let mut ledger = HoursLedger::new();
        seed(&mut directory, &mut ledger);

        assert_eq!(directory.len(), 3);
        let library = directory.find_by_join_code("sbpl4").unwrap();
        assert_eq!(library.name, "South Brunswick Public Library");
        assert!(library.sign_up_url().is_some());

        let entries = ledger.entries(library.id);
        assert_eq!(entries.len(), 2);
        assert_eq!(ledger.total_for(library.id, "Adhithi Uppalapati"), 10);
    }
}
