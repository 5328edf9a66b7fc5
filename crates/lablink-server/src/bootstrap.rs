//! Demo data seeding for the in-memory store.
//!
//! Gives a freshly started server something to serve: one organisation,
//! a few patient profiles, and a spread of pending and resulted samples.
//! Enabled with `bootstrap.demo_data = true` (or
//! `LABLINK__BOOTSTRAP__DEMO_DATA=true`).

use time::macros::datetime;
use tracing::info;
use uuid::Uuid;

use lablink_core::LabDateTime;
use lablink_db_memory::InMemoryStore;
use lablink_storage::{LabResult, Organisation, Profile, StoreError};

/// Fixed ids so the logged curl targets survive a restart.
const DEMO_ORGANISATION_ID: Uuid = Uuid::from_u128(0x0191_2c64_0000_7000_8000_000000000001);
const DEMO_PROFILE_IDS: [Uuid; 3] = [
    Uuid::from_u128(0x0191_2c64_0000_7000_8000_0000000000a1),
    Uuid::from_u128(0x0191_2c64_0000_7000_8000_0000000000a2),
    Uuid::from_u128(0x0191_2c64_0000_7000_8000_0000000000a3),
];

/// Seeds the demo organisation with its profiles and results.
///
/// Idempotent: a store that already holds any organisation is left
/// untouched.
///
/// # Errors
///
/// Returns an error if an insert is rejected, which only happens when the
/// seed data itself is inconsistent.
pub fn seed_demo_data(store: &InMemoryStore) -> Result<BootstrapStats, StoreError> {
    let mut stats = BootstrapStats::default();

    if store.organisation_count() > 0 {
        info!("Demo data already present, skipping");
        return Ok(stats);
    }

    store.insert_organisation(Organisation::new(
        DEMO_ORGANISATION_ID,
        "Demo Pathology Lab",
    ))?;
    stats.organisations += 1;

    let profiles = [
        Profile::new(DEMO_PROFILE_IDS[0], DEMO_ORGANISATION_ID, "Alice Smith"),
        Profile::new(DEMO_PROFILE_IDS[1], DEMO_ORGANISATION_ID, "Bob Jones"),
        Profile::new(DEMO_PROFILE_IDS[2], DEMO_ORGANISATION_ID, "Carol White"),
    ];
    for profile in profiles {
        store.insert_profile(profile)?;
        stats.profiles += 1;
    }

    for result in demo_results() {
        store.insert_result_entity(result)?;
        stats.results += 1;
    }

    info!(
        organisations = stats.organisations,
        profiles = stats.profiles,
        results = stats.results,
        organisation_id = %DEMO_ORGANISATION_ID,
        "Demo data seeded"
    );

    Ok(stats)
}

fn demo_results() -> Vec<LabResult> {
    let resulted = |sample: &str, kind: &str, profile: usize, activated, value: &str, reported| {
        LabResult::new(
            Uuid::new_v4(),
            sample,
            kind,
            LabDateTime::new(activated),
            DEMO_PROFILE_IDS[profile],
        )
        .with_result(value, LabDateTime::new(reported))
    };
    let pending = |sample: &str, kind: &str, profile: usize, activated| {
        LabResult::new(
            Uuid::new_v4(),
            sample,
            kind,
            LabDateTime::new(activated),
            DEMO_PROFILE_IDS[profile],
        )
    };

    vec![
        resulted(
            "S-1001",
            "blood",
            0,
            datetime!(2024-02-01 08:30 UTC),
            "negative",
            datetime!(2024-02-02 14:00 UTC),
        ),
        resulted(
            "S-1002",
            "covid-19",
            0,
            datetime!(2024-02-03 09:15 UTC),
            "positive",
            datetime!(2024-02-04 10:45 UTC),
        ),
        pending("S-1003", "urine", 0, datetime!(2024-02-05 11:00 UTC)),
        resulted(
            "S-2001",
            "blood",
            1,
            datetime!(2024-02-02 07:45 UTC),
            "positive",
            datetime!(2024-02-02 16:30 UTC),
        ),
        pending("S-2002", "covid-19", 1, datetime!(2024-02-06 13:20 UTC)),
        resulted(
            "S-3001",
            "blood",
            2,
            datetime!(2024-02-04 10:00 UTC),
            "negative",
            datetime!(2024-02-05 09:30 UTC),
        ),
        pending("S-3002", "allergy", 2, datetime!(2024-02-07 15:10 UTC)),
    ]
}

/// Counters for what the seeding pass inserted.
#[derive(Debug, Default)]
pub struct BootstrapStats {
    pub organisations: usize,
    pub profiles: usize,
    pub results: usize,
}

impl BootstrapStats {
    /// Total entities inserted.
    pub fn total(&self) -> usize {
        self.organisations + self.profiles + self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_once_and_skips_after() {
        let store = InMemoryStore::new();

        let first = seed_demo_data(&store).unwrap();
        assert_eq!(first.organisations, 1);
        assert_eq!(first.profiles, 3);
        assert_eq!(first.results, 7);
        assert_eq!(first.total(), 11);

        let second = seed_demo_data(&store).unwrap();
        assert_eq!(second.total(), 0);
        assert_eq!(store.result_count(), 7);
    }

    #[test]
    fn seeded_results_are_reachable_through_the_demo_organisation() {
        let store = InMemoryStore::new();
        seed_demo_data(&store).unwrap();

        assert_eq!(store.organisation_count(), 1);
        assert_eq!(store.profile_count(), 3);
        assert_eq!(store.result_count(), 7);
    }
}
