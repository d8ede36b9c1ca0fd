//! Unit tests for fd-registry.

use std::io::Cursor;

use fd_core::{CraftId, DestinationId, Pose, SiteTags, Vec2};

use crate::{
    DestinationRegistry, DestinationSpec, RegistryBuilder, RegistryError, load_destinations_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ALPHA: CraftId = CraftId(0);
const BRAVO: CraftId = CraftId(1);

fn pad(x: f32) -> Pose {
    Pose::new(Vec2::new(x, 0.0), 0.0)
}

/// LZ1, LZ2 (both designatable, planetary) and a carrier hangar.
fn three_destinations() -> (DestinationRegistry, DestinationId, DestinationId, DestinationId) {
    let mut b = RegistryBuilder::new();
    let lz1 = b.add(DestinationSpec::new("LZ1", pad(10.0)).site(SiteTags::PLANET).designatable());
    let lz2 = b.add(DestinationSpec::new("LZ2", pad(20.0)).site(SiteTags::PLANET).designatable());
    let hangar = b.add(DestinationSpec::new("Hangar", pad(0.0)).site(SiteTags::CARRIER).hijack_target());
    (b.build().unwrap(), lz1, lz2, hangar)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let (reg, lz1, lz2, hangar) = three_destinations();
        assert_eq!((lz1, lz2, hangar), (DestinationId(0), DestinationId(1), DestinationId(2)));
        assert_eq!(reg.get(lz2).unwrap().name, "LZ2");
        assert_eq!(reg.find_by_name("Hangar").unwrap().id, hangar);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut b = RegistryBuilder::new();
        b.add(DestinationSpec::new("LZ1", pad(0.0)));
        b.add(DestinationSpec::new("LZ1", pad(1.0)));
        assert!(matches!(b.build(), Err(RegistryError::DuplicateName(n)) if n == "LZ1"));
    }

    #[test]
    fn two_primaries_rejected() {
        let mut b = RegistryBuilder::new();
        b.add(DestinationSpec::new("LZ1", pad(0.0)).primary());
        b.add(DestinationSpec::new("LZ2", pad(1.0)).primary());
        assert!(matches!(b.build(), Err(RegistryError::PrimaryExists(DestinationId(0)))));
    }

    #[test]
    fn primary_spec_is_designatable() {
        let mut b = RegistryBuilder::new();
        let lz = b.add(DestinationSpec::new("LZ1", pad(0.0)).primary());
        let reg = b.build().unwrap();
        assert!(reg.get(lz).unwrap().designatable);
        assert_eq!(reg.primary(), Some(lz));
    }
}

// ── Claims ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod claims {
    use super::*;

    #[test]
    fn claim_sets_both_sides() {
        let (mut reg, lz1, _, _) = three_destinations();
        assert_eq!(reg.claim(lz1, ALPHA).unwrap(), None);
        assert_eq!(reg.claimed_by(lz1), Some(ALPHA));
        assert_eq!(reg.destination_of(ALPHA), Some(lz1));
        assert!(reg.is_consistent());
    }

    #[test]
    fn reclaim_moves_claim() {
        let (mut reg, lz1, lz2, _) = three_destinations();
        reg.claim(lz1, ALPHA).unwrap();
        assert_eq!(reg.claim(lz2, ALPHA).unwrap(), Some(lz1));
        assert_eq!(reg.claimed_by(lz1), None);
        assert_eq!(reg.claimed_by(lz2), Some(ALPHA));
        assert_eq!(reg.claim_count(), 1);
        assert!(reg.is_consistent());
    }

    #[test]
    fn claim_held_by_other_craft_fails_without_changes() {
        let (mut reg, lz1, lz2, _) = three_destinations();
        reg.claim(lz2, BRAVO).unwrap();
        reg.claim(lz1, ALPHA).unwrap();

        let err = reg.claim(lz2, ALPHA).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyClaimed { destination, holder }
            if destination == lz2 && holder == BRAVO));
        assert_eq!(reg.claimed_by(lz1), Some(ALPHA));
        assert_eq!(reg.claimed_by(lz2), Some(BRAVO));
        assert!(reg.is_consistent());
    }

    #[test]
    fn reclaiming_own_destination_is_noop() {
        let (mut reg, lz1, _, _) = three_destinations();
        reg.claim(lz1, ALPHA).unwrap();
        assert_eq!(reg.claim(lz1, ALPHA).unwrap(), None);
        assert_eq!(reg.claimed_by(lz1), Some(ALPHA));
    }

    #[test]
    fn unknown_destination_rejected() {
        let (mut reg, ..) = three_destinations();
        assert!(matches!(
            reg.claim(DestinationId(99), ALPHA),
            Err(RegistryError::DestinationNotFound(DestinationId(99)))
        ));
        assert_eq!(reg.claim_count(), 0);
    }

    #[test]
    fn release_clears_and_is_idempotent() {
        let (mut reg, lz1, _, _) = three_destinations();
        reg.claim(lz1, ALPHA).unwrap();
        assert_eq!(reg.release(ALPHA), Some(lz1));
        assert_eq!(reg.claimed_by(lz1), None);
        assert_eq!(reg.release(ALPHA), None);
        assert!(reg.is_consistent());
    }

    #[test]
    fn released_destination_can_be_taken_by_another_craft() {
        let (mut reg, lz1, lz2, _) = three_destinations();
        reg.claim(lz1, ALPHA).unwrap();
        reg.claim(lz2, ALPHA).unwrap();
        reg.claim(lz1, BRAVO).unwrap();
        assert_eq!(reg.claimed_by(lz1), Some(BRAVO));
        assert_eq!(reg.claimed_by(lz2), Some(ALPHA));
    }
}

// ── Listing and primaries ─────────────────────────────────────────────────────

#[cfg(test)]
mod listing {
    use super::*;

    #[test]
    fn list_available_in_creation_order() {
        let (reg, ..) = three_destinations();
        let names: Vec<&str> = reg.list_available().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["LZ1", "LZ2", "Hangar"]);
    }

    #[test]
    fn candidates_skip_claimed_and_undesignatable() {
        let (mut reg, lz1, lz2, _) = three_destinations();
        reg.claim(lz1, ALPHA).unwrap();
        let ids: Vec<DestinationId> = reg.find_primary_candidates().map(|d| d.id).collect();
        assert_eq!(ids, vec![lz2]);
    }

    #[test]
    fn candidates_are_stable_across_calls() {
        let (reg, ..) = three_destinations();
        let first: Vec<DestinationId> = reg.find_primary_candidates().map(|d| d.id).collect();
        let second: Vec<DestinationId> = reg.find_primary_candidates().map(|d| d.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn hijack_destinations_filtered() {
        let (reg, _, _, hangar) = three_destinations();
        let ids: Vec<DestinationId> = reg.hijack_destinations().map(|d| d.id).collect();
        assert_eq!(ids, vec![hangar]);
    }

    #[test]
    fn designate_only_one_primary() {
        let (mut reg, lz1, lz2, _) = three_destinations();
        reg.designate_primary(lz1).unwrap();
        assert!(matches!(reg.designate_primary(lz2), Err(RegistryError::PrimaryExists(p)) if p == lz1));
        assert_eq!(reg.primary_count(), 1);
        assert!(reg.find_primary_candidates().all(|d| d.id != lz1));
    }

    #[test]
    fn undesignatable_rejected() {
        let (mut reg, _, _, hangar) = three_destinations();
        assert!(matches!(reg.designate_primary(hangar), Err(RegistryError::NotDesignatable(_))));
        assert_eq!(reg.primary(), None);
    }

    #[test]
    fn clear_primary_allows_new_designation() {
        let (mut reg, lz1, lz2, _) = three_destinations();
        reg.designate_primary(lz1).unwrap();
        assert_eq!(reg.clear_primary(), Some(lz1));
        reg.designate_primary(lz2).unwrap();
        assert_eq!(reg.primary(), Some(lz2));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const MANIFEST: &str = "\
name,x,y,rotation,site,designatable,hijack,primary\n\
Hangar A,0.0,0.0,0.0,carrier,false,true,false\n\
LZ1 Nexus,120.5,44.0,0.0,planet,true,false,false\n\
LZ2 Caves,-80.0,12.5,1.5708,planet,true,false,true\n\
";

    #[test]
    fn loads_rows_in_order() {
        let reg = load_destinations_reader(Cursor::new(MANIFEST)).unwrap();
        assert_eq!(reg.len(), 3);
        let hangar = reg.get(DestinationId(0)).unwrap();
        assert_eq!(hangar.name, "Hangar A");
        assert_eq!(hangar.site, SiteTags::CARRIER);
        assert!(hangar.hijack_target);

        let lz1 = reg.get(DestinationId(1)).unwrap();
        assert_eq!(lz1.pose.position, Vec2::new(120.5, 44.0));
        assert!(lz1.designatable);
        assert_eq!(reg.primary(), Some(DestinationId(2)));
    }

    #[test]
    fn bad_site_is_parse_error() {
        let csv = "name,x,y,rotation,site,designatable,hijack,primary\nX,0,0,0,moon,false,false,false\n";
        assert!(matches!(load_destinations_reader(Cursor::new(csv)), Err(RegistryError::Parse(_))));
    }

    #[test]
    fn bad_number_is_parse_error() {
        let csv = "name,x,y,rotation,site,designatable,hijack,primary\nX,abc,0,0,none,false,false,false\n";
        assert!(matches!(load_destinations_reader(Cursor::new(csv)), Err(RegistryError::Parse(_))));
    }
}

// ── Claim table properties ────────────────────────────────────────────────────

#[cfg(test)]
mod claim_properties {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        Claim(u32, u32),
        Release(u32),
        Designate(u32),
        ClearPrimary,
    }

    /// Destination ids 0..=3 (3 does not exist), craft ids 0..=3.
    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u32..4, 0u32..4).prop_map(|(d, c)| Op::Claim(d, c)),
            2 => (0u32..4).prop_map(Op::Release),
            1 => (0u32..4).prop_map(Op::Designate),
            1 => Just(Op::ClearPrimary),
        ]
    }

    proptest! {
        /// Any sequence of claims and releases keeps the two tables exact
        /// inverses and agrees with a plain destination → craft map.
        #[test]
        fn tables_stay_inverse(ops in prop::collection::vec(op(), 0..64)) {
            let (mut reg, ..) = three_destinations();
            let mut held: BTreeMap<u32, u32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Claim(d, c) => {
                        let holder = held.get(&d).copied();
                        let accepted = d < 3 && holder.is_none_or(|h| h == c);
                        let result = reg.claim(DestinationId(d), CraftId(c));
                        prop_assert_eq!(result.is_ok(), accepted);
                        if accepted {
                            held.retain(|_, craft| *craft != c);
                            held.insert(d, c);
                        }
                    }
                    Op::Release(c) => {
                        let had = held.iter().find(|(_, craft)| **craft == c).map(|(d, _)| *d);
                        prop_assert_eq!(reg.release(CraftId(c)), had.map(DestinationId));
                        held.retain(|_, craft| *craft != c);
                    }
                    Op::Designate(d) => {
                        let _ = reg.designate_primary(DestinationId(d));
                    }
                    Op::ClearPrimary => {
                        reg.clear_primary();
                    }
                }

                prop_assert!(reg.is_consistent());
                prop_assert!(reg.primary_count() <= 1);
                prop_assert_eq!(reg.claim_count(), held.len());
                for d in 0..3 {
                    prop_assert_eq!(
                        reg.claimed_by(DestinationId(d)),
                        held.get(&d).copied().map(CraftId)
                    );
                }
            }
        }
    }
}
