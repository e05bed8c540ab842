//! Merge extracted names into an address list.

use tracing::debug;

use crate::address::Address;

/// Fill blank names from positionally aligned candidates.
///
/// Returns how many names were written. Nothing happens when the lengths
/// differ. Existing names are never replaced, and a candidate that contains
/// the address id, or an `@`-bearing piece of it, is rejected.
pub fn apply_names(addresses: &mut [Address], names: &[Option<String>]) -> usize {
    if addresses.len() != names.len() {
        debug!(
            addresses = addresses.len(),
            names = names.len(),
            "Name list not aligned with addresses, skipping"
        );
        return 0;
    }

    let mut filled = 0;
    for (address, candidate) in addresses.iter_mut().zip(names) {
        if address.has_name() {
            continue;
        }
        let Some(candidate) = candidate.as_deref().map(str::trim).filter(|c| !c.is_empty())
        else {
            continue;
        };
        if overlaps_id(candidate, &address.id) {
            debug!(id = %address.id, candidate, "Candidate repeats the address, skipping");
            continue;
        }
        address.name = Some(candidate.to_string());
        filled += 1;
    }

    filled
}

/// The candidate repeats the raw address, whole or in part.
///
/// A fragment of the id only counts when it carries an `@`; plain words such
/// as `Bob` for `bob@y.com` are real names.
fn overlaps_id(candidate: &str, id: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let id = id.to_lowercase();
    candidate.contains(&id) || (candidate.contains('@') && id.contains(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[Option<&str>]) -> Vec<Option<String>> {
        list.iter().map(|n| n.map(String::from)).collect()
    }

    #[test]
    fn fills_blank_names() {
        let mut addrs = vec![Address::new("jane@x.com"), Address::new("bob@y.com")];
        let filled = apply_names(&mut addrs, &names(&[Some(" Jane Doe "), Some("Bob")]));
        assert_eq!(filled, 2);
        assert_eq!(addrs[0].name.as_deref(), Some("Jane Doe"));
        assert_eq!(addrs[1].name.as_deref(), Some("Bob"));
    }

    #[test]
    fn never_overwrites_existing_name() {
        let mut addrs = vec![Address::new("jane@x.com").with_name("J. Doe")];
        assert_eq!(apply_names(&mut addrs, &names(&[Some("Jane Doe")])), 0);
        assert_eq!(addrs[0].name.as_deref(), Some("J. Doe"));
    }

    #[test]
    fn whitespace_name_counts_as_blank() {
        let mut addrs = vec![Address::new("jane@x.com").with_name("  ")];
        assert_eq!(apply_names(&mut addrs, &names(&[Some("Jane")])), 1);
        assert_eq!(addrs[0].name.as_deref(), Some("Jane"));
    }

    #[test]
    fn skips_blank_and_missing_candidates() {
        let mut addrs = vec![Address::new("a@x.com"), Address::new("b@x.com")];
        assert_eq!(apply_names(&mut addrs, &names(&[Some("   "), None])), 0);
        assert!(addrs.iter().all(|a| a.name.is_none()));
    }

    #[test]
    fn rejects_candidate_overlapping_id() {
        let mut addrs = vec![
            Address::new("jane@x.com"),
            Address::new("bob@y.com"),
            Address::new("carol@z.com"),
        ];
        let filled = apply_names(
            &mut addrs,
            &names(&[Some("JANE@X.COM"), Some("Bob <bob@y.com>"), Some("carol@z")]),
        );
        assert_eq!(filled, 0);
        assert!(addrs.iter().all(|a| a.name.is_none()));
    }

    #[test]
    fn name_that_is_part_of_local_part_is_kept() {
        let mut addrs = vec![Address::new("bob@y.com"), Address::new("al.smith@x.com")];
        let filled = apply_names(&mut addrs, &names(&[Some("Bob"), Some("Al")]));
        assert_eq!(filled, 2);
        assert_eq!(addrs[0].name.as_deref(), Some("Bob"));
        assert_eq!(addrs[1].name.as_deref(), Some("Al"));
    }

    #[test]
    fn length_mismatch_changes_nothing() {
        let mut addrs = vec![Address::new("jane@x.com")];
        let before = addrs.clone();
        assert_eq!(apply_names(&mut addrs, &names(&[Some("Jane"), Some("Bob")])), 0);
        assert_eq!(addrs, before);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let mut addrs = vec![Address::new("jane@x.com")];
        let candidates = names(&[Some("Jane")]);
        apply_names(&mut addrs, &candidates);
        let once = addrs.clone();
        assert_eq!(apply_names(&mut addrs, &candidates), 0);
        assert_eq!(addrs, once);
    }
}
