use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::taxonomy::regions;

use super::CustomGrouping;

pub const RANDOM_GROUP_NAMES: [&str; 4] = ["Norra", "Södra", "Östra", "Västra"];

/// Split all counties into four groups of near-equal size, reproducibly from `seed`.
pub fn random_groups(seed: u64) -> CustomGrouping {
    random_groups_with(&mut StdRng::seed_from_u64(seed))
}

/// Shuffle the counties and slice them into four contiguous runs whose sizes differ by
/// at most one.
pub fn random_groups_with<R: Rng + ?Sized>(rng: &mut R) -> CustomGrouping {
    let mut names = regions().iter().map(|region| region.name).collect::<Vec<_>>();
    names.shuffle(rng);

    let parts = RANDOM_GROUP_NAMES.len();
    let (base, extra) = (names.len() / parts, names.len() % parts);

    let mut grouping = CustomGrouping::new();
    let mut start = 0;
    for (i, label) in RANDOM_GROUP_NAMES.iter().enumerate() {
        let end = start + base + usize::from(i < extra);
        grouping = grouping.define_group(*label, &names[start..end]);
        start = end;
    }
    grouping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::Grouping;

    #[test]
    fn covers_every_county_exactly_once() {
        for seed in 0..20 {
            let coverage = random_groups(seed).coverage();
            assert!(coverage.is_complete_partition(), "seed {seed}: {coverage:?}");
        }
    }

    #[test]
    fn sizes_differ_by_at_most_one() {
        let grouping = random_groups(7);
        let sizes = grouping.labels().iter().map(|l| grouping.members(l).len()).collect::<Vec<_>>();
        assert_eq!(sizes.iter().sum::<usize>(), 21);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
        assert_eq!(grouping.labels(), RANDOM_GROUP_NAMES);
    }

    #[test]
    fn same_seed_same_groups() {
        assert_eq!(random_groups(42), random_groups(42));
    }
}
