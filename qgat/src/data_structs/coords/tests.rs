use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rstest::{
    fixture,
    rstest,
};

use super::*;
use crate::data_structs::annotation::Feature;
use crate::data_structs::enums::{
    CoordConvention,
    Strand,
};
use crate::data_structs::typedef::{
    AttrMap,
    SeqName,
};
use crate::error::{
    FailureClass,
    RecordError,
};

fn iv(
    chr: &str,
    start: u64,
    end: u64,
) -> GenomicInterval {
    GenomicInterval::new(SeqName::from(chr), start, end)
}

fn feature(
    chr: &str,
    start: u64,
    end: u64,
    id: &str,
) -> Feature {
    Feature::new(iv(chr, start, end), Strand::None, AttrMap::new())
        .with_attribute("qtl_id", id)
}

fn ids(found: &[&Feature]) -> Vec<String> {
    found
        .iter()
        .map(|f| f.qtl_id().unwrap_or_default().to_string())
        .collect()
}

#[fixture]
fn features() -> Vec<Feature> {
    vec![
        feature("1", 150, 400, "d"),
        feature("1", 100, 200, "b"),
        feature("1", 100, 150, "a"),
        feature("1", 900, 1000, "e"),
        feature("2", 1, 5_000_000, "long"),
        feature("1", 100, 200, "c"),
    ]
}

// --- GenomicInterval ---

#[rstest]
#[case::one_based(CoordConvention::OneBasedClosed, 100, 200, (100, 200))]
#[case::zero_based(CoordConvention::ZeroBasedHalfOpen, 100, 200, (101, 200))]
#[case::single_base_bed(CoordConvention::ZeroBasedHalfOpen, 99, 100, (100, 100))]
fn test_from_source_shift(
    #[case] convention: CoordConvention,
    #[case] start: u64,
    #[case] end: u64,
    #[case] expected: (u64, u64),
) {
    let interval = GenomicInterval::from_source("1", start, end, convention).unwrap();
    assert_eq!((interval.start(), interval.end()), expected);
    assert_eq!(interval.chromosome(), "1");
}

#[rstest]
#[case(100, 100)]
#[case(200, 100)]
fn test_from_source_rejects_inverted(
    #[case] start: u64,
    #[case] end: u64,
) {
    let err = GenomicInterval::from_source(
        "1",
        start,
        end,
        CoordConvention::OneBasedClosed,
    )
    .unwrap_err();
    assert_eq!(err, RecordError::InvertedInterval { start, end });
    assert_eq!(err.class(), FailureClass::Invariant);
}

#[test]
fn test_width_and_display() {
    let interval = iv("X", 100, 200);
    assert_eq!(interval.width(), 101);
    assert_eq!(interval.to_string(), "X:100-200");
    assert_eq!(iv("X", 5, 5).width(), 1);
}

#[rstest]
#[case::touching_end(iv("1", 100, 200), iv("1", 200, 300), true)]
#[case::touching_start(iv("1", 100, 200), iv("1", 50, 100), true)]
#[case::adjacent(iv("1", 100, 200), iv("1", 201, 300), false)]
#[case::contained(iv("1", 100, 200), iv("1", 120, 130), true)]
#[case::other_chr(iv("1", 100, 200), iv("2", 100, 200), false)]
fn test_overlap_symmetric(
    #[case] a: GenomicInterval,
    #[case] b: GenomicInterval,
    #[case] expected: bool,
) {
    assert_eq!(a.overlaps(&b), expected);
    assert_eq!(b.overlaps(&a), expected);
}

#[test]
fn test_overlap_reflexive() {
    for interval in [iv("1", 1, 1), iv("1", 100, 200), iv("chrUn", 7, 70)] {
        assert!(interval.overlaps(&interval));
    }
}

#[test]
fn test_partial_ord() {
    assert!(iv("1", 100, 200) < iv("1", 100, 300));
    assert!(iv("1", 50, 400) < iv("1", 100, 101));
    assert_eq!(iv("1", 1, 2).partial_cmp(&iv("2", 1, 2)), None);
}

// --- ChromosomeIndex ---

#[rstest]
fn test_index_build(features: Vec<Feature>) {
    let index = ChromosomeIndex::build(features);
    assert_eq!(index.n_features(), 6);
    assert_eq!(index.n_chr(), 2);
    assert_eq!(index.chr_names(), vec!["1".to_string(), "2".to_string()]);
    assert!(index.contains_chromosome("1"));
    assert!(!index.contains_chromosome("chr1"));
}

#[rstest]
fn test_index_chromosome_features_sorted(features: Vec<Feature>) {
    let index = ChromosomeIndex::build(features);
    let keys = index
        .chromosome_features("1")
        .map(|f| (f.start(), f.end()))
        .collect::<Vec<_>>();
    assert_eq!(keys, vec![
        (100, 150),
        (100, 200),
        (100, 200),
        (150, 400),
        (900, 1000)
    ]);
    assert_eq!(index.chromosome_features("3").count(), 0);
}

#[rstest]
fn test_find_ordered(features: Vec<Feature>) {
    let index = ChromosomeIndex::build(features);
    let found = index.find(&iv("1", 150, 150));
    // Duplicates keep their input order
    assert_eq!(ids(&found), vec!["a", "b", "c", "d"]);
}

#[rstest]
fn test_find_closed_bounds(features: Vec<Feature>) {
    let index = ChromosomeIndex::build(features);
    assert_eq!(ids(&index.find(&iv("1", 400, 899))), vec!["d"]);
    assert_eq!(ids(&index.find(&iv("1", 401, 899))), Vec::<String>::new());
    assert_eq!(ids(&index.find(&iv("1", 1000, 1000))), vec!["e"]);
    assert_eq!(ids(&index.find(&iv("1", 1, 99))), Vec::<String>::new());
}

#[rstest]
fn test_find_long_feature(features: Vec<Feature>) {
    let index = ChromosomeIndex::build(features);
    assert_eq!(ids(&index.find(&iv("2", 4_999_999, 6_000_000))), vec!["long"]);
    assert_eq!(index.max_span("2"), Some(5_000_000));
}

#[rstest]
fn test_find_absent_chromosome(features: Vec<Feature>) {
    let index = ChromosomeIndex::build(features);
    assert!(index.find(&iv("chr1", 100, 200)).is_empty());
    assert!(ChromosomeIndex::new().find(&iv("1", 1, 2)).is_empty());
    assert!(ChromosomeIndex::new().is_empty());
}

#[rstest]
fn test_find_order_independent(features: Vec<Feature>) {
    let queries = [
        iv("1", 150, 150),
        iv("1", 1, 10_000),
        iv("2", 10, 20),
        iv("1", 950, 960),
    ];
    let reference = ChromosomeIndex::build(features.clone());

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut shuffled = features.clone();
        shuffled.shuffle(&mut rng);
        let index = ChromosomeIndex::build(shuffled);
        for query in queries.iter() {
            let expected = reference
                .find(query)
                .into_iter()
                .map(|f| (f.start(), f.end()))
                .collect::<Vec<_>>();
            let actual = index
                .find(query)
                .into_iter()
                .map(|f| (f.start(), f.end()))
                .collect::<Vec<_>>();
            assert_eq!(expected, actual);
        }
    }
}

#[test]
fn test_find_matches_bruteforce() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut starts = (1..400u64).collect::<Vec<_>>();
    starts.shuffle(&mut rng);
    let features = starts
        .iter()
        .map(|&s| feature("1", s, s + (s * 37) % 50, &s.to_string()))
        .collect::<Vec<_>>();
    let index = ChromosomeIndex::build(features.clone());

    for start in (0..460u64).step_by(13) {
        let query = iv("1", start, start + 5);
        let mut expected = features
            .iter()
            .filter(|f| f.interval().overlaps(&query))
            .map(|f| (f.start(), f.end()))
            .collect::<Vec<_>>();
        expected.sort();
        let actual = index
            .find(&query)
            .into_iter()
            .map(|f| (f.start(), f.end()))
            .collect::<Vec<_>>();
        assert_eq!(expected, actual, "query {query}");
    }
}
