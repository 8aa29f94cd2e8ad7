//! End-to-end scenarios exercised only through the public API.

use acfind::{Algorithm, Config, Matcher, Pattern};

fn pat(id: usize, s: &str) -> Pattern {
    Pattern::new(id, s.as_bytes().to_vec())
}

fn matcher(patterns: &[(usize, &str)]) -> Matcher {
    let patterns: Vec<Pattern> = patterns.iter().map(|&(id, s)| pat(id, s)).collect();
    Matcher::new(Config {
        algorithm: Algorithm::AhoCorasickLeftmost,
        patterns: &patterns,
    })
    .unwrap()
}

fn ends(locs: &[acfind::Location]) -> Vec<(usize, usize)> {
    locs.iter().map(|l| (l.matched().id(), l.end())).collect()
}

#[test]
fn mixed_length_patterns_find_all_non_overlapping() {
    let m = matcher(&[(0, "bc"), (1, "ghi"), (2, "o p"), (3, "qr")]);
    let text = b"abc def ghi jkl mno pqr abc";
    let locs = m.all(text, 0).unwrap();
    assert_eq!(
        ends(&locs),
        vec![(0, 3), (1, 11), (2, 21), (3, 23), (0, 27)]
    );
}

#[test]
fn single_byte_pattern_matches_every_occurrence() {
    let m = matcher(&[(0, "a")]);
    let locs = m.all(b"aa", 0).unwrap();
    assert_eq!(ends(&locs), vec![(0, 1), (0, 2)]);
}

#[test]
fn overlapping_suffix_patterns_yield_only_the_leftmost_longest() {
    let m = matcher(&[(0, "qwerty"), (1, "werty"), (2, "erty")]);
    let locs = m.all(b"qwerty", 0).unwrap();
    assert_eq!(ends(&locs), vec![(0, 6)]);
}

#[test]
fn identical_patterns_tie_break_by_insertion_order() {
    let m = matcher(&[(0, "ab"), (1, "ab")]);
    let locs = m.all(b"abcd", 0).unwrap();
    assert_eq!(ends(&locs), vec![(0, 2)]);
}

#[test]
fn leftmost_shifts_when_earlier_candidate_fails_to_extend() {
    let m = matcher(&[(0, "abcd"), (1, "bce"), (2, "b")]);
    let locs = m.all(b"abce", 0).unwrap();
    assert_eq!(ends(&locs), vec![(1, 4)]);
}

#[test]
fn longest_overlapping_prefix_wins_at_the_same_start() {
    let m = matcher(&[(0, "a"), (1, "abcdef"), (2, "abc"), (3, "abcdefg")]);
    let loc = m.next(b"abcdefghz", 0).unwrap();
    assert_eq!((loc.matched().id(), loc.end()), (3, 7));
}

#[test]
fn starts_only_reports_a_match_beginning_exactly_at_the_offset() {
    let m = matcher(&[(0, "ab"), (1, "abcd")]);
    assert_eq!(m.starts(b"zabcd", 0), None);
    let got = m.starts(b"zabcd", 1).unwrap();
    assert_eq!((got.id(), got.len()), (1, 4));
}

#[test]
fn empty_text_and_boundary_offsets_are_accepted() {
    let m = matcher(&[(0, "a")]);
    assert_eq!(m.next(b"", 0), None);
    assert_eq!(m.all(b"", 0).unwrap(), vec![]);
    assert_eq!(m.next(b"a", 1), None);
    assert_eq!(m.all(b"a", 1).unwrap(), vec![]);
}

#[test]
fn duplicate_pattern_values_with_distinct_ids_are_permitted() {
    let m = matcher(&[(7, "x"), (9, "x")]);
    let loc = m.next(b"x", 0).unwrap();
    assert_eq!(loc.matched().id(), 7);
}

#[test]
fn non_ascii_bytes_are_matched_byte_exactly() {
    let patterns = vec![Pattern::new(0, "café".as_bytes().to_vec())];
    let m = Matcher::<u32>::new(Config {
        algorithm: Algorithm::AhoCorasickLeftmost,
        patterns: &patterns,
    })
    .unwrap();
    let text = "café café".as_bytes();
    let locs = m.all(text, 0).unwrap();
    assert_eq!(locs.len(), 2);
}

#[test]
fn narrow_node_id_width_matches_the_same_as_the_default() {
    let patterns = vec![pat(0, "ab"), pat(1, "abc")];
    let m = Matcher::<u8>::new(Config {
        algorithm: Algorithm::AhoCorasickLeftmost,
        patterns: &patterns,
    })
    .unwrap();
    let loc = m.next(b"xxabcx", 0).unwrap();
    assert_eq!((loc.matched().id(), loc.end()), (1, 5));
}

#[test]
fn an_undersized_node_id_type_is_rejected_with_an_error() {
    let patterns = vec![pat(0, &"a".repeat(300))];
    let err = Matcher::<u8>::new(Config {
        algorithm: Algorithm::AhoCorasickLeftmost,
        patterns: &patterns,
    })
    .unwrap_err();
    assert!(matches!(err, acfind::Error::NodeSpaceExhausted));
}
