use cadence_core::repeat::{MatchMode, SearchScope, corpus_for, find_repeat, tail_window};
use cadence_core::window::{Occurrence, WindowIndex};
use cadence_core::{Alphabet, CyclicAnalyzer, SequenceStore, Symbol, encode};
use std::collections::HashMap;

const C: Symbol = Symbol(0);
const V: Symbol = Symbol(1);
const E: Symbol = Symbol(2);

fn all_windows(len: usize, symbols: u16) -> Vec<Vec<Symbol>> {
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                (0..symbols).map(move |s| {
                    let mut w = prefix.clone();
                    w.push(Symbol(s));
                    w
                })
            })
            .collect();
    }
    out
}

fn related_by_renaming(a: &[Symbol], b: &[Symbol]) -> bool {
    let mut forward: HashMap<Symbol, Symbol> = HashMap::new();
    let mut backward: HashMap<Symbol, Symbol> = HashMap::new();
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            *forward.entry(*x).or_insert(*y) == *y && *backward.entry(*y).or_insert(*x) == *x
        })
}

#[test]
fn test_encoding_matches_iff_renaming_exists() {
    let windows = all_windows(4, 3);
    assert_eq!(windows.len(), 81);
    for a in &windows {
        for b in &windows {
            assert_eq!(
                encode(a) == encode(b),
                related_by_renaming(a, b),
                "{:?} vs {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_encoding_example() {
    assert_eq!(encode(&[C, V, C]).to_string(), "ABA");
    assert_eq!(encode(&[V, C, V]).to_string(), "ABA");
    assert_eq!(encode(&[C, V, C]).len(), 3);
}

#[test]
fn test_snapshot_is_idempotent() {
    let mut store = SequenceStore::new(Alphabet::default());
    for code in ["C", "V", "E", "E"] {
        store.append_code(code).unwrap();
    }
    assert_eq!(store.snapshot(), store.snapshot());
}

#[test]
fn test_append_then_undo_restores_snapshot() {
    let mut store = SequenceStore::new(Alphabet::default());
    for code in ["C", "V", "E"] {
        store.append_code(code).unwrap();
    }
    for symbol in [C, V, E] {
        let before = store.snapshot();
        store.append(symbol).unwrap();
        assert_eq!(store.undo(), Some(symbol));
        assert_eq!(store.snapshot(), before);
    }
}

#[test]
fn test_clear_empties_store() {
    let mut store = SequenceStore::new(Alphabet::default());
    store.append(C).unwrap();
    store.clear();
    assert!(store.snapshot().is_empty());
}

#[test]
fn test_index_records_n_minus_w_followups() {
    for n in 0..20usize {
        let seq: Vec<Symbol> = (0..n).map(|i| Symbol(((i * 7) % 3) as u16)).collect();
        for w in 1..6 {
            let index = WindowIndex::build(&seq, w);
            assert_eq!(index.literal.total(), n.saturating_sub(w), "n={} w={}", n, w);
            assert_eq!(index.structural.total(), n.saturating_sub(w), "n={} w={}", n, w);
        }
    }
}

#[test]
fn test_repeat_prefers_earliest_duplicate() {
    let first = [C, V, E];
    let second = [C, V, E];
    let corpus = vec![
        Occurrence {
            offset: 0,
            window: &first,
            following: Some(V),
        },
        Occurrence {
            offset: 5,
            window: &second,
            following: Some(E),
        },
    ];

    for _ in 0..3 {
        for mode in [MatchMode::Literal, MatchMode::Structural, MatchMode::Near] {
            let found = find_repeat(&[C, V, E], &corpus, mode, 1).expect("match");
            assert_eq!(found.offset, 0);
            assert_eq!(found.following, Some(V));
        }
    }
}

#[test]
fn test_repeat_follow_up_comes_after_historical_match() {
    let seq = vec![C, V, E, V, C, V, E];
    let corpus = corpus_for(&seq, 3, SearchScope::Whole, 27);
    let current = tail_window(&seq, 3).unwrap();
    let found = find_repeat(current, &corpus, MatchMode::Literal, 0).unwrap();
    assert_eq!(found.offset, 0);
    assert_eq!(found.following, Some(V));
}

#[test]
fn test_no_repeat_found() {
    let seq = vec![C, C, C, V];
    let corpus = corpus_for(&seq, 2, SearchScope::Whole, 27);
    assert!(find_repeat(&[C, V], &corpus, MatchMode::Literal, 0).is_none());
    assert!(find_repeat(&[E, E], &corpus, MatchMode::Near, 1).is_none());
}

#[test]
fn test_cyclic_reports_dominant_position_only() {
    let mut seq = Vec::new();
    for cycle in 0..10 {
        let first = match cycle {
            8 => C,
            9 => E,
            _ => V,
        };
        let second = if cycle % 2 == 0 { C } else { V };
        let third = [C, V, E][cycle % 3];
        seq.extend([first, second, third]);
    }

    let stats = CyclicAnalyzer::default().analyze(&seq, 3);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].position, 0);
    assert_eq!(stats[0].symbol, V);
    assert_eq!(stats[0].frequency, 0.8);
    assert_eq!(stats[0].samples, 10);
    assert!(stats[0].p_value.unwrap() < 0.05);
}

#[test]
fn test_even_split_never_reported() {
    let seq: Vec<Symbol> = (0..40).map(|i| if (i / 2) % 2 == 0 { C } else { V }).collect();
    let analyzer = CyclicAnalyzer {
        min_samples: 5,
        significance: 0.05,
        dominance_threshold: 0.4,
    };
    assert!(analyzer.analyze(&seq, 2).is_empty());
}

fn block_cycle() -> Vec<Symbol> {
    let mut cycle = vec![C; 9];
    cycle.extend(vec![V; 9]);
    cycle.extend(vec![C; 9]);
    cycle
}

#[test]
fn test_full_cycle_fed_twice() {
    let cycle = block_cycle();
    let seq: Vec<Symbol> = cycle.iter().chain(cycle.iter()).copied().collect();
    assert_eq!(seq.len(), 54);

    let analyzer = CyclicAnalyzer {
        min_samples: 2,
        ..CyclicAnalyzer::default()
    };
    let stats = analyzer.analyze(&seq, 27);

    assert_eq!(stats.len(), 27);
    for (position, stat) in stats.iter().enumerate() {
        assert_eq!(stat.position, position);
        assert_eq!(stat.frequency, 1.0);
        assert_eq!(stat.symbol, cycle[position]);
    }
}

#[test]
fn test_full_cycle_with_default_sample_minimum() {
    let cycle = block_cycle();
    let analyzer = CyclicAnalyzer::default();

    let twice: Vec<Symbol> = cycle.repeat(2);
    assert!(analyzer.assess(&twice, 27).is_insufficient());

    let five: Vec<Symbol> = cycle.repeat(5);
    let stats = analyzer.analyze(&five, 27);
    assert_eq!(stats.len(), 27);
    assert!(stats.iter().all(|s| s.samples == 5 && s.frequency == 1.0));
}

fn position_zero_cycles(others: [Symbol; 2]) -> Vec<Symbol> {
    let mut seq = Vec::new();
    for cycle in 0..10 {
        let first = match cycle {
            8 => others[0],
            9 => others[1],
            _ => V,
        };
        seq.extend([first, [C, V, E][cycle % 3], [V, E, C][cycle % 3]]);
    }
    seq
}

#[test]
fn test_eight_of_ten_depends_on_how_the_rest_splits() {
    let analyzer = CyclicAnalyzer::default();

    let split = analyzer.analyze(&position_zero_cycles([C, E]), 3);
    assert_eq!(split.len(), 1);
    assert_eq!(split[0].position, 0);
    assert_eq!(split[0].frequency, 0.8);

    // Two categories only: chi-square 3.6 on one degree of freedom.
    let paired = position_zero_cycles([C, C]);
    assert!(analyzer.position_stat(&paired, 3, 0).is_none());
    assert!(analyzer.analyze(&paired, 3).is_empty());
}
