use super::*;

/// ln(0.7 / 0.3) is the occupied increment.
#[test]
fn test_hit_log_odds() {
  let l = log_odds(P_HIT);
  assert!((l - 0.847_297_860_387_203_8).abs() < 1e-12, "got {}", l);
}

/// The miss increment must be negative (free evidence).
#[test]
fn test_miss_log_odds_is_negative() {
  let l = log_odds(P_MISS);
  assert!(l < 0.0);
  assert!((l - (-0.405_465_108_108_164_4)).abs() < 1e-12, "got {}", l);
}

/// probability(log_odds(p)) == p
#[test]
fn test_probability_roundtrip() {
  for p in [0.1, 0.25, 0.5, 0.7, 0.97] {
    let back = probability(log_odds(p));
    assert!((back - p).abs() < 1e-12, "p = {} came back as {}", p, back);
  }
}

/// The neutral prior corresponds to p = 0.5.
#[test]
fn test_prior_is_half() {
  assert_eq!(probability(LOG_ODDS_PRIOR), 0.5);
}

#[test]
fn test_default_sweep_is_ascending() {
  assert!(DEFAULT_DEPTH_SWEEP.windows(2).all(|w| w[0] < w[1]));
  assert!(DEFAULT_DEPTH_SWEEP.iter().all(|&d| d > 0 && d <= MAX_OCTREE_DEPTH));
}
