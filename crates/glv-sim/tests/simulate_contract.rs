//! Integration test: contract of `GlvModel::simulate`.
//!
//! Checks:
//! - sample times cover the half-open interval [0, t_end)
//! - the first row is the initial state, recorded before any step
//! - degenerate intervals give empty trajectories, dt = 0 is rejected
//! - repeated runs from the same state are bit-identical

use glv_sim::{GlvError, GlvModel, SimOptions};

fn competition_pair() -> GlvModel {
    let mut model = GlvModel::new(2).expect("valid species count");
    model.set_rates(&[1.0, 0.8]).unwrap();
    model.set_matrix(&[[-1.0, -0.4], [-0.3, -1.0]]).unwrap();
    model.set_state(&[0.2, 0.6]).unwrap();
    model
}

#[test]
fn two_samples_for_half_step() {
    let mut model = competition_pair();
    let initial = model.state().clone();

    let traj = model.simulate(1.0, 0.5).expect("simulation failed");

    assert_eq!(traj.t, vec![0.0, 0.5]);
    assert_eq!(traj.x.len(), 2);
    assert_eq!(traj.x[0], initial, "first row must be the untouched initial state");
    assert_ne!(traj.x[1], initial);
}

#[test]
fn model_is_left_after_the_last_unrecorded_step() {
    let mut model = competition_pair();
    let traj = model.simulate(1.0, 0.5).unwrap();

    let mut replay = competition_pair();
    replay.step(0.5);
    assert_eq!(traj.x[1], *replay.state());
    replay.step(0.5);
    assert_eq!(model.state(), replay.state());
}

#[test]
fn empty_interval_gives_empty_trajectory() {
    let mut model = competition_pair();
    let before = model.state().clone();

    let traj = model.simulate(0.0, 0.1).unwrap();
    assert!(traj.t.is_empty());
    assert!(traj.x.is_empty());
    assert!(traj.final_state().is_none());
    assert_eq!(model.state(), &before);
}

#[test]
fn zero_dt_is_rejected_without_mutation() {
    let mut model = competition_pair();
    let before = model.state().clone();

    let err = model.simulate(1.0, 0.0).unwrap_err();
    assert!(matches!(err, GlvError::InvalidArgument { .. }), "got {err}");
    assert_eq!(model.state(), &before);
}

#[test]
fn runs_are_deterministic() {
    let mut a = competition_pair();
    let mut b = competition_pair();

    let ta = a.simulate(5.0, 0.01).unwrap();
    let tb = b.simulate(5.0, 0.01).unwrap();

    assert_eq!(ta, tb);
    assert_eq!(ta.len(), 500);
}

#[test]
fn decimated_run_matches_full_run() {
    let full = competition_pair().simulate(1.0, 0.01).unwrap();
    let opts = SimOptions {
        t_end: 1.0,
        dt: 0.01,
        record_every: 10,
        ..SimOptions::default()
    };
    let sparse = competition_pair().simulate_with(&opts).unwrap();

    assert_eq!(sparse.len(), 10);
    for (k, (t, x)) in sparse.iter().enumerate() {
        assert_eq!(t, full.t[k * 10]);
        assert_eq!(x, &full.x[k * 10]);
    }
}
