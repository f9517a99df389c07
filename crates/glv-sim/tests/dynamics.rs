//! Integration test: long-run behaviour of known GLV systems.
//!
//! - pure exponential growth converges to the analytic solution as dt shrinks
//! - two competitors with weak cross-competition settle at the interior
//!   fixed point x* = -A⁻¹ r
//! - an ungrounded predator dies out without prey

use glv_core::Tolerances;
use glv_sim::GlvModel;
use nalgebra::{DMatrix, DVector};

fn exponential_error(dt: f64) -> f64 {
    let mut model = GlvModel::new(1).unwrap();
    model.set_state(&[1.0]).unwrap();
    model.set_rates(&[1.0]).unwrap();
    model.set_matrix(&[[0.0]]).unwrap();
    model.simulate(1.0, dt).unwrap();
    (model.state()[0] - 1.0_f64.exp()).abs()
}

#[test]
fn euler_error_is_first_order() {
    let coarse = exponential_error(0.01);
    let fine = exponential_error(0.001);
    let ratio = coarse / fine;
    println!("Euler error: dt=0.01 -> {coarse:e}, dt=0.001 -> {fine:e}, ratio {ratio}");
    assert!(ratio > 8.0 && ratio < 12.0, "expected ~10x, got {ratio}");
}

#[test]
fn weak_competition_reaches_interior_equilibrium() {
    let rates = [1.0, 0.8];
    let rows = [[-1.0, -0.4], [-0.3, -1.0]];

    let mut model = GlvModel::new(2).unwrap();
    model.set_rates(&rates).unwrap();
    model.set_matrix(&rows).unwrap();
    model.set_state(&[0.2, 0.6]).unwrap();

    let traj = model.simulate(60.0, 0.01).unwrap();

    let a = DMatrix::from_row_slice(2, 2, &[-1.0, -0.4, -0.3, -1.0]);
    let r = DVector::from_column_slice(&rates);
    let x_star = -a.lu().solve(&r).expect("A is invertible");

    let last = traj.final_state().expect("non-empty run");
    let tol = Tolerances::new(1e-6, 1e-6);
    for i in 0..2 {
        assert!(
            tol.close(last[i], x_star[i]),
            "species {i}: got {}, expected {}",
            last[i],
            x_star[i]
        );
    }

    for (i, x) in traj.x.iter().enumerate() {
        assert!(x.iter().all(|v| *v > 0.0), "abundance must stay positive at sample {i}");
    }
}

#[test]
fn predator_without_prey_decays() {
    // species 0: prey (absent), species 1: predator with negative intrinsic rate
    let mut model = GlvModel::new(2).unwrap();
    model.set_rates(&[1.0, -0.5]).unwrap();
    model.set_matrix(&[[-0.1, -1.0], [0.5, 0.0]]).unwrap();
    model.set_state(&[0.0, 1.0]).unwrap();

    let traj = model.simulate(10.0, 0.01).unwrap();
    let predator = traj.species_series(1).unwrap();

    assert!(predator.windows(2).all(|w| w[1] < w[0]));
    assert_eq!(traj.species_series(0).unwrap(), vec![0.0; traj.len()]);
    // (1 - 0.005)^999
    let expected = 0.995_f64.powi(999);
    assert!(Tolerances::default().close(*predator.last().unwrap(), expected));
}
