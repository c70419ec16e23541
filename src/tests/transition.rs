use crate::{
    prelude::{Config, Error, RangeObservation, Solver, Vector2, Vector3},
    tests::init_logger,
};

fn satellites() -> [Vector3<f64>; 2] {
    [
        Vector3::new(8738.36, -2259.89, 4305.11),
        Vector3::new(9083.58, 2519.1, -3338.07),
    ]
}

const RANGES_KM: [[f64; 2]; 2] = [[5462.54, 4996.42], [5506.08, 4960.0]];

#[test]
fn drifting_receiver() {
    init_logger();

    let solver = Solver::new(&Config::default()).unwrap();
    let approx_rad = (0.5_f64.to_radians(), 0.5_f64.to_radians());

    let estimate = solver
        .transition_estimate(approx_rad, &satellites(), &RANGES_KM)
        .unwrap();

    let [p0, p1, p2] = estimate.fixes;
    assert_eq!(p0, Vector2::new(approx_rad.0, approx_rad.1));

    // receiver drifts southward, close to the equator
    assert!(p1[0].to_degrees().abs() < 1.0E-2);
    assert!((p1[1].to_degrees() - 0.5004).abs() < 1.0E-3);
    assert!((p2[0].to_degrees() + 0.5001).abs() < 1.0E-3);
    assert!((p2[1].to_degrees() - 0.4999).abs() < 1.0E-3);

    // matrix maps each fix onto the next one
    assert!((estimate.matrix * p0 - p1).norm() < 1.0E-12);
    assert!((estimate.matrix * p1 - p2).norm() < 1.0E-12);
    assert!((estimate.predict(&p0, 2) - p2).norm() < 1.0E-12);
}

#[test]
fn fixes_are_chained() {
    let solver = Solver::new(&Config::default()).unwrap();
    let approx_rad = (0.5_f64.to_radians(), 0.5_f64.to_radians());
    let satellites = satellites();

    let estimate = solver
        .transition_estimate(approx_rad, &satellites, &RANGES_KM)
        .unwrap();

    // P1 is the surface fix from P0
    let observations = satellites
        .iter()
        .zip(RANGES_KM[0].iter())
        .map(|(sat, range)| RangeObservation::new(*sat, *range))
        .collect::<Vec<_>>();

    let p1 = solver.surface_fix(approx_rad, &observations).unwrap();
    assert!(p1.converged);
    assert_eq!(p1.estimate.latitude_rad, estimate.fixes[1][0]);
    assert_eq!(p1.estimate.longitude_rad, estimate.fixes[1][1]);

    // P2 is the surface fix from P1
    let observations = satellites
        .iter()
        .zip(RANGES_KM[1].iter())
        .map(|(sat, range)| RangeObservation::new(*sat, *range))
        .collect::<Vec<_>>();

    let p2 = solver
        .surface_fix(
            (p1.estimate.latitude_rad, p1.estimate.longitude_rad),
            &observations,
        )
        .unwrap();
    assert!(p2.converged);
    assert_eq!(p2.estimate.latitude_rad, estimate.fixes[2][0]);
    assert_eq!(p2.estimate.longitude_rad, estimate.fixes[2][1]);
}

#[test]
fn singular_transition() {
    let solver = Solver::new(&Config::default()).unwrap();

    // starting at the origin, P0 and P1 can't span the plane
    assert_eq!(
        solver.transition_estimate((0.0, 0.0), &satellites(), &RANGES_KM),
        Err(Error::SingularTransition)
    );
}

#[test]
fn singular_fix() {
    let solver = Solver::new(&Config::default()).unwrap();
    let sat = Vector3::new(8738.36, -2259.89, 4305.11);

    assert_eq!(
        solver.transition_estimate(
            (0.5_f64.to_radians(), 0.5_f64.to_radians()),
            &[sat, sat],
            &RANGES_KM
        ),
        Err(Error::SingularSystem { iteration: 1 })
    );
}
