//! Position solver
use itertools::Itertools;
use log::{debug, info, warn};
use nalgebra::Vector2;

use crate::{
    frame::{Frame, Spherical},
    navigation::{
        doppler::DopplerRange,
        range::{check_observations, FreeRange, SurfaceRange},
        DopplerObservation, Navigation, RangeObservation, SolveResult, TransitionEstimate,
    },
    orbit::Propagator,
    position::Position,
    prelude::{Config, DVector, Epoch, Error, Satellite, Vector3},
    time::minutes_since_equinox,
    visibility::is_visible,
};

/// [Solver] resolves receiver positions from range or range-rate
/// observations, and predicts satellite visibility.
/// [Solver] holds no state other than its [Config]: every method
/// is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Solver {
    /// Solver parametrization, only modified through [Self::set_config]
    cfg: Config,
    /// Orbit [Propagator]
    propagator: Propagator,
}

impl Solver {
    /// Creates a new [Solver] from [Config] preset, that is verified here.
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        cfg.validate()?;

        info!(
            "solver: {} iterations max, tolerance={:.3E}, {} rotation, {} horizon",
            cfg.max_iterations, cfg.tolerance, cfg.convention, cfg.horizon
        );

        Ok(Self {
            cfg: cfg.clone(),
            propagator: Propagator::new(cfg),
        })
    }

    /// Returns [Config] in use
    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    /// Replaces the [Config] in use, which is verified first.
    /// On error, the current [Config] is preserved.
    pub fn set_config(&mut self, cfg: &Config) -> Result<(), Error> {
        *self = Self::new(cfg)?;
        Ok(())
    }

    /// Returns the orbit [Propagator] in use
    pub fn propagator(&self) -> &Propagator {
        &self.propagator
    }

    /// Identifiers of the [Satellite]s visible from `observer` at [Epoch].
    /// See [Self::visible_satellites_at].
    pub fn visible_satellites(
        &self,
        observer: &Position,
        t: Epoch,
        satellites: &[Satellite],
    ) -> Result<Vec<u8>, Error> {
        let minutes = minutes_since_equinox(t);
        debug!("{}: {} minutes since vernal equinox", t, minutes);
        self.visible_satellites_at(observer, minutes as f64, satellites)
    }

    /// Identifiers of the [Satellite]s visible from `observer`, `minutes` after
    /// the vernal equinox, in roster order. Satellites are propagated into the
    /// observer [Frame], which must either be [Frame::EarthFixed] or [Frame::Equatorial].
    pub fn visible_satellites_at(
        &self,
        observer: &Position,
        minutes: f64,
        satellites: &[Satellite],
    ) -> Result<Vec<u8>, Error> {
        let frame = observer.frame();
        if frame == Frame::Orbital {
            return Err(Error::UnsupportedFrame(frame));
        }

        let observer_km = observer.rectangular();

        Ok(satellites
            .iter()
            .filter(|sat| {
                let sat_km = self.propagator.position(sat, minutes, frame);
                is_visible(
                    &observer_km,
                    &sat_km,
                    self.cfg.horizon,
                    self.cfg.earth.radius_km,
                )
            })
            .map(|sat| sat.prn)
            .collect_vec())
    }

    /// Surface fix: refines (latitude, longitude) in radians of a receiver
    /// lying on the Earth sphere, from exactly 2 [RangeObservation]s
    /// expressed in the Earth fixed frame.
    pub fn surface_fix(
        &self,
        approx_rad: (f64, f64),
        observations: &[RangeObservation],
    ) -> Result<SolveResult<Spherical>, Error> {
        let model = SurfaceRange {
            radius_km: self.cfg.earth.radius_km,
            observations,
        };

        check_observations(2, observations.iter().map(|obs| obs.range_km))?;

        let x0 = DVector::from_row_slice(&[approx_rad.0, approx_rad.1]);
        let solution = Navigation::new(&self.cfg).resolve(&model, x0)?;

        let radius_km = self.cfg.earth.radius_km;
        Ok(solution.map(|x| Spherical::new(radius_km, x[0], x[1])))
    }

    /// Free space fix: refines rectangular coordinates (km) from exactly
    /// 3 [RangeObservation]s.
    pub fn range_fix(
        &self,
        approx_km: &Vector3<f64>,
        observations: &[RangeObservation],
    ) -> Result<SolveResult<Vector3<f64>>, Error> {
        let model = FreeRange { observations };

        check_observations(3, observations.iter().map(|obs| obs.range_km))?;

        let x0 = DVector::from_row_slice(approx_km.as_slice());
        let solution = Navigation::new(&self.cfg).resolve(&model, x0)?;

        Ok(solution.map(|x| Vector3::new(x[0], x[1], x[2])))
    }

    /// Doppler fix: refines rectangular coordinates (km) from exactly
    /// 3 [DopplerObservation]s, for the receiver velocity defined in [Config].
    pub fn doppler_fix(
        &self,
        approx_km: &Vector3<f64>,
        observations: &[DopplerObservation],
    ) -> Result<SolveResult<Vector3<f64>>, Error> {
        self.doppler_fix_with_velocity(approx_km, &self.cfg.receiver_velocity(), observations)
    }

    /// Doppler fix for a receiver moving at `velocity_km_min`.
    pub fn doppler_fix_with_velocity(
        &self,
        approx_km: &Vector3<f64>,
        velocity_km_min: &Vector3<f64>,
        observations: &[DopplerObservation],
    ) -> Result<SolveResult<Vector3<f64>>, Error> {
        let model = DopplerRange {
            velocity: *velocity_km_min,
            observations,
        };

        check_observations(3, observations.iter().map(|obs| obs.range_rate_km_min))?;

        let x0 = DVector::from_row_slice(approx_km.as_slice());
        let solution = Navigation::new(&self.cfg).resolve(&model, x0)?;

        Ok(solution.map(|x| Vector3::new(x[0], x[1], x[2])))
    }

    /// Transition estimate from two successive range sets to the same
    /// pair of satellites. P1 is the surface fix of `ranges_km[0]` starting
    /// from `approx_rad` (P0), P2 is the surface fix of `ranges_km[1]`
    /// starting from P1.
    pub fn transition_estimate(
        &self,
        approx_rad: (f64, f64),
        satellites_km: &[Vector3<f64>; 2],
        ranges_km: &[[f64; 2]; 2],
    ) -> Result<TransitionEstimate, Error> {
        let p0 = Vector2::new(approx_rad.0, approx_rad.1);

        let mut fixes = vec![p0];

        for ranges in ranges_km.iter() {
            let observations = satellites_km
                .iter()
                .zip_eq(ranges.iter())
                .map(|(sat, range)| RangeObservation::new(*sat, *range))
                .collect_vec();

            let previous = fixes[fixes.len() - 1];
            let solution = self.surface_fix((previous[0], previous[1]), &observations)?;

            if !solution.converged {
                warn!(
                    "transition estimate: fix #{} did not converge (|dx|={:.3E})",
                    fixes.len(),
                    solution.correction_norm
                );
            }

            let spherical = solution.estimate;
            fixes.push(Vector2::new(spherical.latitude_rad, spherical.longitude_rad));
        }

        TransitionEstimate::from_fixes(fixes[0], fixes[1], fixes[2])
    }
}
