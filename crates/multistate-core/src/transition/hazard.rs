//! Hazard Models
//!
//! Parametric time-to-event distributions, sampled by inverting the
//! cumulative hazard.

use rand::Rng;

/// A distribution with its parameters already resolved for one individual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hazard {
    /// Fires exactly at `delay`.
    Fixed { delay: f64 },
    Exponential { rate: f64 },
    Weibull { shape: f64, scale: f64 },
    /// `shape` may be negative, in which case the event may never happen.
    Gompertz { shape: f64, rate: f64 },
    LogLogistic { shape: f64, scale: f64 },
}

impl Hazard {
    /// Cumulative hazard `H(t)`.
    pub fn cumulative(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        match *self {
            Hazard::Fixed { delay } => {
                if t >= delay {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            Hazard::Exponential { rate } => rate * t,
            Hazard::Weibull { shape, scale } => (t / scale).powf(shape),
            Hazard::Gompertz { shape, rate } => {
                if shape == 0.0 {
                    rate * t
                } else {
                    (rate / shape) * (shape * t).exp_m1()
                }
            }
            Hazard::LogLogistic { shape, scale } => (t / scale).powf(shape).ln_1p(),
        }
    }

    /// Smallest `t` with `H(t) >= target`; infinity when `H` never gets there.
    pub fn inverse_cumulative(&self, target: f64) -> f64 {
        if target <= 0.0 {
            return 0.0;
        }
        match *self {
            Hazard::Fixed { delay } => delay,
            Hazard::Exponential { rate } => target / rate,
            Hazard::Weibull { shape, scale } => scale * target.powf(1.0 / shape),
            Hazard::Gompertz { shape, rate } => {
                if shape == 0.0 {
                    return target / rate;
                }
                let x = shape * target / rate;
                if x <= -1.0 {
                    f64::INFINITY
                } else {
                    x.ln_1p() / shape
                }
            }
            Hazard::LogLogistic { shape, scale } => scale * target.exp_m1().powf(1.0 / shape),
        }
    }

    /// Draws the event time given survival up to `elapsed`.
    ///
    /// Both values are measured on the model's own time axis. A fixed delay
    /// is returned as is, even when negative or already past; the caller
    /// rejects arrivals that land before its clock. Every other model
    /// returns a time no earlier than `elapsed`, possibly infinite.
    pub fn sample_after<R: Rng + ?Sized>(&self, elapsed: f64, rng: &mut R) -> f64 {
        if let Hazard::Fixed { delay } = *self {
            return delay;
        }
        let elapsed = elapsed.max(0.0);
        let unit: f64 = rng.gen();
        let exposure = -(1.0 - unit).ln();
        let t = self.inverse_cumulative(self.cumulative(elapsed) + exposure);
        if t.is_nan() {
            f64::INFINITY
        } else {
            t.max(elapsed)
        }
    }
}
