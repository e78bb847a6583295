use crate::{Error, Result};

/// An implementation of a time-decaying value
///
/// Used for exploration rates that shrink as training goes on. `t` is usually the episode index.
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f32) -> f32;
}

fn validate(rate: f32, vi: f32, vf: f32) -> Result<()> {
    if !(rate.is_finite() && vi.is_finite() && vf.is_finite()) {
        return Err(Error::InvalidArgument(String::from(
            "decay parameters must be finite",
        )));
    }
    ((rate >= 0.0 && vi >= vf) || (rate < 0.0 && vi < vf))
        .then_some(())
        .ok_or_else(|| {
            Error::InvalidArgument(String::from("`vi - vf` must have same sign as `rate`"))
        })
}

/// A constant value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f32) -> f32 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Exponential {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Exponential {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t).exp()
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Linear {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        if rate < 0.0 {
            return Err(Error::InvalidArgument(String::from(
                "linear decay requires a non-negative `rate`",
            )));
        }
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        (vi - rate * t).max(vf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_functional() {
        assert!(validate(1.0, 1.0, 0.0).is_ok());
        assert!(validate(1.0, -1.0, 0.0).is_err());
        assert!(validate(-1.0, 1.0, 0.0).is_err());
        assert!(validate(-1.0, -1.0, 0.0).is_ok());
        assert!(validate(0.0, 0.5, 0.5).is_ok(), "flat schedule allowed");
        assert!(validate(f32::NAN, 1.0, 0.0).is_err());
    }

    #[test]
    fn constant_decay() {
        let x = Constant::new(0.1);
        assert_eq!(x.evaluate(0.0), 0.1);
        assert_eq!(x.evaluate(1000.0), 0.1);
    }

    #[test]
    fn exponential_decay() {
        let x = Exponential::new(2.0, 1.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 0.5 + 0.5 * f32::exp(-2.0));
        assert!(x.evaluate(1e6) >= 0.5, "never drops below the floor");
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(0.25, 1.0, 0.1).unwrap();
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(2.0), 0.5);
        assert_eq!(x.evaluate(100.0), 0.1);
        assert!(Linear::new(-0.5, 0.0, 1.0).is_err(), "growing schedule rejected");
    }
}
