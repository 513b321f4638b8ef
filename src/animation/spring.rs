use crate::foundation::core::Point;

/// Physical parameters of a damped spring follower.
///
/// `rest_delta` and `rest_speed` decide when the spring snaps onto its target and stops moving.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_rest")]
    pub rest_delta: f64,
    #[serde(default = "default_rest")]
    pub rest_speed: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_rest() -> f64 {
    0.01
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: default_mass(),
            rest_delta: default_rest(),
            rest_speed: default_rest(),
        }
    }

    pub fn with_rest_delta(mut self, rest_delta: f64) -> Self {
        self.rest_delta = rest_delta;
        self
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; 1.0 is critical damping.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A scalar that follows a target with damped spring motion.
///
/// Stepping uses the closed-form solution of the damped harmonic oscillator, so a step of any
/// length lands exactly where continuous motion would be (no integration drift, no blow-up on a
/// long frame).
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Move to `value` instantly and stop.
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the spring by `dt_ms` milliseconds and return the new value.
    pub fn step(&mut self, dt_ms: f64) -> f64 {
        if self.is_at_rest() || dt_ms.is_nan() || dt_ms <= 0.0 {
            return self.value;
        }

        let t = dt_ms / 1000.0;
        let SpringConfig {
            stiffness,
            mass,
            rest_delta,
            rest_speed,
            ..
        } = self.config;

        let x0 = self.value - self.target;
        let v0 = self.velocity;
        let omega0 = (stiffness / mass).sqrt();
        let zeta = self.config.damping_ratio();

        let (x, v) = if (zeta - 1.0).abs() < 1e-9 {
            let c2 = v0 + omega0 * x0;
            let e = (-omega0 * t).exp();
            let x = e * (x0 + c2 * t);
            let v = e * (c2 - omega0 * (x0 + c2 * t));
            (x, v)
        } else if zeta < 1.0 {
            let a = zeta * omega0;
            let wd = omega0 * (1.0 - zeta * zeta).sqrt();
            let c1 = x0;
            let c2 = (v0 + a * x0) / wd;
            let e = (-a * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = e * (c1 * cos + c2 * sin);
            let v = e * ((-a * c1 + wd * c2) * cos + (-a * c2 - wd * c1) * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            let a = (v0 - r2 * x0) / (r1 - r2);
            let b = x0 - a;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (a * e1 + b * e2, r1 * a * e1 + r2 * b * e2)
        };

        if x.abs() < rest_delta && v.abs() < rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
        } else {
            self.value = self.target + x;
            self.velocity = v;
        }
        self.value
    }
}

/// Two independent springs sharing one config, for x/y positions.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringVec2 {
    pub x: Spring,
    pub y: Spring,
}

impl SpringVec2 {
    pub fn new(initial: Point, config: SpringConfig) -> Self {
        Self {
            x: Spring::new(initial.x, config),
            y: Spring::new(initial.y, config),
        }
    }

    pub fn set_target(&mut self, p: Point) {
        self.x.set_target(p.x);
        self.y.set_target(p.y);
    }

    pub fn step(&mut self, dt_ms: f64) -> Point {
        Point::new(self.x.step(dt_ms), self.y.step(dt_ms))
    }

    pub fn value(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
