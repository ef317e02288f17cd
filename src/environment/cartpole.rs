use super::discretize::{encode_mixed_radix, Bins};
use super::integrator::rk4_step;
use super::Environment;
use crate::config::Config;
use crate::error::{Result, TabulaError};
use crate::{Action, Reward, State};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Continuous state `[x, theta, xdot, thetadot]`.
pub type PhysicalState = [f64; 4];

/// Cart leaves the track beyond this distance from the center
const TRACK_LIMIT: f64 = 2.0;
const OFF_TRACK_REWARD: Reward = -2.0;

/// Physical constants, action forces and discretization of the cart-pole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPoleParams {
    /// Gravitational acceleration
    pub g: f64,
    pub cart_mass: f64,
    pub pole_mass: f64,
    /// Half-length of the pole
    pub pole_length: f64,
    /// Control period in seconds
    pub tau: f64,

    /// Force applied for each action
    pub forces: Vec<f64>,

    /// Bins for x, theta, xdot and thetadot, in that order
    pub bins: [Bins; 4],

    /// Reward penalty per unit of cart displacement
    pub x_penalty: f64,

    pub init_theta: f64,
}

impl CartPoleParams {
    pub fn from_config(config: &Config) -> Result<Self> {
        let forces = vec![
            config.parse_value("ENV_ACTION_LEFT")?,
            config.parse_value("ENV_ACTION_RIGHT")?,
        ];

        let bins_for = |name: &str| -> Result<Bins> {
            Bins::new(
                config.parse_value(&format!("ENV_{}_LEFT", name))?,
                config.parse_value(&format!("ENV_{}_RIGHT", name))?,
                config.parse_value(&format!("ENV_{}_SPACE", name))?,
            )
        };
        let bins = [
            bins_for("X")?,
            bins_for("THETA")?,
            bins_for("XDOT")?,
            bins_for("THETADOT")?,
        ];

        let fps: u32 = config.parse_value("ENV_FPS")?;
        if fps == 0 {
            return Err(TabulaError::invalid_value("ENV_FPS", "0", "must be positive"));
        }

        let params = CartPoleParams {
            g: config.parse_value("ENV_G")?,
            cart_mass: config.parse_value("ENV_CART_MASS")?,
            pole_mass: config.parse_value("ENV_POLE_MASS")?,
            pole_length: config.parse_value("ENV_POLE_LENGTH")?,
            tau: 1.0 / fps as f64,
            forces,
            bins,
            x_penalty: config.parse_or("ENV_X_PENALTY", 0.0)?,
            init_theta: config.parse_or("ENV_INIT_THETA", PI)?,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("ENV_CART_MASS", self.cart_mass),
            ("ENV_POLE_MASS", self.pole_mass),
            ("ENV_POLE_LENGTH", self.pole_length),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TabulaError::invalid_value(
                    name,
                    value.to_string(),
                    "must be positive",
                ));
            }
        }
        if self.forces.is_empty() {
            return Err(TabulaError::invalid_parameter("forces", "no actions"));
        }
        Ok(())
    }

    fn total_mass(&self) -> f64 {
        self.cart_mass + self.pole_mass
    }
}

/// Inverted pendulum on a cart.
///
/// The pole starts hanging down (`theta = pi` by default) and the agent
/// pushes the cart left or right trying to swing it up and keep it there.
/// Episodes never terminate on their own; they end when the step budget runs
/// out.
#[derive(Debug, Clone)]
pub struct CartPole {
    params: CartPoleParams,
    init_state: PhysicalState,
    s: PhysicalState,
}

impl CartPole {
    pub fn new(params: CartPoleParams) -> Self {
        let init_state = [0.0, normalize_angle(params.init_theta), 0.0, 0.0];
        CartPole {
            params,
            init_state,
            s: init_state,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(CartPoleParams::from_config(config)?))
    }

    pub fn params(&self) -> &CartPoleParams {
        &self.params
    }

    pub fn physical_state(&self) -> PhysicalState {
        self.s
    }

    /// Overwrite the continuous state. Theta is normalized on the way in.
    pub fn set_physical_state(&mut self, s: PhysicalState) {
        self.s = s;
        self.s[1] = normalize_angle(self.s[1]);
    }

    /// Time derivative of the state under force `u`.
    pub fn derivatives(&self, s: &PhysicalState, u: f64) -> PhysicalState {
        let [_, theta, xdot, thetadot] = *s;

        let g = self.params.g;
        let m = self.params.pole_mass;
        let l = self.params.pole_length;
        let ml = m * l;
        let mass = self.params.total_mass();

        let sintheta = theta.sin();
        let costheta = theta.cos();

        let xddot = (4.0 * u / 3.0 + 4.0 * ml * thetadot.powi(2) * sintheta / 3.0
            - m * g * (2.0 * theta).sin() / 2.0)
            / (4.0 * mass - m * costheta.powi(2));
        let thetaddot = (mass * g * sintheta
            - ml * thetadot.powi(2) * sintheta * costheta
            - u * costheta)
            / (4.0 * mass * l / 3.0 - ml * costheta.powi(2));

        [xdot, thetadot, xddot, thetaddot]
    }

    /// Per-dimension bin indices of the current state.
    pub fn bin_indices(&self) -> [usize; 4] {
        let bins = &self.params.bins;
        [
            bins[0].digitize(self.s[0]),
            bins[1].digitize(self.s[1]),
            bins[2].digitize(self.s[2]),
            bins[3].digitize(self.s[3]),
        ]
    }

    fn radices(&self) -> [usize; 4] {
        self.params.bins.map(|b| b.count)
    }
}

impl Environment for CartPole {
    fn state_space(&self) -> usize {
        self.radices().iter().product()
    }

    fn action_space(&self) -> usize {
        self.params.forces.len()
    }

    fn state(&self) -> State {
        encode_mixed_radix(&self.bin_indices(), &self.radices())
    }

    fn reward(&self) -> Reward {
        let [x, theta, ..] = self.s;
        if x.abs() > TRACK_LIMIT {
            OFF_TRACK_REWARD
        } else {
            -theta.abs() + PI / 2.0 - self.params.x_penalty * x.abs()
        }
    }

    fn info(&self) -> String {
        let [x, theta, xdot, thetadot] = self.s;
        format!("{:.15},{:.15},{:.15},{:.15}", x, theta, xdot, thetadot)
    }

    fn step(&mut self, action: Action) {
        assert!(
            action < self.params.forces.len(),
            "action {} out of range for {} forces",
            action,
            self.params.forces.len()
        );
        let u = self.params.forces[action];
        let mut next = rk4_step(&self.s, self.params.tau, |s| self.derivatives(s, u));
        next[1] = normalize_angle(next[1]);
        self.s = next;
    }

    fn reset(&mut self) {
        self.s = self.init_state;
    }

    fn is_terminal(&self) -> bool {
        false
    }
}

/// Wrap an angle into `(-pi, pi]`.
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = (theta + 3.0 * PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}
