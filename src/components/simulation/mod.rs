//! Alpha-cooled force simulation with d3-compatible forces.
//!
//! Views own a [`Simulation`], register named forces, and advance it once per
//! animation frame with [`Simulation::step`]. Subscribers added with
//! [`Simulation::on_step`] see the body positions after every step.

mod forces;

pub use forces::{Axis, AxisPull, Bounded, Center, Collide, Force, Link, ManyBody};

/// Simulated position and velocity of one entity. `fx`/`fy` pin the body in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

impl Body {
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			..Self::default()
		}
	}

	#[cfg(test)]
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// Called with the bodies after every simulation step.
pub type StepListener = Box<dyn FnMut(&[Body])>;

pub struct Simulation {
	bodies: Vec<Body>,
	forces: Vec<(&'static str, Box<dyn Force>)>,
	listeners: Vec<StepListener>,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	running: bool,
	jiggle: Jiggle,
}

impl Simulation {
	pub fn new(bodies: Vec<Body>) -> Self {
		let alpha_min = 0.001;
		Self {
			bodies,
			forces: Vec::new(),
			listeners: Vec::new(),
			alpha: 1.0,
			alpha_min,
			// reaches alpha_min after ~300 steps
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			alpha_target: 0.0,
			velocity_decay: 0.6,
			running: true,
			jiggle: Jiggle::default(),
		}
	}

	/// Add a force, replacing any force already registered under `name`.
	pub fn with_force(mut self, name: &'static str, force: impl Force + 'static) -> Self {
		self.forces.retain(|(n, _)| *n != name);
		self.forces.push((name, Box::new(force)));
		self
	}

	pub fn on_step(&mut self, listener: StepListener) {
		self.listeners.push(listener);
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Resume stepping after the simulation has cooled down.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Hold body `index` at `(x, y)` until [`Simulation::unpin`].
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(body) = self.bodies.get_mut(index) {
			body.fx = Some(x);
			body.fy = Some(y);
		}
	}

	pub fn unpin(&mut self, index: usize) {
		if let Some(body) = self.bodies.get_mut(index) {
			body.fx = None;
			body.fy = None;
		}
	}

	/// Advance one step if still warm. Returns whether a step happened.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		for listener in &mut self.listeners {
			listener(&self.bodies);
		}
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		true
	}

	fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		for (_, force) in &mut self.forces {
			force.apply(&mut self.bodies, self.alpha, &mut self.jiggle);
		}
		for body in &mut self.bodies {
			match body.fx {
				Some(fx) => {
					body.x = fx;
					body.vx = 0.0;
				}
				None => {
					body.vx *= self.velocity_decay;
					body.x += body.vx;
				}
			}
			match body.fy {
				Some(fy) => {
					body.y = fy;
					body.vy = 0.0;
				}
				None => {
					body.vy *= self.velocity_decay;
					body.y += body.vy;
				}
			}
		}
	}
}

/// Tiny deterministic offsets used to separate coincident bodies.
#[derive(Clone, Debug)]
pub struct Jiggle {
	state: u64,
}

impl Default for Jiggle {
	fn default() -> Self {
		Self { state: 1 }
	}
}

impl Jiggle {
	pub fn sample(&mut self) -> f64 {
		self.state = (1_664_525 * self.state + 1_013_904_223) % 4_294_967_296;
		(self.state as f64 / 4_294_967_296.0 - 0.5) * 1e-6
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn cools_down_and_stops() {
		let mut sim = Simulation::new(vec![Body::at(0.0, 0.0)]);
		let mut steps = 0;
		while sim.step() {
			steps += 1;
			assert!(steps < 1000);
		}
		assert!((295..=305).contains(&steps));
		assert!(!sim.is_running());
		assert!(!sim.step());
	}

	#[test]
	fn reheating_restarts_a_cold_simulation() {
		let mut sim = Simulation::new(vec![Body::at(0.0, 0.0)]);
		while sim.step() {}
		let cold = sim.alpha();
		sim.set_alpha_target(0.3);
		sim.restart();
		assert!(sim.step());
		assert!(sim.alpha() > cold);
	}

	#[test]
	fn pinned_body_stays_at_pin() {
		let mut sim = Simulation::new(vec![Body::at(0.0, 0.0), Body::at(1.0, 0.0)])
			.with_force("charge", ManyBody::new(-150.0));
		sim.pin(0, 50.0, 60.0);
		for _ in 0..20 {
			sim.step();
		}
		let body = &sim.bodies()[0];
		assert_eq!((body.x, body.y), (50.0, 60.0));
		assert_eq!((body.vx, body.vy), (0.0, 0.0));

		sim.unpin(0);
		sim.step();
		assert!(!sim.bodies()[0].is_pinned());
	}

	#[test]
	fn listeners_see_every_step() {
		let seen = Rc::new(Cell::new(0));
		let counter = seen.clone();
		let mut sim = Simulation::new(vec![Body::at(0.0, 0.0)]);
		sim.on_step(Box::new(move |bodies| {
			assert_eq!(bodies.len(), 1);
			counter.set(counter.get() + 1);
		}));
		sim.step();
		sim.step();
		assert_eq!(seen.get(), 2);
	}

	#[test]
	fn registering_a_name_twice_replaces_the_force() {
		let mut sim = Simulation::new(vec![Body::at(10.0, 0.0)])
			.with_force("center", Center::new(0.0, 0.0))
			.with_force("center", Center::new(100.0, 0.0));
		sim.step();
		assert_eq!(sim.bodies()[0].x, 100.0);
	}
}
