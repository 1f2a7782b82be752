use super::{Body, Jiggle};

/// A force contributes velocity (or, for centering, displacement) once per step.
pub trait Force {
	fn apply(&mut self, bodies: &mut [Body], alpha: f64, jiggle: &mut Jiggle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	X,
	Y,
}

impl Axis {
	fn position(self, body: &Body) -> f64 {
		match self {
			Axis::X => body.x,
			Axis::Y => body.y,
		}
	}

	fn nudge(self, body: &mut Body, dv: f64) {
		match self {
			Axis::X => body.vx += dv,
			Axis::Y => body.vy += dv,
		}
	}
}

/// Translates all bodies so their mean position sits on the center.
pub struct Center {
	x: f64,
	y: f64,
}

impl Center {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Force for Center {
	fn apply(&mut self, bodies: &mut [Body], _alpha: f64, _jiggle: &mut Jiggle) {
		if bodies.is_empty() {
			return;
		}
		let n = bodies.len() as f64;
		let sx = bodies.iter().map(|b| b.x).sum::<f64>() / n - self.x;
		let sy = bodies.iter().map(|b| b.y).sum::<f64>() / n - self.y;
		for body in bodies.iter_mut() {
			body.x -= sx;
			body.y -= sy;
		}
	}
}

/// Keeps circles of the given radii from overlapping.
pub struct Collide {
	radii: Vec<f64>,
	strength: f64,
}

impl Collide {
	pub fn new(radii: Vec<f64>) -> Self {
		Self {
			radii,
			strength: 1.0,
		}
	}
}

impl Force for Collide {
	fn apply(&mut self, bodies: &mut [Body], _alpha: f64, jiggle: &mut Jiggle) {
		let n = bodies.len().min(self.radii.len());
		for i in 0..n {
			let (xi, yi) = (bodies[i].x + bodies[i].vx, bodies[i].y + bodies[i].vy);
			let ri = self.radii[i];
			for j in (i + 1)..n {
				let rj = self.radii[j];
				let r = ri + rj;
				let mut x = xi - bodies[j].x - bodies[j].vx;
				let mut y = yi - bodies[j].y - bodies[j].vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = jiggle.sample();
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle.sample();
					l += y * y;
				}
				let d = l.sqrt();
				let k = (r - d) / d * self.strength;
				let (x, y) = (x * k, y * k);
				let share = rj * rj / (ri * ri + rj * rj);
				bodies[i].vx += x * share;
				bodies[i].vy += y * share;
				bodies[j].vx -= x * (1.0 - share);
				bodies[j].vy -= y * (1.0 - share);
			}
		}
	}
}

/// Pulls each body toward a fixed coordinate on one axis, with per-body strength.
pub struct AxisPull {
	axis: Axis,
	target: f64,
	strengths: Vec<f64>,
}

impl AxisPull {
	pub fn new(axis: Axis, target: f64, strengths: Vec<f64>) -> Self {
		Self {
			axis,
			target,
			strengths,
		}
	}
}

impl Force for AxisPull {
	fn apply(&mut self, bodies: &mut [Body], alpha: f64, _jiggle: &mut Jiggle) {
		for (body, strength) in bodies.iter_mut().zip(&self.strengths) {
			let dv = (self.target - self.axis.position(body)) * strength * alpha;
			self.axis.nudge(body, dv);
		}
	}
}

/// Soft box: bodies outside `[min, max]` on one axis are pulled back to the nearest edge.
pub struct Bounded {
	axis: Axis,
	min: f64,
	max: f64,
	strength: f64,
}

impl Bounded {
	pub fn new(axis: Axis, min: f64, max: f64, strength: f64) -> Self {
		Self {
			axis,
			min,
			max,
			strength,
		}
	}
}

impl Force for Bounded {
	fn apply(&mut self, bodies: &mut [Body], alpha: f64, _jiggle: &mut Jiggle) {
		for body in bodies.iter_mut() {
			let pos = self.axis.position(body);
			let target = pos.clamp(self.min, self.max);
			self.axis.nudge(body, (target - pos) * self.strength * alpha);
		}
	}
}

/// Springs between linked bodies with a rest length.
pub struct Link {
	links: Vec<(usize, usize)>,
	distance: f64,
	strengths: Vec<f64>,
	biases: Vec<f64>,
}

impl Link {
	/// Strength is `1 / min(degree)` per link; the lower-degree end moves more.
	pub fn new(links: Vec<(usize, usize)>, body_count: usize, distance: f64) -> Self {
		let mut degree = vec![0usize; body_count];
		for &(s, t) in &links {
			degree[s] += 1;
			degree[t] += 1;
		}
		let strengths = links
			.iter()
			.map(|&(s, t)| 1.0 / degree[s].min(degree[t]) as f64)
			.collect();
		let biases = links
			.iter()
			.map(|&(s, t)| degree[s] as f64 / (degree[s] + degree[t]) as f64)
			.collect();
		Self {
			links,
			distance,
			strengths,
			biases,
		}
	}
}

impl Force for Link {
	fn apply(&mut self, bodies: &mut [Body], alpha: f64, jiggle: &mut Jiggle) {
		for (k, &(s, t)) in self.links.iter().enumerate() {
			let (src, tgt) = (&bodies[s], &bodies[t]);
			let mut x = tgt.x + tgt.vx - src.x - src.vx;
			let mut y = tgt.y + tgt.vy - src.y - src.vy;
			if x == 0.0 {
				x = jiggle.sample();
			}
			if y == 0.0 {
				y = jiggle.sample();
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - self.distance) / l * alpha * self.strengths[k];
			let (x, y) = (x * l, y * l);
			let b = self.biases[k];
			bodies[t].vx -= x * b;
			bodies[t].vy -= y * b;
			bodies[s].vx += x * (1.0 - b);
			bodies[s].vy += y * (1.0 - b);
		}
	}
}

/// Mutual attraction (positive strength) or repulsion (negative) between all bodies.
pub struct ManyBody {
	strength: f64,
}

impl ManyBody {
	pub fn new(strength: f64) -> Self {
		Self { strength }
	}
}

impl Force for ManyBody {
	fn apply(&mut self, bodies: &mut [Body], alpha: f64, jiggle: &mut Jiggle) {
		let n = bodies.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = bodies[j].x - bodies[i].x;
				let mut y = bodies[j].y - bodies[i].y;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = jiggle.sample();
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle.sample();
					l += y * y;
				}
				// min distance of 1
				if l < 1.0 {
					l = l.sqrt();
				}
				let w = self.strength * alpha / l;
				dvx += x * w;
				dvy += y * w;
			}
			bodies[i].vx += dvx;
			bodies[i].vy += dvy;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(force: &mut dyn Force, bodies: &mut [Body]) {
		force.apply(bodies, 1.0, &mut Jiggle::default());
	}

	#[test]
	fn center_moves_mean_onto_center() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(10.0, 20.0)];
		run(&mut Center::new(100.0, 100.0), &mut bodies);
		let mean_x = (bodies[0].x + bodies[1].x) / 2.0;
		let mean_y = (bodies[0].y + bodies[1].y) / 2.0;
		assert_eq!((mean_x, mean_y), (100.0, 100.0));
		assert_eq!(bodies[1].x - bodies[0].x, 10.0);
	}

	#[test]
	fn collide_pushes_overlapping_circles_apart() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(5.0, 0.0)];
		run(&mut Collide::new(vec![10.0, 10.0]), &mut bodies);
		assert!(bodies[0].vx < 0.0);
		assert!(bodies[1].vx > 0.0);
		// equal radii share the correction evenly
		assert!((bodies[0].vx + bodies[1].vx).abs() < 1e-9);
	}

	#[test]
	fn collide_ignores_separated_circles() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(50.0, 0.0)];
		run(&mut Collide::new(vec![10.0, 10.0]), &mut bodies);
		assert_eq!(bodies[0].vx, 0.0);
		assert_eq!(bodies[1].vx, 0.0);
	}

	#[test]
	fn stronger_axis_pull_moves_further() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(0.0, 0.0)];
		run(&mut AxisPull::new(Axis::X, 100.0, vec![0.02, 0.1]), &mut bodies);
		assert!((bodies[0].vx - 2.0).abs() < 1e-9);
		assert!((bodies[1].vx - 10.0).abs() < 1e-9);
		assert_eq!(bodies[0].vy, 0.0);
	}

	#[test]
	fn bounded_only_acts_in_the_margin() {
		let mut bodies = vec![Body::at(5.0, 0.0), Body::at(50.0, 0.0), Body::at(95.0, 0.0)];
		run(&mut Bounded::new(Axis::X, 10.0, 90.0, 0.1), &mut bodies);
		assert!((bodies[0].vx - 0.5).abs() < 1e-9);
		assert_eq!(bodies[1].vx, 0.0);
		assert!((bodies[2].vx + 0.5).abs() < 1e-9);
	}

	#[test]
	fn link_pulls_distant_ends_together() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(200.0, 0.0)];
		run(&mut Link::new(vec![(0, 1)], 2, 80.0), &mut bodies);
		assert!(bodies[0].vx > 0.0);
		assert!(bodies[1].vx < 0.0);
	}

	#[test]
	fn link_pushes_close_ends_apart() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(10.0, 0.0)];
		run(&mut Link::new(vec![(0, 1)], 2, 80.0), &mut bodies);
		assert!(bodies[0].vx < 0.0);
		assert!(bodies[1].vx > 0.0);
	}

	#[test]
	fn negative_many_body_repels() {
		let mut bodies = vec![Body::at(0.0, 0.0), Body::at(10.0, 0.0)];
		run(&mut ManyBody::new(-150.0), &mut bodies);
		assert!(bodies[0].vx < 0.0);
		assert!(bodies[1].vx > 0.0);
	}
}
