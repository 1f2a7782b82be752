use std::cell::Cell;
use std::rc::Rc;

use crate::components::detail_panel::BarChart;
use crate::components::scale::{OrdinalScale, SqrtScale};
use crate::components::simulation::{Axis, AxisPull, Body, Center, Collide, Simulation};
use crate::config::Viewport;
use crate::data::{Topic, TopicId};

const COLORS: &[&str] = &["#ff805b", "#ffbc35", "#ffeac0", "#8ecae6", "#219ebc"];

/// Initial positions are spread uniformly over this square around the center.
const JITTER: f64 = 200.0;
const COLLIDE_PADDING: f64 = 2.0;
const MIN_PULL: f64 = 0.02;
const MAX_PULL: f64 = 0.10;
/// Label baseline offset below the bubble center.
pub const LABEL_DY: f64 = 4.0;

#[derive(Clone, Debug)]
pub struct Bubble {
	pub topic: Topic,
	pub radius: f64,
	pub color: &'static str,
}

/// One-time slide of the bubble group to make room for the detail panel.
#[derive(Clone, Debug)]
pub struct LateralShift {
	distance: f64,
	duration: f64,
	progress: f64,
	started: bool,
}

impl LateralShift {
	pub fn new(distance: f64, duration: f64) -> Self {
		Self {
			distance,
			duration,
			progress: 0.0,
			started: false,
		}
	}

	/// Begin the slide. Returns false if it already happened.
	pub fn start(&mut self) -> bool {
		!std::mem::replace(&mut self.started, true)
	}

	/// Move the slide forward by `dt` seconds. Returns whether it is still moving.
	pub fn advance(&mut self, dt: f64) -> bool {
		if !self.started || self.progress >= 1.0 {
			return false;
		}
		self.progress = if self.duration > 0.0 {
			(self.progress + dt / self.duration).min(1.0)
		} else {
			1.0
		};
		true
	}

	pub fn offset(&self) -> f64 {
		self.distance * ease_in_out_cubic(self.progress)
	}
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

pub struct BubbleState {
	/// Sorted by descending count; index-aligned with the simulation bodies.
	pub bubbles: Vec<Bubble>,
	pub simulation: Simulation,
	pub shift: LateralShift,
	pub hovered: Option<usize>,
	pub detail: Option<BarChart>,
	pub viewport: Viewport,
	dirty: Rc<Cell<bool>>,
}

impl BubbleState {
	pub fn new(
		topics: &[Topic],
		viewport: Viewport,
		shift_secs: f64,
		random: &mut impl FnMut() -> f64,
	) -> Self {
		let colors = OrdinalScale::new(topics.iter().map(|t| &t.group), COLORS);
		let radius = SqrtScale::from_extent(
			topics.iter().map(|t| t.count),
			(viewport.width * 0.02, viewport.width * 0.08),
		);

		let mut bubbles: Vec<Bubble> = topics
			.iter()
			.map(|t| Bubble {
				radius: radius.apply(t.count),
				color: colors.color(&t.group),
				topic: t.clone(),
			})
			.collect();
		// paint order: larger bubbles first, behind smaller ones
		bubbles.sort_by(|a, b| b.topic.count.total_cmp(&a.topic.count));

		let (cx, cy) = viewport.center();
		let bodies = bubbles
			.iter()
			.map(|_| {
				Body::at(
					cx + (random() - 0.5) * JITTER,
					cy + (random() - 0.5) * JITTER,
				)
			})
			.collect();

		let max_count = bubbles.iter().map(|b| b.topic.count).fold(1.0, f64::max);
		let pull: Vec<f64> = bubbles
			.iter()
			.map(|b| MIN_PULL + (MAX_PULL - MIN_PULL) * b.topic.count / max_count)
			.collect();
		let radii = bubbles.iter().map(|b| b.radius + COLLIDE_PADDING).collect();

		let mut simulation = Simulation::new(bodies)
			.with_force("center", Center::new(cx, cy))
			.with_force("collide", Collide::new(radii))
			.with_force("x", AxisPull::new(Axis::X, cx, pull.clone()))
			.with_force("y", AxisPull::new(Axis::Y, cy, pull));

		let dirty = Rc::new(Cell::new(true));
		let on_step = dirty.clone();
		simulation.on_step(Box::new(move |_| on_step.set(true)));

		Self {
			bubbles,
			simulation,
			shift: LateralShift::new(-viewport.width * 0.2, shift_secs),
			hovered: None,
			detail: None,
			viewport,
			dirty,
		}
	}

	/// Advance the simulation and the shift animation by one frame.
	pub fn tick(&mut self, dt: f64) {
		self.simulation.step();
		if self.shift.advance(dt) {
			self.dirty.set(true);
		}
	}

	/// Whether anything changed since the last call.
	pub fn take_dirty(&self) -> bool {
		self.dirty.replace(false)
	}

	/// Topmost bubble under a canvas point.
	pub fn bubble_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let gx = sx - self.shift.offset();
		let bodies = self.simulation.bodies();
		self.bubbles
			.iter()
			.zip(bodies)
			.enumerate()
			.rev()
			.find(|(_, (bubble, body))| {
				let (dx, dy) = (body.x - gx, body.y - sy);
				(dx * dx + dy * dy).sqrt() < bubble.radius
			})
			.map(|(i, _)| i)
	}

	pub fn topic_id(&self, index: usize) -> Option<TopicId> {
		self.bubbles.get(index).map(|b| b.topic.id)
	}

	/// Change the hover target. Hovering a bubble rebuilds the detail chart and
	/// triggers the one-time shift; hovering nothing clears the chart.
	pub fn set_hover(&mut self, hovered: Option<usize>) -> bool {
		if self.hovered == hovered {
			return false;
		}
		self.hovered = hovered;
		self.detail = hovered
			.and_then(|i| self.bubbles.get(i))
			.map(|b| BarChart::build(&b.topic, self.viewport));
		if self.detail.is_some() {
			self.shift.start();
		}
		self.dirty.set(true);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{Group, TopWord};

	const VIEWPORT: Viewport = Viewport {
		width: 1000.0,
		height: 800.0,
	};

	fn topic(id: TopicId, count: f64, group: f64) -> Topic {
		Topic {
			id,
			label: format!("topic_{id}"),
			manual_label: None,
			count,
			group: Group::Number(group),
			top_words: vec![TopWord {
				word: "ai".into(),
				value: 40.0,
			}],
		}
	}

	fn topics() -> Vec<Topic> {
		vec![
			topic(1, 10.0, 0.0),
			topic(2, 90.0, 1.0),
			topic(3, 40.0, 0.0),
			topic(4, 160.0, 2.0),
		]
	}

	fn fixed_random() -> impl FnMut() -> f64 {
		let mut n = 0u32;
		move || {
			n += 1;
			(n % 10) as f64 / 10.0
		}
	}

	fn state() -> BubbleState {
		BubbleState::new(&topics(), VIEWPORT, 0.3, &mut fixed_random())
	}

	#[test]
	fn bubbles_are_painted_largest_first() {
		let s = state();
		let counts: Vec<f64> = s.bubbles.iter().map(|b| b.topic.count).collect();
		assert_eq!(counts, [160.0, 90.0, 40.0, 10.0]);
		assert!(s.bubbles.windows(2).all(|w| w[0].radius >= w[1].radius));
		assert_eq!(s.bubbles[0].radius, 80.0);
		assert_eq!(s.bubbles[3].radius, 20.0);
	}

	#[test]
	fn colors_follow_group_first_occurrence() {
		let s = state();
		let color_of = |id| s.bubbles.iter().find(|b| b.topic.id == id).map(|b| b.color);
		assert_eq!(color_of(1), Some(COLORS[0]));
		assert_eq!(color_of(3), Some(COLORS[0]));
		assert_eq!(color_of(2), Some(COLORS[1]));
		assert_eq!(color_of(4), Some(COLORS[2]));
	}

	#[test]
	fn bodies_start_near_the_center() {
		let s = state();
		for body in s.simulation.bodies() {
			assert!((body.x - 500.0).abs() <= 100.0);
			assert!((body.y - 400.0).abs() <= 100.0);
		}
	}

	#[test]
	fn simulation_separates_bubbles() {
		let mut s = state();
		for _ in 0..300 {
			s.tick(0.016);
		}
		let bodies = s.simulation.bodies();
		for i in 0..bodies.len() {
			for j in (i + 1)..bodies.len() {
				let (dx, dy) = (bodies[i].x - bodies[j].x, bodies[i].y - bodies[j].y);
				let gap = (dx * dx + dy * dy).sqrt() - s.bubbles[i].radius - s.bubbles[j].radius;
				assert!(gap > -1.0, "bubbles {i} and {j} overlap by {}", -gap);
			}
		}
	}

	#[test]
	fn first_hover_shifts_once_and_builds_detail() {
		let mut s = state();
		assert!(s.set_hover(Some(0)));
		assert!(s.detail.is_some());
		for _ in 0..40 {
			s.tick(0.016);
		}
		assert_eq!(s.shift.offset(), -200.0);

		s.set_hover(None);
		assert!(s.detail.is_none());
		assert_eq!(s.shift.offset(), -200.0);

		assert!(!s.shift.start());
		s.set_hover(Some(1));
		assert_eq!(s.shift.offset(), -200.0);
	}

	#[test]
	fn same_hover_target_is_not_a_change() {
		let mut s = state();
		assert!(s.set_hover(Some(2)));
		assert!(!s.set_hover(Some(2)));
	}

	#[test]
	fn hit_testing_follows_the_shift() {
		let mut s = state();
		let body = s.simulation.bodies()[3].clone();
		assert_eq!(s.bubble_at(body.x, body.y), Some(3));

		s.set_hover(Some(3));
		for _ in 0..40 {
			s.shift.advance(0.016);
		}
		let body = s.simulation.bodies()[3].clone();
		assert_eq!(s.bubble_at(body.x - 200.0, body.y), Some(3));
		assert_eq!(s.topic_id(3), Some(1));
	}

	#[test]
	fn dirty_flag_tracks_steps() {
		let mut s = state();
		assert!(s.take_dirty());
		assert!(!s.take_dirty());
		s.tick(0.016);
		assert!(s.take_dirty());
	}
}
