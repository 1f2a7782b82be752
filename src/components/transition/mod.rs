//! Which panel is visible and interactive, and the cross-fade between them.

use log::debug;

use crate::data::TopicId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
	Bubbles,
	Network,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Settled,
	/// Cross-fading toward the active panel.
	Fading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEvent {
	TopicSelected(TopicId),
	Back,
	/// The fade duration has elapsed.
	FadeFinished,
}

/// Side effect the caller performs when a transition starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
	/// Build the network for this topic and schedule [`ViewEvent::FadeFinished`].
	OpenNetwork(TopicId),
	/// Schedule [`ViewEvent::FadeFinished`].
	ReturnToBubbles,
}

/// Target styling of a panel container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelStyle {
	pub opacity: f64,
	pub interactive: bool,
}

impl PanelStyle {
	/// Inline CSS; the opacity change is animated over `fade_ms`.
	pub fn css(&self, fade_ms: u32) -> String {
		format!(
			"opacity: {}; pointer-events: {}; transition: opacity {fade_ms}ms ease-in-out;",
			self.opacity,
			if self.interactive { "all" } else { "none" }
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewController {
	active: Panel,
	phase: Phase,
}

impl Default for ViewController {
	fn default() -> Self {
		Self {
			active: Panel::Bubbles,
			phase: Phase::Settled,
		}
	}
}

impl ViewController {
	#[cfg(test)]
	pub fn active(&self) -> Panel {
		self.active
	}

	#[cfg(test)]
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Apply `event`. Selections and back actions arriving mid-fade are ignored.
	pub fn dispatch(&mut self, event: ViewEvent) -> Option<Command> {
		match (self.phase, self.active, event) {
			(Phase::Settled, Panel::Bubbles, ViewEvent::TopicSelected(topic)) => {
				self.active = Panel::Network;
				self.phase = Phase::Fading;
				Some(Command::OpenNetwork(topic))
			}
			(Phase::Settled, Panel::Network, ViewEvent::Back) => {
				self.active = Panel::Bubbles;
				self.phase = Phase::Fading;
				Some(Command::ReturnToBubbles)
			}
			(Phase::Fading, _, ViewEvent::FadeFinished) => {
				self.phase = Phase::Settled;
				None
			}
			(phase, active, event) => {
				debug!("ignoring {event:?} while {phase:?} on {active:?}");
				None
			}
		}
	}

	pub fn panel_style(&self, panel: Panel) -> PanelStyle {
		if panel == self.active {
			// incoming panel takes pointer events as soon as its fade starts
			return PanelStyle {
				opacity: 1.0,
				interactive: true,
			};
		}
		PanelStyle {
			opacity: 0.0,
			// outgoing panel keeps pointer events until the fade ends
			interactive: self.phase == Phase::Fading,
		}
	}
}
