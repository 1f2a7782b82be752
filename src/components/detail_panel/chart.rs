use crate::components::scale::{BandScale, LinearScale};
use crate::config::Viewport;
use crate::data::Topic;

pub const SUBTITLE: &str = "Percent of articles in category each term appears in:";

/// Left edge of the bars, as a fraction of viewport width.
const BARS_LEFT: f64 = 0.65;
const LABEL_GAP: f64 = 10.0;
const VALUE_GAP: f64 = 5.0;

/// One horizontal bar with its word and value labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
	pub word: String,
	pub value: f64,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Bar {
	/// Right-aligned anchor of the word label, left of the bar.
	pub fn word_anchor(&self) -> (f64, f64) {
		(self.x - LABEL_GAP, self.y + self.height / 2.0)
	}

	/// Left-aligned anchor of the value label, just past the bar's end.
	pub fn value_anchor(&self) -> (f64, f64) {
		(self.x + self.width + VALUE_GAP, self.y + self.height / 2.0)
	}

	pub fn value_text(&self) -> String {
		format!("{}%", self.value)
	}
}

/// The word-frequency chart for one topic, fully laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
	pub title: String,
	pub title_pos: (f64, f64),
	pub subtitle_pos: (f64, f64),
	pub bars: Vec<Bar>,
}

impl BarChart {
	/// Lay out `topic`'s top words, largest first.
	pub fn build(topic: &Topic, viewport: Viewport) -> Self {
		let mut words = topic.top_words.clone();
		words.sort_by(|a, b| b.value.total_cmp(&a.value));

		let max = words.iter().map(|w| w.value).fold(0.0, f64::max);
		let length = LinearScale::new((0.0, max), (0.0, viewport.width * 0.25));
		let bands = BandScale::new(
			words.len(),
			(viewport.height * 0.25, viewport.height * 0.75),
			0.1,
		);
		let x = viewport.width * BARS_LEFT;

		let bars = words
			.into_iter()
			.enumerate()
			.filter_map(|(i, w)| {
				Some(Bar {
					x,
					y: bands.position(i)?,
					width: length.apply(w.value),
					height: bands.bandwidth(),
					word: w.word,
					value: w.value,
				})
			})
			.collect();

		Self {
			title: format!("{}: {} articles in group", topic.display_label(), topic.count),
			title_pos: (x, viewport.height * 0.2),
			subtitle_pos: (x, viewport.height * 0.23),
			bars,
		}
	}
}
