//! Application settings, provided to the component tree through context.

/// Dataset locations and animation timings.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	pub topics_url: String,
	pub networks_url: String,
	/// Cross-fade between the bubble and network panels.
	pub fade_ms: u32,
	/// One-time slide of the bubble group when the detail panel first opens.
	pub shift_ms: u32,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			topics_url: "data/topics.json".into(),
			networks_url: "data/networks.json".into(),
			fade_ms: 400,
			shift_ms: 300,
		}
	}
}

/// Drawing area in CSS pixels, fixed when the page loads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Read the browser window size, falling back to 800x600.
	pub fn from_window() -> Self {
		let size = web_sys::window().and_then(|w| {
			let width = w.inner_width().ok()?.as_f64()?;
			let height = w.inner_height().ok()?.as_f64()?;
			Some(Self { width, height })
		});
		size.unwrap_or(Self {
			width: 800.0,
			height: 600.0,
		})
	}
}
