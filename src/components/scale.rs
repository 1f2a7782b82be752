//! Mappings from data values to visual ranges, following d3's scale semantics.

/// Square-root scale: area, not radius, grows linearly with the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl SqrtScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Scale over the extent of `values`. An empty input gives a degenerate domain.
	pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
		Self::new(extent(values).unwrap_or((0.0, 0.0)), range)
	}

	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = (self.domain.0.sqrt(), self.domain.1.sqrt());
		interpolate(self.range, normalize(d0, d1, value.sqrt()))
	}
}

/// Linear scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, value: f64) -> f64 {
		interpolate(self.range, normalize(self.domain.0, self.domain.1, value))
	}
}

/// Partition of a continuous range into equal, padded bands, one per item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
	start: f64,
	step: f64,
	bandwidth: f64,
	len: usize,
}

impl BandScale {
	/// Equal inner and outer `padding` as a fraction of the step, bands centered in `range`.
	pub fn new(len: usize, range: (f64, f64), padding: f64) -> Self {
		let (r0, r1) = range;
		let n = len as f64;
		let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
		let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
		Self {
			start,
			step,
			bandwidth: step * (1.0 - padding),
			len,
		}
	}

	/// Start of the band at `index`, or `None` past the end.
	pub fn position(&self, index: usize) -> Option<f64> {
		(index < self.len).then(|| self.start + self.step * index as f64)
	}

	pub fn bandwidth(&self) -> f64 {
		self.bandwidth
	}
}

/// Assigns palette colors to keys in first-occurrence order, cycling the palette.
#[derive(Clone, Debug)]
pub struct OrdinalScale<K> {
	domain: Vec<K>,
	palette: &'static [&'static str],
}

impl<K: PartialEq + Clone> OrdinalScale<K> {
	pub fn new<'a>(keys: impl IntoIterator<Item = &'a K>, palette: &'static [&'static str]) -> Self
	where
		K: 'a,
	{
		let mut domain: Vec<K> = Vec::new();
		for key in keys {
			if !domain.contains(key) {
				domain.push(key.clone());
			}
		}
		Self { domain, palette }
	}

	/// Color for `key`. Keys outside the domain get the first palette entry.
	pub fn color(&self, key: &K) -> &'static str {
		let index = self.domain.iter().position(|k| k == key).unwrap_or(0);
		self.palette[index % self.palette.len()]
	}
}

/// Minimum and maximum of `values`, ignoring NaN.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
	values
		.into_iter()
		.filter(|v| !v.is_nan())
		.fold(None, |acc, v| match acc {
			None => Some((v, v)),
			Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
		})
}

fn normalize(d0: f64, d1: f64, value: f64) -> f64 {
	let span = d1 - d0;
	if span == 0.0 || span.is_nan() {
		0.5
	} else {
		(value - d0) / span
	}
}

fn interpolate(range: (f64, f64), t: f64) -> f64 {
	range.0 + (range.1 - range.0) * t
}
