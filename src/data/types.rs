//! Dataset records as they appear in `topics.json` and `networks.json`.

use serde::{Deserialize, Deserializer};

/// Topic identifier shared by topics and their network graphs.
pub type TopicId = u32;

/// Group key used for ordinal coloring. Datasets carry either numbers or names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Group {
	Number(f64),
	Name(String),
}

/// Node ids may be written as JSON strings or numbers; both are kept as text.
fn node_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawId {
		Int(i64),
		Float(f64),
		Text(String),
	}

	Ok(match RawId::deserialize(deserializer)? {
		RawId::Int(n) => n.to_string(),
		RawId::Float(n) => n.to_string(),
		RawId::Text(s) => s,
	})
}

/// One term of a topic's word-frequency list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopWord {
	pub word: String,
	/// Percentage of the topic's articles containing the word.
	pub value: f64,
}

/// A topic cluster shown as one bubble.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
	pub id: TopicId,
	pub label: String,
	/// Curated label; preferred over `label` when present.
	#[serde(default)]
	pub manual_label: Option<String>,
	/// Number of articles in the topic.
	pub count: f64,
	pub group: Group,
	#[serde(default)]
	pub top_words: Vec<TopWord>,
}

impl Topic {
	/// The label shown to readers: the curated one if set, else the generated one.
	pub fn display_label(&self) -> &str {
		self.manual_label
			.as_deref()
			.filter(|l| !l.is_empty())
			.unwrap_or(&self.label)
	}
}

/// A document or term node of a topic network.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NetworkNode {
	#[serde(deserialize_with = "node_id")]
	pub id: String,
	pub size: f64,
	pub group: Group,
}

/// An undirected relation between two nodes, referenced by node id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NetworkLink {
	#[serde(deserialize_with = "node_id")]
	pub source: String,
	#[serde(deserialize_with = "node_id")]
	pub target: String,
	#[serde(default = "default_link_value")]
	pub value: f64,
}

fn default_link_value() -> f64 {
	1.0
}

/// The network of documents and terms for a single topic.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NetworkGraph {
	pub topic: TopicId,
	pub nodes: Vec<NetworkNode>,
	#[serde(default)]
	pub links: Vec<NetworkLink>,
}

/// Both datasets, loaded together before anything is drawn.
#[derive(Clone, Debug, Default)]
pub struct Datasets {
	pub topics: Vec<Topic>,
	pub networks: Vec<NetworkGraph>,
}
