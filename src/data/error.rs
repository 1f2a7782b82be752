use thiserror::Error;

/// Failure to obtain one of the two datasets. Either failure aborts the explorer.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LoadError {
	#[error("could not fetch {url}: {reason}")]
	Fetch { url: String, reason: String },

	#[error("{url} answered with HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("{url} is not a valid dataset: {reason}")]
	Parse { url: String, reason: String },
}

/// A network graph that violates the link/node invariant.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
	#[error("link {source_id} -> {target_id} references unknown node {missing}")]
	UnknownEndpoint {
		source_id: String,
		target_id: String,
		missing: String,
	},
}
