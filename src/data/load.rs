use gloo_net::http::Request;
use log::info;
use serde::de::DeserializeOwned;

use super::error::LoadError;
use super::types::Datasets;
use crate::config::AppConfig;

/// Fetch both datasets concurrently. Nothing is returned unless both succeed.
pub async fn load_datasets(config: &AppConfig) -> Result<Datasets, LoadError> {
	let (topics, networks) = futures::future::try_join(
		fetch_json(&config.topics_url),
		fetch_json(&config.networks_url),
	)
	.await?;

	let datasets = Datasets { topics, networks };
	info!(
		"loaded {} topics and {} networks",
		datasets.topics.len(),
		datasets.networks.len()
	);
	Ok(datasets)
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, LoadError> {
	let response = Request::get(url)
		.send()
		.await
		.map_err(|e| LoadError::Fetch {
			url: url.to_owned(),
			reason: e.to_string(),
		})?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}
	let body = response.text().await.map_err(|e| LoadError::Fetch {
		url: url.to_owned(),
		reason: e.to_string(),
	})?;
	parse_json(url, &body)
}

pub(crate) fn parse_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, LoadError> {
	serde_json::from_str(body).map_err(|e| LoadError::Parse {
		url: url.to_owned(),
		reason: e.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::types::{NetworkGraph, Topic};

	#[test]
	fn parse_error_names_the_dataset() {
		let err = parse_json::<Vec<Topic>>("data/topics.json", "{not json").unwrap_err();
		match &err {
			LoadError::Parse { url, .. } => assert_eq!(url, "data/topics.json"),
			other => panic!("unexpected error: {other:?}"),
		}
		assert!(err.to_string().starts_with("data/topics.json is not a valid dataset"));
	}

	#[test]
	fn bundled_sample_data_parses() {
		let topics: Vec<Topic> =
			parse_json("topics", include_str!("../../data/topics.json")).unwrap();
		let networks: Vec<NetworkGraph> =
			parse_json("networks", include_str!("../../data/networks.json")).unwrap();
		assert!(!topics.is_empty());
		assert!(networks.iter().all(|n| topics.iter().any(|t| t.id == n.topic)));
	}
}
