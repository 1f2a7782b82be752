//! Topic and network datasets.

mod error;
mod load;
mod types;

pub use error::{GraphError, LoadError};
pub use load::load_datasets;
pub use types::{Datasets, NetworkGraph, Topic, TopicId};
#[cfg(test)]
pub use types::{Group, NetworkLink, NetworkNode, TopWord};
