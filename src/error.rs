use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to parse {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("invalid configuration in {}: {source}", path.display())]
	Schema {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("could not access {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("could not serialize configuration: {0}")]
	Serialize(#[source] serde_yaml::Error),

	#[error("template must contain {0} placeholder")]
	MissingPlaceholder(&'static str),
}

impl ConfigError {
	pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}
}

pub type Result<T> = std::result::Result<T, ConfigError>;
