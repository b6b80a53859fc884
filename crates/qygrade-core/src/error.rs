use std::path::PathBuf;

pub use qygrade_types::UnknownTaskKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	UnknownTaskKind(#[from] UnknownTaskKind),

	#[error("failed to read config {path:?}: {source}")]
	ConfigIo {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config: {0}")]
	InvalidConfig(#[from] serde_yaml::Error),

	#[error("line {line}: {message}")]
	MalformedSample { line: usize, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
