use crate::{
	config::LlmProvider,
	error::{ConfigError, Result},
};
use serde::Deserialize;
use std::{fs, io::Write, path::Path};
use tracing::{debug, info};

pub const GITHUB_TOKEN_KEY: &str = "GITHUB_TOKEN";

/// Secrets as seen in the process environment, after `.env` has been loaded.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct EnvSecrets {
	pub openai_api_key: Option<String>,
	pub google_api_key: Option<String>,
	pub github_token: Option<String>,
}

impl EnvSecrets {
	/// Fails only when the environment cannot be read as the expected shape; absent keys
	/// are `None`.
	pub fn from_env() -> std::result::Result<Self, envy::Error> {
		envy::from_env()
	}

	pub fn api_key_for(&self, provider: LlmProvider) -> Option<&str> {
		let key = match provider {
			LlmProvider::OpenAi => &self.openai_api_key,
			LlmProvider::Gemini => &self.google_api_key,
		};
		key.as_deref().filter(|k| !k.is_empty())
	}
}

/// Loads `path` into the process environment. `Ok(false)` when the file does not exist;
/// any other problem, such as a line that does not parse, is returned.
pub fn load_env_file(path: &Path) -> std::result::Result<bool, dotenvy::Error> {
	match dotenvy::from_path(path) {
		Ok(()) => Ok(true),
		Err(e) if e.not_found() => Ok(false),
		Err(e) => Err(e),
	}
}

/// Appends `KEY=value` lines for keys not yet mentioned anywhere in the file.
/// Existing content is never rewritten, so stale values stay as they are.
/// Returns the keys that were written.
pub fn append_missing(path: &Path, entries: &[(&str, &str)]) -> Result<Vec<String>> {
	let existing = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
		Err(e) => return Err(ConfigError::io(path, e)),
	};

	let mut new_lines = Vec::new();
	let mut written = Vec::new();
	for (key, value) in entries {
		if existing.contains(key) || written.iter().any(|w| w == key) {
			debug!("{key} already present in {}", path.display());
			continue;
		}
		new_lines.push(format!("{key}={value}"));
		written.push(key.to_string());
	}

	if new_lines.is_empty() {
		return Ok(written);
	}

	let mut block = String::new();
	if !existing.is_empty() && !existing.ends_with('\n') {
		block.push('\n');
	}
	block.push_str(&new_lines.join("\n"));
	block.push('\n');

	let mut file = fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.map_err(|e| ConfigError::io(path, e))?;
	file.write_all(block.as_bytes())
		.map_err(|e| ConfigError::io(path, e))?;

	info!("added {} to {}", written.join(", "), path.display());
	Ok(written)
}

/// Secret lines for a provider key and an optional GitHub token.
pub fn provider_entries<'a>(
	provider: &str,
	api_key: &'a str,
	github_token: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
	// anything other than openai is stored under the Google key
	let key_name = match LlmProvider::from_tag(provider) {
		Some(LlmProvider::OpenAi) => LlmProvider::OpenAi.env_key(),
		_ => LlmProvider::Gemini.env_key(),
	};

	let mut entries = vec![(key_name, api_key)];
	if let Some(token) = github_token.filter(|t| !t.is_empty()) {
		entries.push((GITHUB_TOKEN_KEY, token));
	}
	entries
}

pub const ENV_EXAMPLE: &str = "\
# OpenAI API Key
OPENAI_API_KEY=your_openai_api_key_here

# Google API Key (if using Gemini)
# GOOGLE_API_KEY=your_google_api_key_here

# GitHub Personal Access Token (optional)
# GITHUB_TOKEN=your_github_token_here
";
