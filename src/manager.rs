use crate::{
	config::DocRagConfig,
	error::{ConfigError, Result},
	prompt_templates, secrets,
	validation::{self, ValidationLimits},
	wizard::Wizard,
};
use std::{
	fs,
	io::{BufRead, Write},
	path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const DOCRAG_DIR: &str = ".docrag";
pub const CONFIG_FILE: &str = "config.yaml";
pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

const DOCRAG_GITIGNORE: &str = "vectordb/\n.env\n";

/// Owns the on-disk locations of a project's configuration and secrets.
#[derive(Debug, Clone)]
pub struct ConfigManager {
	project_root: PathBuf,
	docrag_dir: PathBuf,
	config_path: PathBuf,
	env_path: PathBuf,
}

impl ConfigManager {
	pub fn new(project_root: impl Into<PathBuf>) -> Self {
		let project_root = project_root.into();
		let docrag_dir = project_root.join(DOCRAG_DIR);
		Self {
			config_path: docrag_dir.join(CONFIG_FILE),
			env_path: project_root.join(ENV_FILE),
			docrag_dir,
			project_root,
		}
	}

	/// Manager rooted at the current working directory.
	pub fn from_cwd() -> Result<Self> {
		let cwd = std::env::current_dir().map_err(|e| ConfigError::io(".", e))?;
		Ok(Self::new(cwd))
	}

	pub fn project_root(&self) -> &Path {
		&self.project_root
	}

	pub fn docrag_dir(&self) -> &Path {
		&self.docrag_dir
	}

	pub fn config_path(&self) -> &Path {
		&self.config_path
	}

	pub fn env_path(&self) -> &Path {
		&self.env_path
	}

	/// `Ok(None)` when the file is missing or holds no document.
	pub fn load(&self) -> Result<Option<DocRagConfig>> {
		let path = &self.config_path;
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				debug!("no configuration at {}", path.display());
				return Ok(None);
			}
			Err(e) => return Err(ConfigError::io(path, e)),
		};

		if content.trim().is_empty() {
			return Ok(None);
		}

		// parse first so syntax problems and shape problems are reported apart
		let value: serde_yaml::Value =
			serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
				path: path.clone(),
				source,
			})?;
		if value.is_null() {
			return Ok(None);
		}

		let config = serde_yaml::from_value(value).map_err(|source| ConfigError::Schema {
			path: path.clone(),
			source,
		})?;

		debug!("loaded configuration from {}", path.display());
		Ok(Some(config))
	}

	/// Replaces the whole file. Content goes to a sibling temp file that is renamed over
	/// the target, so a failed write leaves the previous config intact.
	pub fn save(&self, config: &DocRagConfig) -> Result<()> {
		fs::create_dir_all(&self.docrag_dir).map_err(|e| ConfigError::io(&self.docrag_dir, e))?;

		let yaml = serde_yaml::to_string(config).map_err(ConfigError::Serialize)?;

		let mut tmp =
			NamedTempFile::new_in(&self.docrag_dir).map_err(|e| ConfigError::io(&self.docrag_dir, e))?;
		tmp.write_all(yaml.as_bytes())
			.and_then(|_| match replacement_permissions(&self.config_path) {
				Some(perms) => tmp.as_file().set_permissions(perms),
				None => Ok(()),
			})
			.and_then(|_| tmp.as_file().sync_all())
			.map_err(|e| ConfigError::io(tmp.path(), e))?;
		tmp.persist(&self.config_path)
			.map_err(|e| ConfigError::io(&self.config_path, e.error))?;

		info!("saved configuration to {}", self.config_path.display());
		Ok(())
	}

	pub fn validate(&self, config: &DocRagConfig) -> Vec<String> {
		validation::validate(config)
	}

	pub fn validate_with(&self, config: &DocRagConfig, limits: &ValidationLimits) -> Vec<String> {
		validation::validate_with(config, limits)
	}

	/// Runs the setup dialogue on stdin/stdout and stores the entered secrets.
	pub fn interactive_setup(&self) -> Result<DocRagConfig> {
		let stdin = std::io::stdin();
		self.interactive_setup_with(stdin.lock(), std::io::stdout())
	}

	pub fn interactive_setup_with<R: BufRead, W: Write>(
		&self,
		input: R,
		output: W,
	) -> Result<DocRagConfig> {
		let default_name = self
			.project_root
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| "project".to_string());

		let answers = Wizard::new(input, output)
			.run(&default_name)
			.map_err(|e| ConfigError::io("<terminal>", e))?;

		self.persist_secrets(
			&answers.config.llm.provider,
			&answers.api_key,
			answers.github_token.as_deref(),
		)?;

		Ok(answers.config)
	}

	/// Adds the provider key (and token, if any) to `.env` unless already mentioned there.
	pub fn persist_secrets(
		&self,
		provider: &str,
		api_key: &str,
		github_token: Option<&str>,
	) -> Result<Vec<String>> {
		let entries = secrets::provider_entries(provider, api_key, github_token);
		secrets::append_missing(&self.env_path, &entries)
	}

	/// Writes `.docrag/.gitignore` and `.env.example` if they do not exist yet.
	/// Returns the files created.
	pub fn write_scaffolding(&self) -> Result<Vec<PathBuf>> {
		fs::create_dir_all(&self.docrag_dir).map_err(|e| ConfigError::io(&self.docrag_dir, e))?;

		let files = [
			(self.docrag_dir.join(".gitignore"), DOCRAG_GITIGNORE),
			(self.project_root.join(ENV_EXAMPLE_FILE), secrets::ENV_EXAMPLE),
		];

		let mut created = Vec::new();
		for (path, content) in files {
			if path.exists() {
				continue;
			}
			fs::write(&path, content).map_err(|e| ConfigError::io(&path, e))?;
			created.push(path);
		}
		Ok(created)
	}

	/// Replaces a saved template that lacks a placeholder with the project type's default.
	/// Returns `Ok(true)` if the file was rewritten, `Ok(false)` if nothing needed fixing
	/// or no config exists.
	pub fn repair_prompt(&self) -> Result<bool> {
		let Some(mut config) = self.load()? else {
			return Ok(false);
		};

		let repaired =
			prompt_templates::repair_template(&config.project.project_type, &config.prompt.template);
		if repaired == config.prompt.template {
			return Ok(false);
		}

		config.prompt.template = repaired;
		self.save(&config)?;
		Ok(true)
	}
}

/// Temp files are created owner-only; the saved config keeps the replaced file's mode, or
/// gets 0644 when it is new.
fn replacement_permissions(path: &Path) -> Option<fs::Permissions> {
	match fs::metadata(path) {
		Ok(meta) => Some(meta.permissions()),
		Err(_) => new_file_permissions(),
	}
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
	use std::os::unix::fs::PermissionsExt;
	Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
	None
}
