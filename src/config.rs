use crate::prompt_templates;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_CHUNK_SIZE: i64 = 800;
pub const DEFAULT_CHUNK_OVERLAP: i64 = 150;
pub const DEFAULT_TOP_K: i64 = 3;

/// Project flavours known to the setup wizard. The persisted `project.type` stays a
/// plain string so hand-edited values survive a load/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
	Symfony,
	Ios,
	General,
	Custom,
}

impl ProjectType {
	pub const ALL: [ProjectType; 4] = [Self::Symfony, Self::Ios, Self::General, Self::Custom];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Symfony => "symfony",
			Self::Ios => "ios",
			Self::General => "general",
			Self::Custom => "custom",
		}
	}

	/// Exact-match lookup; anything unrecognized is `None`.
	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.as_str() == tag)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
	OpenAi,
	Gemini,
}

impl LlmProvider {
	pub const ALL: [LlmProvider; 2] = [Self::OpenAi, Self::Gemini];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::OpenAi => "openai",
			Self::Gemini => "gemini",
		}
	}

	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|p| p.as_str() == tag)
	}

	/// Name of the `.env` key holding this provider's API key.
	pub fn env_key(&self) -> &'static str {
		match self {
			Self::OpenAi => "OPENAI_API_KEY",
			Self::Gemini => "GOOGLE_API_KEY",
		}
	}

	pub fn default_embedding_model(&self) -> &'static str {
		match self {
			Self::OpenAi => "text-embedding-3-small",
			Self::Gemini => "models/embedding-001",
		}
	}

	pub fn default_llm_model(&self) -> &'static str {
		match self {
			Self::OpenAi => "gpt-4o-mini",
			Self::Gemini => "gemini-1.5-flash",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
	pub name: String,
	#[serde(rename = "type")]
	pub project_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
	pub provider: String,
	pub embedding_model: String,
	pub llm_model: String,
	#[serde(default = "default_temperature")]
	pub temperature: f64,
}

impl LlmConfig {
	/// Provider with its default embedding and completion models.
	pub fn for_provider(provider: LlmProvider) -> Self {
		Self {
			provider: provider.as_str().to_string(),
			embedding_model: provider.default_embedding_model().to_string(),
			llm_model: provider.default_llm_model().to_string(),
			temperature: DEFAULT_TEMPERATURE,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexingConfig {
	pub directories: Vec<String>,
	pub extensions: Vec<String>,
	pub exclude_patterns: Vec<String>,
}

/// Sizes are signed so out-of-range hand edits load and get reported by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkingConfig {
	#[serde(default = "default_chunk_size")]
	pub chunk_size: i64,
	#[serde(default = "default_chunk_overlap")]
	pub chunk_overlap: i64,
}

impl ChunkingConfig {
	/// Overlap is not checked against the size here; see `validation::validate`.
	pub fn new(chunk_size: i64, chunk_overlap: i64) -> Self {
		Self {
			chunk_size,
			chunk_overlap,
		}
	}
}

impl Default for ChunkingConfig {
	fn default() -> Self {
		Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
	#[serde(default = "default_top_k")]
	pub top_k: i64,
}

impl Default for RetrievalConfig {
	fn default() -> Self {
		Self {
			top_k: DEFAULT_TOP_K,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptConfig {
	pub template: String,
}

/// Root of `.docrag/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocRagConfig {
	pub project: ProjectConfig,
	pub llm: LlmConfig,
	pub indexing: IndexingConfig,
	pub chunking: ChunkingConfig,
	pub retrieval: RetrievalConfig,
	pub prompt: PromptConfig,
}

impl DocRagConfig {
	/// A complete starter configuration for the given project type. Unknown tags get the
	/// general preset but keep their tag.
	pub fn from_template(project_type: &str) -> Self {
		let (directories, extensions) = match ProjectType::from_tag(project_type) {
			Some(ProjectType::Symfony) => (SYMFONY_DIRECTORIES, SYMFONY_EXTENSIONS),
			Some(ProjectType::Ios) => (IOS_DIRECTORIES, IOS_EXTENSIONS),
			_ => (GENERAL_DIRECTORIES, GENERAL_EXTENSIONS),
		};

		Self {
			project: ProjectConfig {
				name: "My Project".to_string(),
				project_type: project_type.to_string(),
			},
			llm: LlmConfig::for_provider(LlmProvider::OpenAi),
			indexing: IndexingConfig {
				directories: to_strings(directories),
				extensions: to_strings(extensions),
				exclude_patterns: to_strings(DEFAULT_EXCLUDE_PATTERNS),
			},
			chunking: ChunkingConfig::default(),
			retrieval: RetrievalConfig::default(),
			prompt: PromptConfig {
				template: prompt_templates::get_template(project_type).to_string(),
			},
		}
	}
}

const GENERAL_DIRECTORIES: &[&str] = &["docs/", "README.md"];
const GENERAL_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst"];
const SYMFONY_DIRECTORIES: &[&str] = &["docs/", "src/", "config/"];
const SYMFONY_EXTENSIONS: &[&str] = &[".md", ".php", ".yaml", ".yml", ".twig"];
const IOS_DIRECTORIES: &[&str] = &["docs/", "Sources/", "README.md"];
const IOS_EXTENSIONS: &[&str] = &[".md", ".swift", ".plist"];

pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
	&["node_modules/", ".git/", "__pycache__/", "vendor/", ".docrag/"];

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

fn default_temperature() -> f64 {
	DEFAULT_TEMPERATURE
}

fn default_chunk_size() -> i64 {
	DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> i64 {
	DEFAULT_CHUNK_OVERLAP
}

fn default_top_k() -> i64 {
	DEFAULT_TOP_K
}
