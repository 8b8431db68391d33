use crate::config::{DocRagConfig, LlmProvider};
use iter_tools::Itertools;

/// Bounds enforced by [`validate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
	pub min_chunk_size: i64,
	pub max_chunk_size: i64,
	pub min_top_k: i64,
}

impl Default for ValidationLimits {
	fn default() -> Self {
		Self {
			min_chunk_size: 100,
			max_chunk_size: 5000,
			min_top_k: 1,
		}
	}
}

pub fn validate(config: &DocRagConfig) -> Vec<String> {
	validate_with(config, &ValidationLimits::default())
}

/// Collects every problem found, in a fixed order. Never fails.
pub fn validate_with(config: &DocRagConfig, limits: &ValidationLimits) -> Vec<String> {
	let mut errors = Vec::new();
	let chunking = &config.chunking;

	if chunking.chunk_size < limits.min_chunk_size {
		errors.push(format!(
			"chunk_size must be at least {} characters",
			limits.min_chunk_size
		));
	}
	if chunking.chunk_size > limits.max_chunk_size {
		errors.push(format!(
			"chunk_size must not exceed {} characters",
			limits.max_chunk_size
		));
	}
	if chunking.chunk_overlap >= chunking.chunk_size {
		errors.push("chunk_overlap must be smaller than chunk_size".to_string());
	}

	if config.retrieval.top_k < limits.min_top_k {
		errors.push(format!("top_k must be at least {}", limits.min_top_k));
	}

	if LlmProvider::from_tag(&config.llm.provider).is_none() {
		errors.push(format!(
			"provider must be one of: {}",
			LlmProvider::ALL.iter().map(LlmProvider::as_str).join(", ")
		));
	}

	let required = [
		(config.project.name.is_empty(), "project.name is required"),
		(config.project.project_type.is_empty(), "project.type is required"),
		(config.llm.embedding_model.is_empty(), "llm.embedding_model is required"),
		(config.llm.llm_model.is_empty(), "llm.llm_model is required"),
		(
			config.indexing.directories.is_empty(),
			"indexing.directories must contain at least one directory",
		),
		(
			config.indexing.extensions.is_empty(),
			"indexing.extensions must contain at least one extension",
		),
		(config.prompt.template.is_empty(), "prompt.template is required"),
	];
	errors.extend(
		required
			.into_iter()
			.filter(|(missing, _)| *missing)
			.map(|(_, message)| message.to_string()),
	);

	errors
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> DocRagConfig {
		DocRagConfig::from_template("general")
	}

	#[test]
	fn test_well_formed_config_has_no_errors() {
		assert!(validate(&sample()).is_empty());
	}

	#[test]
	fn test_chunk_size_bounds() {
		for size in [100, 101, 2500, 4999, 5000] {
			let mut config = sample();
			config.chunking.chunk_size = size;
			config.chunking.chunk_overlap = 0;
			assert!(validate(&config).is_empty(), "size {size} should be valid");
		}

		let mut config = sample();
		config.chunking.chunk_size = 99;
		config.chunking.chunk_overlap = 0;
		assert_eq!(validate(&config), ["chunk_size must be at least 100 characters"]);

		config.chunking.chunk_size = 5001;
		assert_eq!(validate(&config), ["chunk_size must not exceed 5000 characters"]);
	}

	#[test]
	fn test_overlap_must_be_smaller_than_size() {
		let mut config = sample();
		config.chunking.chunk_overlap = config.chunking.chunk_size;
		assert_eq!(validate(&config), ["chunk_overlap must be smaller than chunk_size"]);
	}

	#[test]
	fn test_top_k_floor() {
		let mut config = sample();
		config.retrieval.top_k = 0;
		assert_eq!(validate(&config), ["top_k must be at least 1"]);
	}

	#[test]
	fn test_negative_values_are_reported() {
		let mut config = sample();
		config.chunking.chunk_size = -50;
		config.chunking.chunk_overlap = -60;
		config.retrieval.top_k = -1;
		assert_eq!(
			validate(&config),
			["chunk_size must be at least 100 characters", "top_k must be at least 1"]
		);
	}

	#[test]
	fn test_unknown_provider() {
		let mut config = sample();
		config.llm.provider = "anthropic".to_string();
		assert_eq!(validate(&config), ["provider must be one of: openai, gemini"]);
	}

	#[test]
	fn test_all_problems_reported_in_order() {
		let mut config = sample();
		config.chunking.chunk_size = 50;
		config.retrieval.top_k = 0;
		config.llm.provider = String::new();
		config.project.name = String::new();
		config.indexing.directories.clear();
		config.indexing.extensions.clear();
		config.prompt.template = String::new();

		assert_eq!(
			validate(&config),
			[
				"chunk_size must be at least 100 characters",
				"chunk_overlap must be smaller than chunk_size",
				"top_k must be at least 1",
				"provider must be one of: openai, gemini",
				"project.name is required",
				"indexing.directories must contain at least one directory",
				"indexing.extensions must contain at least one extension",
				"prompt.template is required",
			]
		);
	}

	#[test]
	fn test_custom_limits() {
		let limits = ValidationLimits {
			min_chunk_size: 10,
			max_chunk_size: 20,
			min_top_k: 5,
		};
		let mut config = sample();
		config.chunking.chunk_size = 15;
		config.chunking.chunk_overlap = 5;
		config.retrieval.top_k = 4;

		assert_eq!(validate_with(&config, &limits), ["top_k must be at least 5"]);
	}
}
