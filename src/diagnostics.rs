//! Operator-facing messages: formatted errors, API key help and soft warnings that do
//! not block a command.

use crate::{config::LlmProvider, validation::ValidationLimits};

pub fn format_error(
	title: &str,
	message: &str,
	suggestion: &str,
	details: Option<&str>,
) -> String {
	let mut out = format!("ERROR: {title}: {message}\n\nSuggestion: {suggestion}");
	if let Some(details) = details {
		out.push_str("\n\nDetails: ");
		out.push_str(details);
	}
	out
}

pub fn format_config_error(message: &str, suggestion: &str) -> String {
	format_error("Configuration Error", message, suggestion, None)
}

pub fn format_api_key_error(provider: &str, message: &str) -> String {
	format_error(
		"API Key Error",
		message,
		&api_key_instructions(provider),
		None,
	)
}

/// Where to get a key for `provider` and where to put it. Unknown providers get the
/// Gemini instructions, matching how secrets are stored for them.
pub fn api_key_instructions(provider: &str) -> String {
	let provider = LlmProvider::from_tag(provider).unwrap_or(LlmProvider::Gemini);
	let (label, url) = match provider {
		LlmProvider::OpenAi => ("OpenAI", "https://platform.openai.com/api-keys"),
		LlmProvider::Gemini => ("Google Gemini", "https://makersuite.google.com/app/apikey"),
	};

	format!(
		"Get your {label} API key at {url} and add it to .env as {}=<your key>",
		provider.env_key()
	)
}

pub fn check_chunk_size(chunk_size: i64) -> Option<String> {
	let limits = ValidationLimits::default();
	if chunk_size < limits.min_chunk_size {
		Some(format!(
			"chunk_size {chunk_size} is too small (minimum {}); answers may lack context",
			limits.min_chunk_size
		))
	} else if chunk_size > limits.max_chunk_size {
		Some(format!(
			"chunk_size {chunk_size} is too large (maximum {}); retrieval gets imprecise",
			limits.max_chunk_size
		))
	} else {
		None
	}
}

pub fn check_top_k(top_k: i64) -> Option<String> {
	(top_k < ValidationLimits::default().min_top_k)
		.then(|| format!("top_k {top_k} retrieves nothing; use at least 1"))
}

pub fn warnings(chunk_size: i64, top_k: i64) -> Vec<String> {
	[check_chunk_size(chunk_size), check_top_k(top_k)]
		.into_iter()
		.flatten()
		.collect()
}
