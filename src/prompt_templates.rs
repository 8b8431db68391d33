//! Built-in prompt templates, one per project type.
//!
//! Every template carries the two markers the answering step substitutes:
//! [`CONTEXT_PLACEHOLDER`] for retrieved chunks and [`QUESTION_PLACEHOLDER`] for the
//! user's question.

use crate::{
	config::ProjectType,
	error::{ConfigError, Result},
};

pub const CONTEXT_PLACEHOLDER: &str = "{context}";
pub const QUESTION_PLACEHOLDER: &str = "{question}";

const REQUIRED_PLACEHOLDERS: [&str; 2] = [CONTEXT_PLACEHOLDER, QUESTION_PLACEHOLDER];

pub const SYMFONY_TEMPLATE: &str = "\
You are an expert in Symfony PHP framework and related technologies.
Use the following context from the project documentation to answer the question.

Rules:
- Answer precisely based on the provided context
- If information is not in the context, say so honestly
- Provide code examples when relevant
- Support both Russian and English in questions and answers
- Keep technical terms and code in original language

Context:
{context}

Question: {question}

Answer:";

pub const IOS_TEMPLATE: &str = "\
You are an expert in iOS development with Swift, UIKit, SwiftUI, and iOS SDK.
Use the following context from the project documentation to answer the question.

Rules:
- Answer precisely based on the provided context
- If information is not in the context, say so honestly
- Provide code examples when relevant
- Support both Russian and English in questions and answers
- Keep technical terms and code in original language

Context:
{context}

Question: {question}

Answer:";

pub const GENERAL_TEMPLATE: &str = "\
You are a helpful developer assistant.
Use the following context from the project documentation to answer the question.

Rules:
- Answer precisely based on the provided context
- If information is not in the context, say so honestly
- Provide examples when relevant
- Support both Russian and English in questions and answers
- Keep technical terms and code in original language

Context:
{context}

Question: {question}

Answer:";

const TEMPLATES: [(ProjectType, &str); 4] = [
	(ProjectType::Symfony, SYMFONY_TEMPLATE),
	(ProjectType::Ios, IOS_TEMPLATE),
	(ProjectType::General, GENERAL_TEMPLATE),
	(ProjectType::Custom, GENERAL_TEMPLATE),
];

/// Template registered for `project_type`, falling back to the general template.
pub fn get_template(project_type: &str) -> &'static str {
	ProjectType::from_tag(project_type)
		.and_then(|wanted| {
			TEMPLATES
				.iter()
				.find(|(t, _)| *t == wanted)
				.map(|(_, template)| *template)
		})
		.unwrap_or(GENERAL_TEMPLATE)
}

/// Returns `template` unchanged if it holds both placeholders, otherwise names the
/// first one missing.
pub fn validate_custom_template(template: &str) -> Result<&str> {
	match missing_placeholder(template) {
		Some(placeholder) => Err(ConfigError::MissingPlaceholder(placeholder)),
		None => Ok(template),
	}
}

pub fn missing_placeholder(template: &str) -> Option<&'static str> {
	REQUIRED_PLACEHOLDERS
		.into_iter()
		.find(|placeholder| !template.contains(placeholder))
}

/// Keeps a usable template, swaps a broken one for the project type's default.
pub fn repair_template(project_type: &str, template: &str) -> String {
	match validate_custom_template(template) {
		Ok(template) => template.to_string(),
		Err(_) => get_template(project_type).to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_every_tag_yields_complete_template() {
		for tag in ["symfony", "ios", "general", "custom", "anything-unrecognized", ""] {
			let template = get_template(tag);
			assert!(!template.is_empty(), "empty template for {tag:?}");
			assert!(template.contains(CONTEXT_PLACEHOLDER), "{tag:?} lacks context");
			assert!(template.contains(QUESTION_PLACEHOLDER), "{tag:?} lacks question");
		}
	}

	#[test]
	fn test_template_selection() {
		assert_eq!(get_template("symfony"), SYMFONY_TEMPLATE);
		assert_eq!(get_template("ios"), IOS_TEMPLATE);
		assert_eq!(get_template("general"), GENERAL_TEMPLATE);
		assert_eq!(get_template("custom"), GENERAL_TEMPLATE);
		assert_eq!(get_template("django"), GENERAL_TEMPLATE);
		assert!(get_template("ios").contains("Swift"));
	}

	#[test]
	fn test_validate_custom_template_missing_both() {
		let err = validate_custom_template("no placeholders here").unwrap_err();
		assert!(matches!(err, ConfigError::MissingPlaceholder("{context}")));
		assert!(err.to_string().contains("{context}"));
	}

	#[test]
	fn test_validate_custom_template_missing_question() {
		let err = validate_custom_template("Context: {context}").unwrap_err();
		assert!(err.to_string().contains("{question}"));
	}

	#[test]
	fn test_validate_custom_template_ok() {
		let template = "Context: {context} Q: {question}";
		assert_eq!(validate_custom_template(template).unwrap(), template);
	}

	#[test]
	fn test_repair_template() {
		let good = "{question} after {context}";
		assert_eq!(repair_template("ios", good), good);
		assert_eq!(repair_template("ios", "Answer please"), IOS_TEMPLATE);
		assert_eq!(repair_template("unknown", ""), GENERAL_TEMPLATE);
	}
}
