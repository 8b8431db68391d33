use crate::config::DocRagConfig;
use serde_json::{Value, json};
use std::path::Path;

/// Tools an MCP client may call without asking.
pub const AUTO_APPROVE: &[&str] = &["search_docs", "answer_question", "list_indexed_docs"];

/// Server entry to paste into an MCP client's `mcpServers` configuration.
pub fn render(project_root: &Path, config: &DocRagConfig) -> Value {
	json!({
		"mcpServers": {
			(server_name(&config.project.name)): {
				"command": "docrag",
				"args": ["serve"],
				"cwd": project_root.display().to_string(),
				"disabled": false,
				"autoApprove": AUTO_APPROVE,
			}
		}
	})
}

/// `docrag-<name>` with the project name lowercased and reduced to `[a-z0-9-]`.
pub fn server_name(project_name: &str) -> String {
	let slug = project_name
		.to_lowercase()
		.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join("-");

	if slug.is_empty() {
		"docrag".to_string()
	} else {
		format!("docrag-{slug}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_server_name() {
		assert_eq!(server_name("My Project"), "docrag-my-project");
		assert_eq!(server_name("  API_v2 -- docs "), "docrag-api-v2-docs");
		assert_eq!(server_name("???"), "docrag");
	}

	#[test]
	fn test_render() {
		let config = DocRagConfig::from_template("general");
		let value = render(Path::new("/srv/app"), &config);

		let server = &value["mcpServers"]["docrag-my-project"];
		assert_eq!(server["command"], "docrag");
		assert_eq!(server["args"], json!(["serve"]));
		assert_eq!(server["cwd"], "/srv/app");
		assert_eq!(server["disabled"], false);
		assert_eq!(server["autoApprove"].as_array().map(Vec::len), Some(3));
	}
}
