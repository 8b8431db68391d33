use anyhow::Result;
use docrag::{ConfigManager, prompt_templates};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_persist_secrets_twice_keeps_one_line() -> Result<()> {
	let project = TempDir::new()?;
	let manager = ConfigManager::new(project.path());

	manager.persist_secrets("openai", "sk-first", Some("ghp_token"))?;
	let written = manager.persist_secrets("openai", "sk-second", Some("ghp_other"))?;

	assert!(written.is_empty());
	let env = fs::read_to_string(manager.env_path())?;
	assert_eq!(env.matches("OPENAI_API_KEY").count(), 1);
	assert_eq!(env.matches("GITHUB_TOKEN").count(), 1);
	assert!(env.contains("OPENAI_API_KEY=sk-first"));
	Ok(())
}

#[test]
fn test_switching_provider_adds_second_key() -> Result<()> {
	let project = TempDir::new()?;
	let manager = ConfigManager::new(project.path());
	fs::write(manager.env_path(), "EXISTING=1")?;

	manager.persist_secrets("openai", "sk-1", None)?;
	manager.persist_secrets("gemini", "g-1", None)?;

	assert_eq!(
		fs::read_to_string(manager.env_path())?,
		"EXISTING=1\nOPENAI_API_KEY=sk-1\nGOOGLE_API_KEY=g-1\n"
	);
	Ok(())
}

#[test]
fn test_wizard_then_save_then_load() -> Result<()> {
	let project = TempDir::new()?;
	let manager = ConfigManager::new(project.path());

	let script = "Mobile App\n2\n2\nAIza-test\nSources/,docs/\n.swift,.md\n\n\n";
	let config = manager.interactive_setup_with(script.as_bytes(), std::io::sink())?;
	assert!(manager.validate(&config).is_empty());

	manager.save(&config)?;
	manager.write_scaffolding()?;

	let loaded = manager.load()?.expect("config saved");
	assert_eq!(loaded, config);
	assert_eq!(loaded.llm.embedding_model, "models/embedding-001");
	assert_eq!(loaded.indexing.directories, ["Sources/", "docs/"]);
	assert_eq!(loaded.prompt.template, prompt_templates::IOS_TEMPLATE);

	assert_eq!(
		fs::read_to_string(manager.env_path())?,
		"GOOGLE_API_KEY=AIza-test\n"
	);
	assert!(project.path().join(".env.example").is_file());
	assert!(manager.docrag_dir().join(".gitignore").is_file());
	Ok(())
}
