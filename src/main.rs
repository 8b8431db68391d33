#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use docrag::{
	ConfigManager, DocRagConfig,
	commands::{Cli, Commands},
	config::LlmProvider,
	diagnostics, logging, mcp_config,
	secrets::{self, EnvSecrets},
	utils::find_indexable_files,
};
use tracing::{info, warn};

fn main() -> Result<()> {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	let manager = match cli.project_dir {
		Some(dir) => ConfigManager::new(dir),
		None => ConfigManager::from_cwd()?,
	};

	// a project without .env is fine
	match secrets::load_env_file(manager.env_path()) {
		Ok(true) => info!("loaded secrets from {}", manager.env_path().display()),
		Ok(false) => {}
		Err(e) => warn!("could not load {}: {e}", manager.env_path().display()),
	}

	match cli.command {
		Commands::Init { force } => init(&manager, force)?,
		Commands::Index => index(&manager, false)?,
		Commands::Reindex => index(&manager, true)?,
		Commands::Config { edit, fix_prompt } => {
			if fix_prompt {
				fix_prompt_template(&manager)?;
			} else if edit {
				edit_config(&manager)?;
			} else {
				show_config(&manager)?;
			}
		}
		Commands::McpConfig => mcp(&manager)?,
	}

	Ok(())
}

fn init(manager: &ConfigManager, force: bool) -> Result<()> {
	if manager.config_path().exists() && !force {
		anyhow::bail!(diagnostics::format_config_error(
			&format!("{} already exists", manager.config_path().display()),
			"Run 'docrag config' to inspect it or 'docrag init --force' to start over",
		));
	}

	let config = manager.interactive_setup()?;
	report_problems(manager, &config);

	manager
		.save(&config)
		.context("Failed to save configuration")?;
	for created in manager.write_scaffolding()? {
		info!("created {}", created.display());
	}

	println!(
		"\n{} Configuration saved to {}",
		"done:".green().bold(),
		manager.config_path().display()
	);
	println!("\nNext steps:");
	println!("  1. Run: docrag index");
	println!("  2. Run: docrag mcp-config");
	println!("  3. Add the MCP configuration to your AI client");
	Ok(())
}

fn index(manager: &ConfigManager, rebuild: bool) -> Result<()> {
	let config = load_required(manager)?;

	let problems = manager.validate(&config);
	if !problems.is_empty() {
		anyhow::bail!(diagnostics::format_config_error(
			&problems.join("; "),
			&format!("Fix {} and run the command again", manager.config_path().display()),
		));
	}
	check_api_key(&config);

	if rebuild {
		println!("Reindexing documents...");
	} else {
		println!("Indexing documents...");
	}

	let files = find_indexable_files(manager.project_root(), &config.indexing)?;
	println!("Found {} files to index:", files.len());
	for file in &files {
		let shown = file.strip_prefix(manager.project_root()).unwrap_or(file);
		println!("  {}", shown.display());
	}

	println!(
		"\nChunking with size {} / overlap {}: embedding and vector storage are not yet \
		 implemented.",
		config.chunking.chunk_size, config.chunking.chunk_overlap
	);
	Ok(())
}

fn show_config(manager: &ConfigManager) -> Result<()> {
	let config = load_required(manager)?;

	println!("Current configuration ({}):\n", manager.config_path().display());
	print!("{}", serde_yaml::to_string(&config)?);
	report_problems(manager, &config);
	Ok(())
}

fn edit_config(manager: &ConfigManager) -> Result<()> {
	let path = manager.config_path();
	anyhow::ensure!(path.exists(), "No configuration at {}. Run 'docrag init' first.", path.display());

	let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
	let status = std::process::Command::new(&editor)
		.arg(path)
		.status()
		.with_context(|| format!("Failed to launch editor '{editor}'"))?;
	anyhow::ensure!(status.success(), "Editor '{editor}' exited with {status}");

	// surface mistakes made while editing
	let config = load_required(manager)?;
	report_problems(manager, &config);
	Ok(())
}

fn fix_prompt_template(manager: &ConfigManager) -> Result<()> {
	load_required(manager)?;
	if manager.repair_prompt()? {
		println!("Prompt template restored to the default for this project type.");
	} else {
		println!("Prompt template already has the required placeholders.");
	}
	Ok(())
}

fn mcp(manager: &ConfigManager) -> Result<()> {
	let config = load_required(manager)?;
	let snippet = mcp_config::render(manager.project_root(), &config);

	println!("Add this to your MCP client configuration:\n");
	println!("{}", serde_json::to_string_pretty(&snippet)?);
	check_api_key(&config);
	Ok(())
}

fn load_required(manager: &ConfigManager) -> Result<DocRagConfig> {
	manager.load()?.ok_or_else(|| {
		anyhow::anyhow!(diagnostics::format_config_error(
			&format!("No configuration found at {}", manager.config_path().display()),
			"Run 'docrag init' to create one",
		))
	})
}

fn report_problems(manager: &ConfigManager, config: &DocRagConfig) {
	for problem in manager.validate(config) {
		eprintln!("{} {problem}", "invalid:".red().bold());
	}
	for warning in diagnostics::warnings(config.chunking.chunk_size, config.retrieval.top_k) {
		warn!("{warning}");
	}
}

fn check_api_key(config: &DocRagConfig) {
	let Some(provider) = LlmProvider::from_tag(&config.llm.provider) else {
		return;
	};
	let secrets = match EnvSecrets::from_env() {
		Ok(secrets) => secrets,
		Err(e) => {
			warn!("could not read secrets from the environment: {e}");
			return;
		}
	};
	if secrets.api_key_for(provider).is_none() {
		eprintln!(
			"{}",
			diagnostics::format_api_key_error(
				provider.as_str(),
				&format!("{} is not set", provider.env_key())
			)
		);
	}
}
