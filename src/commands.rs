use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DocRAG Kit - retrieval-augmented answers over your project documentation.
///
/// Quick start: `docrag init`, then `docrag index`, then `docrag mcp-config`.
#[derive(Parser)]
#[command(name = "docrag", version)]
pub struct Cli {
	/// Project root holding `.docrag/` and `.env` (defaults to the current directory)
	#[arg(long, global = true)]
	pub project_dir: Option<PathBuf>,

	/// Log debug output to stderr
	#[arg(long, short, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize DocRAG in the current project
	Init {
		/// Replace an existing configuration
		#[arg(long)]
		force: bool,
	},
	/// Index project documents
	Index,
	/// Rebuild the index from scratch
	Reindex,
	/// Display or edit the current configuration
	Config {
		/// Open the configuration in $EDITOR
		#[arg(long)]
		edit: bool,
		/// Restore the default prompt if the saved one lacks a placeholder
		#[arg(long)]
		fix_prompt: bool,
	},
	/// Display the MCP server configuration
	McpConfig,
}
