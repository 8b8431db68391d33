use crate::{
	config::{
		ChunkingConfig, DEFAULT_EXCLUDE_PATTERNS, DocRagConfig, IndexingConfig, LlmConfig,
		LlmProvider, ProjectConfig, ProjectType, PromptConfig, RetrievalConfig, to_strings,
	},
	prompt_templates,
};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::warn;

const DEFAULT_DIRECTORIES: &[&str] = &["docs/", "README.md"];
const DEFAULT_EXTENSIONS: &[&str] = &[".md", ".txt"];
const DEFAULT_EXCLUSIONS: &[&str] = &["node_modules/", ".git/", "__pycache__/"];

/// Everything the operator typed, split into the persisted config and the secrets that
/// belong in `.env` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupAnswers {
	pub config: DocRagConfig,
	pub api_key: String,
	pub github_token: Option<String>,
}

/// Line-oriented setup dialogue. Bad or missing answers fall back to defaults; only a
/// failing reader or writer stops it.
pub struct Wizard<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Self { input, output }
	}

	pub fn run(&mut self, default_name: &str) -> io::Result<SetupAnswers> {
		writeln!(self.output, "{}\n", "DocRAG Kit - Interactive Setup".bold())?;

		writeln!(self.output, "{}", "Project Configuration".bold())?;
		let name = self.ask("Project name: ")?;
		let name = if name.is_empty() {
			default_name.to_string()
		} else {
			name
		};

		writeln!(self.output, "\nProject type:")?;
		writeln!(self.output, "  1. Symfony (PHP framework)")?;
		writeln!(self.output, "  2. iOS (Swift/UIKit/SwiftUI)")?;
		writeln!(self.output, "  3. General Documentation")?;
		writeln!(self.output, "  4. Custom")?;
		let choice = self.ask("Choose [1-4]: ")?;
		let project_type = project_type_choice(&choice);

		writeln!(self.output, "\n{}", "LLM Provider Configuration".bold())?;
		writeln!(self.output, "  1. OpenAI (GPT-4)")?;
		writeln!(self.output, "  2. Google Gemini")?;
		let choice = self.ask("Choose provider [1-2]: ")?;
		let provider = provider_choice(&choice);

		let api_key = self.ask(&format!(
			"Enter {} API key: ",
			provider.as_str().to_uppercase()
		))?;

		writeln!(self.output, "\n{}", "Indexing Configuration".bold())?;
		writeln!(self.output, "Suggested directories: docs/, README.md, src/")?;
		let directories = self.ask_list(
			"Directories to index (comma-separated) [docs/,README.md]: ",
			DEFAULT_DIRECTORIES,
		)?;

		writeln!(
			self.output,
			"\nSuggested extensions: .md, .txt, .py, .php, .swift, .json, .yaml"
		)?;
		let extensions =
			self.ask_list("File extensions (comma-separated) [.md,.txt]: ", DEFAULT_EXTENSIONS)?;

		writeln!(
			self.output,
			"\nSuggested exclusions: {}",
			DEFAULT_EXCLUDE_PATTERNS.join(", ")
		)?;
		let exclude_patterns = self.ask_list(
			"Exclusion patterns (comma-separated) [node_modules/,.git/,__pycache__/]: ",
			DEFAULT_EXCLUSIONS,
		)?;

		writeln!(self.output, "\n{}", "GitHub Integration (Optional)".bold())?;
		let token = self.ask("GitHub Personal Access Token (press Enter to skip): ")?;
		let github_token = (!token.is_empty()).then_some(token);

		let config = DocRagConfig {
			project: ProjectConfig {
				name,
				project_type: project_type.as_str().to_string(),
			},
			llm: LlmConfig::for_provider(provider),
			indexing: IndexingConfig {
				directories,
				extensions,
				exclude_patterns,
			},
			chunking: ChunkingConfig::default(),
			retrieval: RetrievalConfig::default(),
			prompt: PromptConfig {
				template: prompt_templates::get_template(project_type.as_str()).to_string(),
			},
		};

		Ok(SetupAnswers {
			config,
			api_key,
			github_token,
		})
	}

	fn ask(&mut self, prompt: &str) -> io::Result<String> {
		write!(self.output, "{prompt}")?;
		self.output.flush()?;

		let mut line = Vec::new();
		// EOF reads as an empty answer, undecodable bytes as U+FFFD
		self.input.read_until(b'\n', &mut line)?;
		Ok(String::from_utf8_lossy(&line).trim().to_string())
	}

	fn ask_list(&mut self, prompt: &str, default: &[&str]) -> io::Result<Vec<String>> {
		let items = split_list(&self.ask(prompt)?);
		Ok(if items.is_empty() {
			to_strings(default)
		} else {
			items
		})
	}
}

fn project_type_choice(choice: &str) -> ProjectType {
	match choice {
		"1" => ProjectType::Symfony,
		"2" => ProjectType::Ios,
		"3" => ProjectType::General,
		"4" => ProjectType::Custom,
		other => {
			if !other.is_empty() {
				warn!("unknown project type choice {other:?}, using general");
			}
			ProjectType::General
		}
	}
}

fn provider_choice(choice: &str) -> LlmProvider {
	if choice == "1" {
		LlmProvider::OpenAi
	} else {
		if !choice.is_empty() && choice != "2" {
			warn!("unknown provider choice {choice:?}, using gemini");
		}
		LlmProvider::Gemini
	}
}

fn split_list(answer: &str) -> Vec<String> {
	answer
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(String::from)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(script: &str) -> SetupAnswers {
		let mut output = Vec::new();
		Wizard::new(script.as_bytes(), &mut output)
			.run("fallback-name")
			.expect("in-memory io cannot fail")
	}

	#[test]
	fn test_all_blank_answers_use_defaults() {
		let answers = run("");

		assert_eq!(answers.config.project.name, "fallback-name");
		assert_eq!(answers.config.project.project_type, "general");
		assert_eq!(answers.config.llm.provider, "gemini");
		assert_eq!(answers.config.llm.llm_model, "gemini-1.5-flash");
		assert_eq!(answers.config.indexing.directories, ["docs/", "README.md"]);
		assert_eq!(answers.config.indexing.extensions, [".md", ".txt"]);
		assert_eq!(
			answers.config.indexing.exclude_patterns,
			["node_modules/", ".git/", "__pycache__/"]
		);
		assert_eq!(answers.api_key, "");
		assert_eq!(answers.github_token, None);
	}

	#[test]
	fn test_full_answers() {
		let answers = run(
			"Shop\n1\n1\nsk-test\ndocs/, src/ ,\n.md,.php\nvendor/\nghp_abc\n",
		);

		let config = &answers.config;
		assert_eq!(config.project.name, "Shop");
		assert_eq!(config.project.project_type, "symfony");
		assert_eq!(config.llm.provider, "openai");
		assert_eq!(config.llm.embedding_model, "text-embedding-3-small");
		assert_eq!(config.indexing.directories, ["docs/", "src/"]);
		assert_eq!(config.indexing.extensions, [".md", ".php"]);
		assert_eq!(config.indexing.exclude_patterns, ["vendor/"]);
		assert_eq!(config.prompt.template, prompt_templates::SYMFONY_TEMPLATE);
		assert_eq!(config.chunking.chunk_size, 800);
		assert_eq!(config.retrieval.top_k, 3);
		assert_eq!(answers.api_key, "sk-test");
		assert_eq!(answers.github_token.as_deref(), Some("ghp_abc"));
	}

	#[test]
	fn test_invalid_choices_fall_back() {
		let answers = run("App\n9\nopenai\nkey\n\n\n\n\n");
		assert_eq!(answers.config.project.project_type, "general");
		assert_eq!(answers.config.llm.provider, "gemini");
	}

	#[test]
	fn test_custom_type_uses_general_template() {
		let answers = run("App\n4\n2\n");
		assert_eq!(answers.config.project.project_type, "custom");
		assert_eq!(answers.config.prompt.template, prompt_templates::GENERAL_TEMPLATE);
	}

	#[test]
	fn test_separator_only_lists_fall_back() {
		let answers = run("App\n3\n1\nk\n,\n , \n,,\n\n");

		let indexing = &answers.config.indexing;
		assert_eq!(indexing.directories, ["docs/", "README.md"]);
		assert_eq!(indexing.extensions, [".md", ".txt"]);
		assert_eq!(indexing.exclude_patterns, ["node_modules/", ".git/", "__pycache__/"]);
		assert!(crate::validation::validate(&answers.config).is_empty());
	}

	#[test]
	fn test_non_utf8_answers_do_not_abort() {
		let script: &[u8] = b"\xff\xfeApp\n\xff\n1\nsk-\xc3\n\n\n\n\n";
		let answers = Wizard::new(script, std::io::sink())
			.run("fallback-name")
			.expect("bad bytes are not an io failure");

		assert_eq!(answers.config.project.name, "\u{FFFD}\u{FFFD}App");
		assert_eq!(answers.config.project.project_type, "general");
		assert_eq!(answers.config.llm.provider, "openai");
		assert_eq!(answers.api_key, "sk-\u{FFFD}");
	}

	#[test]
	fn test_prompts_are_written() {
		let mut output = Vec::new();
		Wizard::new("".as_bytes(), &mut output).run("x").unwrap();
		let text = String::from_utf8(output).unwrap();
		assert!(text.contains("Enter GEMINI API key: "));
		assert!(text.contains("Choose [1-4]: "));
	}
}
