//! Interactive editor for the agent configuration file.
//!
//! ```text
//! filename → ensure config/ → load → auth token → [add endpoint]* → save
//! ```
//!
//! The whole session works on one owned [`AgentConfig`]; the file is
//! written once, at the end.

mod endpoint;

pub use endpoint::{parse_selection, Selection, REUSE_URL_KEYWORD};

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{ensure_config_dir, AgentConfig, ConfigError, Endpoint};
use crate::prompt::{PromptError, Prompter};

/// File name used when the user leaves the prompt blank.
pub const DEFAULT_FILENAME: &str = "ngrok.yml";

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

pub struct ConfigEditor<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> ConfigEditor<R, W> {
    pub fn new(prompter: Prompter<R, W>) -> Self {
        Self { prompter }
    }

    /// Run a full session under `base_dir` and return the saved file path.
    ///
    /// Nothing is written if any step fails.
    pub fn run(&mut self, base_dir: &Path) -> Result<PathBuf, EditorError> {
        let filename = self.prompter.ask_with_default(
            "Enter the configuration file name (with .yml extension)",
            DEFAULT_FILENAME,
        )?;

        let dir = ensure_config_dir(base_dir)?;
        let path = dir.join(filename);

        let mut config = AgentConfig::load_from(&path)?;
        self.ensure_authtoken(&mut config)?;

        while self.prompter.confirm("Do you want to add a new section?", false)? {
            self.add_endpoint(&mut config)?;
        }

        config.save_to(&path)?;
        self.prompter
            .say(&format!("Configuration saved to {}", path.display()))?;
        Ok(path)
    }

    /// Prompt for an auth token unless the config already has an agent section.
    pub fn ensure_authtoken(&mut self, config: &mut AgentConfig) -> Result<(), EditorError> {
        if config.has_agent() {
            self.prompter.say("Configuration already has an authtoken.")?;
            return Ok(());
        }

        let token = self
            .prompter
            .ask_required("Enter the authtoken", "Authtoken is required. Please enter it.")?;
        config.bootstrap_agent(token);
        tracing::info!("bootstrapped agent section");
        Ok(())
    }

    /// Ask for one endpoint, offering `existing_urls` for reuse.
    pub fn collect_endpoint(&mut self, existing_urls: &[String]) -> Result<Endpoint, EditorError> {
        Ok(endpoint::collect(&mut self.prompter, existing_urls)?)
    }

    /// Collect an endpoint and append it to `config`.
    pub fn add_endpoint(&mut self, config: &mut AgentConfig) -> Result<(), EditorError> {
        let existing_urls = config.existing_urls();
        let endpoint = self.collect_endpoint(&existing_urls)?;
        tracing::info!(
            name = endpoint.name().unwrap_or_default(),
            port = %endpoint.port().map(ToString::to_string).unwrap_or_default(),
            reused_url = endpoint.url().is_some_and(|u| existing_urls.contains(&u)),
            "added endpoint"
        );
        config.push_endpoint(endpoint);
        Ok(())
    }

    /// Consume the editor, returning the prompt output sink.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scalar;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestEditor = ConfigEditor<Cursor<Vec<u8>>, Vec<u8>>;

    fn editor(input: &str) -> TestEditor {
        ConfigEditor::new(Prompter::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        ))
    }

    fn output(editor: TestEditor) -> String {
        String::from_utf8(editor.into_output()).unwrap()
    }

    #[test]
    fn ensure_authtoken_bootstraps_fresh_config() {
        let mut config = AgentConfig::default();
        let mut ed = editor("\ntok123\n");
        ed.ensure_authtoken(&mut config).unwrap();

        assert_eq!(config.version, Some(Scalar::Int(3)));
        assert_eq!(
            config.agent.as_ref().and_then(|a| a.authtoken.as_deref()),
            Some("tok123")
        );
        assert!(output(ed).contains("Authtoken is required. Please enter it."));
    }

    #[test]
    fn ensure_authtoken_keeps_existing_agent() {
        let mut config = AgentConfig::default();
        config.bootstrap_agent("original".to_string());
        config.version = None;
        let before = config.clone();

        let mut ed = editor("");
        ed.ensure_authtoken(&mut config).unwrap();

        assert_eq!(config, before);
        assert!(output(ed).contains("Configuration already has an authtoken."));
    }

    #[test]
    fn add_endpoint_offers_urls_from_config() {
        let mut config = AgentConfig::default();
        config.push_endpoint(Endpoint::new("web", "8080").with_url(Some("https://web.example".into())));

        let mut ed = editor("api\n9090\n\n/existed\n1\n\n");
        ed.add_endpoint(&mut config).unwrap();

        let endpoints = config.endpoints.unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[1].name(), Some("api"));
        assert_eq!(endpoints[1].url().as_deref(), Some("https://web.example"));
    }

    #[test]
    fn run_creates_file_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut ed = editor("\ntok123\nyes\nweb\n8080\n\n\n\nno\n");

        let path = ed.run(temp_dir.path()).unwrap();

        assert_eq!(path, temp_dir.path().join("config").join("ngrok.yml"));
        let config = AgentConfig::load_from(&path).unwrap();
        assert_eq!(config.version, Some(Scalar::Int(3)));
        assert_eq!(config.endpoints, Some(vec![Endpoint::new("web", "8080")]));
        assert!(output(ed).contains(&format!("Configuration saved to {}", path.display())));
    }

    #[test]
    fn run_without_sections_omits_endpoints_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut ed = editor("custom.yml\ntok\n\n");

        let path = ed.run(temp_dir.path()).unwrap();

        assert!(path.ends_with("config/custom.yml"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("endpoints"));
    }

    #[test]
    fn run_aborts_on_unparseable_file_before_prompting_token() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("config");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ngrok.yml");
        fs::write(&path, "- not\n- a mapping\n").unwrap();

        let mut ed = editor("\ntok\nno\n");
        let err = ed.run(temp_dir.path()).unwrap_err();

        assert!(matches!(err, EditorError::Config(ConfigError::ParseError { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "- not\n- a mapping\n");
        assert!(!output(ed).contains("Enter the authtoken"));
    }

    #[test]
    fn run_fails_when_config_dir_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("config");
        fs::write(&blocker, "not a dir").unwrap();

        let mut ed = editor("\ntok\nno\n");
        let err = ed.run(temp_dir.path()).unwrap_err();

        assert!(matches!(err, EditorError::Config(ConfigError::CreateDirError { .. })));
        assert!(blocker.is_file());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a dir");
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(!output(ed).contains("Enter the authtoken"));
    }

    #[test]
    fn run_writes_nothing_when_input_closes() {
        let temp_dir = TempDir::new().unwrap();
        let mut ed = editor("\ntok\nyes\nweb\n");

        let err = ed.run(temp_dir.path()).unwrap_err();

        assert!(matches!(err, EditorError::Prompt(PromptError::InputClosed { .. })));
        assert!(!temp_dir.path().join("config").join("ngrok.yml").exists());
    }
}
