//! Shared testing utilities for deltas-setup integration tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use deltas_setup::adapters::{
    Answer, FilesystemArtifactStore, FixedSecretSource, MinijinjaTemplateRenderer,
    ScriptedPrompter,
};
use deltas_setup::{AppContext, AppError, SetupOutcome, setup_with};
use std::fs;
use std::path::{Path, PathBuf};
use yamllint_rs::{FileProcessor, ProcessingOptions, Severity};

#[allow(dead_code)]
pub const FIXED_SECRET: &str = "integration-secret";

/// Isolated output directory plus helpers for driving the wizard.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Build a command for invoking the compiled binary inside the output directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("deltas-setup").expect("Failed to locate binary");
        cmd.current_dir(self.work_dir());
        cmd
    }

    /// Run the wizard with scripted answers against the real filesystem.
    pub fn run_wizard(
        &self,
        answers: Vec<Answer>,
    ) -> (Result<SetupOutcome, AppError>, Vec<String>) {
        let ctx = AppContext::new(
            ScriptedPrompter::new(answers),
            FilesystemArtifactStore::new(self.work_dir().to_path_buf()),
            FixedSecretSource::new(FIXED_SECRET),
            MinijinjaTemplateRenderer::new(),
        );
        let mut reported = Vec::new();
        let result = setup_with(&ctx, |path| reported.push(path.to_string()));
        (result, reported)
    }

    /// Assert the generated compose file has no yamllint errors.
    pub fn assert_compose_lints_clean(&self) {
        let mut config = yamllint_rs::config::Config::new();
        config.set_rule_enabled("line-length", false);
        config.set_rule_enabled("indentation", false);
        config.set_rule_enabled("truthy", false);
        config.set_rule_enabled("document-start", false);
        config.set_rule_enabled("comments", false);

        let processor = FileProcessor::with_config(ProcessingOptions::default(), config);
        let file = self.path("docker-compose.yaml");
        let result = processor
            .process_file(&file)
            .unwrap_or_else(|e| panic!("Failed to lint {}: {}", file.display(), e));
        let errors: Vec<String> = result
            .issues
            .iter()
            .filter(|(issue, _)| issue.severity == Severity::Error)
            .map(|(issue, line)| format!("L{}: {} - {}", issue.line, issue.message, line))
            .collect();
        assert!(errors.is_empty(), "YAML lint errors:\n{}", errors.join("\n"));
    }
}

/// Answers for the reference deployment: API on 3000 exposed, no App, Nginx without
/// a domain, local Postgres with the default password, no Redis/ClickHouse/MinIO, no SMTP.
#[allow(dead_code)]
pub fn reference_answers() -> Vec<Answer> {
    vec![
        // admin email, password, organization
        Answer::Default,
        Answer::Default,
        Answer::Default,
        // smtp
        Answer::Confirm(false),
        // api: deploy, port, expose
        Answer::Confirm(true),
        Answer::text("3000"),
        Answer::Confirm(true),
        // app
        Answer::Confirm(false),
        // nginx: deploy, domain, expose, http port
        Answer::Confirm(true),
        Answer::text(""),
        Answer::Default,
        Answer::Default,
        // origin
        Answer::Default,
        // postgres: mode, user, password, database, port, expose
        Answer::Select(0),
        Answer::text("root"),
        Answer::secret(""),
        Answer::text("deltas"),
        Answer::Default,
        Answer::Confirm(false),
        // redis, clickhouse, object storage
        Answer::Select(2),
        Answer::Select(2),
        Answer::Select(2),
    ]
}
