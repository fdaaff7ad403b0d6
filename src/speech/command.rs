use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{SpeechRecognizer, SpeechSynthesizer};
use crate::error::SpeechError;

/// Command line template split on whitespace; `{locale}` and `{text}` are
/// substituted per argument, so no shell is involved.
#[derive(Debug, Clone)]
struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    fn parse(template: &str) -> Option<Self> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The child is killed if the returned future is dropped, which is how
    /// a cancelled utterance stops its program.
    fn build(&self, locale: &str, text: Option<&str>) -> Command {
        let mut command = Command::new(&self.program);
        let mut used_text = false;
        for arg in &self.args {
            let mut arg = arg.replace("{locale}", locale);
            if let Some(text) = text {
                if arg.contains("{text}") {
                    arg = arg.replace("{text}", text);
                    used_text = true;
                }
            }
            command.arg(arg);
        }
        if let (Some(text), false) = (text, used_text) {
            command.arg(text);
        }
        command.stdin(Stdio::null()).kill_on_drop(true);
        command
    }

    fn failure(&self, reason: impl ToString) -> SpeechError {
        SpeechError::Command {
            program: self.program.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Runs an external program and takes the first non-empty line it prints
/// as the transcript.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    template: CommandTemplate,
}

impl CommandRecognizer {
    pub fn new(template: &str) -> Option<Self> {
        CommandTemplate::parse(template).map(|template| Self { template })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
        let output = self
            .template
            .build(locale, None)
            .output()
            .await
            .map_err(|err| self.template.failure(err))?;

        if !output.status.success() {
            return Err(self.template.failure(format!("exited with {}", output.status)));
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or(SpeechError::NoTranscript)
    }
}

/// Speaks through an external program, e.g. `espeak -v {locale} {text}`.
/// Without a `{text}` placeholder the text is passed as the last argument.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    template: CommandTemplate,
}

impl CommandSynthesizer {
    pub fn new(template: &str) -> Option<Self> {
        CommandTemplate::parse(template).map(|template| Self { template })
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        let status = self
            .template
            .build(locale, Some(text))
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|err| self.template.failure(err))?;

        if status.success() {
            Ok(())
        } else {
            Err(self.template.failure(format!("exited with {status}")))
        }
    }
}
