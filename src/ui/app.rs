use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use eframe::egui;

use crate::common::AssistantCommand;
use crate::conversation::Conversation;
use crate::faq;
use crate::history::{
    ChatHistoryEntry, export_history, export_transcript, filter_history, sample_history,
};
use crate::speech::SpeechControls;

use super::components::header::SpeechStatus;
use super::components::input_bar::InputControls;
use super::components::{chat_area, header, history_panel, input_bar, sidebar};

/// Fired replies arrive without any input event, so frames are requested at
/// least this often.
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    conversation: Conversation,
    speech: SpeechControls,
    history: Vec<ChatHistoryEntry>,
    history_search: String,
    export_path: PathBuf,
    transcript_path: PathBuf,
    status: Option<String>,
    runtime: tokio::runtime::Handle,
}

impl ChatApp {
    /// Must be called from within a tokio runtime; reply timers and speech
    /// tasks are spawned on it.
    pub fn new(
        conversation: Conversation,
        speech: SpeechControls,
        export_path: impl Into<PathBuf>,
        transcript_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            conversation,
            speech,
            history: sample_history(Utc::now()),
            history_search: String::new(),
            export_path: export_path.into(),
            transcript_path: transcript_path.into(),
            status: None,
            runtime: tokio::runtime::Handle::current(),
        }
    }

    /// Picks up whatever background tasks finished since the last frame.
    fn handle_background_events(&mut self) {
        for reply in self.conversation.drain_replies() {
            if let Some(language) = reply.language {
                // Fire and forget; the handle is not awaited.
                let _ = self.speech.speak(&reply.content, language);
            }
        }

        match self.speech.poll_transcript() {
            Some(Ok(transcript)) => {
                self.status = Some(format!("Heard \"{transcript}\". Press Send to ask."));
                self.conversation.set_input(transcript);
            }
            Some(Err(_)) => self.status = Some("Didn't catch that.".to_string()),
            None => {}
        }
    }

    fn handle_command(&mut self, command: AssistantCommand) {
        match command {
            AssistantCommand::Submit(text) => {
                self.conversation.submit(&text);
            }
            AssistantCommand::SendInput => {
                self.conversation.submit_input();
            }
            AssistantCommand::AskFaq(number) => match faq::question(number) {
                Some(question) => {
                    self.conversation.submit(question);
                }
                None => log::warn!("No FAQ entry #{number}"),
            },
            AssistantCommand::Listen => {
                if !self.speech.can_listen() {
                    self.status = Some("Voice input is not available.".to_string());
                } else if self.speech.listen(self.conversation.language()).is_some() {
                    self.status = None;
                }
            }
            AssistantCommand::ToggleSpeech => {
                self.status = Some(if self.speech.can_speak() {
                    let enabled = self.speech.toggle();
                    format!("Spoken replies {}.", if enabled { "on" } else { "off" })
                } else {
                    "Speech output is not available.".to_string()
                });
            }
            AssistantCommand::SetLanguage(language) => {
                self.conversation.set_language(language);
                self.status = Some(format!(
                    "Replies will be tagged {}.",
                    language.code().to_uppercase()
                ));
            }
            AssistantCommand::ExportHistory => {
                self.status = Some(match export_history(&self.export_path, &self.history) {
                    Ok(()) => format!("Chat history saved to {}.", self.export_path.display()),
                    Err(err) => {
                        log::warn!("History export failed: {err}");
                        format!("Export failed: {err}")
                    }
                });
            }
            AssistantCommand::ExportTranscript => {
                self.status = Some(
                    match export_transcript(&self.transcript_path, self.conversation.messages()) {
                        Ok(()) => format!("Transcript saved to {}.", self.transcript_path.display()),
                        Err(err) => {
                            log::warn!("Transcript export failed: {err}");
                            format!("Export failed: {err}")
                        }
                    },
                );
            }
        }
    }

    fn render(&mut self, ctx: &egui::Context) {
        let mut commands = Vec::new();
        let now = Utc::now();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let speech = SpeechStatus {
                can_speak: self.speech.can_speak(),
                enabled: self.speech.is_enabled(),
                listening: self.speech.is_listening(),
                speaking: self.speech.is_speaking(),
            };
            commands.extend(header::render(
                ui,
                self.conversation.language(),
                self.conversation.message_count(),
                speech,
            ));
        });

        egui::SidePanel::left("faq_sidebar").show(ctx, |ui| {
            commands.extend(sidebar::render(ui));
        });

        egui::SidePanel::right("history_panel").show(ctx, |ui| {
            let matches = filter_history(&self.history, &self.history_search);
            commands.extend(history_panel::render(
                ui,
                &mut self.history_search,
                &matches,
                now,
            ));
        });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            let controls = InputControls {
                can_send: !self.conversation.input().trim().is_empty(),
                can_listen: self.speech.can_listen(),
                listening: self.speech.is_listening(),
            };
            commands.extend(input_bar::render(
                ui,
                self.conversation.input_mut(),
                controls,
            ));
            if let Some(status) = &self.status {
                ui.label(egui::RichText::new(status).weak());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, self.conversation.messages());
        });

        for command in commands {
            self.handle_command(command);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let _runtime = self.runtime.enter();
        self.handle_background_events();
        self.render(ctx);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
