//! Shared runtime state for CLI interactions and command execution.

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use dialoguer::theme::ColorfulTheme;
use report_config::{resolve_home, Config, ConfigManager};
use report_core::{
    Clock, DraftStore, EditSession, NavigationDecision, NavigationTarget, Notice, SessionOptions,
    SystemClock,
};
use report_domain::{ReportHeader, Selection};
use report_storage_json::{JsonDraftMedium, JsonReportArchive};
use strsim::levenshtein;

use crate::cli::{
    commands,
    core::{CliError, CommandError, LoopControl},
    io as cli_io, output,
    registry::CommandRegistry,
};

/// Route the shell presents the report on.
pub const REPORT_ROUTE: &str = "/reports/execution";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub session: EditSession,
    pub archive: JsonReportArchive,
    pub config: Config,
    pub home: PathBuf,
    pub clock: Arc<dyn Clock>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens a session using the configuration under [`resolve_home`].
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = resolve_home();
        let config = ConfigManager::with_base_dir(home.clone())?.load()?;
        Self::with_config(mode, home, config, Arc::new(SystemClock))
    }

    pub fn with_config(
        mode: CliMode,
        home: PathBuf,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let medium = JsonDraftMedium::new(config.resolve_drafts_root(&home))?;
        let drafts = DraftStore::new(Arc::new(medium), clock.clone())
            .with_retention(config.draft_retention());
        if let Err(err) = drafts.purge_expired() {
            tracing::warn!(error = %err, "could not purge stale drafts");
        }
        let archive =
            JsonReportArchive::with_clock(config.resolve_reports_root(&home), clock.clone())?;

        let options = SessionOptions {
            rows: None,
            fiscal_year: config.default_fiscal_year.clone(),
            read_only: false,
            selection: Selection {
                hospital_mode: config.hospital_mode,
                ..Selection::default()
            },
            header: ReportHeader {
                district: config.district.clone(),
                project: config.project.clone(),
                program: config.program.clone(),
                ..ReportHeader::default()
            },
            route: REPORT_ROUTE.to_string(),
            autosave_delay: config.autosave_delay(),
        };
        let session = EditSession::open(options, drafts, clock.clone())?;

        let mut context = Self {
            mode,
            registry: commands::registry(),
            theme: ColorfulTheme::default(),
            session,
            archive,
            config,
            home,
            clock,
            last_command: None,
            running: true,
        };
        context.flush_notices();
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        let marker = if self.session.is_dirty() { "*" } else { "" };
        let scope = match (
            self.session.selection().health_center.as_deref(),
            self.session.selection().reporting_period.as_deref(),
        ) {
            (Some(center), Some(period)) => format!("{center}/{period}"),
            (Some(center), None) => center.to_string(),
            (None, Some(period)) => period.to_string(),
            (None, None) => "no selection".to_string(),
        };
        format!("report [{scope}]{marker} > ")
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let result = match self.registry.handler(command) {
            Some(handler) => match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            },
            None => {
                self.suggest_command(raw);
                Ok(LoopControl::Continue)
            }
        };
        self.flush_notices();
        result
    }

    /// Runs a due autosave and prints whatever the session has to say.
    pub(crate) fn poll(&mut self) {
        self.session.poll_autosave();
        self.flush_notices();
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    /// Leaves the report, asking first when unsaved changes would be left
    /// behind. Returns whether the shell should stop.
    pub(crate) fn request_exit(&mut self) -> Result<bool, CommandError> {
        let target = NavigationTarget::Unload;
        let confirmed = match self.session.guard_navigation(&target) {
            NavigationDecision::Proceed => true,
            NavigationDecision::ConfirmRequired if self.mode == CliMode::Script => {
                cli_io::print_warning("Leaving with unsaved changes; a draft is kept.");
                true
            }
            NavigationDecision::ConfirmRequired => cli_io::confirm_action(
                &self.theme,
                "You have unsaved changes. Leave anyway?",
                false,
            )?,
        };
        let left = self.session.leave(&target, confirmed);
        self.flush_notices();
        Ok(left)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Rejected(rejection) => {
                cli_io::print_warning(format!("Edit ignored: {rejection}"));
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn flush_notices(&mut self) {
        for notice in self.session.take_notices() {
            print_notice(&notice);
        }
    }
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::DraftSaved => cli_io::print_success("Draft saved"),
        Notice::Autosaved => cli_io::print_info("Draft autosaved"),
        Notice::DraftSaveFailed(reason) => {
            cli_io::print_error(format!("Failed to save draft: {reason}"))
        }
        Notice::DraftLoadFailed(reason) => {
            cli_io::print_error(format!("Failed to load draft: {reason}"))
        }
        Notice::DraftRestored { timestamp } => {
            let saved_at = DateTime::<Utc>::from_timestamp_millis(*timestamp)
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| timestamp.to_string());
            cli_io::print_info(format!("Restored draft saved at {saved_at}"))
        }
        Notice::Saved => cli_io::print_success("Report saved"),
        Notice::SaveFailed(reason) => cli_io::print_error(format!("Save failed: {reason}")),
        Notice::DraftRemoveFailed(reason) => {
            cli_io::print_warning(format!("Saved, but the draft could not be removed: {reason}"))
        }
    }
}
