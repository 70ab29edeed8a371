use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use jailup_core::JailConfig;
use jailup_orchestrator::{ReportLevel, ReportRecord, ReportSink, UpgradeMechanism};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn current_output_style(plain_flag: bool) -> OutputStyle {
    resolve_output_style(
        plain_flag,
        std::env::var_os("NO_COLOR").is_some(),
        io::stdout().is_terminal(),
    )
}

pub(crate) fn resolve_output_style(
    plain_flag: bool,
    no_color: bool,
    stdout_is_terminal: bool,
) -> OutputStyle {
    if plain_flag || no_color || !stdout_is_terminal {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => {
            let (badge, badge_style) = status_badge(status);
            format!("{} {message}", colorize(badge_style, badge))
        }
    }
}

fn status_badge(status: &str) -> (&'static str, Style) {
    match status {
        "ok" => ("[OK]", badge_style(AnsiColor::BrightGreen)),
        "error" => ("[ERR]", badge_style(AnsiColor::BrightRed)),
        "warn" => ("[WARN]", badge_style(AnsiColor::BrightYellow)),
        _ => ("[..]", badge_style(AnsiColor::BrightBlue)),
    }
}

fn badge_style(color: AnsiColor) -> Style {
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

fn status_for_level(level: ReportLevel) -> &'static str {
    match level {
        ReportLevel::Info => "ok",
        ReportLevel::Warn => "warn",
        ReportLevel::Error => "error",
    }
}

pub(crate) struct TerminalSink<O, E> {
    style: OutputStyle,
    out: O,
    err: E,
}

impl TerminalSink<io::Stdout, io::Stderr> {
    pub(crate) fn stdio(style: OutputStyle) -> Self {
        Self::new(style, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalSink<O, E> {
    pub(crate) fn new(style: OutputStyle, out: O, err: E) -> Self {
        Self { style, out, err }
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> ReportSink for TerminalSink<O, E> {
    fn emit(&mut self, record: ReportRecord) {
        let line = render_status_line(self.style, status_for_level(record.level), &record.message);
        let written = match record.level {
            ReportLevel::Info => writeln!(self.out, "{line}"),
            ReportLevel::Warn | ReportLevel::Error => writeln!(self.err, "{line}"),
        };
        if let Err(err) = written {
            tracing::debug!(error = %err, "failed to write report line");
        }
    }
}

pub(crate) struct SpinningUpgrade<'a> {
    inner: &'a dyn UpgradeMechanism,
    style: OutputStyle,
}

impl<'a> SpinningUpgrade<'a> {
    pub(crate) fn new(inner: &'a dyn UpgradeMechanism, style: OutputStyle) -> Self {
        Self { inner, style }
    }

    fn start_spinner(&self, target_release: &str) -> Option<ProgressBar> {
        if self.style != OutputStyle::Rich {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg} {elapsed}") {
            spinner.set_style(style.tick_chars("-=~* "));
        }
        spinner.set_message(format!("upgrading to {target_release}"));
        spinner.enable_steady_tick(Duration::from_millis(80));
        Some(spinner)
    }
}

impl UpgradeMechanism for SpinningUpgrade<'_> {
    fn upgrade(
        &self,
        config: &JailConfig,
        target_release: &str,
        root_path: &Path,
    ) -> Result<String> {
        let spinner = self.start_spinner(target_release);
        let result = self.inner.upgrade(config, target_release, root_path);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result
    }
}
