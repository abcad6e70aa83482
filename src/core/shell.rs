use crate::core::{ContactSubmission, FormTransport};
use crate::utils::error::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    NeonGreen,
    NeonOrange,
    NeonPurple,
    NeonBlue,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::NeonGreen,
        Theme::NeonOrange,
        Theme::NeonPurple,
        Theme::NeonBlue,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Theme::NeonGreen => "neon-green",
            Theme::NeonOrange => "neon-orange",
            Theme::NeonPurple => "neon-purple",
            Theme::NeonBlue => "neon-blue",
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.slug().trim_start_matches("neon-")
    }

    /// Accepts either the short name (`purple`) or the slug (`neon-purple`).
    pub fn from_name(name: &str) -> Option<Theme> {
        let name = name.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.slug() == name || theme.short_name() == name)
    }

    pub fn names() -> Vec<&'static str> {
        Theme::ALL.iter().map(Theme::short_name).collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    About,
    Projects,
    Skills,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

/// What a console command did beyond appending history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleEffect {
    None,
    Cleared,
    Closed,
    ThemeChanged(Theme),
}

const HELP_LINES: &[&str] = &[
    "Available commands:",
    "  help            show this list",
    "  about           who I am",
    "  projects        things I have built",
    "  skills          languages and tools",
    "  contact         how to reach me",
    "  theme <name>    switch theme (green, orange, purple, blue)",
    "  clear           clear the console",
    "  exit            close the console",
];

const ABOUT_LINES: &[&str] = &[
    "Systems programmer with a soft spot for space data and neon terminals.",
];

const PROJECTS_LINES: &[&str] = &[
    "AstroScope  - mission control dashboard for live space data",
    "Portfolio   - this site, console included",
];

const SKILLS_LINES: &[&str] = &["Rust, TypeScript, React, async networking, data visualisation"];

const CONTACT_LINES: &[&str] = &["Use the contact form, or type 'exit' and scroll to Contact."];

/// UI state for the portfolio: theme, highlighted section, console and contact form.
#[derive(Debug, Clone, Default)]
pub struct ThemeConsoleShell {
    theme: Theme,
    active_section: Section,
    console_open: bool,
    history: Vec<String>,
    form: ContactSubmission,
    status: SubmissionStatus,
}

impl ThemeConsoleShell {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!("Theme {} -> {}", self.theme, theme);
        self.theme = theme;
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn navigate(&mut self, section: Section) {
        self.active_section = section;
    }

    pub fn is_console_open(&self) -> bool {
        self.console_open
    }

    pub fn open_console(&mut self) {
        self.console_open = true;
    }

    pub fn close_console(&mut self) {
        self.console_open = false;
    }

    pub fn toggle_console(&mut self) {
        self.console_open = !self.console_open;
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Runs one console line, appending the echo and the command's output to history.
    pub fn execute(&mut self, input: &str) -> ConsoleEffect {
        let line = input.trim();
        if line.is_empty() {
            return ConsoleEffect::None;
        }

        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.collect::<Vec<_>>().join(" ");

        if keyword == "clear" && argument.is_empty() {
            self.history.clear();
            return ConsoleEffect::Cleared;
        }

        self.history.push(format!("> {}", line));

        match (keyword.as_str(), argument.is_empty()) {
            ("help", true) => self.print(HELP_LINES),
            ("about", true) => self.show(Section::About, ABOUT_LINES),
            ("projects", true) => self.show(Section::Projects, PROJECTS_LINES),
            ("skills", true) => self.show(Section::Skills, SKILLS_LINES),
            ("contact", true) => self.show(Section::Contact, CONTACT_LINES),
            ("exit", true) => {
                self.console_open = false;
                ConsoleEffect::Closed
            }
            ("theme", true) => {
                self.history.push(format!(
                    "usage: theme <name> (available: {})",
                    Theme::names().join(", ")
                ));
                ConsoleEffect::None
            }
            ("theme", false) => match Theme::from_name(&argument) {
                Some(theme) => {
                    self.set_theme(theme);
                    self.history.push(format!("Theme switched to {}", theme));
                    ConsoleEffect::ThemeChanged(theme)
                }
                None => {
                    self.history.push(format!(
                        "unknown theme: {} (available: {})",
                        argument,
                        Theme::names().join(", ")
                    ));
                    ConsoleEffect::None
                }
            },
            _ => {
                self.history.push(format!("command not found: {}", line));
                ConsoleEffect::None
            }
        }
    }

    fn print(&mut self, lines: &[&str]) -> ConsoleEffect {
        self.history.extend(lines.iter().map(|line| line.to_string()));
        ConsoleEffect::None
    }

    fn show(&mut self, section: Section, lines: &[&str]) -> ConsoleEffect {
        self.active_section = section;
        self.print(lines)
    }

    pub fn form(&self) -> &ContactSubmission {
        &self.form
    }

    pub fn submission_status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.form.name = value,
            FormField::Email => self.form.email = value,
            FormField::Message => self.form.message = value,
        }
    }

    /// Hands the form to `transport`; clears it once delivery succeeds.
    pub async fn submit<T: FormTransport + ?Sized>(&mut self, transport: &T) -> Result<()> {
        self.status = SubmissionStatus::Sending;
        let submission = self.form.clone();

        match transport.deliver(&submission).await {
            Ok(()) => {
                tracing::info!("Contact form submitted by {}", submission.name);
                self.form = ContactSubmission::default();
                self.status = SubmissionStatus::Sent;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Contact form submission failed: {}", e);
                self.status = SubmissionStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }
}
