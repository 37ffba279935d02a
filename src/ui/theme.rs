use crate::bill::DueUrgency;
use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub muted: Style,
    /// Menu numbers
    pub key: Style,
    /// Prompt text
    pub prompt: Style,
    /// "Total Amount Owed" line
    pub total: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
            key: Style::new().yellow(),
            prompt: Style::new().black().on_white(),
            total: Style::new().underline(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
            key: Style::new(),
            prompt: Style::new(),
            total: Style::new(),
        }
    }

    /// Green for paid, red for unpaid
    pub fn paid(&self, is_paid: bool) -> Style {
        if is_paid { self.success } else { self.error }
    }

    /// Due date color: red when late, yellow within 30 days, green beyond
    pub fn urgency(&self, urgency: DueUrgency) -> Style {
        match urgency {
            DueUrgency::Overdue => self.error,
            DueUrgency::DueSoon => self.warn,
            DueUrgency::Later => self.success,
            DueUrgency::Unknown => self.muted,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
