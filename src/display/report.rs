//! Report formatting utilities for terminal output
//!
//! Small building blocks shared by the summary and chart renderers.

use crossterm::style::Stylize;

use crate::config::Settings;
use crate::models::Money;

/// Presentation preferences for one render
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Symbol printed before every amount
    pub currency_symbol: String,
    /// Emit ANSI colours
    pub color: bool,
    /// Draw the category bar chart
    pub chart: bool,
    /// Width of the longest bar in cells
    pub chart_width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "₱".to_string(),
            color: false,
            chart: true,
            chart_width: 30,
        }
    }
}

impl DisplayOptions {
    /// Presentation preferences from the user's settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            color: settings.color_output,
            chart: settings.show_chart,
            chart_width: settings.chart_width,
        }
    }

    /// Format an amount with the configured symbol
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format an amount, red when negative if colour is on
    pub fn money_colored(&self, amount: Money) -> String {
        let text = self.money(amount);
        if amount.is_negative() {
            self.red(&text)
        } else {
            text
        }
    }

    /// Wrap text in red if colour is on
    pub fn red(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    /// Wrap a line in green if colour is on
    pub fn green(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Bold a heading if colour is on
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
