// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

/// Named card colors the `c` key cycles through, in order.
pub(crate) const CARD_COLORS: [&str; 5] = ["red", "amber", "teal", "blue", "violet"];

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    monochrome: bool,
}

impl TuiTheme {
    /// `RAMIFY_COLORS=off` forces a monochrome theme for terminals with
    /// unreadable palettes.
    pub(crate) fn from_env() -> Self {
        let monochrome = env::var("RAMIFY_COLORS").is_ok_and(|value| value == "off");
        Self { monochrome }
    }

    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    pub(crate) fn card_style(&self, color: Option<&str>, selected: bool, in_path: bool) -> Style {
        let mut style = self.base_style();
        if !self.monochrome {
            if let Some(color) = color.and_then(named_color) {
                style = style.fg(color);
            }
        }
        if in_path {
            style = style.add_modifier(Modifier::BOLD);
        }
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    pub(crate) fn connector_style(&self, in_path: bool) -> Style {
        if in_path && !self.monochrome {
            self.base_style().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if in_path {
            self.base_style().add_modifier(Modifier::BOLD)
        } else {
            self.base_style().fg(Color::DarkGray)
        }
    }

    pub(crate) fn placeholder_style(&self) -> Style {
        if self.monochrome {
            self.base_style().add_modifier(Modifier::REVERSED)
        } else {
            self.base_style().fg(Color::LightGreen)
        }
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        if self.monochrome {
            self.base_style().add_modifier(Modifier::BOLD)
        } else {
            self.base_style().fg(Color::Cyan)
        }
    }

    pub(crate) fn error_style(&self) -> Style {
        if self.monochrome {
            self.base_style().add_modifier(Modifier::REVERSED)
        } else {
            self.base_style().fg(Color::Red)
        }
    }
}

fn named_color(name: &str) -> Option<Color> {
    match name {
        "red" => Some(Color::LightRed),
        "amber" => Some(Color::Yellow),
        "teal" => Some(Color::Cyan),
        "blue" => Some(Color::LightBlue),
        "violet" => Some(Color::LightMagenta),
        _ => None,
    }
}
