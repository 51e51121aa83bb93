use crate::domain::model::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub trait ResultFormatter: Send + Sync {
    fn format(&self, positions: &[Position]) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}', expected ru or en", other)),
        }
    }
}

/// Lists every position as "column N, cell M" (1-indexed) in the chosen language.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl LocaleFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    fn describe(&self, position: &Position) -> String {
        let column = position.col + 1;
        let cell = position.row + 1;
        match self.locale {
            Locale::Ru => format!("{} столбик {} квадрат", column, cell),
            Locale::En => format!("column {}, cell {}", column, cell),
        }
    }

    fn empty_message(&self) -> &'static str {
        match self.locale {
            Locale::Ru => "Выигрышные позиции не найдены",
            Locale::En => "No winning positions found",
        }
    }
}

impl ResultFormatter for LocaleFormatter {
    fn format(&self, positions: &[Position]) -> String {
        if positions.is_empty() {
            return self.empty_message().to_string();
        }
        positions
            .iter()
            .map(|p| self.describe(p))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
