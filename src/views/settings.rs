//! Ranking weights and processing preferences.
//!
//! The server has no settings endpoint yet, so these live in a local JSON
//! file (see `io::settings`).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, EXIT_LOCAL};
use crate::messages::{Locale, Msg};

/// Weights are percentages and must add up to exactly this.
pub const WEIGHT_TOTAL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    pub skill_weight: u32,
    pub experience_weight: u32,
    pub education_weight: u32,
    pub certification_weight: u32,
    pub auto_process: bool,
    pub email_notifications: bool,
    pub data_retention_days: u32,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            skill_weight: 40,
            experience_weight: 30,
            education_weight: 20,
            certification_weight: 10,
            auto_process: true,
            email_notifications: true,
            data_retention_days: 365,
        }
    }
}

/// A settings field addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SettingKey {
    Skill,
    Experience,
    Education,
    Certification,
    AutoProcess,
    EmailNotifications,
    DataRetentionDays,
}

impl RankingSettings {
    /// Saturates rather than overflowing on hand-edited files.
    pub fn total_weight(&self) -> u32 {
        self.weights()
            .iter()
            .fold(0u32, |total, (_, w)| total.saturating_add(*w))
    }

    /// Weights must total 100.
    pub fn validate(&self) -> Result<(), Msg> {
        match self.total_weight() {
            WEIGHT_TOTAL => Ok(()),
            other => Err(Msg::WeightsMustTotal(other)),
        }
    }

    /// Validation as an `AppError` carrying the localized banner.
    pub fn check(&self, locale: Locale) -> Result<(), AppError> {
        self.validate()
            .map_err(|msg| AppError::new(EXIT_LOCAL, msg.text(locale)))
    }

    /// Set one field from text. Weights are 0..=100; retention is in days.
    pub fn set(&mut self, key: SettingKey, raw: &str) -> Result<(), AppError> {
        let raw = raw.trim();
        match key {
            SettingKey::AutoProcess => self.auto_process = parse_bool(raw)?,
            SettingKey::EmailNotifications => self.email_notifications = parse_bool(raw)?,
            SettingKey::DataRetentionDays => {
                self.data_retention_days = raw.parse().map_err(|_| {
                    AppError::new(EXIT_LOCAL, format!("Retention must be a number of days (got: {raw})."))
                })?
            }
            weight => {
                let value: u32 = raw
                    .trim_end_matches('%')
                    .parse()
                    .ok()
                    .filter(|v| *v <= WEIGHT_TOTAL)
                    .ok_or_else(|| {
                        AppError::new(EXIT_LOCAL, format!("Weight must be between 0 and 100 (got: {raw})."))
                    })?;
                match weight {
                    SettingKey::Skill => self.skill_weight = value,
                    SettingKey::Experience => self.experience_weight = value,
                    SettingKey::Education => self.education_weight = value,
                    _ => self.certification_weight = value,
                }
            }
        }
        Ok(())
    }

    /// `(label, percent)` pairs in display order.
    pub fn weights(&self) -> [(&'static str, u32); 4] {
        [
            ("Skills", self.skill_weight),
            ("Pengalaman", self.experience_weight),
            ("Pendidikan", self.education_weight),
            ("Sertifikasi", self.certification_weight),
        ]
    }
}

fn parse_bool(raw: &str) -> Result<bool, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(AppError::new(EXIT_LOCAL, format!("Expected on/off (got: {raw})."))),
    }
}
