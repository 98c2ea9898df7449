//! User-facing banner texts.
//!
//! Screens surface failures as a one-line banner: the server's `detail` when
//! the response carried one, otherwise a generic message from this catalogue.
//! Indonesian is the product's default language.

use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Id,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "in" => Ok(Locale::Id),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("Unsupported locale '{other}' (expected 'id' or 'en').")),
        }
    }
}

/// Banner catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Generic,
    LoadJobsFailed,
    SaveJobFailed,
    JobCreated,
    JobUpdated,
    DeleteJobFailed,
    JobDeleted,
    JobNotFound,
    LoadCandidatesFailed,
    DeleteCandidateFailed,
    CandidateDeleted,
    ExportFailed,
    UploadFailed,
    UploadAccepted(usize),
    FilesRejected,
    RunRankingFailed,
    RankingStarted,
    LoadRankingFailed,
    ExportRankingFailed,
    CompareFailed,
    LoadAnalyticsFailed,
    ApplyFailed,
    SettingsSaved,
    WeightsMustTotal(u32),
}

impl Msg {
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::Id => self.text_id(),
            Locale::En => self.text_en(),
        }
    }

    fn text_id(&self) -> String {
        match self {
            Msg::Generic => "Terjadi kesalahan".to_string(),
            Msg::LoadJobsFailed => "Gagal memuat data lowongan".to_string(),
            Msg::SaveJobFailed => "Gagal menyimpan lowongan".to_string(),
            Msg::JobCreated => "Lowongan berhasil dibuat".to_string(),
            Msg::JobUpdated => "Lowongan berhasil diperbarui".to_string(),
            Msg::DeleteJobFailed => "Gagal menghapus lowongan".to_string(),
            Msg::JobDeleted => "Lowongan berhasil dihapus".to_string(),
            Msg::JobNotFound => "Lowongan tidak ditemukan".to_string(),
            Msg::LoadCandidatesFailed => "Gagal memuat data kandidat".to_string(),
            Msg::DeleteCandidateFailed => "Gagal menghapus kandidat".to_string(),
            Msg::CandidateDeleted => "Kandidat berhasil dihapus".to_string(),
            Msg::ExportFailed => "Gagal mengekspor data".to_string(),
            Msg::UploadFailed => "Gagal mengupload file".to_string(),
            Msg::UploadAccepted(n) => format!("{n} CV berhasil diupload dan sedang diproses."),
            Msg::FilesRejected => {
                "Beberapa file ditolak. Hanya PDF dan DOCX yang didukung.".to_string()
            }
            Msg::RunRankingFailed => "Gagal memulai ranking".to_string(),
            Msg::RankingStarted => {
                "Proses ranking dimulai. Cek halaman Ranking untuk melihat hasil.".to_string()
            }
            Msg::LoadRankingFailed => "Gagal memuat ranking".to_string(),
            Msg::ExportRankingFailed => "Gagal mengekspor ranking".to_string(),
            Msg::CompareFailed => "Gagal membandingkan kandidat".to_string(),
            Msg::LoadAnalyticsFailed => "Gagal memuat data analytics".to_string(),
            Msg::ApplyFailed => "Gagal mengirim lamaran. Silakan coba lagi.".to_string(),
            Msg::SettingsSaved => "Pengaturan berhasil disimpan".to_string(),
            Msg::WeightsMustTotal(total) => {
                format!("Total bobot harus 100% (saat ini {total}%)")
            }
        }
    }

    fn text_en(&self) -> String {
        match self {
            Msg::Generic => "Something went wrong".to_string(),
            Msg::LoadJobsFailed => "Failed to load jobs".to_string(),
            Msg::SaveJobFailed => "Failed to save job".to_string(),
            Msg::JobCreated => "Job created".to_string(),
            Msg::JobUpdated => "Job updated".to_string(),
            Msg::DeleteJobFailed => "Failed to delete job".to_string(),
            Msg::JobDeleted => "Job deleted".to_string(),
            Msg::JobNotFound => "Job not found".to_string(),
            Msg::LoadCandidatesFailed => "Failed to load candidates".to_string(),
            Msg::DeleteCandidateFailed => "Failed to delete candidate".to_string(),
            Msg::CandidateDeleted => "Candidate deleted".to_string(),
            Msg::ExportFailed => "Failed to export data".to_string(),
            Msg::UploadFailed => "Failed to upload files".to_string(),
            Msg::UploadAccepted(n) => format!("{n} CV(s) uploaded and being processed."),
            Msg::FilesRejected => "Some files were rejected. Only PDF and DOCX are supported.".to_string(),
            Msg::RunRankingFailed => "Failed to start ranking".to_string(),
            Msg::RankingStarted => "Ranking started. Check the Ranking view for results.".to_string(),
            Msg::LoadRankingFailed => "Failed to load rankings".to_string(),
            Msg::ExportRankingFailed => "Failed to export rankings".to_string(),
            Msg::CompareFailed => "Failed to compare candidates".to_string(),
            Msg::LoadAnalyticsFailed => "Failed to load analytics".to_string(),
            Msg::ApplyFailed => "Failed to submit the application. Please try again.".to_string(),
            Msg::SettingsSaved => "Settings saved".to_string(),
            Msg::WeightsMustTotal(total) => format!("Weights must total 100% (currently {total}%)"),
        }
    }
}

/// Banner text for a failed action: server `detail` first, else `fallback`.
pub fn failure_banner(err: &AppError, fallback: Msg, locale: Locale) -> String {
    match err.detail() {
        Some(detail) => detail.to_string(),
        None => fallback.text(locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_prefers_server_detail() {
        let err = AppError::api(400, Some("File terlalu besar (max 10MB)".to_string()));
        assert_eq!(
            failure_banner(&err, Msg::ApplyFailed, Locale::Id),
            "File terlalu besar (max 10MB)"
        );
    }

    #[test]
    fn banner_falls_back_to_localized_text() {
        let err = AppError::new(4, "connection refused");
        assert_eq!(
            failure_banner(&err, Msg::LoadJobsFailed, Locale::Id),
            "Gagal memuat data lowongan"
        );
        assert_eq!(
            failure_banner(&err, Msg::LoadJobsFailed, Locale::En),
            "Failed to load jobs"
        );
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("id".parse::<Locale>(), Ok(Locale::Id));
        assert!("fr".parse::<Locale>().is_err());
    }
}
