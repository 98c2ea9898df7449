//! Plain-text tables for the CLI.
//!
//! All terminal formatting lives here so the views stay free of layout and
//! output changes stay in one file.

use crate::domain::{
    AnalyticsOverview, ApplyReceipt, BiasReport, Candidate, Job, Page, Ranking, ScoreBucket,
    SourceShare, TrendPoint, User,
};
use crate::views::analytics::{bias_summary, total_applicants, total_scored};
use crate::views::candidates::{display_date, SKILL_CHIPS as CANDIDATE_CHIPS};
use crate::views::jobs::{skill_chips, status_label, SKILL_CHIPS as JOB_CHIPS};
use crate::views::ranking::{display_name, radar_rows};
use crate::views::settings::RankingSettings;
use crate::views::upload::{format_size, QueuedFile};

pub fn format_user(user: &User) -> String {
    format!("{} <{}> ({})\n", user.full_name, user.email, user.role.as_str())
}

pub fn format_jobs(jobs: &[Job]) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!("{:>5} {:<28} {:<16} {:<9} {}", "id", "title", "department", "status", "skills"),
    );
    push_row(&mut out, format!("{:-<5} {:-<28} {:-<16} {:-<9} {:-<20}", "", "", "", "", ""));
    for job in jobs {
        push_row(
            &mut out,
            format!(
                "{:>5} {:<28} {:<16} {:<9} {}",
                job.id,
                truncate(&job.title, 28),
                truncate(&job.department, 16),
                status_label(job.status),
                chips(&job.skills_required, JOB_CHIPS),
            ),
        );
    }
    if jobs.is_empty() {
        out.push_str("(no jobs)\n");
    }
    out
}

pub fn format_job(job: &Job) -> String {
    let mut out = String::new();
    out.push_str(&format!("#{} {}\n", job.id, job.title));
    out.push_str(&format!("Department: {}\n", or_dash(&job.department)));
    out.push_str(&format!("Status: {}\n", status_label(job.status)));
    out.push_str(&format!("Min. experience: {} years\n", job.min_experience_years));
    out.push_str(&format!("Education: {}\n", or_dash(&job.education_level)));
    out.push_str(&format!("Skills: {}\n", or_dash(&job.skills_required.join(", "))));
    if !job.description.is_empty() {
        out.push_str(&format!("\n{}\n", job.description.trim_end()));
    }
    if !job.requirements.is_empty() {
        out.push_str(&format!("\nRequirements:\n{}\n", job.requirements.trim_end()));
    }
    out
}

pub fn format_candidates(page: &Page<Candidate>) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!("{:>5} {:<24} {:<28} {:<10} {}", "id", "name", "email", "added", "skills"),
    );
    push_row(&mut out, format!("{:-<5} {:-<24} {:-<28} {:-<10} {:-<20}", "", "", "", "", ""));
    for c in &page.items {
        push_row(
            &mut out,
            format!(
                "{:>5} {:<24} {:<28} {:<10} {}",
                c.id,
                truncate(&c.full_name, 24),
                truncate(&c.email, 28),
                display_date(&c.created_at),
                chips(&c.skills, CANDIDATE_CHIPS),
            ),
        );
    }
    out.push_str(&format!(
        "page {} of {} ({} candidates)\n",
        page.page,
        page.total_pages.max(1),
        page.total
    ));
    out
}

pub fn format_candidate(c: &Candidate) -> String {
    let mut out = String::new();
    out.push_str(&format!("#{} {}\n", c.id, or_dash(&c.full_name)));
    out.push_str(&format!("Email: {}\n", or_dash(&c.email)));
    out.push_str(&format!("Phone: {}\n", or_dash(&c.phone)));
    out.push_str(&format!("Source: {}\n", or_dash(&c.source)));
    out.push_str(&format!("Skills: {}\n", or_dash(&c.skills.join(", "))));
    if !c.certifications.is_empty() {
        out.push_str(&format!("Certifications: {}\n", c.certifications.join(", ")));
    }
    if !c.experience.is_empty() {
        out.push_str("\nExperience:\n");
        for e in &c.experience {
            out.push_str(&format!("- {} at {} ({})\n", or_dash(&e.title), or_dash(&e.company), or_dash(&e.duration)));
        }
    }
    if !c.education.is_empty() {
        out.push_str("\nEducation:\n");
        for e in &c.education {
            out.push_str(&format!("- {} {} ({})\n", or_dash(&e.degree), e.institution, or_dash(&e.year)));
        }
    }
    if !c.summary.is_empty() {
        out.push_str(&format!("\n{}\n", c.summary.trim_end()));
    }
    out
}

pub fn format_rankings(rankings: &[Ranking]) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!(
            "{:>4} {:<24} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
            "#", "candidate", "overall", "skill", "exp", "edu", "cert", "sem"
        ),
    );
    push_row(
        &mut out,
        format!("{:-<4} {:-<24} {:-<7} {:-<7} {:-<7} {:-<7} {:-<7} {:-<7}", "", "", "", "", "", "", "", ""),
    );
    for r in rankings {
        push_row(
            &mut out,
            format!(
                "{:>4} {:<24} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7.1}",
                r.rank_position,
                truncate(&display_name(r), 24),
                r.overall_score,
                r.skill_score,
                r.experience_score,
                r.education_score,
                r.certification_score,
                r.semantic_similarity * 100.0,
            ),
        );
    }
    if rankings.is_empty() {
        out.push_str("(no ranking yet)\n");
    }
    out
}

/// One column per compared candidate, one row per metric.
pub fn format_comparison(compared: &[Ranking]) -> String {
    let mut out = String::new();
    let mut header = format!("{:<20}", "");
    for r in compared {
        header.push_str(&format!(" {:>18}", truncate(&display_name(r), 18)));
    }
    push_row(&mut out, header);
    let mut overall = format!("{:<20}", "Overall");
    for r in compared {
        overall.push_str(&format!(" {:>18.1}", r.overall_score));
    }
    push_row(&mut out, overall);
    for row in radar_rows(compared) {
        let mut line = format!("{:<20}", row.metric);
        for v in &row.values {
            line.push_str(&format!(" {v:>18.1}"));
        }
        push_row(&mut out, line);
    }
    for r in compared {
        if !r.missing_skills.is_empty() {
            out.push_str(&format!("{} is missing: {}\n", display_name(r), r.missing_skills.join(", ")));
        }
    }
    out
}

pub fn format_overview(o: &AnalyticsOverview) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total kandidat : {}\n", o.total_candidates));
    out.push_str(&format!("Total lowongan : {}\n", o.total_jobs));
    out.push_str(&format!("Posisi terbuka : {}\n", o.open_positions));
    out.push_str(&format!("Rata-rata skor : {:.1}\n", o.avg_score));
    out.push_str(&format!("Upload terbaru : {}\n", o.recent_uploads));
    out
}

pub fn format_trend(trend: &[TrendPoint]) -> String {
    let mut out = String::new();
    let peak = trend.iter().map(|p| p.count).max().unwrap_or(0);
    for p in trend {
        push_row(&mut out, format!("{} {:>5} {}", p.date, p.count, bar(p.count, peak, 40)));
    }
    out.push_str(&format!("total: {}\n", total_applicants(trend)));
    out
}

pub fn format_scores(buckets: &[ScoreBucket]) -> String {
    let mut out = String::new();
    let peak = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    for b in buckets {
        push_row(&mut out, format!("{:<8} {:>5} {}", b.range, b.count, bar(b.count, peak, 40)));
    }
    out.push_str(&format!("total: {}\n", total_scored(buckets)));
    out
}

pub fn format_sources(sources: &[SourceShare]) -> String {
    let mut out = String::new();
    for s in sources {
        push_row(
            &mut out,
            format!("{:<16} {:>5} {:>6.1}% {}", truncate(&s.source, 16), s.count, s.percentage, bar_pct(s.percentage, 30)),
        );
    }
    if sources.is_empty() {
        out.push_str("(no data)\n");
    }
    out
}

pub fn format_bias(report: &BiasReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Job #{}: {} candidates\n{}\n",
        report.job_id,
        report.total_candidates,
        bias_summary(report)
    ));
    if !report.demographic_distribution.is_empty() {
        out.push_str("\nDistribution:\n");
        for (group, n) in &report.demographic_distribution {
            out.push_str(&format!("  {group:<20} {n:>5}\n"));
        }
    }
    if !report.score_by_demographic.is_empty() {
        out.push_str("\nAverage score:\n");
        for (group, score) in &report.score_by_demographic {
            out.push_str(&format!("  {group:<20} {score:>7.1}\n"));
        }
    }
    if !report.details.is_empty() {
        out.push_str(&format!("\n{}\n", report.details.trim_end()));
    }
    out
}

pub fn format_queue(entries: &[QueuedFile]) -> String {
    let mut out = String::new();
    for e in entries {
        let mut line = format!(
            "{:<32} {:>9} {:<11} {:>5.0}%",
            truncate(&e.file_name, 32),
            format_size(e.size),
            e.status.as_str(),
            e.progress
        );
        if let Some(err) = &e.error {
            line.push_str(&format!("  {err}"));
        }
        push_row(&mut out, line);
    }
    out
}

pub fn format_receipt(receipt: &ApplyReceipt) -> String {
    format!("{}\nPosisi: {}\n", receipt.message, receipt.job_title)
}

pub fn format_settings(s: &RankingSettings) -> String {
    let mut out = String::new();
    out.push_str("Bobot ranking:\n");
    for (label, pct) in s.weights() {
        out.push_str(&format!("  {label:<12} {pct:>3}%\n"));
    }
    out.push_str(&format!("  {:<12} {:>3}%\n", "Total", s.total_weight()));
    out.push_str(&format!("Auto-process CV     : {}\n", on_off(s.auto_process)));
    out.push_str(&format!("Notifikasi email    : {}\n", on_off(s.email_notifications)));
    out.push_str(&format!("Retensi data (hari) : {}\n", s.data_retention_days));
    out
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

fn chips(skills: &[String], limit: usize) -> String {
    let (shown, rest) = skill_chips(skills, limit);
    let mut s = shown.join(", ");
    if rest > 0 {
        s.push_str(&format!(" +{rest}"));
    }
    s
}

fn bar(value: u64, peak: u64, width: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    "#".repeat((value as f64 / peak as f64 * width as f64).round() as usize)
}

fn bar_pct(pct: f64, width: usize) -> String {
    "#".repeat((pct.clamp(0.0, 100.0) / 100.0 * width as f64).round() as usize)
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
