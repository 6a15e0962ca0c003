use colored::*;

use gatr_common::config::Config;
use gatr_core::gate::ReadyReport;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str, cfg: &Config) {
    if cfg.quiet {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{}", line);
}

pub fn ready(report: &ReadyReport, cfg: &Config) {
    if cfg.quiet {
        return;
    }

    let attempts: ColoredString = format!("{} attempt(s)", report.attempts).bold().green();
    let waited: ColoredString = format!("{:.2}s", report.waited.as_secs_f64()).bold().yellow();
    println!("Dependency ready: {attempts} over {waited}");
}
