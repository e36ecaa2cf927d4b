use colored::Colorize;

use super::TargetStatus;
use crate::cache::CacheStatus;
use crate::poller::CycleReport;

/// Format age in human-readable form
pub fn format_age(secs: i64) -> String {
    if secs < 0 {
        "in the future".to_string()
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

fn freshness(fresh: bool) -> colored::ColoredString {
    if fresh {
        "(fresh)".green()
    } else {
        "(stale)".yellow()
    }
}

/// Format a cycle summary for pretty output
pub fn format_report(report: &CycleReport) -> String {
    let mark = if report.skipped == 0 {
        "✓".green()
    } else {
        "!".yellow()
    };
    format!(
        "{} Cycle complete: {} fetched, {} cached, {} skipped",
        mark,
        report.fetched.to_string().bold(),
        report.cached.to_string().bold(),
        report.skipped.to_string().bold()
    )
}

/// Format configured targets for pretty output
pub fn format_targets(targets: &[TargetStatus]) -> String {
    if targets.is_empty() {
        return "No targets configured.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Targets".bold()));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for target in targets {
        output.push_str(&format!("{} [{}]\n", target.name.bold(), target.key));
        output.push_str(&format!("  {} {}\n", "Query:".cyan(), target.query));
        if let Some(ref image) = target.fallback_image {
            output.push_str(&format!("  {} {}\n", "Fallback:".cyan(), image));
        }
        match (&target.views, target.age_secs) {
            (Some(views), Some(age)) => output.push_str(&format!(
                "  {} {} {} {}\n",
                "Cached:".cyan(),
                views,
                format!("{} ago", format_age(age)).dimmed(),
                freshness(target.fresh)
            )),
            (Some(views), None) => output.push_str(&format!(
                "  {} {} {}\n",
                "Cached:".cyan(),
                views,
                freshness(false)
            )),
            _ => output.push_str(&format!("  {} {}\n", "Cached:".cyan(), "no".dimmed())),
        }
    }

    output.trim_end().to_string()
}

/// Format cache status for pretty output
pub fn format_cache_status(status: &CacheStatus) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Status".bold()));
    output.push_str(&format!("Location: {}\n\n", status.path.display()));

    if !status.exists {
        output.push_str(&format!("  {}\n", "Not cached".dimmed()));
        return output.trim_end().to_string();
    }

    if !status.readable {
        output.push_str(&format!(
            "  {}\n",
            "Unreadable (will be replaced on next fetch)".yellow()
        ));
        return output.trim_end().to_string();
    }

    output.push_str(&format!("  Entries: {}\n", status.entries.len()));
    for entry in &status.entries {
        let age = entry
            .age_secs
            .map(format_age)
            .unwrap_or_else(|| "unknown".to_string());
        output.push_str(&format!(
            "  {} {} Age: {} {}\n",
            entry.key.bold(),
            entry.views,
            age,
            freshness(entry.fresh)
        ));
    }

    output.trim_end().to_string()
}
