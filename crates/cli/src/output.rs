//! Terminal rendering

use colored::Colorize;
use edison_infra_http::ProbeReport;
use edison_platform::{JobKind, TaskId, TaskResult, TaskStatus};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct JobKindRow {
    #[tabled(rename = "Job kind")]
    kind: &'static str,
    #[tabled(rename = "Primary field")]
    primary_field: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

pub fn job_kinds_table() -> String {
    let rows: Vec<JobKindRow> = JobKind::ALL
        .iter()
        .map(|kind| JobKindRow {
            kind: kind.as_str(),
            primary_field: kind.primary_field(),
            description: kind.description(),
        })
        .collect();
    Table::new(rows).to_string()
}

pub fn print_result(result: &TaskResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(result.as_value())?);
        return Ok(());
    }

    match result.status() {
        Some(status) => println!("{} {}", "Status:".bold(), colored_status(&status)),
        None => println!("{}", "Task result".cyan().bold()),
    }
    println!("{}", serde_json::to_string_pretty(result.as_value())?);
    Ok(())
}

pub fn print_task_id(task_id: &TaskId, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "task_id": task_id }));
    } else {
        println!("{}", "✓ Task created successfully".green().bold());
        println!("  {} {}", "Task ID:".bold(), task_id);
    }
}

pub fn print_probe_report(report: &ProbeReport) {
    println!("{}", "Edison Platform Connectivity Check".cyan().bold());
    println!();

    for (index, check) in report.checks.iter().enumerate() {
        println!("Test {}: {}", index + 1, check.name);
        println!("  Endpoint: GET {}", check.endpoint);
        if let Some(status) = check.status {
            println!("  Status: {}", status);
        }
        match (check.passed, &check.detail) {
            (true, None) => println!("  {}", "✓ PASSED".green()),
            (true, Some(warning)) => println!("  {} ({})", "✓ PASSED".green(), warning.yellow()),
            (false, detail) => println!(
                "  {} {}",
                "✗ FAILED:".red(),
                detail.as_deref().unwrap_or("unknown error")
            ),
        }
        println!();
    }

    let total = report.checks.len();
    println!("Test Results: {}/{} passed", report.passed(), total);
    if report.all_passed() {
        println!("{}", "✓ All checks passed".green().bold());
    } else {
        println!("{}", format!("✗ {} check(s) failed", report.failed()).red().bold());
    }
}

fn colored_status(status: &TaskStatus) -> colored::ColoredString {
    let text = status.to_string();
    match status {
        TaskStatus::Success => text.green(),
        TaskStatus::Failed | TaskStatus::Cancelled => text.red(),
        TaskStatus::Queued | TaskStatus::Running => text.yellow(),
        TaskStatus::Unknown(_) => text.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_kinds_table_lists_every_kind() {
        let table = job_kinds_table();
        for kind in JobKind::ALL {
            assert!(table.contains(kind.as_str()));
        }
        assert!(table.contains("cheminformatics"));
    }
}
