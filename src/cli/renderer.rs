use colored::{control, Colorize};

use costreport::core::formatter::{format_money, format_seconds, format_share_bar, format_window};
use costreport::core::models::report::{
    AccountService, Breakdown, CloudAccount, CloudProvider, CostReport, EvergreenCost,
};
use costreport::core::summary::ReportSummary;

const BAR_WIDTH: usize = 12;

/// Render a report as a colored (or plain) block.
///
/// Layout:
/// ```text
///  Cost report (2017-05-23 17:00 → 17:12 UTC)
///   Generated  2017-05-23T12:11:10.123
///   Cloud      $10,043.31
///     aws          $10,016.19 [████████████] 1 account
///     macstadium       $27.12 [░░░░░░░░░░░░]
///   Evergreen  1 project, 1 task, 20m 42s
///              1 distro, 12s
/// ```
///
/// With `detailed`, each itemized provider is expanded into accounts,
/// services and line items, and evergreen into projects and distros.
pub fn render_report(report: &CostReport, detailed: bool, use_color: bool) -> String {
    control::set_override(use_color);

    let summary = ReportSummary::from_report(report);
    let mut lines: Vec<String> = Vec::new();

    let header = format!(
        " Cost report ({})",
        format_window(&summary.begin, &summary.end)
    );
    lines.push(header.bold().to_string());
    lines.push(format!(
        "  {}  {}",
        "Generated".cyan(),
        summary.generated.to_string().dimmed()
    ));

    lines.push(format!(
        "  {}      {}",
        "Cloud".cyan(),
        format_money(summary.cloud_total).bold()
    ));

    let name_width = summary
        .providers
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    for (provider, total) in report.providers.iter().zip(&summary.providers) {
        let accounts = match total.accounts {
            0 => String::new(),
            1 => " 1 account".to_string(),
            n => format!(" {} accounts", n),
        };
        lines.push(format!(
            "    {:<width$} {:>12} {}{}",
            provider.name,
            format_money(total.total),
            format_share_bar(total.total, summary.cloud_total, BAR_WIDTH).magenta(),
            accounts,
            width = name_width
        ));
        if detailed {
            render_provider_detail(&mut lines, provider);
        }
    }

    lines.push(format!(
        "  {}  {} {}, {} {}, {}",
        "Evergreen".cyan(),
        summary.projects,
        plural(summary.projects, "project"),
        summary.tasks,
        plural(summary.tasks, "task"),
        format_seconds(summary.task_seconds)
    ));
    lines.push(format!(
        "             {} {}, {}",
        summary.distros,
        plural(summary.distros, "distro"),
        format_seconds(summary.instance_seconds)
    ));
    if detailed {
        render_evergreen_detail(&mut lines, &report.evergreen);
    }

    lines.join("\n")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

fn render_provider_detail(lines: &mut Vec<String>, provider: &CloudProvider) {
    let Breakdown::Itemized(accounts) = provider.breakdown() else {
        return;
    };
    for account in accounts {
        render_account(lines, account);
    }
}

fn render_account(lines: &mut Vec<String>, account: &CloudAccount) {
    lines.push(format!(
        "      {} {}",
        account.name.bold(),
        format_money(account.total())
    ));
    for service in &account.services {
        render_service(lines, service);
    }
}

fn render_service(lines: &mut Vec<String>, service: &AccountService) {
    lines.push(format!(
        "        {:<10} {}",
        service.name,
        format_money(service.total())
    ));
    if let Breakdown::Itemized(items) = service.breakdown() {
        for item in items {
            let line = format!(
                "          {} ({}) {} launched, {} terminated, {}/h x {}h = {}",
                item.name,
                item.item_type,
                item.launched,
                item.terminated,
                format_money(item.avg_price),
                item.total_hours,
                format_money(item.total())
            );
            lines.push(line.dimmed().to_string());
        }
    }
}

fn render_evergreen_detail(lines: &mut Vec<String>, evergreen: &EvergreenCost) {
    for project in &evergreen.projects {
        lines.push(format!(
            "    {} {}",
            project.name.bold(),
            format_seconds(project.task_seconds())
        ));
        for task in &project.tasks {
            let short_hash: String = task.githash.chars().take(7).collect();
            lines.push(format!(
                "      {:<12} {} on {} ({}) {}",
                task.name,
                short_hash.dimmed(),
                task.distro,
                task.build_variant,
                format_seconds(task.task_seconds)
            ));
        }
    }
    for distro in &evergreen.distros {
        lines.push(format!(
            "    {} {}/{} {}",
            distro.name.bold(),
            distro.provider,
            distro.instance_type,
            format_seconds(distro.instance_seconds)
        ));
    }
}
