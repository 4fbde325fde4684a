// src/report/text.rs

use std::fmt::Write;

use crate::dag::DependencyAnalysis;
use crate::pm::{
    CostStatus, EarnedValue, EarnedValueInput, RiskAssessment, ScheduleStatus, WbsNode,
};
use crate::report::{DATE_FORMAT, ReportOptions, round_to};
use crate::schedule::{GanttRow, Schedule};

const RULE_WIDTH: usize = 60;

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{rule}");
    out.push('\n');
}

fn num(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, round_to(value, precision))
}

pub fn analysis(a: &DependencyAnalysis, opts: &ReportOptions) -> String {
    let p = opts.precision;
    let coupling = &a.coupling;
    let mut out = String::new();

    banner(&mut out, "Dependency Analysis Report");

    out.push_str("[Overview]\n");
    let _ = writeln!(out, "Modules: {}", coupling.modules.len());
    let _ = writeln!(out, "Average coupling: {}", num(coupling.average, p));
    let _ = writeln!(out, "Cycles: {}", a.cycles.len());
    out.push('\n');

    if !coupling.high_coupling.is_empty() {
        let _ = writeln!(
            out,
            "[High coupling] (threshold > {:.0}%)",
            coupling.threshold * 100.0
        );
        for id in coupling.high_coupling.iter() {
            let info = &coupling.modules[id];
            let _ = writeln!(
                out,
                "  {id}: {} (depends on: {}, depended on by: {})",
                num(info.coupling, p),
                info.dependencies.len(),
                info.dependents.len()
            );
        }
        out.push('\n');
    }

    if !a.cycles.is_empty() {
        out.push_str("[Dependency cycles]\n");
        for (i, cycle) in a.cycles.iter().take(opts.max_listed).enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, cycle.join(" -> "));
        }
        if a.cycles.len() > opts.max_listed {
            let _ = writeln!(
                out,
                "  ... and {} more",
                a.cycles.len() - opts.max_listed
            );
        }
        out.push('\n');
    }

    if !coupling.strongly_connected.is_empty() {
        out.push_str("[Entangled components]\n");
        for scc in coupling.strongly_connected.iter() {
            let _ = writeln!(out, "  {{{}}}", scc.join(", "));
        }
        out.push('\n');
    }

    if !coupling.isolated.is_empty() {
        out.push_str("[Isolated modules]\n");
        for id in coupling.isolated.iter() {
            let _ = writeln!(out, "  - {id}");
        }
        out.push('\n');
    }

    out.push_str("[Dependency details]\n");
    for (id, info) in coupling.modules.iter().filter(|(_, i)| !i.is_isolated()) {
        let _ = writeln!(out, "\n  {id}:");
        if !info.dependencies.is_empty() {
            let _ = writeln!(out, "    depends on: {}", info.dependencies.join(", "));
        }
        if !info.dependents.is_empty() {
            let _ = writeln!(out, "    depended on by: {}", info.dependents.join(", "));
        }
    }

    out
}

pub fn schedule(
    s: &Schedule,
    chains: &[Vec<String>],
    gantt: Option<&[GanttRow]>,
    opts: &ReportOptions,
) -> String {
    let p = opts.precision;
    let mut out = String::new();

    banner(&mut out, "Critical Path Schedule");

    let _ = writeln!(out, "Project duration: {}", num(s.project_duration, p));
    match chains {
        [] => {
            let _ = writeln!(out, "Critical path: {}", s.critical_path.join(", "));
        }
        [only] => {
            let _ = writeln!(out, "Critical path: {}", only.join(" → "));
        }
        many => {
            out.push_str("Critical paths:\n");
            for chain in many {
                let _ = writeln!(out, "  {}", chain.join(" → "));
            }
        }
    }
    out.push('\n');

    let id_width = s
        .tasks
        .iter()
        .map(|t| t.id.chars().count())
        .max()
        .unwrap_or(0)
        .max("Task".len());
    let col = (p + 6).max(8);

    let _ = writeln!(
        out,
        "  {:<id_width$} {:>col$} {:>col$} {:>col$} {:>col$} {:>col$} {:>col$}",
        "Task", "Duration", "ES", "EF", "LS", "LF", "Slack"
    );
    for t in s.tasks.iter() {
        let marker = if s.is_critical(&t.id) { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {:<id_width$} {:>col$} {:>col$} {:>col$} {:>col$} {:>col$} {:>col$}{marker}",
            t.id,
            num(t.duration, p),
            num(t.earliest_start, p),
            num(t.earliest_finish, p),
            num(t.latest_start, p),
            num(t.latest_finish, p),
            num(t.slack, p),
        );
    }
    out.push_str("\n  * zero slack\n");

    if let Some(rows) = gantt {
        out.push_str("\n[Gantt]\n");
        for r in rows {
            let marker = if r.critical { " *" } else { "" };
            let _ = writeln!(
                out,
                "  {:<id_width$} {} -> {}{marker}",
                r.id,
                r.start.format(DATE_FORMAT),
                r.end.format(DATE_FORMAT),
            );
        }
    }

    out
}

pub fn risk(r: &RiskAssessment) -> String {
    let mut out = String::new();
    banner(&mut out, "Risk Assessment");
    let _ = writeln!(out, "  Probability: {}/5", r.probability);
    let _ = writeln!(out, "  Impact: {}/5", r.impact);
    let _ = writeln!(out, "  Score: {}", r.score);
    let _ = writeln!(out, "  Level: {}", r.level);
    let _ = writeln!(out, "  Action: {}", r.action);
    out
}

pub fn earned_value(input: &EarnedValueInput, r: &EarnedValue, opts: &ReportOptions) -> String {
    let p = opts.precision;
    let mut out = String::new();
    banner(&mut out, "Earned Value Analysis");

    let _ = writeln!(out, "  Budget at completion (BAC): {}", num(input.bac, p));
    let _ = writeln!(out, "  Planned value (PV): {}", num(input.pv, p));
    let _ = writeln!(out, "  Earned value (EV): {}", num(input.ev, p));
    let _ = writeln!(out, "  Actual cost (AC): {}", num(input.ac, p));
    out.push('\n');

    let schedule = match r.schedule {
        ScheduleStatus::Ahead => "ahead of schedule",
        ScheduleStatus::OnTrack => "on track",
        ScheduleStatus::Behind => "behind schedule",
    };
    let cost = match r.cost {
        CostStatus::UnderBudget => "under budget",
        CostStatus::OnBudget => "on budget",
        CostStatus::OverBudget => "over budget",
    };

    let _ = writeln!(out, "  Schedule variance (SV): {}", num(r.sv, p));
    let _ = writeln!(out, "  Cost variance (CV): {}", num(r.cv, p));
    let _ = writeln!(out, "  Schedule performance (SPI): {} ({schedule})", num(r.spi, p));
    let _ = writeln!(out, "  Cost performance (CPI): {} ({cost})", num(r.cpi, p));
    out.push('\n');

    let _ = writeln!(out, "  Estimate at completion (EAC): {}", num(r.eac, p));
    let _ = writeln!(out, "  Estimate to complete (ETC): {}", num(r.etc, p));
    let _ = writeln!(out, "  Variance at completion (VAC): {}", num(r.vac, p));

    out
}

pub fn wbs(tree: &[WbsNode]) -> String {
    let mut out = String::new();
    banner(&mut out, "Work Breakdown Structure");
    wbs_level(&mut out, tree, 0);
    out
}

fn wbs_level(out: &mut String, nodes: &[WbsNode], depth: usize) {
    let indent = "  ".repeat(depth + 1);
    for node in nodes {
        match &node.label {
            Some(label) => {
                let _ = writeln!(out, "{indent}{}: {label}", node.code);
            }
            None => {
                let _ = writeln!(out, "{indent}{}", node.code);
            }
        }
        wbs_level(out, &node.children, depth + 1);
    }
}
