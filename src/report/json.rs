// src/report/json.rs

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::dag::DependencyAnalysis;
use crate::errors::Result;
use crate::pm::{EarnedValue, EarnedValueInput, RiskAssessment, WbsNode};
use crate::report::{DATE_FORMAT, ReportOptions, round_to};
use crate::schedule::{GanttRow, Schedule};

pub fn analysis(a: &DependencyAnalysis, opts: &ReportOptions) -> Result<String> {
    let p = opts.precision;
    let coupling = &a.coupling;

    let modules: BTreeMap<&str, Value> = coupling
        .modules
        .iter()
        .map(|(id, info)| {
            (
                id.as_str(),
                json!({
                    "dependencies": info.dependencies,
                    "dependents": info.dependents,
                    "coupling": round_to(info.coupling, p),
                }),
            )
        })
        .collect();

    let doc = json!({
        "summary": {
            "total_modules": coupling.modules.len(),
            "avg_coupling": round_to(coupling.average, p),
            "cycle_count": a.cycles.len(),
        },
        "modules": modules,
        "cycles": a.cycles,
        "high_coupling_modules": coupling.high_coupling,
        "isolated_modules": coupling.isolated,
        "strongly_connected": coupling.strongly_connected,
    });

    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn schedule(
    s: &Schedule,
    chains: &[Vec<String>],
    gantt: Option<&[GanttRow]>,
    opts: &ReportOptions,
) -> Result<String> {
    let p = opts.precision;

    let slack: BTreeMap<String, f64> = s
        .slack_map()
        .into_iter()
        .map(|(id, v)| (id, round_to(v, p)))
        .collect();

    let tasks: Vec<Value> = s
        .tasks
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "duration": round_to(t.duration, p),
                "dependencies": t.dependencies,
                "earliestStart": round_to(t.earliest_start, p),
                "earliestFinish": round_to(t.earliest_finish, p),
                "latestStart": round_to(t.latest_start, p),
                "latestFinish": round_to(t.latest_finish, p),
                "slack": round_to(t.slack, p),
            })
        })
        .collect();

    let mut doc = json!({
        "duration": round_to(s.project_duration, p),
        "criticalPath": s.critical_path,
        "slack": slack,
        "tasks": tasks,
        "chains": chains,
    });

    if let Some(rows) = gantt {
        let rows: Vec<Value> = rows
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "start": r.start.format(DATE_FORMAT).to_string(),
                    "end": r.end.format(DATE_FORMAT).to_string(),
                    "duration": round_to(r.duration, p),
                    "critical": r.critical,
                })
            })
            .collect();
        doc["gantt"] = Value::Array(rows);
    }

    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn risk(r: &RiskAssessment) -> Result<String> {
    Ok(serde_json::to_string_pretty(r)?)
}

pub fn earned_value(
    input: &EarnedValueInput,
    r: &EarnedValue,
    opts: &ReportOptions,
) -> Result<String> {
    let p = opts.precision;
    let doc = json!({
        "input": {
            "bac": round_to(input.bac, p),
            "pv": round_to(input.pv, p),
            "ev": round_to(input.ev, p),
            "ac": round_to(input.ac, p),
        },
        "sv": round_to(r.sv, p),
        "cv": round_to(r.cv, p),
        "spi": round_to(r.spi, p),
        "cpi": round_to(r.cpi, p),
        "eac": round_to(r.eac, p),
        "etc": round_to(r.etc, p),
        "vac": round_to(r.vac, p),
        "interpretation": {
            "schedule": r.schedule,
            "cost": r.cost,
        },
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn wbs(tree: &[WbsNode]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::task_list_from_str;
    use crate::schedule::{compute_schedule, critical_chains};

    #[test]
    fn schedule_document_shape() {
        let tasks = task_list_from_str(
            r#"[{"id": "A", "duration": 3},
                {"id": "B", "duration": 4, "dependencies": ["A"]},
                {"id": "C", "duration": 2, "dependencies": ["A"]},
                {"id": "D", "duration": 5, "dependencies": ["B", "C"]}]"#,
        )
        .unwrap();
        let s = compute_schedule(&tasks).unwrap();
        let out = schedule(&s, &critical_chains(&s), None, &ReportOptions::default()).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(v["duration"], json!(12.0));
        assert_eq!(v["criticalPath"], json!(["A", "B", "D"]));
        assert_eq!(v["slack"]["C"], json!(2.0));
        assert_eq!(v["chains"], json!([["A", "B", "D"]]));
        assert_eq!(v["tasks"][0]["earliestFinish"], json!(3.0));
        assert!(v.get("gantt").is_none());
    }

    #[test]
    fn schedule_document_carries_gantt_rows() {
        let s = compute_schedule(&crate::demo_task_list().unwrap()).unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let rows = crate::schedule::gantt_rows(&s, start).unwrap();
        let chains = critical_chains(&s);
        let out = schedule(&s, &chains, Some(rows.as_slice()), &ReportOptions::default()).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(
            v["gantt"][1],
            json!({
                "id": "B",
                "start": "2025-01-09",
                "end": "2025-01-13",
                "duration": 4.0,
                "critical": true,
            })
        );
    }

    #[test]
    fn wbs_document_nests_children() {
        let tree = crate::pm::parse_hierarchy(&["1.1", "2"]).unwrap();
        let v: Value = serde_json::from_str(&wbs(&tree).unwrap()).unwrap();

        assert_eq!(
            v,
            json!([{"code": "1", "children": [{"code": "1.1"}]}, {"code": "2"}])
        );
    }

    #[test]
    fn risk_document_uses_lowercase_level() {
        let r = crate::pm::assess_risk(4, 4).unwrap();
        let v: Value = serde_json::from_str(&risk(&r).unwrap()).unwrap();
        assert_eq!(v["level"], json!("high"));
        assert_eq!(v["score"], json!(16));
    }
}
