use std::collections::HashMap;

use uuid::Uuid;

use super::ReportTable;
use crate::entities::{competency, employee, evaluation, evaluation_cycle, nine_box, pdi, position};

fn names(employees: &[employee::Model]) -> HashMap<Uuid, &str> {
    employees
        .iter()
        .map(|e| (e.employee_id, e.name.as_str()))
        .collect()
}

fn lookup(map: &HashMap<Uuid, &str>, id: Uuid) -> String {
    map.get(&id).map(|s| s.to_string()).unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn employees_table(
    employees: &[employee::Model],
    positions: &[position::Model],
) -> ReportTable {
    let titles: HashMap<Uuid, &str> = positions
        .iter()
        .map(|p| (p.position_id, p.title.as_str()))
        .collect();
    let leaders = names(employees);

    let mut table = ReportTable::new(
        "Employees",
        vec![
            "Name",
            "Badge",
            "Sector",
            "Email",
            "Position",
            "Leader",
            "Access Level",
            "Admission Date",
        ],
    );
    for e in employees {
        table.push(vec![
            e.name.clone(),
            e.badge.clone(),
            e.sector.clone(),
            e.email.clone(),
            lookup(&titles, e.position_id),
            e.leader_id.map(|id| lookup(&leaders, id)).unwrap_or_default(),
            e.access_level.as_str().to_string(),
            e.admission_date.format("%Y-%m-%d").to_string(),
        ]);
    }
    table
}

pub fn evaluations_table(
    evaluations: &[evaluation::Model],
    employees: &[employee::Model],
    cycles: &[evaluation_cycle::Model],
) -> ReportTable {
    let people = names(employees);
    let cycle_names: HashMap<Uuid, &str> =
        cycles.iter().map(|c| (c.cycle_id, c.name.as_str())).collect();

    let mut table = ReportTable::new(
        "Evaluations",
        vec!["Cycle", "Employee", "Evaluator", "Status", "Total Score"],
    );
    for e in evaluations {
        table.push(vec![
            lookup(&cycle_names, e.cycle_id),
            lookup(&people, e.evaluated_employee_id),
            lookup(&people, e.evaluator_id),
            e.status.as_str().to_string(),
            e.total_score
                .map(|score| format!("{:.2}", score))
                .unwrap_or_default(),
        ]);
    }
    table
}

pub fn nine_box_table(records: &[nine_box::Model], employees: &[employee::Model]) -> ReportTable {
    let people = names(employees);
    let mut table = ReportTable::new(
        "Nine-Box",
        vec!["Employee", "Performance", "Potential", "Classification"],
    );
    for r in records {
        table.push(vec![
            lookup(&people, r.employee_id),
            r.performance.to_string(),
            r.potential.to_string(),
            r.classification.clone(),
        ]);
    }
    table
}

pub fn competencies_table(competencies: &[competency::Model]) -> ReportTable {
    let mut table = ReportTable::new("Competencies", vec!["Name", "Category", "Description"]);
    for c in competencies {
        table.push(vec![
            c.name.clone(),
            c.category.label().to_string(),
            text(&c.description),
        ]);
    }
    table
}

pub fn pdis_table(pdis: &[pdi::Model], employees: &[employee::Model]) -> ReportTable {
    let people = names(employees);
    let mut table = ReportTable::new(
        "Individual Development Plans",
        vec![
            "Employee",
            "Strengths",
            "Improvement Areas",
            "Development Plan",
            "Feedback",
        ],
    );
    for p in pdis {
        table.push(vec![
            lookup(&people, p.employee_id),
            text(&p.strengths),
            text(&p.improvement_areas),
            text(&p.development_plan),
            text(&p.feedback),
        ]);
    }
    table
}
