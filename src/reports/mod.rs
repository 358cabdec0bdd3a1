use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use qsoparty::aggregate::{ContestResults, ContestStatistics};
use qsoparty::contest::BatchReport;
use qsoparty::reference::ReferenceData;
use qsoparty::validator::ValidationResult;

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn bold(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn validation_summary(results: &[(String, ValidationResult)]) {
    let mut table = new_table(vec![
        bold("Log"),
        bold("Callsign"),
        bold("QSOs"),
        bold("Invalid"),
        bold("Warnings"),
        bold("Status"),
    ]);

    for (id, r) in results {
        let status = if r.is_valid() {
            Cell::new("VALID").fg(Color::Green)
        } else {
            Cell::new("INVALID").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(&r.callsign),
            Cell::new(r.total_contacts),
            Cell::new(r.invalid_contacts),
            Cell::new(r.warnings().count()),
            status,
        ]);
    }
    align_right(&mut table, 2..=4);

    let valid = results.iter().filter(|(_, r)| r.is_valid()).count();
    println!("\n{}", table);
    println!("Valid logs: {} / {}", valid, results.len());
}

pub fn batch_summary(report: &BatchReport) {
    let mut table = new_table(vec![bold("Logs"), bold("Count")]);
    table.add_row(vec![Cell::new("Total"), Cell::new(report.total_logs())]);
    table.add_row(vec![
        Cell::new("Valid").fg(Color::Green),
        Cell::new(report.valid_logs()),
    ]);
    table.add_row(vec![
        Cell::new("Invalid").fg(Color::Red),
        Cell::new(report.invalid_logs()),
    ]);
    table.add_row(vec![
        Cell::new("Failed").fg(Color::Red),
        Cell::new(report.failed_logs()),
    ]);
    table.add_row(vec![Cell::new("QSOs"), Cell::new(report.total_contacts())]);
    table.add_row(vec![
        Cell::new("Invalid QSOs"),
        Cell::new(report.invalid_contacts()),
    ]);
    align_right(&mut table, 1..=1);
    println!("\n{}", table);

    for outcome in &report.outcomes {
        if let qsoparty::contest::LogOutcome::Failed { id, error } = outcome {
            println!("FAILED {}: {}", id, error);
        }
    }
}

pub fn overall(results: &ContestResults) {
    let mut table = new_table(vec![
        bold("Rank"),
        bold("Callsign"),
        bold("Score").fg(Color::Cyan),
        bold("Group"),
        bold("Grp Rank"),
        bold("Overlay"),
    ]);

    for e in &results.overall {
        let overlay = match (e.category.overlay, e.overlay_rank) {
            (Some(o), Some(r)) => format!("{} #{}", o, r),
            _ => String::new(),
        };
        table.add_row(vec![
            Cell::new(e.overall_rank),
            Cell::new(&e.callsign).add_attribute(Attribute::Bold),
            Cell::new(e.final_score).fg(Color::Cyan),
            Cell::new(e.category.base_group().short_name()),
            Cell::new(e.category_rank),
            Cell::new(overlay),
        ]);
    }
    align_right(&mut table, 0..=0);
    align_right(&mut table, 2..=2);
    align_right(&mut table, 4..=4);

    println!("\n=== OVERALL STANDINGS ===");
    println!("{}", table);
}

pub fn groups(results: &ContestResults) {
    for g in &results.groups {
        let mut table = new_table(vec![bold("Rank"), bold("Callsign"), bold("Score")]);
        for p in &g.placements {
            table.add_row(vec![
                Cell::new(p.rank),
                Cell::new(&p.callsign),
                Cell::new(p.final_score),
            ]);
        }
        align_right(&mut table, 0..=0);
        align_right(&mut table, 2..=2);
        println!("\n{} ({})", g.name, g.short_name);
        println!("{}", table);
    }
}

pub fn statistics(stats: &ContestStatistics, refs: &ReferenceData) {
    let mut table = new_table(vec![bold("Activity"), bold("Count")]);
    table.add_row(vec![Cell::new("Logs"), Cell::new(stats.total_logs)]);
    for (class, n) in &stats.logs_by_location {
        table.add_row(vec![Cell::new(format!("  {}", class)), Cell::new(n)]);
    }
    table.add_row(vec![Cell::new("QSOs logged"), Cell::new(stats.total_contacts)]);
    table.add_row(vec![Cell::new("QSOs scored"), Cell::new(stats.valid_contacts)]);
    for (band, n) in &stats.contacts_by_band {
        table.add_row(vec![Cell::new(format!("  {}", band)), Cell::new(n)]);
    }
    for (class, n) in &stats.contacts_by_mode_class {
        table.add_row(vec![Cell::new(format!("  {}", class)), Cell::new(n)]);
    }
    table.add_row(vec![
        Cell::new("Local locations active"),
        Cell::new(stats.active_locations()),
    ]);
    table.add_row(vec![
        Cell::new("  sent from"),
        Cell::new(stats.sent_from_locations()),
    ]);
    table.add_row(vec![
        Cell::new("  worked"),
        Cell::new(stats.worked_locations()),
    ]);
    align_right(&mut table, 1..=1);

    println!("\n=== STATISTICS ===");
    println!("{}", table);

    let inactive = stats.inactive_locations(refs);
    if !inactive.is_empty() {
        println!("Inactive: {}", inactive.join(" "));
    }
}
