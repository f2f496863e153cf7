//! Format sessions and level catalogs as text or JSON.

use crate::engine::{FeedbackKind, Phase};
use crate::error::ApiError;
use crate::level::{Curriculum, LevelCatalog};
use crate::session::SessionView;
use crate::types::NodeKind;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Breadcrumb of the navigation stack, root first
pub fn format_breadcrumb(view: &SessionView) -> String {
    view.path_names.join(" / ")
}

/// Full redraw of a session: progress, current folder contents, instruction, feedback.
pub fn format_view_text(view: &SessionView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_section_heading(&format!(
            "Level {}/{}: {}",
            view.level_number(),
            view.level_count,
            view.level_title
        ))
    ));
    out.push_str(&format!("  {}\n\n", format_breadcrumb(view).cyan()));

    if view.children.is_empty() {
        out.push_str("  (empty folder)\n\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Name", "Kind"]);
        for child in &view.children {
            let kind = match child.kind {
                NodeKind::Folder => "folder",
                NodeKind::File => "file",
            };
            let name = if view.rename_target.as_ref() == Some(&child.id) {
                format!("{} (renaming)", child.name)
            } else {
                child.name.clone()
            };
            table.add_row(vec![name, kind.to_string()]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    out.push_str(&format_progress_line(view));
    out.push('\n');

    if let Some(feedback) = view.feedback() {
        let line = match feedback.kind {
            FeedbackKind::Success => format!("{}", feedback.message.green()),
            FeedbackKind::Error => format!("{}", feedback.message.red()),
        };
        out.push_str(&format!("  {}\n", line));
    }
    out
}

fn format_progress_line(view: &SessionView) -> String {
    match view.phase() {
        Phase::Playing => format!(
            "  Step {}/{}: {}",
            view.step_number(),
            view.step_count,
            view.instruction.bold()
        ),
        Phase::StepComplete => format!(
            "  Step {}/{}: {} {}",
            view.step_number(),
            view.step_count,
            view.instruction,
            "(done)".green()
        ),
        Phase::LevelComplete => format!(
            "  {} Type 'next' to continue.",
            "Level complete!".green().bold()
        ),
        Phase::GameComplete => format!(
            "  {} Type 'restart-game' to play again or 'quit' to leave.",
            "All levels complete!".green().bold()
        ),
    }
}

/// Catalog overview: one row per level
pub fn format_levels_text(curriculum: Curriculum, catalog: &LevelCatalog) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("Curriculum: {}", curriculum))
    );
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Level", "Title", "Steps"]);
    for (i, level) in catalog.levels().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            level.id.clone(),
            level.title.clone(),
            level.steps.len().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "{} levels, {} steps\n",
        catalog.len(),
        catalog.total_steps()
    ));
    out
}

/// Catalog as JSON, including every step's instruction
pub fn format_levels_json(curriculum: Curriculum, catalog: &LevelCatalog) -> Result<String, ApiError> {
    let levels: Vec<serde_json::Value> = catalog
        .levels()
        .iter()
        .map(|level| {
            json!({
                "id": level.id,
                "title": level.title,
                "nodes": level.initial_nodes.len(),
                "steps": level
                    .steps
                    .iter()
                    .map(|s| json!({ "id": s.id, "instruction": s.instruction }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    let out = json!({
        "curriculum": curriculum,
        "levels": levels,
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize levels: {}", e)))
}
