//! `coachbot features`: list the ten coaching features.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use coachbot_core::template::fields_used;
use coachbot_types::feature::Feature;

/// Print every feature with its label and the profile fields it uses.
pub fn list_features(json: bool) -> Result<()> {
    if json {
        let features: Vec<_> = Feature::ALL
            .iter()
            .map(|f| {
                serde_json::json!({
                    "id": f.as_str(),
                    "label": f.label(),
                    "icon": f.icon(),
                    "fields": fields_used(*f).iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Feature").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Uses").fg(Color::White),
    ]);

    for feature in Feature::ALL {
        let fields = fields_used(feature)
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(format!("{} {}", feature.icon(), feature.label())).fg(Color::Cyan),
            Cell::new(feature.as_str()),
            Cell::new(fields).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  Generate one with: {}",
        style("coachbot ask workout --sport tennis").yellow()
    );
    println!(
        "  Or ask anything:   {}",
        style("coachbot ask --question \"How do I improve my serve?\"").yellow()
    );
    println!();

    Ok(())
}
