use std::path::Path;

use comfy_table::{ContentArrangement, Table};

const TEXT_WIDTH: usize = 60;

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(story)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Kind", "Requires", "Text"]);

    for (id, scene) in story.scenes() {
        let kind = if scene.is_ending {
            "ending".to_string()
        } else {
            format!("{} choices", scene.choices().len())
        };
        let gate = scene.required_item.clone().unwrap_or_else(|| "—".to_string());
        table.add_row(vec![id.to_string(), kind, gate, excerpt(&scene.text)]);
    }

    println!("{table}");
    println!();
    println!("  {} scenes", story.len());

    Ok(())
}

fn excerpt(text: &str) -> String {
    if text.chars().count() > TEXT_WIDTH {
        let cut: String = text.chars().take(TEXT_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
