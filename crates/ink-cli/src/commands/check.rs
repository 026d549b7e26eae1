use std::path::Path;

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(story)?;
    super::print_warnings(&story);

    println!("  All checks passed for '{}'.", story.meta.title);
    println!("  {} scenes, {} endings", story.len(), story.ending_count());

    Ok(())
}
