use std::io;
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use ink_engine::{EngineConfig, GameSession, StatPolicy};

use crate::presenter::TerminalPresenter;

pub struct PlayOptions {
    pub speed: u64,
    pub instant: bool,
    pub unclamped: bool,
    pub scene: Option<String>,
}

pub fn run(story: Option<&Path>, options: PlayOptions) -> Result<(), String> {
    let story = super::load_story(story)?;

    let mut config = EngineConfig::default().with_reveal_speed(options.speed);
    if options.instant {
        config = config.instant();
    }
    if options.unclamped {
        config = config.with_stat_policy(StatPolicy::Unclamped);
    }

    println!("  {}", story.meta.title.bold());

    let mut session = GameSession::new(Arc::new(story), config);
    let mut presenter = TerminalPresenter::new(io::stdin().lock(), io::stdout(), config.reveal);

    let summary = match options.scene.as_deref() {
        Some(scene) => ink_engine::run_from(&mut session, &mut presenter, scene),
        None => ink_engine::run(&mut session, &mut presenter),
    }
    .map_err(|e| e.to_string())?;

    println!(
        "  {} ending{} reached, {} restart{}",
        summary.endings_reached,
        if summary.endings_reached == 1 { "" } else { "s" },
        summary.restarts,
        if summary.restarts == 1 { "" } else { "s" },
    );
    if !summary.unlocked.is_empty() {
        let unlocked: Vec<_> = summary.unlocked.iter().map(String::as_str).collect();
        println!("  unlocked: {}", unlocked.join(", "));
    }

    Ok(())
}
