//! CLI command handlers
//!
//! Each handler prints plain text to stdout; the TUI is the rich surface.

use anyhow::Result;

use questa::config::Config;
use questa::domain::{Difficulty, Priority, QuestStatus};
use questa::quest::{QuestFilter, QuestLog, SortKey};

/// Short id shown in listings; long enough to be a usable prefix
fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn parse_sort(s: &str) -> Result<SortKey> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "created" => SortKey::CreatedAt,
        "title" => SortKey::Title,
        "difficulty" => SortKey::Difficulty,
        "priority" => SortKey::Priority,
        "status" => SortKey::Status,
        other => anyhow::bail!(
            "unknown sort key '{other}' (expected created, title, difficulty, priority or status)"
        ),
    })
}

pub fn add(
    log: &mut QuestLog,
    title: &str,
    difficulty: &str,
    priority: &str,
    notes: Option<String>,
) -> Result<()> {
    let difficulty: Difficulty = difficulty.parse()?;
    let priority: Priority = priority.parse()?;

    let quest = log.create_quest(title, difficulty, priority, notes)?;
    println!(
        "Added quest {} '{}' [{} / {} / {} XP]",
        short_id(&quest.id),
        quest.title,
        quest.difficulty,
        quest.priority,
        quest.xp_reward
    );
    Ok(())
}

pub fn list(
    log: &QuestLog,
    status: Option<&str>,
    difficulty: Option<&str>,
    priority: Option<&str>,
    sort: &str,
    ascending: bool,
) -> Result<()> {
    let filter = QuestFilter {
        status: status.map(|s| s.parse::<QuestStatus>()).transpose()?,
        difficulty: difficulty.map(|s| s.parse::<Difficulty>()).transpose()?,
        priority: priority.map(|s| s.parse::<Priority>()).transpose()?,
        sort: parse_sort(sort)?,
        ascending,
    };

    let quests = log.quests(&filter);
    if quests.is_empty() {
        println!("No quests found.");
        return Ok(());
    }

    for quest in quests {
        println!(
            "{}  {:<9}  {:<6}  {:<8}  {}",
            short_id(&quest.id),
            quest.status.label(),
            quest.difficulty.label(),
            quest.priority.label(),
            quest.title
        );
    }
    Ok(())
}

pub fn done(log: &mut QuestLog, id_prefix: &str) -> Result<()> {
    let id = log.resolve_id(id_prefix)?;
    let report = log.complete_quest(&id)?;

    println!(
        "Completed '{}' for {} XP ({} base, +{} bonus)",
        report.quest.title,
        report.xp.total,
        report.xp.base,
        report.xp.total - report.xp.base
    );
    if report.leveled_up {
        println!("Level up! You are now level {}.", report.new_level);
    }
    for badge in &report.unlocked {
        println!("Badge unlocked: {} {} - {}", badge.icon, badge.name, badge.description);
    }
    Ok(())
}

pub fn delete(log: &mut QuestLog, id_prefix: &str, force: bool) -> Result<()> {
    let id = log.resolve_id(id_prefix)?;

    if !force {
        let check = log.deletion_check(&id)?;
        if check.requires_confirmation {
            for warning in &check.warnings {
                eprintln!("warning: {warning}");
            }
            anyhow::bail!("refusing to delete without --force");
        }
    }

    let removed = log.delete_quest(&id, force)?;
    println!("Deleted '{}'", removed.title);
    Ok(())
}

pub fn stats(log: &QuestLog) -> Result<()> {
    let player = log.player();
    let counts = log.counts();

    println!("Level {}  ({} XP total)", player.level(), player.total_xp);
    println!(
        "Progress: {} / {} XP to level {}  ({:.0}%)",
        player.current_level_xp(),
        player.xp_for_next_level() - player.xp_for_current_level(),
        player.level() + 1,
        player.level_progress() * 100.0
    );
    println!("Streak: {} quests", player.current_streak);
    println!(
        "Completed: {} total ({} easy, {} medium, {} hard)",
        player.tasks_completed,
        player.easy_tasks_completed,
        player.medium_tasks_completed,
        player.hard_tasks_completed
    );
    println!(
        "Board: {} pending, {} active, {} blocked, {} completed",
        counts.pending, counts.active, counts.blocked, counts.completed
    );
    println!(
        "Badges: {} / {}",
        log.achievements().unlocked_count(),
        log.achievements().catalog().len()
    );
    Ok(())
}

pub fn badges(log: &QuestLog, config: &Config) -> Result<()> {
    let engine = log.achievements();
    let player = log.player();

    let unlocked = engine.unlocked_achievements();
    if !unlocked.is_empty() {
        println!("Unlocked:");
        for (badge, at) in unlocked {
            println!(
                "  {} {:<18} {}  ({})",
                badge.icon,
                badge.name,
                badge.description,
                at.format("%Y-%m-%d")
            );
        }
    }

    let locked: Vec<_> = if config.show_hidden_badges {
        engine
            .catalog()
            .entries()
            .iter()
            .filter(|a| !engine.is_unlocked(a.id))
            .collect()
    } else {
        engine.locked_achievements()
    };

    if !locked.is_empty() {
        println!("Locked:");
        for badge in locked {
            let progress = engine
                .progress(badge.id.as_str(), player)
                .unwrap_or(0.0);
            println!(
                "  {} {:<18} {}  ({:.0}%)",
                badge.icon,
                badge.name,
                badge.description,
                progress * 100.0
            );
        }
    }
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = questa::config::Config::init(force)?;
    println!("Wrote starter config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_handles_short_strings() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("abcdefghij"), "abcdefgh");
    }

    #[test]
    fn sort_keys_parse_case_insensitively() {
        assert_eq!(parse_sort("created").unwrap(), SortKey::CreatedAt);
        assert_eq!(parse_sort("Priority").unwrap(), SortKey::Priority);
        assert!(parse_sort("xp").is_err());
    }
}
