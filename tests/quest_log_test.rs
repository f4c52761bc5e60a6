//! End-to-end quest log flows against a temp-directory store.
//!
//! These tests cover:
//! 1. Create / list / update / delete with validation in the loop
//! 2. The completion flow: XP payout, player counters, badge unlocks
//! 3. Deletion safety checks and the force escape hatch
//! 4. State surviving a close-and-reopen of the data directory

use questa::domain::{Difficulty, Priority, QuestStatus};
use questa::error::QuestaError;
use questa::quest::{QuestFilter, QuestLog, QuestUpdate, SafetyLevel};
use questa::stats::achievements::AchievementId;
use questa::store::DataStore;

fn open_log() -> (tempfile::TempDir, QuestLog) {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::open(dir.path().join("data")).unwrap();
    (dir, QuestLog::open(store))
}

#[test]
fn create_and_list_newest_first() {
    let (_dir, mut log) = open_log();
    log.create_quest("Write the parser", Difficulty::Medium, Priority::High, None)
        .unwrap();
    log.create_quest("Fix the flaky test", Difficulty::Easy, Priority::Low, None)
        .unwrap();

    let quests = log.quests(&QuestFilter::default());
    assert_eq!(quests.len(), 2);
    assert_eq!(quests[0].title, "Fix the flaky test");
    assert_eq!(quests[1].title, "Write the parser");
    assert!(quests.iter().all(|q| q.status == QuestStatus::Pending));
}

#[test]
fn title_validation_rejects_bad_input() {
    let (_dir, mut log) = open_log();

    assert!(log
        .create_quest("   ", Difficulty::Easy, Priority::Low, None)
        .is_err());
    assert!(log
        .create_quest("!starts with punctuation", Difficulty::Easy, Priority::Low, None)
        .is_err());
    assert!(log
        .create_quest(&"x".repeat(201), Difficulty::Easy, Priority::Low, None)
        .is_err());

    // Valid titles are trimmed
    let quest = log
        .create_quest("  Ship it  ", Difficulty::Easy, Priority::Low, None)
        .unwrap();
    assert_eq!(quest.title, "Ship it");
}

#[test]
fn blank_notes_become_none() {
    let (_dir, mut log) = open_log();
    let quest = log
        .create_quest(
            "Quest with notes",
            Difficulty::Easy,
            Priority::Low,
            Some("   ".to_string()),
        )
        .unwrap();
    assert!(quest.notes.is_none());
}

#[test]
fn id_prefix_resolution() {
    let (_dir, mut log) = open_log();
    let quest = log
        .create_quest("Find me by prefix", Difficulty::Easy, Priority::Low, None)
        .unwrap();

    let resolved = log.resolve_id(&quest.id[..8]).unwrap();
    assert_eq!(resolved, quest.id);

    assert!(matches!(
        log.resolve_id("definitely-not-an-id"),
        Err(QuestaError::QuestNotFound(_))
    ));

    // Every uuid starts with something; the empty prefix matches all of
    // them once there are two quests
    log.create_quest("Second quest", Difficulty::Easy, Priority::Low, None)
        .unwrap();
    assert!(matches!(
        log.resolve_id(""),
        Err(QuestaError::InvalidArgument(_))
    ));
}

#[test]
fn status_transitions_enforced() {
    let (_dir, mut log) = open_log();
    let quest = log
        .create_quest("Stateful quest", Difficulty::Easy, Priority::Low, None)
        .unwrap();

    let update = |status| QuestUpdate {
        status: Some(status),
        ..QuestUpdate::default()
    };

    let updated = log.update_quest(&quest.id, update(QuestStatus::Active)).unwrap();
    assert_eq!(updated.status, QuestStatus::Active);

    let updated = log.update_quest(&quest.id, update(QuestStatus::Blocked)).unwrap();
    assert_eq!(updated.status, QuestStatus::Blocked);

    // Completion goes through complete_quest, then the quest is frozen
    log.complete_quest(&quest.id).unwrap();
    assert!(log.update_quest(&quest.id, update(QuestStatus::Pending)).is_err());
    assert!(log
        .update_quest(
            &quest.id,
            QuestUpdate {
                difficulty: Some(Difficulty::Hard),
                ..QuestUpdate::default()
            }
        )
        .is_err());
}

#[test]
fn completion_pays_xp_and_unlocks_first_badge() {
    let (_dir, mut log) = open_log();
    let quest = log
        .create_quest("First victory", Difficulty::Medium, Priority::Low, None)
        .unwrap();

    let report = log.complete_quest(&quest.id).unwrap();

    // 30 base plus the same-day bonus; no multipliers on a fresh profile
    assert_eq!(report.xp.base, 30);
    assert_eq!(report.xp.multiplier_bonus, 0);
    assert_eq!(report.xp.total, 35);
    assert!(!report.leveled_up);
    assert_eq!(report.quest.status, QuestStatus::Completed);
    assert!(report.quest.completed_at.is_some());

    assert_eq!(report.unlocked.len(), 1);
    assert_eq!(report.unlocked[0].id, AchievementId::FirstSteps);

    let player = log.player();
    assert_eq!(player.total_xp, 35);
    assert_eq!(player.tasks_completed, 1);
    assert_eq!(player.medium_tasks_completed, 1);
    assert_eq!(player.current_streak, 1);
}

#[test]
fn completing_twice_fails() {
    let (_dir, mut log) = open_log();
    let quest = log
        .create_quest("Once only", Difficulty::Easy, Priority::Low, None)
        .unwrap();

    log.complete_quest(&quest.id).unwrap();
    let err = log.complete_quest(&quest.id).unwrap_err();
    assert!(err.downcast_ref::<QuestaError>().is_some());

    // Counters unchanged by the failed attempt
    assert_eq!(log.player().tasks_completed, 1);
}

#[test]
fn deletion_safety_levels() {
    let (_dir, mut log) = open_log();

    let safe = log
        .create_quest("Low stakes", Difficulty::Easy, Priority::Low, None)
        .unwrap();
    let critical = log
        .create_quest("Production fire", Difficulty::Hard, Priority::Critical, None)
        .unwrap();
    let done = log
        .create_quest("Already shipped", Difficulty::Easy, Priority::Low, None)
        .unwrap();
    log.complete_quest(&done.id).unwrap();

    let check = log.deletion_check(&safe.id).unwrap();
    assert_eq!(check.safety, SafetyLevel::Safe);
    assert!(!check.requires_confirmation);

    let check = log.deletion_check(&critical.id).unwrap();
    assert_eq!(check.safety, SafetyLevel::Caution);
    assert!(check.requires_confirmation);

    let check = log.deletion_check(&done.id).unwrap();
    assert_eq!(check.safety, SafetyLevel::Danger);
    assert!(check.requires_confirmation);

    // Risky deletes need force
    assert!(log.delete_quest(&done.id, false).is_err());
    log.delete_quest(&done.id, true).unwrap();

    // Safe deletes do not
    log.delete_quest(&safe.id, false).unwrap();
    assert_eq!(log.counts().total, 1);
}

#[test]
fn search_matches_titles_and_notes() {
    let (_dir, mut log) = open_log();
    log.create_quest("Refactor the Parser", Difficulty::Medium, Priority::Low, None)
        .unwrap();
    log.create_quest(
        "Update docs",
        Difficulty::Easy,
        Priority::Low,
        Some("mention the parser rewrite".to_string()),
    )
    .unwrap();
    log.create_quest("Unrelated chore", Difficulty::Easy, Priority::Low, None)
        .unwrap();

    let hits = log.search("PARSER");
    assert_eq!(hits.len(), 2);

    assert!(log.search("").is_empty());
    assert!(log.search("   ").is_empty());
}

#[test]
fn filters_by_status_and_difficulty() {
    let (_dir, mut log) = open_log();
    log.create_quest("Easy one", Difficulty::Easy, Priority::Low, None)
        .unwrap();
    let hard = log
        .create_quest("Hard one", Difficulty::Hard, Priority::Low, None)
        .unwrap();
    log.complete_quest(&hard.id).unwrap();

    let completed = log.quests(&QuestFilter {
        status: Some(QuestStatus::Completed),
        ..QuestFilter::default()
    });
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Hard one");

    let easy = log.quests(&QuestFilter {
        difficulty: Some(Difficulty::Easy),
        ..QuestFilter::default()
    });
    assert_eq!(easy.len(), 1);
    assert_eq!(easy[0].title, "Easy one");
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let quest_id = {
        let store = DataStore::open(&data_dir).unwrap();
        let mut log = QuestLog::open(store);
        let keep = log
            .create_quest("Survivor", Difficulty::Hard, Priority::Low, None)
            .unwrap();
        let done = log
            .create_quest("Finished", Difficulty::Medium, Priority::Low, None)
            .unwrap();
        log.complete_quest(&done.id).unwrap();
        keep.id
    };

    let store = DataStore::open(&data_dir).unwrap();
    let log = QuestLog::open(store);

    assert_eq!(log.counts().total, 2);
    assert_eq!(log.counts().completed, 1);
    assert_eq!(log.quest(&quest_id).unwrap().title, "Survivor");
    assert_eq!(log.player().tasks_completed, 1);
    assert_eq!(log.player().total_xp, 35);
    assert!(log
        .achievements()
        .is_unlocked(AchievementId::FirstSteps));
}
