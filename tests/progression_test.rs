//! Level curve and task completion semantics for the player profile.
//!
//! These tests pin the quadratic level curve and the counter bookkeeping
//! that the achievement rules depend on:
//! 1. level(xp) = floor(sqrt(xp / 100)) + 1, with level 1 at zero XP
//! 2. Level progress stays in [0, 1] and never regresses as XP grows
//! 3. complete_task buckets by case-insensitive difficulty label and
//!    silently skips unknown labels while still paying XP

use questa::domain::Player;

#[test]
fn level_curve_reference_points() {
    let mut player = Player::new();
    assert_eq!(player.level(), 1);

    player.total_xp = 99;
    assert_eq!(player.level(), 1);

    player.total_xp = 100;
    assert_eq!(player.level(), 2);

    player.total_xp = 250;
    assert_eq!(player.level(), 2);

    player.total_xp = 400;
    assert_eq!(player.level(), 3);

    player.total_xp = 10_000;
    assert_eq!(player.level(), 11);
}

#[test]
fn level_boundaries_match_curve_inverse() {
    let mut player = Player::new();
    player.total_xp = 250;

    // Level 2 spans [100, 400)
    assert_eq!(player.xp_for_current_level(), 100);
    assert_eq!(player.xp_for_next_level(), 400);
    assert_eq!(player.current_level_xp(), 150);
    assert_eq!(player.xp_to_next_level(), 150);
    assert!((player.level_progress() - 0.5).abs() < 1e-9);
}

#[test]
fn progress_is_clamped_and_monotone_within_a_level() {
    let mut player = Player::new();
    let mut last = -1.0;

    for xp in (100u64..400).step_by(25) {
        player.total_xp = xp;
        let progress = player.level_progress();
        assert!((0.0..=1.0).contains(&progress));
        assert!(progress >= last, "progress regressed at {xp} XP");
        last = progress;
    }
}

#[test]
fn typical_session_reaches_level_two() {
    let mut player = Player::new();
    for (xp, difficulty) in [(15, "easy"), (30, "medium"), (50, "hard"), (15, "easy")] {
        player.complete_task(xp, difficulty).unwrap();
    }

    assert_eq!(player.total_xp, 110);
    assert_eq!(player.level(), 2);
    assert_eq!(player.tasks_completed, 4);
    assert_eq!(player.current_streak, 4);
    assert_eq!(player.easy_tasks_completed, 2);
    assert_eq!(player.medium_tasks_completed, 1);
    assert_eq!(player.hard_tasks_completed, 1);
}

#[test]
fn level_up_is_reported_exactly_once() {
    let mut player = Player::new();

    let change = player.add_xp(99).unwrap();
    assert!(!change.leveled_up);
    assert_eq!(change.new_level, 1);

    let change = player.add_xp(1).unwrap();
    assert!(change.leveled_up);
    assert_eq!(change.new_level, 2);

    let change = player.add_xp(50).unwrap();
    assert!(!change.leveled_up);
    assert_eq!(change.new_level, 2);
}

#[test]
fn negative_amounts_are_rejected_without_side_effects() {
    let mut player = Player::new();
    player.complete_task(30, "medium").unwrap();
    let before = player.clone();

    assert!(player.add_xp(-1).is_err());
    assert!(player.complete_task(-10, "hard").is_err());
    assert_eq!(player, before);
}

#[test]
fn difficulty_labels_are_case_insensitive() {
    let mut player = Player::new();
    player.complete_task(15, "EASY").unwrap();
    player.complete_task(30, "Medium").unwrap();
    player.complete_task(50, "hArD").unwrap();

    assert_eq!(player.easy_tasks_completed, 1);
    assert_eq!(player.medium_tasks_completed, 1);
    assert_eq!(player.hard_tasks_completed, 1);
}

#[test]
fn unknown_difficulty_still_pays_xp_and_streak() {
    let mut player = Player::new();
    player.complete_task(40, "nightmare").unwrap();

    assert_eq!(player.total_xp, 40);
    assert_eq!(player.tasks_completed, 1);
    assert_eq!(player.current_streak, 1);
    assert_eq!(player.easy_tasks_completed, 0);
    assert_eq!(player.medium_tasks_completed, 0);
    assert_eq!(player.hard_tasks_completed, 0);
}

#[test]
fn reset_streak_leaves_other_counters_alone() {
    let mut player = Player::new();
    player.complete_task(15, "easy").unwrap();
    player.complete_task(15, "easy").unwrap();

    player.reset_streak();
    assert_eq!(player.current_streak, 0);
    assert_eq!(player.total_xp, 30);
    assert_eq!(player.tasks_completed, 2);
    assert!(player.last_activity.is_some());
}
