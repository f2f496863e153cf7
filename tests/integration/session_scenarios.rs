use super::support::*;
use fsdrill::engine::{FeedbackKind, Phase, Timings};
use fsdrill::{ApiError, NodeId, Session};

fn session(catalog: std::sync::Arc<fsdrill::LevelCatalog>) -> Session {
    Session::new(catalog, Timings::default()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn reaching_the_only_step_completes_the_level_without_auto_advance() {
    let s = session(two_level_catalog());
    let view = s.enter_folder(&id("docs"));

    assert!(view.state.step_complete);
    assert!(view.state.level_complete);
    assert!(!view.state.game_complete);
    assert_eq!(view.phase(), Phase::LevelComplete);
    let feedback = view.feedback().unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Success);

    wait(AUTO_ADVANCE + MARGIN).await;
    let view = s.view();
    assert_eq!(view.state.level_index, 0);
    assert_eq!(view.state.step_index, 0);
    assert_eq!(view.phase(), Phase::LevelComplete);

    wait(FEEDBACK_TTL).await;
    assert!(s.view().feedback().is_none());
    assert_eq!(s.view().phase(), Phase::LevelComplete);
}

#[tokio::test(start_paused = true)]
async fn step_auto_advances_after_delay() {
    let s = Session::starting_at(two_level_catalog(), Timings::default(), 1).unwrap();
    let view = s.enter_folder(&id("docs"));
    assert_eq!(view.phase(), Phase::StepComplete);
    assert!(view.feedback().unwrap().message.starts_with("Well done!"));

    wait(AUTO_ADVANCE - MARGIN).await;
    assert_eq!(s.view().state.step_index, 0);

    wait(MARGIN * 2).await;
    let view = s.view();
    assert_eq!(view.state.step_index, 1);
    assert_eq!(view.phase(), Phase::Playing);
    assert!(view.feedback().is_none());
    assert_eq!(view.instruction, "Go back to the Desktop");
}

#[tokio::test(start_paused = true)]
async fn already_satisfied_step_completes_right_after_advance() {
    let s = Session::starting_at(two_level_catalog(), Timings::default(), 1).unwrap();
    s.enter_folder(&id("docs"));
    s.go_back();
    // Still StepComplete: going back must not count yet.
    assert_eq!(s.view().state.step_index, 0);

    wait(AUTO_ADVANCE + MARGIN).await;
    let view = s.view();
    assert_eq!(view.state.step_index, 1);
    assert_eq!(view.phase(), Phase::StepComplete);
}

#[tokio::test(start_paused = true)]
async fn two_creates_get_distinct_placeholder_names() {
    let s = session(two_level_catalog());
    s.create_folder();
    let view = s.create_folder();
    let names: Vec<&str> = view.children.iter().map(|n| n.name.as_str()).collect();
    assert!(names.contains(&"New folder"));
    assert!(names.contains(&"New folder (2)"));
    let target = view.rename_target.clone().unwrap();
    assert_eq!(view.nodes.get(&target).unwrap().name, "New folder (2)");
}

#[tokio::test(start_paused = true)]
async fn cyclic_moves_are_rejected_and_unrelated_move_succeeds() {
    let s = session(nested_catalog());
    let before = s.view().nodes;

    let view = s.move_node(&id("b"), &id("c"));
    assert_eq!(view.nodes, before);
    assert_eq!(view.feedback().unwrap().kind, FeedbackKind::Error);

    let view = s.move_node(&id("a"), &id("c"));
    assert_eq!(view.nodes, before);

    let view = s.move_node(&id("a"), &id("d"));
    assert_eq!(view.nodes.get(&id("a")).unwrap().parent, Some(id("d")));
    assert_eq!(view.nodes.get(&id("b")).unwrap().parent, Some(id("a")));
    assert!(view.state.level_complete);
}

#[tokio::test(start_paused = true)]
async fn redundant_move_is_silent() {
    let s = session(nested_catalog());
    let view = s.move_node(&id("b"), &id("a"));
    assert!(view.feedback().is_none());
    let view = s.move_node(&id("d"), &id("d"));
    assert!(view.feedback().is_none());
}

#[tokio::test(start_paused = true)]
async fn rename_collision_keeps_old_name_and_reports_error() {
    let s = session(two_level_catalog());
    s.start_rename(&id("docs"));
    let view = s.commit_rename(&id("docs"), "PICTURES");
    assert_eq!(view.nodes.get(&id("docs")).unwrap().name, "Documents");
    let feedback = view.feedback().unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert!(feedback.message.contains("PICTURES"));
    assert!(view.rename_target.is_none());
}

#[tokio::test(start_paused = true)]
async fn empty_name_abandons_fresh_placeholder() {
    let s = session(two_level_catalog());
    let view = s.create_folder();
    let fresh = view.rename_target.clone().unwrap();
    let view = s.commit_rename(&fresh, "   ");
    assert!(!view.nodes.contains(&fresh));
    assert_eq!(view.feedback().unwrap().message, "Name cannot be empty");
}

#[tokio::test(start_paused = true)]
async fn error_feedback_expires_and_latest_message_wins() {
    let s = session(nested_catalog());
    s.move_node(&id("a"), &id("c"));
    wait(FEEDBACK_TTL / 2).await;

    s.start_rename(&id("a"));
    let view = s.commit_rename(&id("a"), "D");
    assert!(view.feedback().unwrap().message.contains("\"D\""));

    // The first message's expiry no longer applies.
    wait(FEEDBACK_TTL / 2 + MARGIN).await;
    assert!(s.view().feedback().is_some());

    wait(FEEDBACK_TTL / 2).await;
    assert!(s.view().feedback().is_none());
}

#[tokio::test(start_paused = true)]
async fn completion_is_reported_once_per_step() {
    let s = session(two_level_catalog());
    let first = s.enter_folder(&id("docs"));
    let message = first.feedback().unwrap().clone();

    wait(FEEDBACK_TTL / 3).await;
    s.go_back();
    let view = s.enter_folder(&id("docs"));
    assert_eq!(view.feedback(), Some(&message));

    // Expiry counts from the original completion, not the re-entry.
    wait(FEEDBACK_TTL * 2 / 3 + MARGIN).await;
    assert!(s.view().feedback().is_none());
    assert_eq!(s.view().phase(), Phase::LevelComplete);
}

#[tokio::test(start_paused = true)]
async fn restart_level_restores_initial_state() {
    let catalog = two_level_catalog();
    let s = Session::starting_at(catalog.clone(), Timings::default(), 1).unwrap();
    s.create_folder();
    s.delete(&id("pics"));
    s.enter_folder(&id("docs"));

    let view = s.restart_level();
    let level = catalog.get(1).unwrap();
    assert_eq!(view.nodes, level.initial_nodes);
    assert_eq!(view.navigation, vec![id("root")]);
    assert!(!view.state.step_complete);
    assert!(!view.state.level_complete);
    assert!(!view.state.game_complete);
    assert!(view.feedback().is_none());
    assert!(view.rename_target.is_none());
    assert_eq!(view.state.level_index, 1);
}

#[tokio::test(start_paused = true)]
async fn restart_does_not_complete_an_already_satisfied_first_step() {
    use fsdrill::level::goals::{at_root, in_folder};
    use fsdrill::{Level, LevelCatalog, Step};

    let level = Level::new(
        "home-first",
        "Home first",
        desktop_with_docs(),
        vec![
            Step::new("be-home", "Be on the Desktop", at_root()),
            Step::new("open-docs", "Open Documents", in_folder("docs")),
        ],
    );
    let catalog = std::sync::Arc::new(LevelCatalog::new(vec![level]).unwrap());
    let s = session(catalog);
    assert_eq!(s.view().phase(), Phase::Playing);
    s.enter_folder(&id("docs"));

    let view = s.restart_level();
    assert_eq!(view.phase(), Phase::Playing);
    assert!(!view.state.step_complete);
    assert!(view.feedback().is_none());

    wait(AUTO_ADVANCE * 2).await;
    assert_eq!(s.view().state.step_index, 0);

    let view = s.restart_game();
    assert_eq!(view.phase(), Phase::Playing);
    assert!(view.feedback().is_none());
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_pending_auto_advance() {
    let s = Session::starting_at(two_level_catalog(), Timings::default(), 1).unwrap();
    s.enter_folder(&id("docs"));
    s.restart_level();

    wait(AUTO_ADVANCE * 2).await;
    let view = s.view();
    assert_eq!(view.state.step_index, 0);
    assert_eq!(view.phase(), Phase::Playing);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_timers() {
    let s = Session::starting_at(two_level_catalog(), Timings::default(), 1).unwrap();
    s.enter_folder(&id("docs"));
    s.shutdown();

    wait(FEEDBACK_TTL * 2).await;
    let view = s.view();
    assert_eq!(view.phase(), Phase::StepComplete);
    assert!(view.feedback().is_some());
}

#[tokio::test(start_paused = true)]
async fn advancing_levels_and_finishing_the_game() {
    let s = session(two_level_catalog());
    assert!(matches!(
        s.advance_after_level_complete(),
        Err(ApiError::InvalidTransition(_))
    ));

    s.enter_folder(&id("docs"));
    let view = s.advance_after_level_complete().unwrap();
    assert_eq!(view.state.level_index, 1);
    assert_eq!(view.level_id, "walk");
    assert_eq!(view.navigation, vec![id("root")]);
    assert!(view.feedback().is_none());

    s.enter_folder(&id("docs"));
    wait(AUTO_ADVANCE + MARGIN).await;
    s.go_back();
    wait(AUTO_ADVANCE + MARGIN).await;
    let view = s.move_node(&id("letter"), &id("docs"));
    assert_eq!(view.phase(), Phase::GameComplete);
    assert!(view.state.level_complete);

    assert!(matches!(
        s.advance_after_level_complete(),
        Err(ApiError::InvalidTransition(_))
    ));

    let view = s.restart_game();
    assert_eq!(view.state.level_index, 0);
    assert_eq!(view.phase(), Phase::Playing);
}

#[tokio::test(start_paused = true)]
async fn entering_a_file_is_ignored() {
    let s = session(two_level_catalog());
    let view = s.enter_folder(&id("letter"));
    assert_eq!(view.navigation, vec![id("root")]);
    assert!(view.feedback().is_none());

    let view = s.enter_folder(&NodeId::from("missing"));
    assert_eq!(view.navigation, vec![id("root")]);
}

#[tokio::test(start_paused = true)]
async fn delete_does_not_cascade() {
    let s = session(nested_catalog());
    let view = s.delete(&id("a"));
    assert!(!view.nodes.contains(&id("a")));
    assert!(view.nodes.contains(&id("b")));
    let orphans: Vec<_> = view.nodes.orphans().into_iter().map(|n| n.id.clone()).collect();
    assert_eq!(orphans, vec![id("b")]);
}

#[tokio::test(start_paused = true)]
async fn timer_changes_are_published() {
    let s = Session::starting_at(two_level_catalog(), Timings::default(), 1).unwrap();
    let mut revisions = s.subscribe();
    s.enter_folder(&id("docs"));
    let after_intent = *revisions.borrow_and_update();

    wait(AUTO_ADVANCE + MARGIN).await;
    assert!(revisions.has_changed().unwrap());
    assert!(*revisions.borrow_and_update() > after_intent);
}

#[test]
fn session_needs_a_runtime() {
    let result = Session::new(two_level_catalog(), Timings::default());
    assert!(matches!(result, Err(ApiError::RuntimeUnavailable(_))));
}
