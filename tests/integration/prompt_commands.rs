use fsdrill::engine::{Phase, Timings};
use fsdrill::tooling::repl::{execute, ReplCommand, ReplOutcome};
use fsdrill::{Curriculum, Session};

fn run(session: &Session, line: &str) -> String {
    let command = ReplCommand::parse(line).unwrap().unwrap();
    match execute(session, command).unwrap() {
        ReplOutcome::Continue(output) => output,
        ReplOutcome::Quit => panic!("unexpected quit for {line}"),
    }
}

fn standard_session(level: usize) -> Session {
    let catalog = Curriculum::Standard.catalog().unwrap();
    Session::starting_at(catalog, Timings::default(), level).unwrap()
}

#[tokio::test(start_paused = true)]
async fn navigate_level_by_name() {
    let s = standard_session(0);
    run(&s, "cd documents");
    assert_eq!(s.view().path_names, vec!["Desktop", "Documents"]);
    assert_eq!(s.view().phase(), Phase::StepComplete);

    let out = run(&s, "cd Nowhere");
    assert!(out.contains("No item called \"Nowhere\""));
}

#[tokio::test(start_paused = true)]
async fn mkdir_with_name_completes_create_steps() {
    let s = standard_session(1);
    run(&s, "mkdir School");
    let view = s.view();
    assert!(view.child_named("school").is_some());
    assert!(view.rename_target.is_none());
    assert_eq!(view.phase(), Phase::StepComplete);
}

#[tokio::test(start_paused = true)]
async fn mkdir_without_name_keeps_placeholder() {
    let s = standard_session(1);
    run(&s, "mkdir");
    run(&s, "mkdir");
    let view = s.view();
    assert!(view.child_named("New folder").is_some());
    assert!(view.child_named("New folder (2)").is_some());
    assert!(view.rename_target.is_none());
}

#[tokio::test(start_paused = true)]
async fn move_and_delete_by_name() {
    let s = standard_session(2);
    run(&s, "mv essay.docx Documents");
    let view = s.view();
    assert!(view.child_named("essay.docx").is_none());

    let out = run(&s, "mv photo.jpg ..");
    assert!(out.contains("Already at the top folder"));

    run(&s, "rm old-notes.txt");
    assert!(s.view().child_named("old-notes.txt").is_none());
}

#[tokio::test(start_paused = true)]
async fn next_before_level_complete_is_refused() {
    let s = standard_session(0);
    let out = run(&s, "next");
    assert!(out.contains("Finish the current level first"));
    assert_eq!(s.view().state.level_index, 0);
}

#[tokio::test(start_paused = true)]
async fn quit_and_help() {
    let s = standard_session(0);
    assert!(run(&s, "help").contains("rename <item> <name>"));
    let quit = execute(&s, ReplCommand::Quit).unwrap();
    assert_eq!(quit, ReplOutcome::Quit);
}

#[tokio::test(start_paused = true)]
async fn find_reports_full_location() {
    let s = standard_session(3);
    assert_eq!(run(&s, "find BUDGET.xlsx"), "Desktop / Projects / 2023 / budget.xlsx");
    assert!(run(&s, "find missing.txt").contains("Nothing called"));
}
