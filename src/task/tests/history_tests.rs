//! Unit tests for patch merging and history entry capture.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskDraft, TaskPatch, TaskStatus, field};
use chrono::{TimeZone, Utc};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn task() -> Task {
    Task::create(
        TaskDraft::new("Initial title").with_description("Initial description"),
        &DefaultClock,
    )
    .expect("valid draft")
}

#[rstest]
fn differing_title_produces_one_entry_with_old_value(mut task: Task) {
    let entries = task.apply_patch(TaskPatch::new().with_title("New title"), &DefaultClock);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].field_changed(), field::TITLE);
    assert_eq!(entries[0].old_value(), "Initial title");
    assert_eq!(entries[0].new_value(), "New title");
    assert_eq!(task.title(), "New title");
}

#[rstest]
fn equal_fields_produce_no_entries(mut task: Task) {
    let entries = task.apply_patch(
        TaskPatch::new()
            .with_title("Initial title")
            .with_description("Initial description"),
        &DefaultClock,
    );

    assert!(entries.is_empty());
}

#[rstest]
fn each_differing_field_produces_exactly_one_entry(mut task: Task) {
    let deadline = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).single().expect("valid timestamp");
    let patch = TaskPatch::new()
        .with_title("Renamed")
        .with_image("img-2.png")
        .with_description("Rewritten")
        .with_deadline(deadline)
        .with_assigned_user_ids(vec![UserId::new("alice")]);

    let entries = task.apply_patch(patch, &DefaultClock);

    let fields: Vec<_> = entries.iter().map(|entry| entry.field_changed()).collect();
    assert_eq!(
        fields,
        vec![
            field::TITLE,
            field::IMAGE,
            field::DESCRIPTION,
            field::DEADLINE,
            field::ASSIGNED_USER_IDS,
        ]
    );
}

#[rstest]
fn absent_optional_old_values_are_recorded_as_none(mut task: Task) {
    let deadline = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).single().expect("valid timestamp");
    let entries = task.apply_patch(
        TaskPatch::new()
            .with_image("cover.png")
            .with_deadline(deadline)
            .with_assigned_user_ids(vec![UserId::new("alice"), UserId::new("bob")]),
        &DefaultClock,
    );

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].old_value(), "none");
    assert_eq!(entries[1].old_value(), "none");
    assert_eq!(entries[2].old_value(), "none");
    assert_eq!(entries[2].new_value(), "alice,bob");
}

#[rstest]
fn explicit_status_change_is_recorded(mut task: Task) {
    let entries = task.apply_patch(TaskPatch::new().with_status(TaskStatus::Done), &DefaultClock);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].field_changed(), field::STATUS);
    assert_eq!(entries[0].old_value(), "assigned");
    assert_eq!(entries[0].new_value(), "done");
    assert_eq!(task.status(), TaskStatus::Done);
}

#[rstest]
fn statusless_patch_forces_assigned_without_an_entry(mut task: Task) -> eyre::Result<()> {
    let entries = task.apply_patch(TaskPatch::new().with_title("Renamed"), &DefaultClock);

    ensure!(entries.iter().all(|entry| entry.field_changed() != field::STATUS));
    ensure!(task.status() == TaskStatus::Assigned);
    Ok(())
}

#[rstest]
fn statusless_patch_leaves_done_tasks_done(mut task: Task) -> eyre::Result<()> {
    task.complete(None);

    let entries = task.apply_patch(TaskPatch::new().with_title("Renamed"), &DefaultClock);

    ensure!(entries.len() == 1);
    ensure!(task.status() == TaskStatus::Done);
    Ok(())
}

#[rstest]
fn status_equal_to_current_produces_no_entry(mut task: Task) {
    let entries = task.apply_patch(
        TaskPatch::new().with_status(TaskStatus::Assigned),
        &DefaultClock,
    );

    assert!(entries.is_empty());
    assert_eq!(task.status(), TaskStatus::Assigned);
}
