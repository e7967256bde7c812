//! Service orchestration tests for the submission lifecycle, including the
//! accept-submission saga and its partial-failure invariant.

#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::panic_in_result_fn,
    reason = "Test code panics on unexpected variants for assertion clarity"
)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::access::{BearerToken, CallerContext, ErrorKind, authenticate};
use crate::identity::{
    adapters::memory::InMemoryIdentityDirectory,
    domain::Role,
    services::{TokenCodec, TokenConfig},
};
use crate::page::PageRequest;
use crate::submission::{
    adapters::{
        local::InProcessTaskClient,
        memory::{InMemorySubmissionCommentRepository, InMemorySubmissionRepository},
    },
    domain::{SubmissionId, SubmissionStatus},
    ports::{TaskClientError, TaskClientResult, TaskServiceClient},
    services::{SubmissionLifecycleError, SubmissionLifecycleService},
};
use crate::task::{
    adapters::memory::{InMemoryTaskHistoryRepository, InMemoryTaskRepository},
    domain::{Task, TaskDraft, TaskId, TaskStatus},
    services::TaskLifecycleService,
};

type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryTaskHistoryRepository, DefaultClock>;
type TestTaskClient = InProcessTaskClient<
    InMemoryTaskRepository,
    InMemoryTaskHistoryRepository,
    DefaultClock,
    InMemoryIdentityDirectory,
>;
type TestSubmissionService = SubmissionLifecycleService<
    InMemorySubmissionRepository,
    InMemorySubmissionCommentRepository,
    TestTaskClient,
    DefaultClock,
>;

struct Harness {
    directory: Arc<InMemoryIdentityDirectory>,
    tasks: Arc<TestTaskService>,
    submissions: TestSubmissionService,
    submission_repo: Arc<InMemorySubmissionRepository>,
}

#[fixture]
fn harness() -> Harness {
    let codec = TokenCodec::new(TokenConfig {
        secret: "submission-test-secret".to_owned(),
        token_expiry: Duration::from_secs(3600),
    });
    let directory = Arc::new(InMemoryIdentityDirectory::new(codec));
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryTaskHistoryRepository::new()),
        Arc::new(DefaultClock),
    ));
    let submission_repo = Arc::new(InMemorySubmissionRepository::new());
    let submissions = SubmissionLifecycleService::new(
        Arc::clone(&submission_repo),
        Arc::new(InMemorySubmissionCommentRepository::new()),
        Arc::new(InProcessTaskClient::new(
            Arc::clone(&tasks),
            Arc::clone(&directory),
        )),
        Arc::new(DefaultClock),
    );
    Harness {
        directory,
        tasks,
        submissions,
        submission_repo,
    }
}

impl Harness {
    /// Registers a user and authenticates them the way a gateway would.
    async fn login(&self, id: &str, role: Role) -> eyre::Result<CallerContext> {
        let (_, token) = self
            .directory
            .register_with_token(id, role, id, &format!("{id}@example.com"))?;
        let header = token.to_header_value();
        Ok(authenticate(Some(&header), self.directory.as_ref()).await?)
    }

    async fn create_open_task(&self, admin: &CallerContext) -> eyre::Result<Task> {
        Ok(self
            .tasks
            .create_task(TaskDraft::new("Open task"), admin)
            .await?)
    }
}

/// Task client double whose completion call always fails with a transport
/// error, standing in for an unreachable task service.
struct CompletionUnavailableClient<T: TaskServiceClient> {
    inner: T,
}

#[async_trait]
impl<T: TaskServiceClient> TaskServiceClient for CompletionUnavailableClient<T> {
    async fn get_task(&self, task_id: TaskId, token: &BearerToken) -> TaskClientResult<Task> {
        self.inner.get_task(task_id, token).await
    }

    async fn complete_task(&self, _task_id: TaskId, _token: &BearerToken) -> TaskClientResult<Task> {
        Err(TaskClientError::unavailable(std::io::Error::other(
            "connection refused",
        )))
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitting_against_an_open_task_creates_a_pending_submission(
    harness: Harness,
) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;

    let submission = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await?;

    assert_eq!(submission.status(), SubmissionStatus::Pending);
    assert_eq!(submission.task_id(), task.id());
    assert_eq!(submission.user_id(), alice.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitting_against_a_missing_task_reports_not_found(harness: Harness) -> eyre::Result<()> {
    let alice = harness.login("alice", Role::Member).await?;
    let missing = TaskId::new();

    let result = harness
        .submissions
        .submit_task(missing, "https://github.com/alice/proof", &alice)
        .await;

    assert!(
        matches!(result, Err(SubmissionLifecycleError::TaskNotFound(id)) if id == missing)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitting_against_a_done_task_is_an_invalid_state(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;
    harness.tasks.complete_task(task.id(), &admin).await?;

    let result = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await;

    let Err(err) = result else {
        panic!("expected submission to be rejected");
    };
    assert!(matches!(err, SubmissionLifecycleError::TaskNotOpen { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitting_against_someone_elses_task_is_forbidden(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness
        .tasks
        .create_task(
            TaskDraft::new("Bob's task")
                .with_assigned_user_ids(vec![crate::identity::domain::UserId::new("bob")]),
            &admin,
        )
        .await?;

    let result = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await;

    let Err(err) = result else {
        panic!("expected submission to be forbidden");
    };
    assert!(matches!(err, SubmissionLifecycleError::NotAssigned { .. }));
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepting_a_submission_completes_the_task(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;
    let submission = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await?;

    let decided = harness
        .submissions
        .decide_submission(submission.id(), "ACCEPTED", &admin)
        .await?;
    assert_eq!(decided.status(), SubmissionStatus::Accepted);

    let completed = harness.tasks.get_task(task.id()).await?;
    assert_eq!(completed.status(), TaskStatus::Done);
    assert_eq!(completed.completed_by_user_id(), Some(admin.user_id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejecting_a_submission_leaves_the_task_open(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;
    let submission = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await?;

    let decided = harness
        .submissions
        .decide_submission(submission.id(), "rejected", &admin)
        .await?;
    assert_eq!(decided.status(), SubmissionStatus::Rejected);

    let task_after = harness.tasks.get_task(task.id()).await?;
    assert_eq!(task_after.status(), TaskStatus::Assigned);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bogus_decisions_leave_the_submission_untouched(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;
    let submission = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await?;

    let result = harness
        .submissions
        .decide_submission(submission.id(), "bogus", &admin)
        .await;

    let Err(err) = result else {
        panic!("expected the decision to be rejected");
    };
    assert!(matches!(err, SubmissionLifecycleError::InvalidDecision(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let unchanged = harness.submissions.get_submission(submission.id()).await?;
    assert_eq!(unchanged.status(), SubmissionStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acceptance_survives_a_failed_task_completion(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;

    // Same stores, but completion calls fail at the transport.
    let flaky = SubmissionLifecycleService::new(
        Arc::clone(&harness.submission_repo),
        Arc::new(InMemorySubmissionCommentRepository::new()),
        Arc::new(CompletionUnavailableClient {
            inner: InProcessTaskClient::new(
                Arc::clone(&harness.tasks),
                Arc::clone(&harness.directory),
            ),
        }),
        Arc::new(DefaultClock),
    );

    let submission = flaky
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await?;
    let result = flaky
        .decide_submission(submission.id(), "accepted", &admin)
        .await;

    let Err(err) = result else {
        panic!("expected the completion step to fail");
    };
    assert_eq!(err.kind(), ErrorKind::DependencyFailure);
    let SubmissionLifecycleError::CompletionFailed {
        submission: persisted,
        ..
    } = err
    else {
        panic!("expected a partial-failure error");
    };
    assert_eq!(persisted.status(), SubmissionStatus::Accepted);

    // The decision stayed committed locally, and the task is still open.
    let stored = flaky.get_submission(submission.id()).await?;
    assert_eq!(stored.status(), SubmissionStatus::Accepted);
    let task_after = harness.tasks.get_task(task.id()).await?;
    assert_eq!(task_after.status(), TaskStatus::Assigned);

    // Retrying through a healthy client replays the idempotent second step.
    let retried = harness
        .submissions
        .decide_submission(submission.id(), "accepted", &admin)
        .await?;
    assert_eq!(retried.status(), SubmissionStatus::Accepted);
    let task_done = harness.tasks.get_task(task.id()).await?;
    assert_eq!(task_done.status(), TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_require_an_existing_submission(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;

    let result = harness
        .submissions
        .add_comment(SubmissionId::new(), "Nice work", &admin)
        .await;
    assert!(matches!(result, Err(SubmissionLifecycleError::NotFound(_))));

    let listing = harness.submissions.comments(SubmissionId::new()).await;
    assert!(matches!(listing, Err(SubmissionLifecycleError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_returned_in_insertion_order(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task = harness.create_open_task(&admin).await?;
    let submission = harness
        .submissions
        .submit_task(task.id(), "https://github.com/alice/proof", &alice)
        .await?;

    harness
        .submissions
        .add_comment(submission.id(), "First pass looks fine", &admin)
        .await?;
    harness
        .submissions
        .add_comment(submission.id(), "Addressed the review notes", &alice)
        .await?;

    let comments = harness.submissions.comments(submission.id()).await?;
    let texts: Vec<_> = comments.iter().map(|comment| comment.comment()).collect();
    assert_eq!(texts, vec!["First pass looks fine", "Addressed the review notes"]);
    assert_eq!(comments[0].user_id(), admin.user_id());
    assert_eq!(comments[1].user_id(), alice.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_window_submissions_with_unbounded_counts(harness: Harness) -> eyre::Result<()> {
    let admin = harness.login("admin", Role::Admin).await?;
    let alice = harness.login("alice", Role::Member).await?;
    let task_a = harness.create_open_task(&admin).await?;
    let task_b = harness
        .tasks
        .create_task(TaskDraft::new("Second open task"), &admin)
        .await?;

    for index in 0..3 {
        harness
            .submissions
            .submit_task(task_a.id(), format!("https://github.com/alice/a-{index}"), &alice)
            .await?;
    }
    harness
        .submissions
        .submit_task(task_b.id(), "https://github.com/alice/b-0", &alice)
        .await?;

    let all = harness
        .submissions
        .list_submissions(PageRequest::new(0, 2)?)
        .await?;
    assert_eq!(all.items.len(), 2);
    assert_eq!(all.total_count, 4);

    let by_task = harness
        .submissions
        .list_by_task(task_a.id(), PageRequest::default())
        .await?;
    assert_eq!(by_task.items.len(), 3);
    assert_eq!(by_task.total_count, 3);
    Ok(())
}
