//! Integration tests for the Diesel task and user repositories.
//!
//! Each test gets its own embedded PostgreSQL cluster via
//! `pg-embedded-setup-unpriv` and a freshly migrated database.

use std::sync::Arc;

use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use teamtask::domain::ports::{
    TaskCommand, TaskPersistenceError, TaskQuery, TaskRepository, UserCommand,
    UserPersistenceError, UserRepository,
};
use teamtask::domain::{
    ErrorKind, NewTask, NewUser, Priority, TaskDraft, TaskId, TaskUpdate, TeamTaskService, UserId,
};
use teamtask::outbound::persistence::{
    DbPool, DieselTaskRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, reset_database};

const TEST_DB: &str = "teamtask_repositories_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    tasks: DieselTaskRepository,
    users: DieselUserRepository,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    runtime
        .block_on(run_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        tasks: DieselTaskRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_task(title: &str, priority: Option<Priority>) -> NewTask {
    NewTask {
        title: title.to_owned(),
        description: "D".to_owned(),
        priority,
        status: "Open".to_owned(),
    }
}

fn new_user(name: &str) -> NewUser {
    NewUser::new(name, format!("{}@example.com", name.to_lowercase()), "pw")
}

#[rstest]
fn tasks_load_with_members_in_ascending_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: tasks_load_with_members_in_ascending_order skipped");
        return;
    };
    let TestContext {
        runtime,
        tasks,
        users,
        ..
    } = &context;

    runtime.block_on(async {
        let ann = users.add(&new_user("Ann")).await.expect("add Ann");
        let bob = users.add(&new_user("Bob")).await.expect("add Bob");
        let task_id = tasks
            .create(&new_task("Task 1", Some(Priority::High)))
            .await
            .expect("create task");
        let other_id = tasks
            .create(&new_task("Task 2", None))
            .await
            .expect("create task");

        tasks.assign_user(task_id, bob).await.expect("assign Bob");
        tasks.assign_user(task_id, ann).await.expect("assign Ann");

        let task = tasks
            .find_by_id(task_id)
            .await
            .expect("load task")
            .expect("task exists");
        assert_eq!(task.title, "Task 1");
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.status, "Open");
        assert_eq!(task.team_members, vec![ann, bob]);

        let all = tasks.list_all().await.expect("list tasks");
        let ids: Vec<TaskId> = all.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![task_id, other_id]);
        assert!(all[1].team_members.is_empty());
        assert_eq!(all[1].priority, None);

        let visible = tasks.find_for_user(ann).await.expect("tasks for Ann");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].team_members, vec![ann, bob]);
    });
}

#[rstest]
fn repeated_assignment_is_a_duplicate(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: repeated_assignment_is_a_duplicate skipped");
        return;
    };

    context.runtime.block_on(async {
        let ann = context.users.add(&new_user("Ann")).await.expect("add user");
        let task_id = context
            .tasks
            .create(&new_task("Task 1", None))
            .await
            .expect("create task");
        context
            .tasks
            .assign_user(task_id, ann)
            .await
            .expect("first assignment");

        let err = context
            .tasks
            .assign_user(task_id, ann)
            .await
            .expect_err("second assignment must fail");
        assert_eq!(
            err,
            TaskPersistenceError::DuplicateAssignment {
                task_id,
                user_id: ann
            }
        );
    });
}

#[rstest]
fn dangling_assignments_name_the_missing_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: dangling_assignments_name_the_missing_row skipped");
        return;
    };

    context.runtime.block_on(async {
        let ann = context.users.add(&new_user("Ann")).await.expect("add user");
        let task_id = context
            .tasks
            .create(&new_task("Task 1", None))
            .await
            .expect("create task");

        let missing_task = TaskId::new(999);
        let err = context
            .tasks
            .assign_user(missing_task, ann)
            .await
            .expect_err("unknown task must fail");
        assert_eq!(
            err,
            TaskPersistenceError::MissingTask {
                task_id: missing_task
            }
        );

        let missing_user = UserId::new(999);
        let err = context
            .tasks
            .assign_user(task_id, missing_user)
            .await
            .expect_err("unknown user must fail");
        assert_eq!(
            err,
            TaskPersistenceError::MissingUser {
                user_id: missing_user
            }
        );
    });
}

#[rstest]
fn partial_updates_leave_other_columns_alone(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: partial_updates_leave_other_columns_alone skipped");
        return;
    };

    context.runtime.block_on(async {
        let task_id = context
            .tasks
            .create(&new_task("Task 1", Some(Priority::Low)))
            .await
            .expect("create task");

        let retitle = TaskUpdate {
            title: Some("Renamed".to_owned()),
            ..TaskUpdate::default()
        };
        context
            .tasks
            .update(task_id, &retitle)
            .await
            .expect("update title");

        let clear_priority = TaskUpdate {
            priority: Some(None),
            ..TaskUpdate::default()
        };
        context
            .tasks
            .update(task_id, &clear_priority)
            .await
            .expect("clear priority");

        let task = context
            .tasks
            .find_by_id(task_id)
            .await
            .expect("load task")
            .expect("task exists");
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.description, "D");
        assert_eq!(task.priority, None);
        assert_eq!(task.status, "Open");
    });
}

#[rstest]
fn deleting_a_task_removes_its_assignments(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_task_removes_its_assignments skipped");
        return;
    };

    context.runtime.block_on(async {
        let ann = context.users.add(&new_user("Ann")).await.expect("add user");
        let task_id = context
            .tasks
            .create(&new_task("Task 1", None))
            .await
            .expect("create task");
        context
            .tasks
            .assign_user(task_id, ann)
            .await
            .expect("assign");

        context.tasks.delete(task_id).await.expect("delete task");

        assert!(
            context
                .tasks
                .find_by_id(task_id)
                .await
                .expect("load task")
                .is_none()
        );
        assert!(
            context
                .tasks
                .find_for_user(ann)
                .await
                .expect("tasks for user")
                .is_empty()
        );
    });
}

#[rstest]
fn users_are_unique_by_email(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: users_are_unique_by_email skipped");
        return;
    };

    context.runtime.block_on(async {
        let ann = context.users.add(&new_user("Ann")).await.expect("add user");
        assert_eq!(ann, UserId::new(1));

        let stored = context
            .users
            .find_by_email("ann@example.com")
            .await
            .expect("lookup by email")
            .expect("user exists");
        assert_eq!(stored.id, ann);
        assert_eq!(stored.name, "Ann");

        let err = context
            .users
            .add(&NewUser::new("Other Ann", "ann@example.com", "pw2"))
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(
            err,
            UserPersistenceError::DuplicateEmail {
                email: "ann@example.com".to_owned()
            }
        );
    });
}

#[rstest]
fn removing_a_user_drops_their_assignments(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: removing_a_user_drops_their_assignments skipped");
        return;
    };

    context.runtime.block_on(async {
        let ann = context.users.add(&new_user("Ann")).await.expect("add Ann");
        let bob = context.users.add(&new_user("Bob")).await.expect("add Bob");
        let task_id = context
            .tasks
            .create(&new_task("Task 1", None))
            .await
            .expect("create task");
        context
            .tasks
            .assign_user(task_id, ann)
            .await
            .expect("assign Ann");
        context
            .tasks
            .assign_user(task_id, bob)
            .await
            .expect("assign Bob");

        context.users.remove(ann).await.expect("remove Ann");

        assert!(
            context
                .users
                .find_by_id(ann)
                .await
                .expect("lookup user")
                .is_none()
        );
        let task = context
            .tasks
            .find_by_id(task_id)
            .await
            .expect("load task")
            .expect("task survives");
        assert_eq!(task.team_members, vec![bob]);
    });
}

#[rstest]
fn service_flow_over_postgres(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: service_flow_over_postgres skipped");
        return;
    };
    let service = TeamTaskService::new(
        Arc::new(context.tasks.clone()),
        Arc::new(context.users.clone()),
    );

    context.runtime.block_on(async {
        let ann = service
            .register_user(new_user("Ann"))
            .await
            .expect("register Ann");
        let task_id = service
            .create_task(TaskDraft {
                title: "Task 1".to_owned(),
                description: "D".to_owned(),
                priority: "High".to_owned(),
                status: "Open".to_owned(),
                team_members: vec![ann],
            })
            .await
            .expect("create task");

        let err = service
            .assign_member(task_id, ann)
            .await
            .expect_err("repeat assignment must fail");
        assert_eq!(err.kind(), ErrorKind::DuplicateAssignment);

        let open_high = service
            .filter_tasks("Open", "High")
            .await
            .expect("filter tasks");
        assert_eq!(open_high.len(), 1);
        assert_eq!(open_high[0].team_members, vec![ann]);

        let err = service
            .register_user(NewUser::new("Imposter", "ann@example.com", "pw"))
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(err.kind(), ErrorKind::DuplicateEmail);
    });
}
