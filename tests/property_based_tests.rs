//! Property tests for the query plan: ordering, owner isolation and page windows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use taskboard_core::models::{Category, OwnerId, Priority, Task, TaskId};
use taskboard_core::query_builder::{build_task_query, FilterCriteria, Pagination, SortKey};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High)
    ]
}

fn sort_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::DueDate),
        Just(SortKey::Priority),
        Just(SortKey::CreatedAt)
    ]
}

/// Task for `owner` with arbitrary priority, completion, due date and creation time
fn task_strategy(owner: OwnerId) -> impl Strategy<Value = Task> {
    (
        priority_strategy(),
        any::<bool>(),
        proptest::option::of(0i64..30),
        0i64..30,
    )
        .prop_map(move |(priority, completed, due_day, created_day)| {
            let created_at = epoch() + Duration::days(created_day);
            Task {
                id: TaskId(Uuid::new_v4()),
                owner_id: owner,
                title: "Generated task".to_string(),
                description: None,
                category: Category::Personal,
                priority,
                due_date: due_day.map(|day| epoch() + Duration::days(day)),
                completed,
                created_at,
                updated_at: created_at,
            }
        })
}

fn owner_a() -> OwnerId {
    OwnerId(Uuid::from_u128(0xA))
}

fn owner_b() -> OwnerId {
    OwnerId(Uuid::from_u128(0xB))
}

fn mixed_tasks() -> impl Strategy<Value = Vec<Task>> {
    (
        prop::collection::vec(task_strategy(owner_a()), 0..25),
        prop::collection::vec(task_strategy(owner_b()), 0..10),
    )
        .prop_map(|(mut mine, theirs)| {
            mine.extend(theirs);
            mine
        })
}

proptest! {
    /// Property: completed tasks never precede open ones, whatever the sort key
    #[test]
    fn open_tasks_always_come_first(tasks in mixed_tasks(), sort in sort_strategy()) {
        let query = build_task_query(owner_a(), &FilterCriteria::default(), sort, None);
        let ordered = query.apply(&tasks);

        for pair in ordered.windows(2) {
            prop_assert!(
                !(pair[0].completed && !pair[1].completed),
                "completed task listed before an open one"
            );
        }
    }

    /// Property: an owner-scoped plan never returns another owner's task
    #[test]
    fn queries_are_owner_scoped(tasks in mixed_tasks(), sort in sort_strategy()) {
        let query = build_task_query(owner_a(), &FilterCriteria::default(), sort, None);
        let expected = tasks.iter().filter(|t| t.owner_id == owner_a()).count();

        let returned = query.apply(&tasks);
        prop_assert_eq!(returned.len(), expected);
        prop_assert!(returned.iter().all(|t| t.owner_id == owner_a()));
    }

    /// Property: open tasks sorted by priority have non-increasing weight
    #[test]
    fn priority_sort_is_descending(tasks in mixed_tasks()) {
        let query = build_task_query(owner_a(), &FilterCriteria::default(), SortKey::Priority, None);
        let ordered = query.apply(&tasks);

        for pair in ordered.windows(2).filter(|p| p[0].completed == p[1].completed) {
            prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
        }
    }

    /// Property: walking every page yields the full ordering exactly once
    #[test]
    fn pages_partition_the_result(
        tasks in mixed_tasks(),
        sort in sort_strategy(),
        limit in 1u32..8,
    ) {
        let criteria = FilterCriteria::default();
        let full = build_task_query(owner_a(), &criteria, sort, None).apply(&tasks);
        let total = full.len() as u64;

        let first = Pagination::new(1, limit);
        let total_pages = first.total_pages(total);
        prop_assert!(total_pages >= 1);

        let mut walked = Vec::new();
        for page in 1..=total_pages {
            let pagination = Pagination::new(u32::try_from(page).unwrap(), limit);
            let query = build_task_query(owner_a(), &criteria, sort, Some(&pagination));
            prop_assert_eq!(query.count_in(&tasks), total);
            walked.extend(query.apply(&tasks));
        }

        let walked_ids: Vec<TaskId> = walked.iter().map(|t| t.id).collect();
        let full_ids: Vec<TaskId> = full.iter().map(|t| t.id).collect();
        prop_assert_eq!(walked_ids, full_ids);
    }
}
