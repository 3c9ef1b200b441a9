//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `email` carries the `users_email_key` unique
    /// constraint.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        /// Stored verbatim.
        password -> Varchar,
    }
}

diesel::table! {
    /// Tasks. `priority` is NULL when unset and otherwise checked against
    /// `High`, `Medium` and `Low`.
    tasks (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        priority -> Nullable<Varchar>,
        status -> Varchar,
    }
}

diesel::table! {
    /// Task membership edges. The composite primary key rejects duplicate
    /// assignments; both foreign keys cascade on delete.
    task_assignments (task_id, user_id) {
        task_id -> Int8,
        user_id -> Int8,
    }
}

diesel::joinable!(task_assignments -> tasks (task_id));
diesel::joinable!(task_assignments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(task_assignments, tasks, users);
