//! Diesel schema for task persistence.

diesel::table! {
    /// Task templates.
    task_templates (id) {
        /// Template identifier.
        id -> Uuid,
        /// Template name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Recurrence classification.
        #[max_length = 20]
        recurrence_type -> Varchar,
        /// Estimated duration in minutes.
        estimated_duration -> Nullable<Int4>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Template reference.
        template_id -> Uuid,
        /// Warehouse reference.
        warehouse_id -> Uuid,
        /// Assignee reference.
        assignee_id -> Uuid,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Planned start.
        scheduled_time -> Timestamptz,
        /// Completion time.
        completed_time -> Nullable<Timestamptz>,
        /// Working time in minutes.
        actual_duration -> Nullable<Int4>,
        /// Optimistic concurrency counter.
        revision -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Links between tasks and cages.
    task_cages (task_id, cage_id) {
        /// Task reference.
        task_id -> Uuid,
        /// Cage reference.
        cage_id -> Uuid,
        /// Link creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> task_templates (template_id));
diesel::joinable!(task_cages -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(task_templates, tasks, task_cages);
