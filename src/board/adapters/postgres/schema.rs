//! Diesel schema for board persistence.

diesel::table! {
    /// Task records with column membership and intra-column rank.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Column membership.
        #[max_length = 50]
        status -> Varchar,
        /// Zero-based rank within the column.
        rank -> Integer,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
