//! Diesel schema for batch persistence.

diesel::table! {
    /// Collar batches.
    batches (id) {
        /// Batch identifier.
        id -> Uuid,
        /// Owning merchant.
        merchant_id -> Uuid,
        /// Number of collars issued.
        collar_count -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collars issued in a batch.
    collars (id) {
        /// Collar identifier.
        id -> Uuid,
        /// Owning merchant.
        merchant_id -> Uuid,
        /// Owning batch.
        batch_id -> Uuid,
        /// Globally unique collar code.
        #[max_length = 32]
        collar_code -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(collars -> batches (batch_id));
diesel::allow_tables_to_appear_in_same_query!(batches, collars);
