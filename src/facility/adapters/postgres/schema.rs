//! Diesel schema for facility persistence.

diesel::table! {
    /// Warehouses.
    warehouses (id) {
        /// Warehouse identifier.
        id -> Uuid,
        /// Warehouse name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional postal address.
        address -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cages inside warehouses.
    cages (id) {
        /// Cage identifier.
        id -> Uuid,
        /// Owning warehouse.
        warehouse_id -> Uuid,
        /// Cage code.
        #[max_length = 50]
        code -> Varchar,
        /// Free-text status label.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Employees.
    employees (id) {
        /// Employee identifier.
        id -> Uuid,
        /// Employee name.
        #[max_length = 50]
        name -> Varchar,
        /// Contact phone number.
        #[max_length = 20]
        phone -> Varchar,
        /// Job role.
        #[max_length = 20]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
