//! Diesel schema for merchant persistence.

diesel::table! {
    /// Merchant records.
    merchants (id) {
        /// Merchant identifier.
        id -> Uuid,
        /// Merchant name.
        #[max_length = 100]
        name -> Varchar,
        /// Contact person.
        #[max_length = 100]
        contact_person -> Varchar,
        /// Contact phone number.
        #[max_length = 20]
        phone -> Varchar,
        /// Postal address.
        address -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
