//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Nothing
//! references `companies` through a foreign key: deleting a company leaves
//! its departments, placements and grants in place.

diesel::table! {
    /// Registered users and their optional company placement.
    users (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique login address.
        email -> Varchar,
        image_url -> Nullable<Varchar>,
        password_hash -> Varchar,
        /// Set together with `department_id` (table CHECK constraint).
        company_id -> Nullable<Int8>,
        department_id -> Nullable<Int8>,
        email_is_validated -> Bool,
        email_validation_token -> Nullable<Varchar>,
        /// Unix seconds.
        vacation_time_start -> Nullable<Int8>,
        /// Unix seconds.
        vacation_time_end -> Nullable<Int8>,
    }
}

diesel::table! {
    companies (id) {
        id -> Int8,
        company_name -> Varchar,
        address -> Varchar,
        image_url -> Nullable<Varchar>,
    }
}

diesel::table! {
    departments (id) {
        id -> Int8,
        department_name -> Varchar,
        company_id -> Int8,
        image_url -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Grants whose `object_id` is a company id.
    company_credentials (id) {
        id -> Int8,
        credential_type -> Varchar,
        user_id -> Int8,
        object_id -> Int8,
    }
}

diesel::table! {
    /// Grants whose `object_id` is a department id.
    department_credentials (id) {
        id -> Int8,
        credential_type -> Varchar,
        user_id -> Int8,
        object_id -> Int8,
    }
}

diesel::joinable!(company_credentials -> users (user_id));
diesel::joinable!(department_credentials -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    companies,
    departments,
    company_credentials,
    department_credentials,
);
