// Diesel schema for the store monitoring tables. Timestamps and local
// times are stored as text, matching the seeded source data.

diesel::table! {
    store_status (store_id, timestamp_utc) {
        store_id -> Bigint,
        #[max_length = 64]
        timestamp_utc -> Varchar,
        #[max_length = 16]
        status -> Varchar,
    }
}

diesel::table! {
    timezones (store_id) {
        store_id -> Bigint,
        #[max_length = 64]
        timezone_str -> Varchar,
    }
}

diesel::table! {
    business_hours (store_id, day) {
        store_id -> Bigint,
        day -> Tinyint,
        #[max_length = 16]
        start_time_local -> Varchar,
        #[max_length = 16]
        end_time_local -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(business_hours, store_status, timezones,);
