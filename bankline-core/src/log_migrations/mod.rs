//! Event log schema, embedded with include_str!
//!
//! Entries are `(file name, sql)` and are applied in list order. New files
//! follow the `NNN_description.sql` naming and are appended at the end.

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
