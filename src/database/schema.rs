//! Database schema definitions

/// SQL to create the properties table
pub const CREATE_PROPERTIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vault_properties (
    store_id         CHAR(32) NOT NULL PRIMARY KEY,
    version          CHAR(10),
    create_timestamp TEXT
)
"#;

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vault_users (
    user_id          CHAR(32) NOT NULL PRIMARY KEY,
    email            VARCHAR NOT NULL UNIQUE,
    salt             CHAR(16) NOT NULL,
    key_rounds       INTEGER NOT NULL,
    verifier         BLOB NOT NULL,
    create_timestamp TEXT,
    last_sign_in     TEXT
)
"#;

/// SQL to create the credentials table (one collection per user)
pub const CREATE_CREDENTIALS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vault_credentials (
    user_id          CHAR(32) NOT NULL,
    credential_id    CHAR(20) NOT NULL,
    site             VARCHAR,
    username         VARCHAR,
    password         BLOB,
    category         VARCHAR,
    notes            BLOB,
    create_timestamp TEXT,
    change_timestamp TEXT,
    PRIMARY KEY (user_id, credential_id)
)
"#;

/// SQL to index credentials by owner and creation time
pub const CREATE_CREDENTIALS_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS vault_credentials_created
    ON vault_credentials (user_id, create_timestamp)
"#;

/// All table creation statements in order
pub const CREATE_ALL_TABLES: &[&str] = &[
    CREATE_PROPERTIES_TABLE,
    CREATE_USERS_TABLE,
    CREATE_CREDENTIALS_TABLE,
    CREATE_CREDENTIALS_INDEX,
];

/// Check if a store version can be opened by this build
pub fn is_version_compatible(version: &str) -> bool {
    let supported: u32 = crate::STORE_VERSION.parse().unwrap_or(1);
    match version.trim().parse::<u32>() {
        Ok(v) => v >= 1 && v <= supported,
        Err(_) => false,
    }
}
