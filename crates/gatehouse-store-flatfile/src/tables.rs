//! Table file names and header comment blocks.
//!
//! A missing table is seeded with its header before the first read. Headers
//! are comments only; loading ignores every `#`-prefixed line, so headers
//! never round-trip through the codec.

/// Identity table.
pub const PEOPLE_FILE: &str = "people.txt";

/// Visitor / special-pass table.
pub const PASSES_FILE: &str = "passes.txt";

/// Violation counter table.
pub const VIOLATIONS_FILE: &str = "violations.txt";

/// Append-only access log.
pub const ACCESS_LOG_FILE: &str = "access_log.txt";

pub const PEOPLE_HEADER: &str = "\
# Gatehouse identity table
# Format: ID,ROLE,NAME,STATUS,IMAGE_PATH,VIOLATION_COUNT
# ROLE: GUARD, STUDENT_NUMBER, STUDENT_RFID, TEACHER, or SPECIAL
# STATUS: ACTIVE or INACTIVE
# IMAGE_PATH and VIOLATION_COUNT are optional trailing fields
";

pub const PASSES_HEADER: &str = "\
# Gatehouse visitor table
# Format: NAME,CONTACT,VISITING_AS,PURPOSE,VISITING,ID_TYPE,SPECIAL_PASS,\
CREATED_AT,EXPIRES_AT,STATUS,CHECK_IN_TIME,CHECK_OUT_TIME
# STATUS: ACTIVE, INACTIVE, or EXPIRED
# Timestamps are local time, YYYY-MM-DD HH:MM:SS
";

pub const VIOLATIONS_HEADER: &str = "\
# Gatehouse violation table
# Format: PERSON_ID,COUNT
";

pub const ACCESS_LOG_HEADER: &str = "\
# Gatehouse access log
# Format: TIMESTAMP,ID,ACTION,ROLE,NAME,OUTCOME
";
