//! # Node Identity
//!
//! `/_nh/whoami` answers with a comma separated record; the node id is the
//! fourth field.

const NODE_ID_FIELD: usize = 3;

/// Node id from a whoami record.
pub fn parse_whoami(body: &str) -> Option<String> {
    body.trim()
        .split(',')
        .nth(NODE_ID_FIELD)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
