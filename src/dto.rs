use serde::Serialize;

/// Body returned by every delete route.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}
