/// A row of the `errors` table. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub id: i64,
    pub workshop: String,
    pub unit: String,
    pub time: String, // "YYYY-MM-DD HH:MM:SS"
    pub info: String,
    pub author: String,
}
