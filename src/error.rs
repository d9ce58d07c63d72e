use std::fmt;

#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    Io { path: String, source: std::io::Error },

    /// JSON parsing or serialization failed
    JsonParse { context: String, source: serde_json::Error },

    /// A field required by the requested builder is absent
    MissingField(&'static str),

    /// A `bound` rectangle is not of the form `[x1,y1][x2,y2]`
    MalformedBounds(String),

    /// Root activity is "unknown" and the snapshot is not a focus region
    UnknownActivity,

    /// Root carries no (or an empty) activity id, so no locator can be anchored
    MissingActivity,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            SnapshotError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            SnapshotError::MissingField(field) => {
                write!(f, "Missing required field '{}'", field)
            }
            SnapshotError::MalformedBounds(raw) => {
                write!(f, "Malformed bounds rectangle: {:?}", raw)
            }
            SnapshotError::UnknownActivity => {
                write!(f, "Activity is unknown and snapshot is not a focus region")
            }
            SnapshotError::MissingActivity => {
                write!(f, "Snapshot has no activity id")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io { source, .. } => Some(source),
            SnapshotError::JsonParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
