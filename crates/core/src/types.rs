/// Product and comment identifiers are plain integers assigned by the
/// backend that owns the record.
pub type DbId = i64;
