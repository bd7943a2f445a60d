use crate::domain::user::UserRecord;
use crate::error::{Result, TokenizeError};
use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize)]
struct UserRow {
    id: String,
    #[serde(default)]
    disabled: bool,
}

/// Reads user directory seed data from a CSV source with `id,disabled` columns.
pub struct UserReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> UserReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn users(self) -> impl Iterator<Item = Result<UserRecord>> {
        self.reader.into_deserialize::<UserRow>().map(|result| {
            result
                .map(|row| UserRecord {
                    id: row.id,
                    is_disabled: row.disabled,
                })
                .map_err(|e| TokenizeError::InvalidArgument(format!("malformed user row: {}", e)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_parses_flags() {
        let data = "id, disabled\nu-1, false\nu-2, true";
        let users: Vec<UserRecord> = UserReader::new(data.as_bytes())
            .users()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(users, vec![UserRecord::enabled("u-1"), UserRecord::disabled("u-2")]);
    }

    #[test]
    fn test_reader_rejects_bad_flag() {
        let data = "id, disabled\nu-1, maybe";
        let mut users = UserReader::new(data.as_bytes()).users();
        assert!(users.next().unwrap().is_err());
    }
}
