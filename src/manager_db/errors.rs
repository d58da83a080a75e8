use std::fmt;
use std::fmt::Formatter;

#[derive(Debug)]
pub struct DBError(pub String);

impl fmt::Display for DBError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DBError: {}", self.0)
    }
}
impl From<rusqlite::Error> for DBError {
    fn from(err: rusqlite::Error) -> Self { DBError(err.to_string()) }
}
