use std::fmt;

#[derive(Debug)]
pub enum OwmError {
    Request(String),
    Api(String),
    Document(String),
    Input(String),
}

impl OwmError {
    /// Message suitable for showing to the end user
    pub fn user_message(&self) -> String {
        match self {
            OwmError::Request(_) => "Failed to reach the weather service. Please try again.".to_string(),
            OwmError::Api(e) => e.clone(),
            OwmError::Document(_) => "The weather service returned unexpected data.".to_string(),
            OwmError::Input(e) => e.clone(),
        }
    }
}

impl fmt::Display for OwmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OwmError::Request(e) => write!(f, "OwmError::Request: {}", e),
            OwmError::Api(e) => write!(f, "OwmError::Api: {}", e),
            OwmError::Document(e) => write!(f, "OwmError::Document: {}", e),
            OwmError::Input(e) => write!(f, "OwmError::Input: {}", e),
        }
    }
}
impl From<reqwest::Error> for OwmError {
    fn from(e: reqwest::Error) -> Self {
        OwmError::Request(e.to_string())
    }
}
impl From<serde_json::Error> for OwmError {
    fn from(e: serde_json::Error) -> Self {
        OwmError::Document(e.to_string())
    }
}
