use std::fmt;

/// Jenkins API token.
///
/// Kept out of `Debug` output so credentials never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Username and API token pair sent as HTTP basic auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: Token,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: Token) -> Self {
        Self {
            username: username.into(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let credentials = Credentials::new("admin", Token::from("11aa22bb33cc"));
        let rendered = format!("{credentials:?}");

        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("11aa22bb33cc"));
    }

    #[test]
    fn token_exposes_raw_value() {
        assert_eq!(Token::from(String::from("secret")).as_str(), "secret");
    }
}
