use std::fmt;

/// A visitor count as the page shows it.
///
/// Whole numbers render without a fractional part (`12.0` shows as `12`);
/// any other number renders in its shortest decimal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Count(String);

impl Count {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Count {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for Count {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<f64> for Count {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
