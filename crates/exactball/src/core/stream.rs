//! Text sink for `write` methods.

use core::fmt;

/// Accumulates the textual form of contexts and elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrStream {
    buf: String,
}

impl GrStream {
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Appends the `Display` form of any value.
    pub fn write_display<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        use fmt::Write as _;
        // Writing into a `String` cannot fail.
        let _ = write!(self.buf, "{value}");
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl fmt::Write for GrStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates() {
        let mut out = GrStream::new();
        out.write_str("a");
        out.write_display(&42);
        out.write_str("/");
        out.write_display(&-7i64);
        assert_eq!(out.as_str(), "a42/-7");
        out.clear();
        assert!(out.as_str().is_empty());
    }
}
