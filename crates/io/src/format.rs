use std::fmt;

/// Formats a number with thousands separators, e.g. `1,234,567`.
pub struct LargeFormatter<T: ToString>(pub T);

impl<T: ToString> fmt::Display for LargeFormatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_str = self.0.to_string();

        let len = num_str.len();
        for (i, ch) in num_str.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", ch)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_formatter() {
        assert_eq!(format!("{}", LargeFormatter(0)), "0");
        assert_eq!(format!("{}", LargeFormatter(123)), "123");
        assert_eq!(format!("{}", LargeFormatter(1234)), "1,234");
        assert_eq!(format!("{}", LargeFormatter(12345678)), "12,345,678");
    }
}
