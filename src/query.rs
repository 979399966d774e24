/// Clause used when no filter produced anything, so the query is never empty.
pub const DEFAULT_CLAUSE: &str = "stars:>0";

/// The three user-editable search inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub keyword: String,
    pub language: String,
    pub min_stars: u64,
}

impl SearchFilters {
    pub fn new(keyword: &str, language: &str, min_stars: u64) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            language: language.trim().to_string(),
            min_stars,
        }
    }

    /// Space-joined query string, before percent-encoding.
    pub fn query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            parts.push(keyword.to_string());
        }

        let language = self.language.trim();
        if !language.is_empty() {
            parts.push(format!("language:{}", language));
        }

        if self.min_stars > 0 {
            parts.push(format!("stars:>={}", self.min_stars));
        }

        if parts.is_empty() {
            DEFAULT_CLAUSE.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Query ready to drop into a `q=` URL parameter.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.query()).into_owned()
    }
}

/// Parse the minimum-stars field the way a number input is read: the
/// leading run of digits counts, so `"100.5"` is 100 and `"12abc"` is 12.
/// Negative or digit-less input is 0; huge values saturate.
pub fn parse_min_stars(raw: &str) -> u64 {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let value = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        });

    if negative {
        0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_all_clauses() {
        let filters = SearchFilters::new("raytracer", "rust", 100);
        assert_eq!(filters.query(), "raytracer language:rust stars:>=100");
    }

    #[test]
    fn empty_filters_fall_back_to_default_clause() {
        let filters = SearchFilters::new("  ", "", 0);
        assert_eq!(filters.query(), "stars:>0");
        assert_eq!(filters.encoded(), "stars%3A%3E0");
    }

    #[test]
    fn trims_inputs() {
        let filters = SearchFilters::new("  cli tool ", " go ", 0);
        assert_eq!(filters.query(), "cli tool language:go");
    }

    #[test]
    fn zero_stars_adds_no_clause() {
        let filters = SearchFilters::new("", "python", 0);
        assert_eq!(filters.query(), "language:python");
    }

    #[test]
    fn encoding_is_stable() {
        let filters = SearchFilters::new("ray tracer", "c++", 5);
        let first = filters.encoded();
        let second = filters.clone().encoded();
        assert_eq!(first, second);
        assert_eq!(first, "ray%20tracer%20language%3Ac%2B%2B%20stars%3A%3E%3D5");
    }

    #[test]
    fn min_stars_parse_failure_is_zero() {
        assert_eq!(parse_min_stars("250"), 250);
        assert_eq!(parse_min_stars(" 7 "), 7);
        assert_eq!(parse_min_stars(""), 0);
        assert_eq!(parse_min_stars("lots"), 0);
        assert_eq!(parse_min_stars("-3"), 0);
    }

    #[test]
    fn min_stars_reads_leading_digits() {
        assert_eq!(parse_min_stars("100.5"), 100);
        assert_eq!(parse_min_stars("12abc"), 12);
        assert_eq!(parse_min_stars("+40"), 40);
        assert_eq!(parse_min_stars(".5"), 0);
        assert_eq!(parse_min_stars("99999999999999999999999"), u64::MAX);
        assert_eq!(SearchFilters::new("", "", parse_min_stars("100.5")).query(), "stars:>=100");
    }
}
