//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, one-based page request.
///
/// The page number and size are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Create a page, raising a zero `number` or `size` to one.
    pub fn new(number: u64, size: u64) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Build a page from raw query parameters.
    ///
    /// Values that are missing, not a positive integer or zero fall back to
    /// the defaults in `config`.
    pub fn from_params(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(config.default_page),
            parse_positive(per_page).unwrap_or(config.default_page_size),
        )
    }

    /// The one-based page number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The maximum number of items on the page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The number of items to skip to reach this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }

    /// The number of pages needed to show `total` items.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|&value| value > 0)
}

#[cfg(test)]
mod tests {
    use crate::pagination::{Page, PaginationConfig};

    #[test]
    fn uses_defaults_when_missing() {
        let got = Page::from_params(None, None, &PaginationConfig::default());

        assert_eq!(got, Page { number: 1, size: 10 });
    }

    #[test]
    fn parses_params() {
        let got = Page::from_params(Some("3"), Some("25"), &PaginationConfig::default());

        assert_eq!(got, Page { number: 3, size: 25 });
    }

    #[test]
    fn invalid_params_fall_back_to_defaults() {
        let config = PaginationConfig {
            default_page: 1,
            default_page_size: 5,
        };

        let got = Page::from_params(Some("abc"), Some("0"), &config);

        assert_eq!(got, Page { number: 1, size: 5 });

        let got = Page::from_params(Some("-2"), Some("1.5"), &config);

        assert_eq!(got, Page { number: 1, size: 5 });
    }

    #[test]
    fn zero_is_raised_to_one() {
        let page = Page::new(0, 0);

        assert_eq!(page.number(), 1);
        assert_eq!(page.size(), 1);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.page_count(3), 3);
    }

    #[test]
    fn zero_defaults_are_raised_to_one() {
        let config = PaginationConfig {
            default_page: 0,
            default_page_size: 0,
        };

        let got = Page::from_params(None, None, &config);

        assert_eq!(got, Page::new(1, 1));
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Page { number: 1, size: 10 }.offset(), 0);
        assert_eq!(Page { number: 3, size: 10 }.offset(), 20);
    }

    #[test]
    fn page_count_rounds_up() {
        let page = Page { number: 1, size: 10 };

        assert_eq!(page.page_count(0), 0);
        assert_eq!(page.page_count(10), 1);
        assert_eq!(page.page_count(11), 2);
        assert_eq!(page.page_count(60), 6);
    }
}
