use lostfound_models::v0::OptionsPagination;
use lostfound_result::Result;

/// Validated page selection, `page` starts at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Result<Pagination> {
        if page < 1 {
            return Err(validation_error!(
                FailedValidation,
                "page",
                "must be 1 or greater"
            ));
        }

        if limit < 1 {
            return Err(validation_error!(
                FailedValidation,
                "limit",
                "must be 1 or greater"
            ));
        }

        if (page - 1).checked_mul(limit).is_none() {
            return Err(validation_error!(
                FailedValidation,
                "page",
                "is too far past the end"
            ));
        }

        Ok(Pagination { page, limit })
    }

    /// Resolve query options, applying defaults and capping the page size
    pub fn from_options(
        options: &OptionsPagination,
        default_limit: i64,
        max_limit: i64,
    ) -> Result<Pagination> {
        Pagination::new(
            options.page.unwrap_or(1),
            options.limit.unwrap_or(default_limit).min(max_limit),
        )
    }

    /// Number of items before this page
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit).max(0)
    }

    /// Cut this page out of an already ordered list
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip() as usize)
            .take(self.limit as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_is_derived_from_one_based_page() {
        assert_eq!(Pagination::new(1, 5).unwrap().skip(), 0);
        assert_eq!(Pagination::new(3, 5).unwrap().skip(), 10);
    }

    #[test]
    fn defaults_and_cap_apply() {
        let pagination = Pagination::from_options(&OptionsPagination::default(), 5, 50).unwrap();
        assert_eq!(pagination, Pagination { page: 1, limit: 5 });

        let pagination = Pagination::from_options(
            &OptionsPagination {
                page: Some(2),
                limit: Some(500),
            },
            5,
            50,
        )
        .unwrap();
        assert_eq!(pagination, Pagination { page: 2, limit: 50 });
    }

    #[test]
    fn zero_page_is_rejected() {
        assert!(Pagination::new(0, 5).is_err());
        assert!(Pagination::new(1, 0).is_err());
    }

    #[test]
    fn unreachable_pages_are_rejected() {
        let err = Pagination::from_options(
            &OptionsPagination {
                page: Some(i64::MAX),
                limit: Some(5),
            },
            5,
            50,
        )
        .unwrap_err();
        assert!(matches!(
            err.error_type,
            lostfound_result::ErrorType::FailedValidation { .. }
        ));

        let last = i64::MAX / 50 + 1;
        assert_eq!(
            Pagination::new(last, 50).unwrap().skip(),
            (last - 1) * 50
        );
        assert!(Pagination::new(last + 1, 50).is_err());
    }

    #[test]
    fn slice_matches_skip_and_limit() {
        let items: Vec<i32> = (0..12).collect();
        assert_eq!(Pagination::new(3, 5).unwrap().slice(items), vec![10, 11]);
    }
}
