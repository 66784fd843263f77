use async_trait::async_trait;

use crate::models::district::District;
use crate::store::{DistrictStore, StoreError};

/// Fixed, in-process district set. Order of insertion is the order returned.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDistrictStore {
    districts: Vec<District>,
    fail_with: Option<String>,
}

impl InMemoryDistrictStore {
    pub fn new(districts: Vec<District>) -> Self {
        Self {
            districts,
            fail_with: None,
        }
    }

    /// A store whose every read fails, for exercising the unavailable path.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            districts: Vec::new(),
            fail_with: Some(reason.into()),
        }
    }
}

#[async_trait]
impl DistrictStore for InMemoryDistrictStore {
    async fn find_districts_by_state(
        &self,
        state: Option<&str>,
    ) -> Result<Vec<District>, StoreError> {
        if let Some(reason) = &self.fail_with {
            return Err(StoreError::Unavailable(reason.clone()));
        }

        let state = state.map(str::trim).filter(|s| !s.is_empty());
        Ok(self
            .districts
            .iter()
            .filter(|d| state.map_or(true, |s| d.state.eq_ignore_ascii_case(s)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryDistrictStore {
        InMemoryDistrictStore::new(vec![
            District::new("Anniston City Board of Education", "AL"),
            District::new("Mesa Unified District", "AZ"),
            District::new("Auburn City Schools", "AL"),
        ])
    }

    #[tokio::test]
    async fn test_no_state_returns_everything_in_order() {
        let all = store().find_districts_by_state(None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Anniston City Board of Education",
                "Mesa Unified District",
                "Auburn City Schools"
            ]
        );
    }

    #[tokio::test]
    async fn test_state_filter_is_case_insensitive() {
        let al = store().find_districts_by_state(Some("al")).await.unwrap();
        assert_eq!(al.len(), 2);
        assert!(al.iter().all(|d| d.state == "AL"));
    }

    #[tokio::test]
    async fn test_blank_state_means_no_filter() {
        let all = store().find_districts_by_state(Some("  ")).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_failing_store_reports_unavailable() {
        let err = InMemoryDistrictStore::failing("down")
            .find_districts_by_state(None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
