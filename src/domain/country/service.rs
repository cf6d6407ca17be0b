use std::collections::BTreeSet;

use sea_orm::{EntityTrait, QueryOrder};

use super::dto::{CountryQuery, CountryResponse};
use crate::domain::user::entity::country;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct CountryService;

impl CountryService {
    /// 국가 이름 검색
    ///
    /// 필터가 없으면 전체, 있으면 이름에 해당 문자열이 들어간 국가를
    /// 이름 순으로 중복 없이 돌려줍니다.
    pub async fn search(
        state: &AppState,
        query: CountryQuery,
    ) -> Result<Vec<CountryResponse>, AppError> {
        let countries = country::Entity::find()
            .order_by_asc(country::Column::Name)
            .all(&state.db)
            .await?;

        let names = countries.into_iter().map(|c| c.name);
        Ok(filter_names(names, query.name.as_deref())
            .into_iter()
            .map(|name| CountryResponse { name })
            .collect())
    }
}

/// 대소문자를 무시하고 부분 일치하는 이름만 남깁니다.
fn filter_names(names: impl Iterator<Item = String>, needle: Option<&str>) -> Vec<String> {
    let needle = needle
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_lowercase);

    let matched: BTreeSet<String> = names
        .filter(|name| match &needle {
            Some(n) => name.to_lowercase().contains(n),
            None => true,
        })
        .collect();
    matched.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn should_match_substring_case_insensitively() {
        // Arrange
        let all = names(&["Korea", "North Korea", "Japan", "korea"]);

        // Act
        let result = filter_names(all, Some("KOR"));

        // Assert
        assert_eq!(result, vec!["Korea", "North Korea", "korea"]);
    }

    #[test]
    fn should_return_distinct_sorted_names_without_filter() {
        let all = names(&["Japan", "Korea", "Japan"]);

        let result = filter_names(all, None);

        assert_eq!(result, vec!["Japan", "Korea"]);
    }

    #[test]
    fn should_treat_blank_filter_as_no_filter() {
        let result = filter_names(names(&["Chile"]), Some("  "));

        assert_eq!(result, vec!["Chile"]);
    }
}
