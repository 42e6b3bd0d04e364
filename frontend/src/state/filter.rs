//! 资源列表的派生视图
//!
//! 纯函数：先按会话用户过滤，再按分类过滤（`All` 除外）。不增删任何条目。

use portal_shared::{CategoryId, Resource, User};

/// `<select>` 中代表“全部分类”的取值
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
    /// 无法解析为整数的取值，不匹配任何资源
    Unparsable(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            return Self::All;
        }
        match value.trim().parse::<CategoryId>() {
            Ok(id) => Self::Category(id),
            Err(_) => Self::Unparsable(value.to_string()),
        }
    }

    /// 对应的 `<select>` 取值
    pub fn as_value(&self) -> String {
        match self {
            Self::All => ALL_CATEGORIES.to_string(),
            Self::Category(id) => id.to_string(),
            Self::Unparsable(raw) => raw.clone(),
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => resource.category_id == *id,
            Self::Unparsable(_) => false,
        }
    }
}

pub fn visible_resources<'a>(
    resources: &'a [Resource],
    session: &User,
    filter: &CategoryFilter,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| r.user_id == session.id)
        .filter(|r| filter.matches(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_shared::Role;

    fn resource(id: i64, user_id: i64, category_id: i64) -> Resource {
        Resource {
            id,
            title: format!("recurso {}", id),
            user_id,
            category_id,
            file_url: format!("/uploads/{}.pdf", id),
            content_type: Some("application/pdf".into()),
            created_at: None,
        }
    }

    fn session(id: i64) -> User {
        User {
            id,
            username: "u".into(),
            email: String::new(),
            role: Role::Client,
        }
    }

    fn ids(list: Vec<&Resource>) -> Vec<i64> {
        list.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("12"), CategoryFilter::Category(12));
        assert_eq!(
            CategoryFilter::parse("abc"),
            CategoryFilter::Unparsable("abc".into())
        );
        assert_eq!(CategoryFilter::parse("12").as_value(), "12");
        assert_eq!(CategoryFilter::All.as_value(), "all");
    }

    #[test]
    fn test_only_own_resources() {
        let all = vec![resource(1, 1, 10), resource(2, 2, 10), resource(3, 1, 20)];
        let visible = visible_resources(&all, &session(1), &CategoryFilter::All);
        assert_eq!(ids(visible), vec![1, 3]);
    }

    #[test]
    fn test_category_filter() {
        let all = vec![resource(1, 1, 10), resource(2, 2, 10), resource(3, 1, 20)];
        let visible = visible_resources(&all, &session(1), &CategoryFilter::Category(10));
        assert_eq!(ids(visible), vec![1]);

        let visible = visible_resources(&all, &session(2), &CategoryFilter::Category(20));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_unparsable_filter_matches_nothing() {
        let all = vec![resource(1, 1, 10)];
        let visible = visible_resources(&all, &session(1), &CategoryFilter::parse("x"));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_projection_is_subset_for_every_filter() {
        let all: Vec<Resource> = (0..30).map(|i| resource(i, i % 3, i % 4)).collect();
        let filters = [
            CategoryFilter::All,
            CategoryFilter::Category(0),
            CategoryFilter::Category(3),
            CategoryFilter::Category(99),
        ];

        for user in 0..3 {
            for filter in &filters {
                let visible = visible_resources(&all, &session(user), filter);
                let expected: Vec<i64> = all
                    .iter()
                    .filter(|r| r.user_id == user)
                    .filter(|r| match filter {
                        CategoryFilter::Category(c) => r.category_id == *c,
                        _ => true,
                    })
                    .map(|r| r.id)
                    .collect();
                assert_eq!(ids(visible), expected);
            }
        }
    }
}
