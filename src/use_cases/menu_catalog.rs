use std::sync::Arc;

use crate::domain::{BearerToken, MenuApi, MenuItem, ServiceResponse};

// How many popular dishes the home page features.
pub const FEATURED_LIMIT: usize = 6;

// Filter parsed from `/menu?search=&category=`; blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl MenuFilter {
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        let clean = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            search: clean(search),
            category: clean(category),
        }
    }
}

/// Which menu listing a `/menu` request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuSelection<'a> {
    Search(String),
    Category(String),
    /// Every item including unavailable ones; needs the administrator's token.
    All(&'a BearerToken),
    Available,
}

// Search beats category; without either, admins see every item.
pub fn select<'a>(filter: &MenuFilter, admin: Option<&'a BearerToken>) -> MenuSelection<'a> {
    match (&filter.search, &filter.category, admin) {
        (Some(term), _, _) => MenuSelection::Search(term.clone()),
        (None, Some(category), _) => MenuSelection::Category(category.clone()),
        (None, None, Some(token)) => MenuSelection::All(token),
        (None, None, None) => MenuSelection::Available,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuPage {
    pub items: ServiceResponse<Vec<MenuItem>>,
    pub categories: Vec<String>,
    pub filter: MenuFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedDishes {
    pub dishes: Vec<MenuItem>,
    pub warning: Option<String>,
}

pub struct MenuCatalogUseCase {
    pub menu: Arc<dyn MenuApi>,
}

impl MenuCatalogUseCase {
    pub async fn browse(&self, filter: MenuFilter, admin: Option<&BearerToken>) -> MenuPage {
        let items = async {
            match select(&filter, admin) {
                MenuSelection::Search(term) => self.menu.search(&term).await,
                MenuSelection::Category(category) => self.menu.by_category(&category).await,
                MenuSelection::All(token) => self.menu.list_all(token).await,
                MenuSelection::Available => self.menu.list_available().await,
            }
        };
        // The category list only feeds the filter drop-down.
        let (items, categories) = tokio::join!(items, self.menu.categories());

        if !categories.succeeded {
            tracing::warn!(message = %categories.message, "menu categories unavailable");
        }

        MenuPage {
            items,
            categories: categories.data_or_default(),
            filter,
        }
    }

    pub async fn featured(&self) -> FeaturedDishes {
        let response = self.menu.popular().await;
        if response.succeeded {
            let mut dishes = response.data_or_default();
            dishes.truncate(FEATURED_LIMIT);
            FeaturedDishes {
                dishes,
                warning: None,
            }
        } else {
            FeaturedDishes {
                dishes: Vec::new(),
                warning: Some(format!(
                    "Popular dishes could not be loaded: {}",
                    response.message
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedApi, menu_item, token};
    use rust_decimal::Decimal;

    fn catalog(api: &ScriptedApi) -> MenuCatalogUseCase {
        MenuCatalogUseCase {
            menu: Arc::new(api.clone()),
        }
    }

    #[test]
    fn when_filter_values_are_blank_then_they_are_ignored() {
        let filter = MenuFilter::new(Some("  "), Some(""));

        assert_eq!(filter, MenuFilter::default());
    }

    #[test]
    fn when_search_and_category_are_both_given_then_search_wins() {
        let filter = MenuFilter::new(Some("soup"), Some("Starter"));

        assert_eq!(select(&filter, None), MenuSelection::Search("soup".into()));
    }

    #[test]
    fn when_no_filter_then_admin_sees_all_and_guest_sees_available() {
        let filter = MenuFilter::default();
        let admin = token();

        assert_eq!(select(&filter, Some(&admin)), MenuSelection::All(&admin));
        assert_eq!(select(&filter, None), MenuSelection::Available);
    }

    #[tokio::test]
    async fn when_browsing_with_search_then_search_endpoint_and_categories_are_called() {
        let api = ScriptedApi::new().with_categories(&["Main", "Dessert"]);

        let page = catalog(&api)
            .browse(MenuFilter::new(Some("soup"), Some("Main")), None)
            .await;

        let calls = api.calls();
        assert!(calls.contains(&"menu.search(soup)".to_string()));
        assert!(calls.contains(&"menu.categories".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("menu.by_category")));
        assert_eq!(page.categories, vec!["Main", "Dessert"]);
    }

    #[tokio::test]
    async fn when_admin_browses_without_filter_then_unavailable_items_are_included() {
        let api = ScriptedApi::new();
        let admin = token();

        catalog(&api).browse(MenuFilter::default(), Some(&admin)).await;

        assert!(api.calls().contains(&"menu.list_all".to_string()));
    }

    #[tokio::test]
    async fn when_guest_browses_category_then_category_endpoint_is_used() {
        let api = ScriptedApi::new();

        catalog(&api)
            .browse(MenuFilter::new(None, Some("Dessert")), None)
            .await;

        assert!(api.calls().contains(&"menu.by_category(Dessert)".to_string()));
    }

    #[tokio::test]
    async fn when_more_popular_dishes_exist_than_featured_slots_then_list_is_cut() {
        let items = (1..=9)
            .map(|id| menu_item(id, "Main", Decimal::ONE, true, true))
            .collect();
        let api = ScriptedApi::new().with_menu(ServiceResponse::success(items, "ok"));

        let featured = catalog(&api).featured().await;

        assert_eq!(featured.dishes.len(), FEATURED_LIMIT);
        assert_eq!(featured.warning, None);
    }

    #[tokio::test]
    async fn when_popular_fetch_fails_then_warning_is_returned() {
        let api = ScriptedApi::new().with_menu(ServiceResponse::failure("Network error: refused"));

        let featured = catalog(&api).featured().await;

        assert!(featured.dishes.is_empty());
        assert_eq!(
            featured.warning.as_deref(),
            Some("Popular dishes could not be loaded: Network error: refused")
        );
    }
}
