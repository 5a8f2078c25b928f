use crate::models::Category;

/// Search and category selection for menu reads.
///
/// An empty search term and an empty category set each mean "no restriction";
/// when both are set a row must satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    search: String,
    categories: Vec<String>,
}

impl MenuFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match names containing `term`, ignoring case (Unicode lowercase folding).
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn category(mut self, category: impl AsRef<str>) -> Self {
        self.add_category(category.as_ref());
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for category in categories {
            self.add_category(category.as_ref());
        }
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Select the category if unselected, otherwise deselect it.
    pub fn toggle_category(&mut self, category: impl AsRef<str>) {
        let key = Category::normalize(category.as_ref());
        if let Some(pos) = self.categories.iter().position(|c| *c == key) {
            self.categories.remove(pos);
        } else {
            self.categories.push(key);
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Selected categories in canonical casing.
    pub fn selected_categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_selected(&self, category: Category) -> bool {
        self.categories.iter().any(|c| c == category.key())
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.categories.is_empty()
    }

    fn add_category(&mut self, category: &str) {
        let key = Category::normalize(category);
        if !self.categories.contains(&key) {
            self.categories.push(key);
        }
    }

    /// SQL predicate over `menu_items` with `?` placeholders, and the values to bind
    /// in order. Empty when the filter places no restriction.
    pub(crate) fn where_clause(&self) -> (String, Vec<String>) {
        let mut predicates = Vec::new();
        let mut values = Vec::new();

        if !self.search.is_empty() {
            predicates.push("name_folded LIKE ? ESCAPE '\\'".to_string());
            values.push(format!("%{}%", escape_like(&self.search.to_lowercase())));
        }

        if !self.categories.is_empty() {
            let placeholders = vec!["?"; self.categories.len()].join(", ");
            predicates.push(format!("category IN ({})", placeholders));
            values.extend(self.categories.iter().cloned());
        }

        (predicates.join(" AND "), values)
    }
}

/// Escape LIKE wildcards so user text matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_clause() {
        let (clause, values) = MenuFilter::new().where_clause();
        assert!(clause.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn test_search_only() {
        let (clause, values) = MenuFilter::new().search("BÜRGER").where_clause();
        assert_eq!(clause, "name_folded LIKE ? ESCAPE '\\'");
        assert_eq!(values, vec!["%bürger%"]);
    }

    #[test]
    fn test_categories_only_are_normalized() {
        let (clause, values) = MenuFilter::new()
            .categories(["Desserts", "DRINKS", "desserts"])
            .where_clause();
        assert_eq!(clause, "category IN (?, ?)");
        assert_eq!(values, vec!["desserts", "drinks"]);
    }

    #[test]
    fn test_search_and_categories() {
        let (clause, values) = MenuFilter::new()
            .search("cake")
            .categories(["desserts", "drinks"])
            .where_clause();
        assert_eq!(clause, "name_folded LIKE ? ESCAPE '\\' AND category IN (?, ?)");
        assert_eq!(values, vec!["%cake%", "desserts", "drinks"]);
    }

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_toggle_category() {
        let mut filter = MenuFilter::new();
        filter.toggle_category("Mains");
        assert!(filter.is_selected(Category::Mains));
        filter.toggle_category("mains");
        assert!(!filter.is_selected(Category::Mains));
        assert!(filter.is_empty());
    }
}
