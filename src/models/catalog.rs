use serde::Deserialize;

/// Response of `GET /api/amcs`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AmcList {
    pub amcs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
    pub count: u64,
}

/// Response of `GET /api/categories`, already sorted by count on the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

/// An entry of a dropdown: the wire value and what the user sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// The leading "any" entry; its empty value means no filter.
    pub fn any(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }
}

impl AmcList {
    pub fn options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption::any("All AMCs"))
            .chain(self.amcs.iter().map(|amc| SelectOption {
                value: amc.clone(),
                label: amc.clone(),
            }))
            .collect()
    }
}

impl CategoryList {
    /// Dropdown entries in backend order, labelled with their fund counts.
    pub fn options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption::any("All Categories"))
            .chain(self.categories.iter().map(|c| SelectOption {
                value: c.name.clone(),
                label: format!("{} ({})", c.name, c.count),
            }))
            .collect()
    }
}

/// AMC and category dropdowns loaded together by the form screens.
#[derive(Clone, Debug, PartialEq)]
pub struct FormOptions {
    pub amcs: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
}

impl FormOptions {
    pub fn build(amcs: &AmcList, categories: &CategoryList) -> Self {
        Self {
            amcs: amcs.options(),
            categories: categories.options(),
        }
    }
}
