//! Structural clean-up of nested, loosely-typed payload fields.
//!
//! Clients send blog sections and restaurant menus as free-form JSON. Elements
//! with the wrong shape are dropped rather than rejected, and stray entries
//! inside otherwise valid elements are filtered out.

use serde_json::Value;

use crate::model::blog_post::BlogSection;
use crate::model::restaurant::{Menu, MenuItem, MenuPrice};

/// Keeps sections that have a string `title` and an array `descriptions`;
/// non-string descriptions are removed. Anything but an array yields `[]`.
pub fn sanitize_sections(value: &Value) -> Vec<BlogSection> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?;
            let descriptions = item.get("descriptions")?.as_array()?;
            Some(BlogSection {
                title: title.to_string(),
                descriptions: descriptions
                    .iter()
                    .filter_map(|d| d.as_str().map(str::to_string))
                    .collect(),
            })
        })
        .collect()
}

/// Keeps categories whose value is an array, and within them the items that
/// have a string `name`. Optional item fields survive only with the right type.
pub fn sanitize_menu(value: &Value) -> Menu {
    let Some(categories) = value.as_object() else {
        return Menu::new();
    };
    categories
        .iter()
        .filter_map(|(category, items)| {
            let items = items.as_array()?;
            Some((category.clone(), items.iter().filter_map(sanitize_menu_item).collect()))
        })
        .collect()
}

fn sanitize_menu_item(item: &Value) -> Option<MenuItem> {
    let name = item.get("name")?.as_str()?;
    let price = match item.get("price") {
        Some(Value::Number(n)) => n.as_f64().map(MenuPrice::Amount),
        Some(Value::String(s)) => Some(MenuPrice::Label(s.clone())),
        _ => None,
    };
    Some(MenuItem {
        name: name.to_string(),
        description: item.get("description").and_then(Value::as_str).map(str::to_string),
        price,
        is_veg: item.get("isVeg").and_then(Value::as_bool),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_string_descriptions_are_filtered() {
        let sections = sanitize_sections(&json!([{ "title": "A", "descriptions": ["x", 5, "y"] }]));
        assert_eq!(sections, vec![BlogSection { title: "A".into(), descriptions: vec!["x".into(), "y".into()] }]);
    }

    #[test]
    fn test_malformed_sections_are_dropped() {
        let sections = sanitize_sections(&json!([
            { "title": 3, "descriptions": [] },
            { "title": "No descriptions" },
            { "title": "B", "descriptions": "not an array" },
            "junk",
            { "title": "C", "descriptions": [] }
        ]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "C");
    }

    #[test]
    fn test_non_array_sections_become_empty() {
        assert!(sanitize_sections(&json!({ "title": "A" })).is_empty());
        assert!(sanitize_sections(&Value::Null).is_empty());
    }

    #[test]
    fn test_menu_keeps_valid_items() {
        let menu = sanitize_menu(&json!({
            "Starters": [
                { "name": "Paneer Tikka", "price": 320, "isVeg": true },
                { "name": "Soup of the day", "price": "MRP", "isVeg": "yes" },
                { "price": 100 }
            ],
            "Drinks": "none"
        }));
        assert_eq!(menu.len(), 1);
        let starters = &menu["Starters"];
        assert_eq!(starters.len(), 2);
        assert_eq!(starters[0].price, Some(MenuPrice::Amount(320.0)));
        assert_eq!(starters[0].is_veg, Some(true));
        assert_eq!(starters[1].price, Some(MenuPrice::Label("MRP".into())));
        assert_eq!(starters[1].is_veg, None);
    }

    #[test]
    fn test_non_object_menu_is_empty() {
        assert!(sanitize_menu(&json!([1, 2])).is_empty());
    }
}
