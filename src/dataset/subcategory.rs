//! Subcategory display labels
//!
//! The source dataset repeats the parent category in most subcategory
//! names ("Breakfast Burritos"); the visualization shows the short form.

const RELABELS: &[(&str, &str)] = &[
    ("Breakfast Burritos", "Burritos"),
    ("Southern Breakfast And Brunch", "Southern"),
    ("Breakfast Bowls", "Bowls"),
    ("Breakfast Casseroles", "Casseroles"),
    ("Breakfast Potatoes", "Potatoes"),
    ("Breakfast Cookies", "Cookies"),
    ("Breakfast Quiche", "Quiche"),
    ("Breakfast Bread", "Bread"),
    ("Breakfast Meat And Seafood", "Meat And Seafood"),
    ("Breakfast Sausage", "Sausage"),
    ("Healthy Breakfast And Brunch", "Healthy"),
    ("Breakfast Bacon", "Bacon"),
    ("Breakfast Eggs", "Eggs"),
];

/// Short display label for a subcategory; unknown labels pass through trimmed
pub fn relabel(subcategory: &str) -> String {
    let trimmed = subcategory.trim();
    RELABELS
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
