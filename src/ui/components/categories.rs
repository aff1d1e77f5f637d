// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Product category checkbox group.

use eframe::egui;

/// Category identifiers and labels offered to sellers, in display order.
pub const CATEGORIES: [(&str, &str); 8] = [
    ("laptops", "Laptops & Computers"),
    ("smartphones", "Smartphones"),
    ("tablets", "Tablets"),
    ("accessories", "Accessories"),
    ("components", "PC Components"),
    ("gaming", "Gaming"),
    ("audio", "Audio"),
    ("wearables", "Wearables"),
];

/// Selected category ids, kept in display order.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct CategoriesModel {
    selected: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoriesMsg {
    Toggle { id: String, checked: bool },
}

impl CategoriesModel {
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Apply a toggle. Unknown ids are ignored.
pub fn update(model: &mut CategoriesModel, msg: CategoriesMsg) {
    match msg {
        CategoriesMsg::Toggle { id, checked } => {
            if !CATEGORIES.iter().any(|(known, _)| *known == id) {
                return;
            }
            if checked {
                if !model.is_selected(&id) {
                    model.selected.push(id);
                }
            } else {
                model.selected.retain(|s| *s != id);
            }
            model.selected.sort_by_key(|s| {
                CATEGORIES
                    .iter()
                    .position(|(known, _)| known == s)
                    .unwrap_or(usize::MAX)
            });
        }
    }
}

/// Render the checkbox grid and return toggles.
pub fn view(ui: &mut egui::Ui, model: &CategoriesModel) -> Vec<CategoriesMsg> {
    let mut msgs = Vec::new();
    let cols = ((ui.available_width() / 180.0).floor() as usize).max(1);

    egui::Grid::new("categories_grid")
        .num_columns(cols)
        .spacing(egui::vec2(12.0, 6.0))
        .show(ui, |ui| {
            for (i, (id, label)) in CATEGORIES.iter().enumerate() {
                let mut checked = model.is_selected(id);
                if ui.checkbox(&mut checked, *label).changed() {
                    msgs.push(CategoriesMsg::Toggle {
                        id: (*id).to_string(),
                        checked,
                    });
                }
                if (i + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(model: &mut CategoriesModel, id: &str, checked: bool) {
        update(
            model,
            CategoriesMsg::Toggle {
                id: id.into(),
                checked,
            },
        );
    }

    #[test]
    fn selection_follows_display_order_without_duplicates() {
        let mut model = CategoriesModel::default();
        toggle(&mut model, "audio", true);
        toggle(&mut model, "laptops", true);
        toggle(&mut model, "audio", true);

        assert_eq!(model.selected(), ["laptops", "audio"]);
    }

    #[test]
    fn unchecking_removes_and_unknown_ids_are_ignored() {
        let mut model = CategoriesModel::default();
        toggle(&mut model, "gaming", true);
        toggle(&mut model, "toasters", true);
        toggle(&mut model, "gaming", false);

        assert!(model.is_empty());
    }
}
