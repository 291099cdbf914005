//! Favorites page: the signed-in user's pinned items, grouped by type.

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::ListSource;
use super::filter::matches_exact;
use crate::api::{ApiClient, Result};
use crate::models::favorite::item_type_label;
use crate::models::{Favorite, Id, NewFavorite};
use crate::validation::require_field;

#[derive(Debug, Clone, Default)]
pub struct FavoritesFilter {
    pub item_type: Option<String>,
}

pub struct FavoritesSource;

#[async_trait]
impl ListSource for FavoritesSource {
    type Item = Favorite;
    type Filter = FavoritesFilter;

    fn name(&self) -> &'static str {
        "favorites"
    }

    async fn fetch(&self, client: &ApiClient, filter: &FavoritesFilter) -> Result<Vec<Favorite>> {
        client.require_session()?;
        let mut items: Vec<Favorite> = client.get_list("/favoris", &[]).await?;
        items.retain(|f| matches_exact(filter.item_type.as_deref(), Some(&f.item_type)));
        Ok(items)
    }

    fn render_item(&self, fav: &Favorite) -> String {
        let mut line = format!("  [{}] {}", fav.id, fav.title);
        if let Some(url) = &fav.url {
            line.push_str(&format!(" <{url}>"));
        }
        line
    }

    fn empty_message(&self) -> &'static str {
        "No favorites yet."
    }

    fn render(&self, items: &[Favorite]) -> String {
        let mut out = Vec::new();
        for (item_type, group) in group_by_type(items) {
            out.push(format!("{} ({})", item_type_label(item_type), group.len()));
            out.extend(group.into_iter().map(|fav| self.render_item(fav)));
        }
        out.join("\n")
    }
}

/// Group favorites by `item_type`. Groups are ordered by key; items keep
/// their response order within a group.
pub fn group_by_type(items: &[Favorite]) -> BTreeMap<&str, Vec<&Favorite>> {
    let mut groups: BTreeMap<&str, Vec<&Favorite>> = BTreeMap::new();
    for fav in items {
        groups.entry(fav.item_type.as_str()).or_default().push(fav);
    }
    groups
}

/// The favorite pinning `item_id` of `item_type`, if any.
pub fn find<'a>(items: &'a [Favorite], item_type: &str, item_id: &Id) -> Option<&'a Favorite> {
    items
        .iter()
        .find(|f| f.item_type == item_type && &f.item_id == item_id)
}

/// `POST /favoris`.
pub async fn add(client: &ApiClient, favorite: &NewFavorite) -> Result<()> {
    client.require_session()?;
    require_field("item type", &favorite.item_type)?;
    require_field("title", &favorite.title)?;
    let _: serde_json::Value = client.post("/favoris", favorite).await?;
    Ok(())
}

/// `DELETE /favoris/:id`.
pub async fn remove(client: &ApiClient, id: &Id) -> Result<()> {
    client.require_session()?;
    let _: serde_json::Value = client.delete(&format!("/favoris/{id}")).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fav(id: &str, item_type: &str, title: &str) -> Favorite {
        Favorite {
            id: Id::new(id),
            item_type: item_type.into(),
            item_id: Id::new(format!("item-{id}")),
            title: title.into(),
            description: None,
            url: None,
            metadata: serde_json::Value::Null,
            created_at: None,
        }
    }

    #[test]
    fn test_group_by_type() {
        let items = vec![
            fav("1", "product", "Autocall"),
            fav("2", "document", "Rapport"),
            fav("3", "product", "Phoenix"),
        ];
        let groups = group_by_type(&items);
        assert_eq!(groups.len(), 2);
        let products: Vec<_> = groups["product"].iter().map(|f| f.title.as_str()).collect();
        assert_eq!(products, ["Autocall", "Phoenix"]);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["document", "product"]);
    }

    #[test]
    fn test_render_grouped() {
        let items = vec![fav("1", "product", "Autocall"), fav("2", "archive", "Bilan")];
        let text = FavoritesSource.render(&items);
        assert_eq!(
            text,
            "Archives (1)\n  [2] Bilan\nProducts (1)\n  [1] Autocall"
        );
    }

    #[test]
    fn test_find() {
        let items = vec![fav("1", "product", "Autocall")];
        assert!(find(&items, "product", &Id::new("item-1")).is_some());
        assert!(find(&items, "document", &Id::new("item-1")).is_none());
    }
}
