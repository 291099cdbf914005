//! Partner directory. The backend returns the whole directory; search and
//! category filtering happen locally.

use async_trait::async_trait;
use tracing::info;

use super::ListSource;
use super::filter::{matches_exact, matches_search};
use crate::api::{ApiClient, Result};
use crate::models::{Id, Partner, PartnerInput};
use crate::validation::{ValidationError, require_field};

#[derive(Debug, Clone, Default)]
pub struct PartnersFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl PartnersFilter {
    fn matches(&self, p: &Partner) -> bool {
        matches_exact(self.category.as_deref(), p.category.as_deref())
            && matches_search(
                self.search.as_deref().unwrap_or_default(),
                &[
                    Some(p.name.as_str()),
                    p.description.as_deref(),
                    p.category.as_deref(),
                    p.website.as_deref(),
                ],
            )
    }
}

pub struct PartnersSource;

#[async_trait]
impl ListSource for PartnersSource {
    type Item = Partner;
    type Filter = PartnersFilter;

    fn name(&self) -> &'static str {
        "partners"
    }

    async fn fetch(&self, client: &ApiClient, filter: &PartnersFilter) -> Result<Vec<Partner>> {
        let mut partners: Vec<Partner> = client.get_list("/partners", &[]).await?;
        partners.retain(|p| filter.matches(p));
        Ok(partners)
    }

    fn render_item(&self, p: &Partner) -> String {
        let mut line = format!("[{}] {}", p.id, p.name);
        if let Some(category) = &p.category {
            line.push_str(&format!(" ({category})"));
        }
        if let Some(website) = &p.website {
            line.push_str(&format!(" <{website}>"));
        }
        line
    }

    fn empty_message(&self) -> &'static str {
        "No partners match the current filters."
    }
}

/// `POST /partners`. The name is required.
pub async fn create(client: &ApiClient, input: &PartnerInput) -> Result<()> {
    require_field("name", input.name.as_deref().unwrap_or_default())?;
    client.require_admin()?;
    let _: serde_json::Value = client.post("/partners", input).await?;
    info!(name = ?input.name, "Created partner");
    Ok(())
}

/// `PUT /partners/:id` with only the fields being changed.
pub async fn update(client: &ApiClient, id: &Id, input: &PartnerInput) -> Result<()> {
    if input.is_empty() {
        return Err(ValidationError::NothingToUpdate.into());
    }
    if let Some(name) = &input.name {
        require_field("name", name)?;
    }
    client.require_admin()?;
    let _: serde_json::Value = client.put(&format!("/partners/{id}"), input).await?;
    info!(id = %id, "Updated partner");
    Ok(())
}

/// `DELETE /partners/:id`.
pub async fn delete(client: &ApiClient, id: &Id) -> Result<()> {
    client.require_admin()?;
    let _: serde_json::Value = client.delete(&format!("/partners/{id}")).await?;
    info!(id = %id, "Deleted partner");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(name: &str, category: &str) -> Partner {
        Partner {
            id: Id::new("1"),
            name: name.into(),
            category: Some(category.into()),
            description: Some("Assureur vie".into()),
            website: None,
            logo_url: None,
            email: None,
            phone: None,
        }
    }

    #[test]
    fn test_filter() {
        let p = partner("Generali", "Assurance");
        assert!(PartnersFilter::default().matches(&p));
        assert!(
            PartnersFilter {
                search: Some("vie".into()),
                category: Some("assurance".into()),
            }
            .matches(&p)
        );
        assert!(
            !PartnersFilter {
                search: Some("banque".into()),
                category: None,
            }
            .matches(&p)
        );
    }

    #[test]
    fn test_render_item() {
        assert_eq!(
            PartnersSource.render_item(&partner("AXA", "Assurance")),
            "[1] AXA (Assurance)"
        );
    }
}
