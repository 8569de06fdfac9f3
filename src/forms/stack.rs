use crate::models::StackType;
use crate::services::{ServiceError, StackDraft, StackListing};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct CreateStack {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub name: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 5000)]
    pub description: String,
    #[serde(rename = "type")]
    pub stack_type: StackType,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub technology_ids: Vec<Uuid>,
    #[serde(default)]
    pub technology_names: Vec<String>,
}

impl CreateStack {
    /// Checks the technology references and hands back the draft.
    pub fn into_parts(self) -> Result<(StackDraft, Vec<Uuid>, Vec<String>), ServiceError> {
        if self.technology_ids.is_empty() && self.technology_names.is_empty() {
            return Err(ServiceError::ValidationFailed(
                "At least one technology id or name is required".to_string(),
            ));
        }
        check_ids(&self.technology_ids)?;

        let mut names = Vec::with_capacity(self.technology_names.len());
        for name in &self.technology_names {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::ValidationFailed(
                    "Technology names must not be blank".to_string(),
                ));
            }
            if name.chars().count() > 100 {
                return Err(ServiceError::ValidationFailed(format!(
                    "Technology name is too long: {name}"
                )));
            }
            names.push(name.to_string());
        }

        let draft = StackDraft {
            name: self.name,
            description: self.description,
            stack_type: self.stack_type,
            is_public: self.is_public,
        };
        Ok((draft, self.technology_ids, names))
    }
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct UpdateStack {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub name: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 5000)]
    pub description: String,
    #[serde(rename = "type")]
    pub stack_type: StackType,
    #[serde(default)]
    pub is_public: bool,
    #[validate(min_items = 1)]
    pub technology_ids: Vec<Uuid>,
}

impl UpdateStack {
    pub fn into_parts(self) -> Result<(StackDraft, Vec<Uuid>), ServiceError> {
        check_ids(&self.technology_ids)?;

        let draft = StackDraft {
            name: self.name,
            description: self.description,
            stack_type: self.stack_type,
            is_public: self.is_public,
        };
        Ok((draft, self.technology_ids))
    }
}

fn check_ids(ids: &[Uuid]) -> Result<(), ServiceError> {
    if ids.iter().any(Uuid::is_nil) {
        return Err(ServiceError::ValidationFailed(
            "Technology ids must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct ListStacks {
    #[serde(default = "default_page")]
    #[validate(minimum = 1)]
    #[validate(maximum = 1000000)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(minimum = 1)]
    #[validate(maximum = 100)]
    pub page_size: i64,
    #[serde(rename = "type")]
    pub stack_type: Option<StackType>,
    pub technology_id: Option<Uuid>,
    #[validate(min_length = 2)]
    pub search: Option<String>,
    #[serde(default)]
    pub only_public: bool,
}

impl From<ListStacks> for StackListing {
    fn from(form: ListStacks) -> Self {
        Self {
            page: form.page,
            page_size: form.page_size,
            stack_type: form.stack_type,
            technology_id: form.technology_id,
            search: form.search,
            only_public: form.only_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(ids: Vec<Uuid>, names: Vec<&str>) -> CreateStack {
        CreateStack {
            name: "Web".to_string(),
            description: "Frontend".to_string(),
            stack_type: StackType::Frontend,
            is_public: true,
            technology_ids: ids,
            technology_names: names.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_create_needs_a_technology() {
        assert!(matches!(
            create(vec![], vec![]).into_parts(),
            Err(ServiceError::ValidationFailed(_))
        ));
        assert!(create(vec![], vec!["Vuex"]).into_parts().is_ok());
    }

    #[test]
    fn test_create_rejects_nil_ids_and_blank_names() {
        assert!(create(vec![Uuid::nil()], vec![]).into_parts().is_err());
        assert!(create(vec![], vec!["  "]).into_parts().is_err());
    }

    #[test]
    fn test_create_trims_names() {
        let (_, _, names) = create(vec![], vec!["  Vuex "]).into_parts().unwrap();
        assert_eq!(names, vec!["Vuex"]);
    }

    #[test]
    fn test_update_requires_ids() {
        let form: UpdateStack = serde_json::from_value(serde_json::json!({
            "name": "Web",
            "description": "Frontend",
            "type": "frontend",
            "technology_ids": []
        }))
        .unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let parsed = serde_json::from_value::<CreateStack>(serde_json::json!({
            "name": "Web",
            "description": "Frontend",
            "type": "desktop",
            "technology_names": ["Qt"]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_list_defaults() {
        let form: ListStacks = serde_json::from_str("{}").unwrap();
        let listing = StackListing::from(form);
        assert_eq!((listing.page, listing.page_size), (1, 20));
        assert!(!listing.only_public);
    }

    #[test]
    fn test_list_page_is_bounded() {
        let form: ListStacks = serde_json::from_str(r#"{"page":1000000}"#).unwrap();
        assert!(form.validate().is_ok());

        let form: ListStacks = serde_json::from_str(r#"{"page":1000001}"#).unwrap();
        assert!(form.validate().is_err());
    }
}
