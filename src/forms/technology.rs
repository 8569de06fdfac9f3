use serde::{Deserialize, Serialize};
use serde_valid::Validate;

fn default_max_results() -> usize {
    10
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct CreateTechnology {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: String,
    #[validate(max_length = 500)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct SuggestTechnologies {
    #[validate(min_length = 2)]
    #[validate(max_length = 100)]
    pub name: String,
    #[serde(default = "default_max_results")]
    #[validate(minimum = 1)]
    #[validate(maximum = 50)]
    pub max_results: usize,
}

/// Query string of the technology listing.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct ListTechnologies {
    #[serde(default = "default_page")]
    #[validate(minimum = 1)]
    #[validate(maximum = 1000000)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(minimum = 1)]
    #[validate(maximum = 100)]
    pub page_size: i64,
    #[validate(min_length = 2)]
    pub search: Option<String>,
    pub only_pre_registered: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_defaults_and_bounds() {
        let form: SuggestTechnologies = serde_json::from_str(r#"{"name":"Re"}"#).unwrap();
        assert_eq!(form.max_results, 10);
        assert!(form.validate().is_ok());

        let form: SuggestTechnologies =
            serde_json::from_str(r#"{"name":"R","max_results":51}"#).unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_technology_name_length() {
        let form = CreateTechnology {
            name: "x".repeat(101),
            description: None,
        };
        assert!(form.validate().is_err());

        let form = CreateTechnology {
            name: "Vuex".to_string(),
            description: Some("d".repeat(501)),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_listing_defaults() {
        let form: ListTechnologies = serde_json::from_str("{}").unwrap();
        assert_eq!((form.page, form.page_size), (1, 20));
        assert!(form.validate().is_ok());

        let form: ListTechnologies = serde_json::from_str(r#"{"page":0,"search":"a"}"#).unwrap();
        assert!(form.validate().is_err());

        let form: ListTechnologies =
            serde_json::from_str(r#"{"page":9223372036854775807}"#).unwrap();
        assert!(form.validate().is_err());
    }
}
