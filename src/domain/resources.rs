//! Static reference documents exposed as Model Context Protocol resources
//!
//! Markdown bodies are embedded at compile time from the crate's `resources/`
//! directory and served verbatim.

use rust_mcp_sdk::schema::{ReadResourceContent, ReadResourceResult, Resource, TextResourceContents};
use serde_json::{Map, Value};

use crate::domain::utils::string_param;
use crate::errors::AppError;

pub const PYTHON_GUIDELINES_URI: &str = "coding-guidelines://python";
pub const DESIGN_PATTERNS_URI: &str = "patterns://design-patterns";
pub const SECURITY_PRACTICES_URI: &str = "security://best-practices";
pub const PERFORMANCE_GUIDE_URI: &str = "performance://optimization-guide";

const MARKDOWN_MIME_TYPE: &str = "text/markdown";

#[derive(Debug)]
pub struct StaticResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

pub static RESOURCES: [StaticResource; 4] = [
    StaticResource {
        uri: PYTHON_GUIDELINES_URI,
        name: "Python Coding Guidelines",
        description: "Comprehensive Python coding best practices and guidelines",
        body: include_str!("../../resources/python-guidelines.md"),
    },
    StaticResource {
        uri: DESIGN_PATTERNS_URI,
        name: "Design Patterns Reference",
        description: "Common software design patterns with examples",
        body: include_str!("../../resources/design-patterns.md"),
    },
    StaticResource {
        uri: SECURITY_PRACTICES_URI,
        name: "Security Best Practices",
        description: "Security guidelines for safe coding practices",
        body: include_str!("../../resources/security-best-practices.md"),
    },
    StaticResource {
        uri: PERFORMANCE_GUIDE_URI,
        name: "Performance Optimization Guide",
        description: "Techniques and strategies for code optimization",
        body: include_str!("../../resources/performance-optimization.md"),
    },
];

pub fn find_resource(uri: &str) -> Option<&'static StaticResource> {
    RESOURCES.iter().find(|resource| resource.uri == uri)
}

pub fn build_resources_list() -> Vec<Resource> {
    RESOURCES
        .iter()
        .map(|resource| Resource {
            annotations: None,
            description: Some(resource.description.to_string()),
            icons: vec![],
            meta: None,
            mime_type: Some(MARKDOWN_MIME_TYPE.to_string()),
            name: resource.name.to_string(),
            size: None,
            title: None,
            uri: resource.uri.to_string(),
        })
        .collect()
}

pub fn handle_resources_read(params: &Map<String, Value>) -> Result<Value, AppError> {
    let uri = string_param(params, "uri");
    let resource = find_resource(uri).ok_or_else(|| AppError::UnknownResource(uri.to_string()))?;

    let result = ReadResourceResult {
        contents: vec![ReadResourceContent::from(TextResourceContents {
            meta: None,
            mime_type: Some(MARKDOWN_MIME_TYPE.to_string()),
            text: resource.body.to_string(),
            uri: resource.uri.to_string(),
        })],
        meta: None,
    };

    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn read(uri: &str) -> Result<Value, AppError> {
        let params = json!({ "uri": uri });
        handle_resources_read(params.as_object().expect("object params"))
    }

    #[test]
    fn python_guidelines_mention_pep8() {
        let result = read(PYTHON_GUIDELINES_URI).expect("known resource");
        let text = result["contents"][0]["text"].as_str().expect("text content");

        assert!(text.contains("Python Coding Guidelines"));
        assert!(text.contains("PEP 8"));
        assert_eq!(result["contents"][0]["uri"], PYTHON_GUIDELINES_URI);
        assert_eq!(result["contents"][0]["mimeType"], "text/markdown");
    }

    #[test]
    fn design_patterns_cover_singleton() {
        let result = read(DESIGN_PATTERNS_URI).expect("known resource");
        let text = result["contents"][0]["text"].as_str().expect("text content");

        assert!(text.contains("Design Patterns"));
        assert!(text.contains("Singleton"));
    }

    #[test]
    fn unknown_uri_fails() {
        let error = read("resource://unknown/item").expect_err("expected unknown resource");
        assert_eq!(error.to_string(), "Unknown resource: resource://unknown/item");
    }

    #[test]
    fn every_listed_resource_is_readable() {
        for resource in build_resources_list() {
            let result = read(&resource.uri).expect("listed resource is readable");
            let text = result["contents"][0]["text"].as_str().expect("text content");
            assert!(text.starts_with(&format!("# {}", resource.name)));
        }
    }

    #[test]
    fn bodies_have_no_trailing_newline() {
        for resource in &RESOURCES {
            assert!(!resource.body.ends_with('\n'), "{} ends with a newline", resource.uri);
        }
    }
}
