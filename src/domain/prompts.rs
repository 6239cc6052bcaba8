//! Prompt templates exposed via `prompts/list` and `prompts/get`

use std::collections::HashMap;

use rust_mcp_sdk::schema::{
    ContentBlock, GetPromptResult, Prompt, PromptArgument, PromptMessage, Role, TextContent,
};
use serde_json::{Map, Value};

use crate::domain::utils::{argument_text, arguments_param, fill_template, string_param};
use crate::errors::AppError;

/// One declared prompt argument and the text used when it is not supplied.
#[derive(Debug)]
pub struct TemplateArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub fallback: &'static str,
}

#[derive(Debug)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [TemplateArgument],
    pub template: &'static str,
}

const ANALYZE_CODE_TEMPLATE: &str = "Analyze the following {language} code for:
1. Code quality and best practices
2. Potential bugs or issues
3. Security vulnerabilities
4. Performance considerations
5. Maintainability and readability

Code to analyze:
```{language}
{code}
```

Provide a detailed analysis with specific recommendations for improvement.";

const GENERATE_DOCUMENTATION_TEMPLATE: &str = "Generate comprehensive documentation for the following code using {style} style:

Code:
```
{code}
```

Include:
1. Function/class descriptions
2. Parameter documentation
3. Return value documentation
4. Usage examples
5. Exception handling information

Use {style} documentation format.";

const CODE_REVIEW_TEMPLATE: &str = "Perform a comprehensive code review with focus on {focus}:

Code to review:
```
{code}
```

Review criteria:
1. Code structure and organization
2. Error handling and edge cases
3. Performance implications
4. Security considerations
5. Adherence to best practices
6. Testing considerations

Focus area: {focus}

Provide constructive feedback with specific suggestions for improvement.";

const EXPLAIN_CONCEPT_TEMPLATE: &str = "Explain the programming concept \"{concept}\" at a {level} level.

Include:
1. Clear definition and explanation
2. Why it's important/useful
3. Common use cases and examples
4. Best practices
5. Common pitfalls to avoid
6. Related concepts

Tailor the explanation to a {level} audience.";

pub static PROMPTS: [PromptTemplate; 4] = [
    PromptTemplate {
        name: "analyze_code",
        description: "Analyze code for quality, security, and best practices",
        arguments: &[
            TemplateArgument {
                name: "code",
                description: "The code to analyze",
                required: true,
                fallback: "",
            },
            TemplateArgument {
                name: "language",
                description: "Programming language of the code",
                required: false,
                fallback: "unknown",
            },
        ],
        template: ANALYZE_CODE_TEMPLATE,
    },
    PromptTemplate {
        name: "generate_documentation",
        description: "Generate comprehensive documentation for code",
        arguments: &[
            TemplateArgument {
                name: "code",
                description: "The code to document",
                required: true,
                fallback: "",
            },
            TemplateArgument {
                name: "style",
                description: "Documentation style (e.g., 'sphinx', 'google', 'numpy')",
                required: false,
                fallback: "google",
            },
        ],
        template: GENERATE_DOCUMENTATION_TEMPLATE,
    },
    PromptTemplate {
        name: "code_review",
        description: "Perform a comprehensive code review",
        arguments: &[
            TemplateArgument {
                name: "code",
                description: "The code to review",
                required: true,
                fallback: "",
            },
            TemplateArgument {
                name: "focus",
                description: "Review focus (e.g., 'security', 'performance', 'maintainability')",
                required: false,
                fallback: "general",
            },
        ],
        template: CODE_REVIEW_TEMPLATE,
    },
    PromptTemplate {
        name: "explain_concept",
        description: "Explain programming concepts or technologies",
        arguments: &[
            TemplateArgument {
                name: "concept",
                description: "The concept to explain",
                required: true,
                fallback: "",
            },
            TemplateArgument {
                name: "level",
                description: "Explanation level (e.g., 'beginner', 'intermediate', 'advanced')",
                required: false,
                fallback: "intermediate",
            },
        ],
        template: EXPLAIN_CONCEPT_TEMPLATE,
    },
];

pub fn find_prompt(name: &str) -> Option<&'static PromptTemplate> {
    PROMPTS.iter().find(|prompt| prompt.name == name)
}

pub fn build_prompts_list() -> Vec<Prompt> {
    PROMPTS
        .iter()
        .map(|prompt| Prompt {
            arguments: prompt
                .arguments
                .iter()
                .map(|argument| PromptArgument {
                    description: Some(argument.description.to_string()),
                    name: argument.name.to_string(),
                    required: Some(argument.required),
                    title: None,
                })
                .collect(),
            description: Some(prompt.description.to_string()),
            icons: vec![],
            meta: None,
            name: prompt.name.to_string(),
            title: None,
        })
        .collect()
}

pub fn render_prompt(prompt: &PromptTemplate, arguments: &Map<String, Value>) -> String {
    let values: HashMap<&str, String> = prompt
        .arguments
        .iter()
        .map(|argument| {
            (
                argument.name,
                argument_text(arguments, argument.name, argument.fallback),
            )
        })
        .collect();

    fill_template(prompt.template, &values)
}

pub fn handle_prompts_get(params: &Map<String, Value>) -> Result<Value, AppError> {
    let name = string_param(params, "name");
    let prompt = find_prompt(name).ok_or_else(|| AppError::UnknownPrompt(name.to_string()))?;
    let arguments = arguments_param(params)?;

    let result = GetPromptResult {
        description: Some(format!("Generated prompt for {}", prompt.name)),
        messages: vec![PromptMessage {
            content: ContentBlock::from(TextContent::new(
                render_prompt(prompt, &arguments),
                None,
                None,
            )),
            role: Role::User,
        }],
        meta: None,
    };

    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object params")
    }

    fn prompt_text(result: &Value) -> &str {
        result["messages"][0]["content"]["text"]
            .as_str()
            .expect("prompt text")
    }

    #[test]
    fn explain_concept_defaults_level() {
        let result = handle_prompts_get(&params(json!({
            "name": "explain_concept",
            "arguments": { "concept": "recursion" }
        })))
        .expect("prompt should render");

        let text = prompt_text(&result);
        assert!(text.contains("\"recursion\""));
        assert!(text.contains("at a intermediate level"));
        assert!(text.contains("Tailor the explanation to a intermediate audience."));
        assert_eq!(result["description"], "Generated prompt for explain_concept");
        assert_eq!(result["messages"][0]["role"], "user");
        assert_eq!(result["messages"][0]["content"]["type"], "text");
    }

    #[test]
    fn analyze_code_defaults_language_to_unknown() {
        let result = handle_prompts_get(&params(json!({
            "name": "analyze_code",
            "arguments": { "code": "print('hi')" }
        })))
        .expect("prompt should render");

        let text = prompt_text(&result);
        assert!(text.starts_with("Analyze the following unknown code for:"));
        assert!(text.contains("```unknown\nprint('hi')\n```"));
    }

    #[test]
    fn supplied_arguments_override_fallbacks() {
        let result = handle_prompts_get(&params(json!({
            "name": "code_review",
            "arguments": { "code": "fn main() {}", "focus": "security" }
        })))
        .expect("prompt should render");

        let text = prompt_text(&result);
        assert!(text.contains("with focus on security:"));
        assert!(text.contains("Focus area: security"));
        assert!(!text.contains("general"));
    }

    #[test]
    fn missing_arguments_mapping_uses_all_fallbacks() {
        let result = handle_prompts_get(&params(json!({ "name": "generate_documentation" })))
            .expect("prompt should render");

        let text = prompt_text(&result);
        assert!(text.contains("using google style"));
        assert!(text.contains("Use google documentation format."));
        assert!(!text.contains('{'));
    }

    #[test]
    fn unknown_prompt_fails() {
        let error = handle_prompts_get(&params(json!({ "name": "write_poem" })))
            .expect_err("expected unknown prompt");
        assert!(matches!(error, AppError::UnknownPrompt(ref name) if name == "write_poem"));
        assert_eq!(error.to_string(), "Unknown prompt: write_poem");
    }

    #[test]
    fn every_template_placeholder_is_a_declared_argument() {
        for prompt in &PROMPTS {
            let rendered = render_prompt(prompt, &Map::new());
            assert!(
                !rendered.contains('{'),
                "{} left a placeholder unfilled",
                prompt.name
            );
        }
    }

    #[test]
    fn prompts_list_exposes_arguments_without_templates() {
        let list = serde_json::to_value(build_prompts_list()).expect("prompts serialize");
        let prompts = list.as_array().expect("prompts array");

        assert_eq!(prompts.len(), 4);
        assert_eq!(prompts[3]["name"], "explain_concept");
        assert_eq!(prompts[3]["arguments"][0]["name"], "concept");
        assert_eq!(prompts[3]["arguments"][0]["required"], true);
        assert_eq!(prompts[3]["arguments"][1]["required"], false);
        assert!(prompts[0].get("template").is_none());
        assert!(prompts[0]["arguments"][1].get("fallback").is_none());
    }
}
