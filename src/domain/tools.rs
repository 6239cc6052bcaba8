//! Code-assistant tools exposed via Model Context Protocol
//!
//! Each tool turns its arguments into a prompt and hands it to the
//! `CompletionProvider`. Provider failures are reported inside a successful
//! result flagged with `isError`, not as JSON-RPC errors.

use std::collections::HashMap;

use rust_mcp_sdk::{
    macros,
    schema::{CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::domain::utils::{argument_text, arguments_param, fill_template, string_param};
use crate::{errors::AppError, AppState};

pub const TOOL_TEMPERATURE: f64 = 0.3;

#[macros::mcp_tool(
    name = "generate_code",
    description = "Generate code based on specifications"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GenerateCodeTool {
    /// Description of what code to generate
    pub specification: String,
    /// Programming language for the code
    #[json_schema(default = "python")]
    pub language: Option<String>,
    /// Coding style or framework to use
    #[json_schema(default = "clean")]
    pub style: Option<String>,
}

#[macros::mcp_tool(
    name = "refactor_code",
    description = "Refactor existing code for better quality"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct RefactorCodeTool {
    /// The code to refactor
    pub code: String,
    /// Refactoring goal (e.g., 'performance', 'readability', 'maintainability')
    #[json_schema(default = "maintainability")]
    pub goal: Option<String>,
    /// Programming language of the code
    #[json_schema(default = "python")]
    pub language: Option<String>,
}

#[macros::mcp_tool(
    name = "debug_code",
    description = "Help debug code issues and find solutions"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct DebugCodeTool {
    /// The code with issues
    pub code: String,
    /// Error message or description of the problem
    pub error: String,
    /// Additional context about when the error occurs
    pub context: Option<String>,
}

#[macros::mcp_tool(
    name = "optimize_performance",
    description = "Analyze and optimize code performance"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct OptimizePerformanceTool {
    /// The code to optimize
    pub code: String,
    /// Known performance bottleneck or area of concern
    pub bottleneck: Option<String>,
    /// Performance constraints or requirements
    pub constraints: Option<String>,
}

#[macros::mcp_tool(
    name = "generate_tests",
    description = "Generate unit tests for given code"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GenerateTestsTool {
    /// The code to generate tests for
    pub code: String,
    /// Testing framework to use (e.g., 'pytest', 'unittest', 'jest')
    #[json_schema(default = "pytest")]
    pub framework: Option<String>,
    /// Desired test coverage level
    #[json_schema(default = "comprehensive")]
    pub coverage: Option<String>,
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![
        GenerateCodeTool::tool(),
        RefactorCodeTool::tool(),
        DebugCodeTool::tool(),
        OptimizePerformanceTool::tool(),
        GenerateTestsTool::tool(),
    ]
}

/// Prompt recipe for one tool: template plus `(argument, fallback)` pairs.
#[derive(Debug)]
pub struct ToolTemplate {
    pub name: &'static str,
    pub template: &'static str,
    pub arguments: &'static [(&'static str, &'static str)],
}

pub static TOOL_TEMPLATES: [ToolTemplate; 5] = [
    ToolTemplate {
        name: "generate_code",
        template: "Generate {language} code based on this specification:

{specification}

Requirements:
- Use {style} coding style
- Include appropriate comments
- Follow best practices for {language}
- Make the code production-ready
- Include error handling where appropriate

Generate only the code, no explanations.",
        arguments: &[("specification", ""), ("language", "python"), ("style", "clean")],
    },
    ToolTemplate {
        name: "refactor_code",
        template: "Refactor this {language} code with focus on {goal}:

Original code:
```{language}
{code}
```

Refactoring goals:
- Improve {goal}
- Maintain functionality
- Follow {language} best practices
- Add improvements where beneficial

Provide the refactored code with comments explaining the changes.",
        arguments: &[("code", ""), ("goal", "maintainability"), ("language", "python")],
    },
    ToolTemplate {
        name: "debug_code",
        template: "Help debug this code issue:

Code:
```
{code}
```

Error: {error}

Context: {context}

Please:
1. Identify the root cause of the issue
2. Explain why the error is occurring
3. Provide a fixed version of the code
4. Suggest preventive measures for similar issues",
        arguments: &[("code", ""), ("error", ""), ("context", "")],
    },
    ToolTemplate {
        name: "optimize_performance",
        template: "Analyze and optimize this code for performance:

Code:
```
{code}
```

Known bottleneck: {bottleneck}
Constraints: {constraints}

Please:
1. Identify performance issues
2. Suggest optimization strategies
3. Provide optimized code
4. Explain the performance improvements
5. Mention any trade-offs",
        arguments: &[("code", ""), ("bottleneck", ""), ("constraints", "")],
    },
    ToolTemplate {
        name: "generate_tests",
        template: "Generate {coverage} unit tests for this code using {framework}:

Code to test:
```
{code}
```

Test requirements:
- Use {framework} framework
- {coverage} test coverage
- Test both positive and negative cases
- Include edge cases
- Add appropriate assertions
- Follow testing best practices

Generate complete test code that can be run immediately.",
        arguments: &[("code", ""), ("framework", "pytest"), ("coverage", "comprehensive")],
    },
];

pub fn find_tool_template(name: &str) -> Option<&'static ToolTemplate> {
    TOOL_TEMPLATES.iter().find(|tool| tool.name == name)
}

pub fn build_tool_prompt(tool: &ToolTemplate, arguments: &Map<String, Value>) -> String {
    let values: HashMap<&str, String> = tool
        .arguments
        .iter()
        .map(|(name, fallback)| (*name, argument_text(arguments, name, fallback)))
        .collect();

    fill_template(tool.template, &values)
}

fn text_result(text: String, is_error: bool) -> CallToolResult {
    CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error: is_error.then_some(true),
        meta: None,
        structured_content: None,
    }
}

pub async fn handle_tools_call(
    state: &AppState,
    params: &Map<String, Value>,
) -> Result<Value, AppError> {
    let name = string_param(params, "name");
    let tool = find_tool_template(name).ok_or_else(|| AppError::UnknownTool(name.to_string()))?;
    let arguments = arguments_param(params)?;

    let prompt = build_tool_prompt(tool, &arguments);
    let result = match state
        .completion_provider
        .complete(&prompt, TOOL_TEMPERATURE)
        .await
    {
        Ok(text) => {
            info!(tool = tool.name, response_len = text.len(), "tool completed");
            text_result(text, false)
        }
        Err(err) => {
            error!(tool = tool.name, error = %err, "tool failed");
            text_result(format!("Error: {err}"), true)
        }
    };

    Ok(serde_json::to_value(result)?)
}
