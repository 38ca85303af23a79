//! Prompt templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language the analysis prompt is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromptLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl PromptLanguage {
    /// Short language code.
    pub fn code(&self) -> &'static str {
        match self {
            PromptLanguage::English => "en",
            PromptLanguage::Chinese => "zh",
        }
    }
}

impl fmt::Display for PromptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PromptLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(PromptLanguage::English),
            "zh" | "chinese" => Ok(PromptLanguage::Chinese),
            other => Err(format!("unknown prompt language '{other}' (expected en or zh)")),
        }
    }
}

/// Build the analysis prompt around a formatted directory structure.
///
/// The structure is embedded verbatim.
pub fn build_prompt(structure: &str, language: PromptLanguage) -> String {
    match language {
        PromptLanguage::English => format!(
            "Below is a text representation of a directory structure. \
             Analyze it and guess what kind of project it is or what it is used for.\n\
             Include the likely development languages, frameworks, project type, \
             and any other relevant details.\n\
             \n\
             Directory structure:\n\
             {structure}\n\
             \n\
             Analysis:"
        ),
        PromptLanguage::Chinese => format!(
            "以下是一个目录结构的文本表示。请分析这个目录结构并猜测它可能是什么类型的项目或用途。\n\
             包括可能的开发语言、框架、项目类型和其他相关信息。\n\
             \n\
             目录结构:\n\
             {structure}\n\
             \n\
             分析结果:"
        ),
    }
}
