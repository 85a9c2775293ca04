use super::Language;
use std::path::Path;

/// Grammar variant used to parse a JS-family file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsLanguageVariant {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl JsLanguageVariant {
    pub fn from_language(language: Language) -> Option<Self> {
        match language {
            Language::JavaScript => Some(Self::JavaScript),
            Language::Jsx => Some(Self::Jsx),
            Language::TypeScript => Some(Self::TypeScript),
            Language::Tsx => Some(Self::Tsx),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_language(Language::from_path(path))
    }

    pub fn language(&self) -> Language {
        match self {
            Self::JavaScript => Language::JavaScript,
            Self::Jsx => Language::Jsx,
            Self::TypeScript => Language::TypeScript,
            Self::Tsx => Language::Tsx,
        }
    }
}

/// A parsed JS/TS file: the tree-sitter tree plus the text it indexes into.
#[derive(Clone, Debug)]
pub struct TypeScriptAst {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub language_variant: JsLanguageVariant,
}
