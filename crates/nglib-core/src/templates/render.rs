//! Placeholder substitution for rendered templates
//!
//! Only the placeholders listed in [`Placeholder`] are recognized. Anything
//! else between `{{` and `}}` (Angular interpolations, for instance) is kept
//! as literal text.

use crate::answers::ConfigurationRecord;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The documented placeholder set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    AuthorName,
    AuthorEmail,
    LibraryNameOriginal,
    LibraryNameKebabCase,
    Scope,
    GitRepositoryUrl,
    TestFramework,
}

impl Placeholder {
    pub const ALL: [Placeholder; 7] = [
        Placeholder::AuthorName,
        Placeholder::AuthorEmail,
        Placeholder::LibraryNameOriginal,
        Placeholder::LibraryNameKebabCase,
        Placeholder::Scope,
        Placeholder::GitRepositoryUrl,
        Placeholder::TestFramework,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Placeholder::AuthorName => "author.name",
            Placeholder::AuthorEmail => "author.email",
            Placeholder::LibraryNameOriginal => "libraryName.original",
            Placeholder::LibraryNameKebabCase => "libraryName.kebabCase",
            Placeholder::Scope => "scope",
            Placeholder::GitRepositoryUrl => "gitRepositoryUrl",
            Placeholder::TestFramework => "testFramework",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn value<'a>(&self, config: &'a ConfigurationRecord) -> &'a str {
        match self {
            Placeholder::AuthorName => &config.author.name,
            Placeholder::AuthorEmail => &config.author.email,
            Placeholder::LibraryNameOriginal => &config.library_name.original,
            Placeholder::LibraryNameKebabCase => &config.library_name.kebab_case,
            Placeholder::Scope => &config.scope,
            Placeholder::GitRepositoryUrl => &config.git_repository_url,
            Placeholder::TestFramework => config.test_framework.label(),
        }
    }
}

/// Replace every recognized `{{ key }}` in `template` with its value
pub fn render(template: &str, config: &ConfigurationRecord) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            // Unterminated, keep the remainder as-is
            out.push_str(&rest[start..]);
            return out;
        };

        match Placeholder::from_key(after_open[..end].trim()) {
            Some(placeholder) => {
                out.push_str(placeholder.value(config));
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Emit the opening braces and rescan, so `{{{{ scope }}` still resolves the inner one
                out.push_str(OPEN);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Keys between braces that are not part of the placeholder set
pub fn unknown_placeholders(template: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        let key = after_open[..end].trim();
        if Placeholder::from_key(key).is_some() {
            rest = &after_open[end + CLOSE.len()..];
        } else {
            if !key.contains(OPEN) && !unknown.iter().any(|k| k == key) {
                unknown.push(key.to_string());
            }
            rest = after_open;
        }
    }

    unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Author, LibraryName, TestFramework};

    fn record() -> ConfigurationRecord {
        ConfigurationRecord {
            author: Author {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            },
            library_name: LibraryName {
                original: "my-cool-lib".to_string(),
                kebab_case: "my-cool-lib".to_string(),
            },
            scope: "@acme/".to_string(),
            git_repository_url: "https://github.com/acme/lib".to_string(),
            test_framework: TestFramework::Jest,
        }
    }

    #[test]
    fn test_render_known_placeholders() {
        let out = render(
            r#"{"name": "{{ scope }}{{libraryName.kebabCase}}", "author": "{{ author.name }} <{{ author.email }}>"}"#,
            &record(),
        );
        assert_eq!(
            out,
            r#"{"name": "@acme/my-cool-lib", "author": "Jane Doe <jane@example.com>"}"#
        );
    }

    #[test]
    fn test_unknown_placeholder_is_literal() {
        let src = "<h1>{{ title }}</h1> by {{ author.name }}";
        assert_eq!(render(src, &record()), "<h1>{{ title }}</h1> by Jane Doe");
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        assert_eq!(render("a {{ scope", &record()), "a {{ scope");
    }

    #[test]
    fn test_nested_braces_resolve_inner_placeholder() {
        assert_eq!(render("{{{{ scope }}", &record()), "{{@acme/");
    }

    #[test]
    fn test_text_without_placeholders_is_unchanged() {
        let src = "{\n  \"compilerOptions\": {\n    \"strict\": true\n  }\n}\n";
        assert_eq!(render(src, &record()), src);
    }

    #[test]
    fn test_test_framework_placeholder() {
        assert_eq!(render("{{testFramework}}", &record()), "jest");
    }

    #[test]
    fn test_unknown_placeholders_listed_once() {
        let src = "{{ title }} {{ scope }} {{title}} {{ item.name }}";
        assert_eq!(unknown_placeholders(src), vec!["title", "item.name"]);
    }
}
