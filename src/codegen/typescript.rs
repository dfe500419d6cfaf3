//! TypeScript output.

use serde_json::Value;

use super::ast::{
    SyntaxEntry,
    SyntaxTree,
};
use super::module::{
    Artifact,
    CanonicalSection,
    FieldOrigin,
    LanguageModule,
};
use super::placeholder::is_identifier;
use super::target::Target;

pub const GENERATED_BANNER: &str = "// ********************************
// This file is generated by a tool
// ********************************
";

const INDENT: &str = "  ";
const SECTIONS_INTERFACE_MODULE: &str = "sections.interface";
const LANGUAGE_INTERFACE_MODULE: &str = "language.interface";

/// Modules of the consuming project that generated code imports from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeImports {
    /// Exports `interpolate(text, args)`.
    pub interpolate_module: String,
    /// Exports the `ILanguageMetadata` type.
    pub metadata_module: String,
}

impl Default for RuntimeImports {
    fn default() -> Self {
        Self {
            interpolate_module: "../translation-utils".to_string(),
            metadata_module: "../types/language-metadata.interface".to_string(),
        }
    }
}

/// [`Target`] emitting TypeScript modules.
#[derive(Debug, Clone, Default)]
pub struct TypeScript {
    imports: RuntimeImports,
}

/// Line buffer with indentation.
#[derive(Debug, Default)]
struct Source {
    text: String,
}

impl Source {
    fn line(&mut self, depth: usize, line: &str) {
        for _ in 0..depth {
            self.text.push_str(INDENT);
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn raw(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

impl TypeScript {
    #[must_use]
    pub const fn new(imports: RuntimeImports) -> Self {
        Self { imports }
    }

    /// Identifier a language module is bound to: the shortcode without dashes.
    #[must_use]
    pub fn module_identifier(shortcode: &str) -> String {
        shortcode.replace('-', "")
    }

    fn render_values(entries: &[SyntaxEntry], depth: usize, out: &mut Source) {
        for entry in entries {
            let name = property(entry.name());
            match entry {
                SyntaxEntry::Literal { text, .. } => {
                    out.line(depth, &format!("{name}: {},", quote(text)));
                }
                SyntaxEntry::Callable { text, params, .. } => {
                    let args = if params.is_empty() {
                        "{}".to_string()
                    } else {
                        format!("{{ {} }}", params.join(", "))
                    };
                    out.line(
                        depth,
                        &format!(
                            "{name}: ({}) => interpolate({}, {args}),",
                            typed_params(params),
                            quote(text),
                        ),
                    );
                }
                SyntaxEntry::Block { entries, .. } => {
                    out.line(depth, &format!("{name}: {{"));
                    Self::render_values(entries, depth + 1, out);
                    out.line(depth, "},");
                }
            }
        }
    }

    fn render_types(entries: &[SyntaxEntry], depth: usize, out: &mut Source) {
        for entry in entries {
            let name = property(entry.name());
            match entry {
                SyntaxEntry::Literal { .. } => {
                    out.line(depth, &format!("{name}: string;"));
                }
                SyntaxEntry::Callable { params, .. } => {
                    out.line(depth, &format!("{name}: ({}) => string;", typed_params(params)));
                }
                SyntaxEntry::Block { entries, .. } => {
                    out.line(depth, &format!("{name}: {{"));
                    Self::render_types(entries, depth + 1, out);
                    out.line(depth, "};");
                }
            }
        }
    }

    fn any_callable(entries: &[SyntaxEntry]) -> bool {
        entries.iter().any(|entry| match entry {
            SyntaxEntry::Literal { .. } => false,
            SyntaxEntry::Callable { .. } => true,
            SyntaxEntry::Block { entries, .. } => Self::any_callable(entries),
        })
    }
}

impl Target for TypeScript {
    fn file_name(&self, artifact: Artifact<'_>) -> String {
        match artifact {
            Artifact::Language(shortcode) => format!("{shortcode}.ts"),
            Artifact::SectionsInterface => format!("{SECTIONS_INTERFACE_MODULE}.ts"),
            Artifact::LanguageInterface => format!("{LANGUAGE_INTERFACE_MODULE}.ts"),
        }
    }

    fn render_value(&self, tree: &SyntaxTree) -> String {
        let mut out = Source::default();
        Self::render_values(&tree.entries, 1, &mut out);
        out.text
    }

    fn render_interface(&self, tree: &SyntaxTree) -> String {
        let mut out = Source::default();
        Self::render_types(&tree.entries, 1, &mut out);
        out.text
    }

    fn needs_interpolation(&self, tree: &SyntaxTree) -> bool {
        Self::any_callable(&tree.entries)
    }

    fn language_module(&self, module: &LanguageModule<'_>) -> String {
        let identifier = Self::module_identifier(module.shortcode);
        let parent_identifier = module.parent.map(Self::module_identifier);

        let mut out = Source::default();
        out.raw(GENERATED_BANNER);
        out.blank();
        if module.interpolates() {
            let runtime = quote(&self.imports.interpolate_module);
            out.line(0, &format!("import {{ interpolate }} from {runtime};"));
        }
        out.line(0, &format!("import {{ ILanguage }} from \"./{LANGUAGE_INTERFACE_MODULE}\";"));
        out.line(0, &format!("import * as Sections from \"./{SECTIONS_INTERFACE_MODULE}\";"));
        if let (Some(parent), Some(parent_identifier)) = (module.parent, &parent_identifier) {
            let parent_path = quote(&format!("./{parent}"));
            out.line(0, &format!("import * as {parent_identifier} from {parent_path};"));
        }

        out.blank();
        out.line(0, "// Sections");
        for section in module.own_sections {
            out.blank();
            out.line(
                0,
                &format!(
                    "export const {}: Sections.{} = {{",
                    section.identity.variable_name(),
                    section.identity.interface_name()
                ),
            );
            out.raw(&section.value_source);
            out.line(0, "};");
        }

        if let Some(parent_identifier) = &parent_identifier {
            let mut inherited = module.inherited_fields().peekable();
            if inherited.peek().is_some() {
                out.blank();
                out.line(0, "// Inherited sections");
                out.blank();
            }
            for field in inherited {
                out.line(
                    0,
                    &format!(
                        "export const {variable}: Sections.{interface} = {parent_identifier}.{variable};",
                        variable = field.identity.variable_name(),
                        interface = field.identity.interface_name(),
                    ),
                );
            }
        }

        out.blank();
        out.line(0, "// Language");
        out.blank();
        out.line(0, &format!("export const {identifier}: ILanguage = {{"));
        out.line(1, "metadata: {");
        out.line(2, &format!("shortcode: {},", quote(module.shortcode)));
        out.line(2, &format!("name: {},", quote(module.name)));
        out.line(1, "},");
        for field in &module.fields {
            let reference = match (field.origin, &parent_identifier) {
                (FieldOrigin::Inherited, Some(parent_identifier)) => {
                    format!("{parent_identifier}.{}", field.identity.variable_name())
                }
                _ => field.identity.variable_name().to_string(),
            };
            out.line(1, &format!("{}: {reference},", quote(field.identity.key())));
        }
        out.line(0, "};");
        out.blank();
        out.line(0, &format!("export default {identifier};"));

        out.text
    }

    fn sections_interface(&self, sections: &[CanonicalSection]) -> String {
        let mut out = Source::default();
        out.raw(GENERATED_BANNER);
        out.blank();
        out.line(0, "// Sections");
        for section in sections {
            out.blank();
            out.line(0, &format!("export interface {} {{", section.identity.interface_name()));
            out.raw(&section.interface_source);
            out.line(0, "}");
        }
        out.text
    }

    fn language_interface(&self, sections: &[CanonicalSection]) -> String {
        let mut out = Source::default();
        out.raw(GENERATED_BANNER);
        out.blank();
        let metadata = quote(&self.imports.metadata_module);
        out.line(0, &format!("import {{ ILanguageMetadata }} from {metadata};"));
        out.line(0, &format!("import * as Sections from \"./{SECTIONS_INTERFACE_MODULE}\";"));
        out.blank();
        out.line(0, "// Language");
        out.blank();
        out.line(0, "export interface ILanguage {");
        out.line(1, "metadata: ILanguageMetadata;");
        for section in sections {
            out.line(
                1,
                &format!(
                    "{}: Sections.{};",
                    quote(section.identity.key()),
                    section.identity.interface_name()
                ),
            );
        }
        out.line(0, "}");
        out.text
    }
}

/// Double-quoted string literal with JSON escaping.
fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// Property name, quoted unless it is a plain identifier.
fn property(name: &str) -> String {
    if is_identifier(name) { name.to_string() } else { quote(name) }
}

fn typed_params(params: &[String]) -> String {
    params.iter().map(|param| format!("{param}: string")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;
    use crate::codegen::module::{
        ModuleField,
        OwnSection,
    };
    use crate::ir::section::SectionIdentity;
    use crate::ir::translation::{
        Translation,
        Translations,
    };

    #[fixture]
    fn tree() -> SyntaxTree {
        let payload = Translations::from_iter([
            ("title", Translation::literal("Branches")),
            ("greeting", Translation::template("Hello {{name}}", ["name"])),
            ("refresh", Translation::template("Refresh", Vec::<String>::new())),
            (
                "menu",
                Translation::node([
                    ("open", Translation::literal("Say \"open\"")),
                    ("data-test", Translation::literal("x")),
                ]),
            ),
        ]);
        SyntaxTree::build(&payload).unwrap()
    }

    fn identity(path: &[&str]) -> SectionIdentity {
        SectionIdentity::root().extend_all(path.iter().copied()).unwrap()
    }

    #[rstest]
    fn renders_value_source(tree: SyntaxTree) {
        let value = TypeScript::default().render_value(&tree);

        assert_eq!(
            value,
            r#"  title: "Branches",
  greeting: (name: string) => interpolate("Hello {{name}}", { name }),
  refresh: () => interpolate("Refresh", {}),
  menu: {
    open: "Say \"open\"",
    "data-test": "x",
  },
"#
        );
    }

    #[rstest]
    fn renders_interface_source(tree: SyntaxTree) {
        let interface = TypeScript::default().render_interface(&tree);

        assert_eq!(
            interface,
            r#"  title: string;
  greeting: (name: string) => string;
  refresh: () => string;
  menu: {
    open: string;
    "data-test": string;
  };
"#
        );
    }

    #[rstest]
    fn rendering_is_deterministic(tree: SyntaxTree) {
        let target = TypeScript::default();

        assert_eq!(target.render_value(&tree), target.render_value(&tree.clone()));
    }

    #[rstest]
    fn detects_interpolation(tree: SyntaxTree) {
        let literal_only =
            SyntaxTree::build(&Translations::from_iter([("a", Translation::literal("A"))]))
                .unwrap();

        assert_that!(TypeScript::default().needs_interpolation(&tree), eq(true));
        assert_that!(TypeScript::default().needs_interpolation(&literal_only), eq(false));
    }

    #[rstest]
    #[case::language(Artifact::Language("en-gb"), "en-gb.ts")]
    #[case::sections(Artifact::SectionsInterface, "sections.interface.ts")]
    #[case::language_interface(Artifact::LanguageInterface, "language.interface.ts")]
    fn file_names(#[case] artifact: Artifact<'_>, #[case] expected: &str) {
        assert_that!(TypeScript::default().file_name(artifact), eq(expected));
    }

    #[rstest]
    fn derived_module_references_parent() {
        let branches = identity(&["components", "tabs", "repositoryBranches"]);
        let title = identity(&["common", "title"]);
        let own = vec![OwnSection {
            identity: title.clone(),
            value_source: "  text: \"Titre\",\n".to_string(),
            interface_source: "  text: string;\n".to_string(),
            interpolates: false,
        }];
        let module = LanguageModule {
            shortcode: "fr-ca",
            name: "Français (CA)",
            parent: Some("fr-fr"),
            own_sections: &own,
            fields: vec![
                ModuleField { identity: &branches, origin: FieldOrigin::Inherited },
                ModuleField { identity: &title, origin: FieldOrigin::Own },
            ],
        };

        let source = TypeScript::default().language_module(&module);

        assert_eq!(
            source,
            r#"// ********************************
// This file is generated by a tool
// ********************************

import { ILanguage } from "./language.interface";
import * as Sections from "./sections.interface";
import * as frfr from "./fr-fr";

// Sections

export const _commonTitle: Sections.ICommonTitle = {
  text: "Titre",
};

// Inherited sections

export const _componentsTabsRepositoryBranches: Sections.IComponentsTabsRepositoryBranches = frfr._componentsTabsRepositoryBranches;

// Language

export const frca: ILanguage = {
  metadata: {
    shortcode: "fr-ca",
    name: "Français (CA)",
  },
  "components-tabs-repository-branches": frfr._componentsTabsRepositoryBranches,
  "common-title": _commonTitle,
};

export default frca;
"#
        );
    }

    #[rstest]
    fn base_module_imports_interpolate_when_needed() {
        let greeting = identity(&["greeting"]);
        let own = vec![OwnSection {
            identity: greeting.clone(),
            value_source: "  hi: (name: string) => interpolate(\"Hi {{name}}\", { name }),\n"
                .to_string(),
            interface_source: "  hi: (name: string) => string;\n".to_string(),
            interpolates: true,
        }];
        let module = LanguageModule {
            shortcode: "en-gb",
            name: "English (GB)",
            parent: None,
            own_sections: &own,
            fields: vec![ModuleField { identity: &greeting, origin: FieldOrigin::Own }],
        };

        let source = TypeScript::default().language_module(&module);

        assert_that!(source, contains_substring("import { interpolate } from \"../translation-utils\";"));
        assert_eq!(source.matches("import * as ").count(), 1);
        assert_that!(source, contains_substring("import * as Sections from \"./sections.interface\";"));
        assert_that!(source, contains_substring("  \"greeting\": _greeting,\n"));
        assert_that!(source, not(contains_substring("// Inherited sections")));
    }

    #[rstest]
    fn shared_interfaces() {
        let sections = vec![CanonicalSection {
            identity: identity(&["common", "title"]),
            interface_source: "  text: string;\n".to_string(),
        }];
        let target = TypeScript::new(RuntimeImports {
            metadata_module: "./meta".to_string(),
            ..RuntimeImports::default()
        });

        let sections_source = target.sections_interface(&sections);
        let language_source = target.language_interface(&sections);

        assert_that!(
            sections_source,
            ends_with("// Sections\n\nexport interface ICommonTitle {\n  text: string;\n}\n")
        );
        assert_that!(language_source, contains_substring("import { ILanguageMetadata } from \"./meta\";"));
        assert_that!(
            language_source,
            ends_with(
                "export interface ILanguage {\n  metadata: ILanguageMetadata;\n  \"common-title\": Sections.ICommonTitle;\n}\n"
            )
        );
    }
}
