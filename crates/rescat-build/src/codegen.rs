//! Rust source generation from an accessor tree.
//!
//! One `mod` per namespace level and one `&str` constant per image, holding
//! the image's lookup key:
//!
//! ```text
//! pub mod images {
//!     /// Image `Icon`.
//!     pub const ICON: &str = "icon";
//!
//!     pub mod onboarding {
//!         /// Image `Logo`.
//!         pub const LOGO: &str = "onboarding/logo";
//!     }
//! }
//! ```

use rescat::{AccessLevel, AccessorNode, LeafAccessor};

const HEADER: &str = "// @generated by rescat-build. Do not edit.\n\n";

/// Rust keywords that can be written as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "super"];

/// Render `tree` as a Rust module named `module_name`.
///
/// Output depends only on the tree, so unchanged catalogs produce
/// byte-identical files.
pub fn render(tree: &AccessorNode, module_name: &str) -> String {
    let mut out = String::from(HEADER);
    render_module(&mut out, tree, module_name, 0);
    out
}

fn render_module(out: &mut String, node: &AccessorNode, module_name: &str, depth: usize) {
    let indent = "    ".repeat(depth);
    let vis = visibility(node.access, depth == 0);
    let scope = if node.qualified_name.is_empty() {
        module_name
    } else {
        node.qualified_name.as_str()
    };

    out.push_str(&format!(
        "{indent}/// `{}` contains {} image(s).\n",
        scope,
        node.leaves.len()
    ));
    if depth == 0 {
        out.push_str(&format!("{indent}#[allow(dead_code)]\n"));
    }
    out.push_str(&format!("{indent}{vis}mod {} {{\n", module_ident(module_name)));

    for leaf in &node.leaves {
        render_leaf(out, leaf, depth + 1);
    }

    for (i, child) in node.children.iter().enumerate() {
        if i > 0 || !node.leaves.is_empty() {
            out.push('\n');
        }
        render_module(out, child, child.name.as_str(), depth + 1);
    }

    out.push_str(&format!("{indent}}}\n"));
}

fn render_leaf(out: &mut String, leaf: &LeafAccessor, depth: usize) {
    let indent = "    ".repeat(depth);
    let vis = visibility(leaf.access, false);
    out.push_str(&format!("{indent}/// Image `{}`.\n", leaf.raw_name));
    out.push_str(&format!(
        "{indent}{vis}const {}: &str = {:?};\n",
        const_ident(leaf.symbol.as_str()),
        leaf.lookup_key
    ));
}

/// Nested items are `pub` even for private trees: the outermost module
/// already bounds their reach.
fn visibility(access: AccessLevel, outermost: bool) -> &'static str {
    match (access, outermost) {
        (AccessLevel::Public, _) => "pub ",
        (AccessLevel::Crate, _) => "pub(crate) ",
        (AccessLevel::Private, true) => "",
        (AccessLevel::Private, false) => "pub ",
    }
}

/// Module name, escaped if it is a keyword.
pub fn module_ident(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// SCREAMING_SNAKE_CASE constant name for a symbol.
pub fn const_ident(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    if upper == "SELF" {
        format!("{upper}_")
    } else {
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescat::{Identifier, build, generate};
    use std::path::{Path, PathBuf};

    fn accessor_tree(dirs: &[&str], leaves: &[&str], access: AccessLevel) -> AccessorNode {
        let dirs: Vec<PathBuf> = dirs.iter().map(PathBuf::from).collect();
        let leaves: Vec<PathBuf> = leaves.iter().map(PathBuf::from).collect();
        let tree = build(Path::new("/cat"), &dirs, &leaves).unwrap();
        let mut warnings = Vec::new();
        generate(&tree, access, "images", &mut warnings)
    }

    #[test]
    fn renders_nested_modules() {
        let tree = accessor_tree(
            &["/cat/Onboarding"],
            &["/cat/Icon.imageset", "/cat/Onboarding/Logo.imageset"],
            AccessLevel::Public,
        );
        let code = render(&tree, "images");

        let expected = "\
// @generated by rescat-build. Do not edit.

/// `images` contains 1 image(s).
#[allow(dead_code)]
pub mod images {
    /// Image `Icon`.
    pub const ICON: &str = \"icon\";

    /// `images.onboarding` contains 1 image(s).
    pub mod onboarding {
        /// Image `Logo`.
        pub const LOGO: &str = \"onboarding/logo\";
    }
}
";
        assert_eq!(code, expected);
    }

    #[test]
    fn crate_visibility_applies_everywhere() {
        let tree = accessor_tree(&["/cat/A"], &["/cat/A/x.imageset"], AccessLevel::Crate);
        let code = render(&tree, "images");

        assert!(code.contains("pub(crate) mod images {"));
        assert!(code.contains("    pub(crate) mod a {"));
        assert!(code.contains("        pub(crate) const X: &str = \"a/x\";"));
    }

    #[test]
    fn private_tree_keeps_inner_items_reachable() {
        let tree = accessor_tree(&["/cat/A"], &["/cat/A/x.imageset"], AccessLevel::Private);
        let code = render(&tree, "images");

        assert!(code.contains("\nmod images {"));
        assert!(code.contains("    pub mod a {"));
        assert!(code.contains("        pub const X: &str"));
    }

    #[test]
    fn keyword_modules_are_escaped() {
        assert_eq!(module_ident("type"), "r#type");
        assert_eq!(module_ident("match"), "r#match");
        assert_eq!(module_ident("self"), "self_");
        assert_eq!(module_ident("icons"), "icons");
        assert_eq!(const_ident("self"), "SELF_");
        assert_eq!(const_ident("_2x"), "_2X");
    }

    #[test]
    fn empty_tree_renders_empty_module() {
        let tree = accessor_tree(&[], &[], AccessLevel::Public);
        let code = render(&tree, "images");
        assert!(code.contains("pub mod images {\n}\n"));
    }

    #[test]
    fn lookup_keys_are_escaped_literals() {
        let tree = AccessorNode {
            name: Identifier::default(),
            qualified_name: "images".into(),
            access: AccessLevel::Public,
            leaves: vec![LeafAccessor {
                symbol: Identifier::new("quote"),
                raw_name: "quote".into(),
                lookup_key: "say \"hi\"".into(),
                access: AccessLevel::Public,
            }],
            children: Vec::new(),
        };
        let code = render(&tree, "images");
        assert!(code.contains(r#"pub const QUOTE: &str = "say \"hi\"";"#));
    }
}
