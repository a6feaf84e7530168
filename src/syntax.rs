//! Structural view of a Java compilation unit
//!
//! A [`SyntaxUnit`] is built once from the tree-sitter parse of a file and is
//! only handed out by shared reference afterwards, so rules running on several
//! threads never observe a change.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tree_sitter::{Node, Parser};

use crate::error::ParseError;
use crate::location::LineIndex;
use crate::utils::java_patterns::simple_annotation_name;
use crate::utils::ts_walker::{
    children, children_by_field, field_text, first_error, named_children, text, walk, Visit,
};

/// 1-based line and character column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Simple name, without package or `@`
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Keywords such as `public`, `static`, `final`
    pub keywords: Vec<String>,
    pub annotations: Vec<Annotation>,
}

impl Modifiers {
    pub fn has(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn is_static(&self) -> bool {
        self.has("static")
    }

    pub fn is_final(&self) -> bool {
        self.has("final")
    }

    pub fn is_private(&self) -> bool {
        self.has("private")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without the trailing `.*`
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub modifiers: Modifiers,
    pub has_initializer: bool,
    /// Position of the declared name
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    /// `None` for constructors
    pub return_type: Option<String>,
    pub is_constructor: bool,
    pub modifiers: Modifiers,
    pub position: Position,
    /// Simple names assigned in the body (`x = ..`, `this.x = ..`, `x++`)
    pub assigned_names: BTreeSet<String>,
    /// Body contains `return null;` outside nested lambdas and classes
    pub returns_null: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub position: Position,
    /// Name of the enclosing type for nested declarations
    pub outer: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    /// Names written directly by constructors and instance initializer blocks
    pub instance_init_writes: BTreeSet<String>,
    /// Names written directly by `static {}` blocks
    pub static_init_writes: BTreeSet<String>,
    /// Names written anywhere else in the body: methods, field initializers,
    /// lambdas, anonymous classes and nested types
    pub other_writes: BTreeSet<String>,
}

impl TypeDecl {
    /// Initializer writes that may assign a `final` field of this kind, and
    /// those that may not
    fn init_writes(&self, field: &FieldDecl) -> (&BTreeSet<String>, &BTreeSet<String>) {
        if field.modifiers.is_static() {
            (&self.static_init_writes, &self.instance_init_writes)
        } else {
            (&self.instance_init_writes, &self.static_init_writes)
        }
    }

    /// Whether `field` gets a value from its declarator or from an
    /// initializer allowed to assign it when `final`
    pub fn initializes(&self, field: &FieldDecl) -> bool {
        let (own, _) = self.init_writes(field);
        field.has_initializer || own.contains(&field.name)
    }

    /// Whether `field` is written anywhere a `final` field could not be
    pub fn reassigns(&self, field: &FieldDecl) -> bool {
        let (own, other) = self.init_writes(field);
        self.other_writes.contains(&field.name)
            || other.contains(&field.name)
            || (field.has_initializer && own.contains(&field.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Receiver expression text, e.g. `System.out`
    pub receiver: Option<String>,
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub line: usize,
    pub text: String,
}

/// One source file's declarations
#[derive(Debug, Clone)]
pub struct SyntaxUnit {
    pub path: PathBuf,
    pub source: Arc<str>,
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    /// All type declarations, nested ones included, in source order
    pub types: Vec<TypeDecl>,
    pub calls: Vec<CallSite>,
    /// Line comments
    pub comments: Vec<Comment>,
}

impl SyntaxUnit {
    /// Parse Java source into a syntax unit
    pub fn parse(path: impl AsRef<Path>, source: &str) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| ParseError::Language {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Language {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        let source: Arc<str> = Arc::from(source);
        let index = LineIndex::new(source.clone());
        let root = tree.root_node();

        if let Some(error) = first_error(root) {
            let (line, column) = index.get_location(error.start_byte());
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line,
                column,
            });
        }

        let mut builder = UnitBuilder {
            source: &*source,
            index: &index,
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
            calls: Vec::new(),
            comments: Vec::new(),
        };
        builder.visit_program(root);

        Ok(Self {
            path: path.to_path_buf(),
            package: builder.package,
            imports: builder.imports,
            types: builder.types,
            calls: builder.calls,
            comments: builder.comments,
            source,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = (&TypeDecl, &FieldDecl)> {
        self.types
            .iter()
            .flat_map(|t| t.fields.iter().map(move |f| (t, f)))
    }

    pub fn methods(&self) -> impl Iterator<Item = (&TypeDecl, &MethodDecl)> {
        self.types
            .iter()
            .flat_map(|t| t.methods.iter().map(move |m| (t, m)))
    }
}

struct UnitBuilder<'a> {
    source: &'a str,
    index: &'a LineIndex,
    package: Option<String>,
    imports: Vec<ImportDecl>,
    types: Vec<TypeDecl>,
    calls: Vec<CallSite>,
    comments: Vec<Comment>,
}

impl<'a> UnitBuilder<'a> {
    fn position(&self, node: Node<'_>) -> Position {
        let (line, column) = self.index.get_location(node.start_byte());
        Position { line, column }
    }

    fn visit_program(&mut self, root: Node<'_>) {
        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    self.package = named_children(child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
                        .map(|n| text(n, self.source).to_string());
                }
                "import_declaration" => self.visit_import(child),
                _ => {}
            }
        }

        let source = self.source;
        let mut calls = Vec::new();
        let mut comments = Vec::new();
        walk(root, &mut |node| {
            match node.kind() {
                "method_invocation" => calls.push(CallSite {
                    receiver: field_text(node, "object", source).map(str::to_string),
                    name: field_text(node, "name", source).unwrap_or_default().to_string(),
                    position: self.position(node),
                }),
                "line_comment" => comments.push(Comment {
                    line: self.position(node).line,
                    text: text(node, source).to_string(),
                }),
                _ => {}
            }
            Visit::Descend
        });
        self.calls = calls;
        self.comments = comments;

        for child in named_children(root) {
            self.visit_type(child, None);
        }
    }

    fn visit_import(&mut self, node: Node<'_>) {
        let parts = children(node);
        let is_static = parts.iter().any(|n| n.kind() == "static");
        let has_asterisk = parts.iter().any(|n| n.kind() == "asterisk");
        let name = parts
            .iter()
            .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
            .map(|n| text(*n, self.source).to_string())
            .unwrap_or_default();

        let raw = text(node, self.source).trim_end_matches(';').trim_end();
        let is_wildcard = has_asterisk || raw.ends_with('*');
        let path = name.trim_end_matches(".*").to_string();

        self.imports.push(ImportDecl {
            path,
            is_static,
            is_wildcard,
            position: self.position(node),
        });
    }

    fn visit_type(&mut self, node: Node<'_>, outer: Option<&str>) {
        let kind = match node.kind() {
            "class_declaration" => TypeKind::Class,
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            "record_declaration" => TypeKind::Record,
            "annotation_type_declaration" => TypeKind::Annotation,
            _ => return,
        };
        let name_node = node.child_by_field_name("name");
        let name = name_node
            .map(|n| text(n, self.source).to_string())
            .unwrap_or_default();

        let mut decl = TypeDecl {
            name: name.clone(),
            kind,
            modifiers: self.modifiers(node),
            position: self.position(name_node.unwrap_or(node)),
            outer: outer.map(str::to_string),
            fields: Vec::new(),
            methods: Vec::new(),
            instance_init_writes: BTreeSet::new(),
            static_init_writes: BTreeSet::new(),
            other_writes: BTreeSet::new(),
        };

        let mut nested = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let members: Vec<Node<'_>> = if body.kind() == "enum_body" {
                // Constant bodies are anonymous classes
                for constant in named_children(body)
                    .into_iter()
                    .filter(|n| n.kind() == "enum_constant")
                {
                    decl.other_writes
                        .extend(assigned_names(constant, self.source));
                }
                named_children(body)
                    .into_iter()
                    .filter(|n| n.kind() == "enum_body_declarations")
                    .flat_map(named_children)
                    .collect()
            } else {
                named_children(body)
            };

            for member in members {
                match member.kind() {
                    "field_declaration" | "constant_declaration" => {
                        self.visit_field(member, &mut decl, member.kind() == "constant_declaration");
                        decl.other_writes
                            .extend(assigned_names(member, self.source));
                    }
                    "method_declaration" => {
                        let method = self.method(member, false);
                        decl.other_writes.extend(method.assigned_names.iter().cloned());
                        decl.methods.push(method);
                    }
                    "constructor_declaration" | "compact_constructor_declaration" => {
                        if let Some(body) = member.child_by_field_name("body") {
                            let (direct, deferred) = split_writes(body, self.source);
                            decl.instance_init_writes.extend(direct);
                            decl.other_writes.extend(deferred);
                        }
                        decl.methods.push(self.method(member, true));
                    }
                    "block" => {
                        let (direct, deferred) = split_writes(member, self.source);
                        decl.instance_init_writes.extend(direct);
                        decl.other_writes.extend(deferred);
                    }
                    "static_initializer" => {
                        let (direct, deferred) = split_writes(member, self.source);
                        decl.static_init_writes.extend(direct);
                        decl.other_writes.extend(deferred);
                    }
                    "class_declaration"
                    | "interface_declaration"
                    | "enum_declaration"
                    | "record_declaration"
                    | "annotation_type_declaration" => {
                        decl.other_writes
                            .extend(assigned_names(member, self.source));
                        nested.push(member);
                    }
                    _ => {}
                }
            }
        }

        self.types.push(decl);
        for member in nested {
            self.visit_type(member, Some(&name));
        }
    }

    fn visit_field(&self, node: Node<'_>, decl: &mut TypeDecl, implicit_constant: bool) {
        let mut modifiers = self.modifiers(node);
        if implicit_constant || decl.kind == TypeKind::Interface {
            // Interface fields are implicitly public static final
            for keyword in ["public", "static", "final"] {
                if !modifiers.has(keyword) {
                    modifiers.keywords.push(keyword.to_string());
                }
            }
        }
        let type_name = field_text(node, "type", self.source)
            .unwrap_or_default()
            .to_string();

        for declarator in children_by_field(node, "declarator") {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            decl.fields.push(FieldDecl {
                name: text(name_node, self.source).to_string(),
                type_name: type_name.clone(),
                modifiers: modifiers.clone(),
                has_initializer: declarator.child_by_field_name("value").is_some(),
                position: self.position(name_node),
            });
        }
    }

    fn method(&self, node: Node<'_>, is_constructor: bool) -> MethodDecl {
        let name_node = node.child_by_field_name("name");
        let body = node.child_by_field_name("body");
        MethodDecl {
            name: name_node
                .map(|n| text(n, self.source).to_string())
                .unwrap_or_default(),
            return_type: if is_constructor {
                None
            } else {
                field_text(node, "type", self.source).map(str::to_string)
            },
            is_constructor,
            modifiers: self.modifiers(node),
            position: self.position(name_node.unwrap_or(node)),
            assigned_names: body
                .map(|b| assigned_names(b, self.source))
                .unwrap_or_default(),
            returns_null: body.is_some_and(returns_null),
        }
    }

    fn modifiers(&self, node: Node<'_>) -> Modifiers {
        let mut modifiers = Modifiers::default();
        let Some(list) = children(node).into_iter().find(|n| n.kind() == "modifiers") else {
            return modifiers;
        };
        for item in children(list) {
            match item.kind() {
                "marker_annotation" | "annotation" => {
                    let name = field_text(item, "name", self.source).unwrap_or_default();
                    modifiers.annotations.push(Annotation {
                        name: simple_annotation_name(name).to_string(),
                        position: self.position(item),
                    });
                }
                keyword if !item.is_named() => modifiers.keywords.push(keyword.to_string()),
                _ => {}
            }
        }
        modifiers
    }
}

/// Record the simple name `node` writes, if it is an assignment or increment
fn record_write(node: Node<'_>, source: &str, names: &mut BTreeSet<String>) {
    let target = match node.kind() {
        "assignment_expression" => node.child_by_field_name("left"),
        "update_expression" => node.named_child(0),
        _ => None,
    };
    let Some(target) = target else {
        return;
    };
    match target.kind() {
        "identifier" => {
            names.insert(text(target, source).to_string());
        }
        "field_access" => {
            if let Some(field) = field_text(target, "field", source) {
                names.insert(field.to_string());
            }
        }
        _ => {}
    }
}

/// Simple names written by assignments and increments under `node`
fn assigned_names(node: Node<'_>, source: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    walk(node, &mut |n| {
        record_write(n, source, &mut names);
        Visit::Descend
    });
    names
}

/// Writes under an initializer body, split into those that run while the
/// body runs and those deferred to lambdas or class bodies declared in it
fn split_writes(body: Node<'_>, source: &str) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut direct = BTreeSet::new();
    let mut deferred_scopes = Vec::new();
    walk(body, &mut |n| {
        if matches!(
            n.kind(),
            "lambda_expression" | "class_body" | "enum_body" | "interface_body"
        ) {
            deferred_scopes.push(n);
            return Visit::Skip;
        }
        record_write(n, source, &mut direct);
        Visit::Descend
    });

    let deferred = deferred_scopes
        .into_iter()
        .flat_map(|scope| assigned_names(scope, source))
        .collect();
    (direct, deferred)
}

fn returns_null(body: Node<'_>) -> bool {
    let mut found = false;
    walk(body, &mut |n| match n.kind() {
        "lambda_expression" | "class_body" => Visit::Skip,
        "return_statement" => {
            if n.named_child(0).is_some_and(|v| v.kind() == "null_literal") {
                found = true;
            }
            Visit::Skip
        }
        _ => Visit::Descend,
    });
    found
}
