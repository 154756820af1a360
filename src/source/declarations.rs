//! Declarations handed over by the parsing collaborator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::body::Block;

/// Package name used for declarations without one.
pub const DEFAULT_PACKAGE: &str = "default";

/// Fully qualified, in-project name of a type: package plus (possibly nested,
/// dot-separated) type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    pub package: Option<String>,
    pub type_name: String,
}

impl QualifiedName {
    pub fn new(package: Option<&str>, type_name: impl Into<String>) -> Self {
        Self {
            package: package.map(str::to_string),
            type_name: type_name.into(),
        }
    }

    /// Package name with the default applied.
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    /// Last segment of the type name.
    pub fn simple_name(&self) -> &str {
        self.type_name.rsplit('.').next().unwrap_or(&self.type_name)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.package_name(), self.type_name)
    }
}

/// Outcome of symbol resolution as recorded by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Resolved(QualifiedName),
    #[default]
    Unresolved,
}

/// A type as written in source, with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReference {
    /// Text as written, e.g. `int`, `List<String>`, `java.util.Map`.
    pub name: String,
    #[serde(default)]
    pub resolution: Resolution,
}

impl TypeReference {
    /// Reference that could not be resolved (primitive, external library, ...).
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolution: Resolution::Unresolved,
        }
    }

    /// Reference resolved to an in-project or external type.
    pub fn resolved(name: impl Into<String>, target: QualifiedName) -> Self {
        Self {
            name: name.into(),
            resolution: Resolution::Resolved(target),
        }
    }

    /// Last identifier of the written name, generics stripped.
    pub fn simple_name(&self) -> &str {
        let base = self.name.split('<').next().unwrap_or(&self.name);
        let base = base.trim_end_matches("[]").trim();
        base.rsplit('.').next().unwrap_or(base)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_final: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    pub fn private() -> Self {
        Self {
            visibility: Visibility::Private,
            ..Self::default()
        }
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    pub type_ref: TypeReference,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, type_ref: TypeReference) -> Self {
        Self {
            name: name.into(),
            type_ref,
            modifiers: Modifiers::private(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_ref: TypeReference,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_ref: TypeReference) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    #[default]
    Method,
    Constructor,
}

/// A method or constructor. Constructors carry no return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    #[serde(default)]
    pub kind: MethodKind,
    pub name: String,
    #[serde(default)]
    pub return_type: Option<TypeReference>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl MethodDeclaration {
    pub fn method(name: impl Into<String>, return_type: TypeReference) -> Self {
        Self {
            kind: MethodKind::Method,
            name: name.into(),
            return_type: Some(return_type),
            parameters: Vec::new(),
            modifiers: Modifiers::public(),
            body: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn constructor(type_name: impl Into<String>) -> Self {
        Self {
            kind: MethodKind::Constructor,
            return_type: None,
            ..Self::method(type_name, TypeReference::unresolved("void"))
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor
    }

    /// Rendered signature: `int add(int, int)` for methods, `Point(int, int)`
    /// for constructors. Unique within a type.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.type_ref.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        match (&self.kind, &self.return_type) {
            (MethodKind::Method, Some(ret)) => format!("{} {}({})", ret.name, self.name, params),
            _ => format!("{}({})", self.name, params),
        }
    }

    /// Return type, name and parameter types; the key used for override
    /// detection.
    pub fn override_key(&self) -> (String, String, Vec<String>) {
        (
            self.return_type
                .as_ref()
                .map(|r| r.name.clone())
                .unwrap_or_default(),
            self.name.clone(),
            self.parameters.iter().map(|p| p.type_ref.name.clone()).collect(),
        )
    }
}

/// One type as delivered by the parser, with everything the engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    #[serde(default)]
    pub package: Option<String>,
    pub simple_name: String,
    /// Dot-separated name of the enclosing type for nested declarations.
    #[serde(default)]
    pub enclosing: Option<String>,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Both `extends` and `implements` references.
    #[serde(default)]
    pub supertypes: Vec<TypeReference>,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    #[serde(default)]
    pub constructors: Vec<MethodDeclaration>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl TypeDeclaration {
    pub fn new(package: Option<&str>, simple_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            package: package.map(str::to_string),
            simple_name: simple_name.into(),
            enclosing: None,
            kind,
            modifiers: Modifiers::public(),
            supertypes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn class(package: Option<&str>, simple_name: impl Into<String>) -> Self {
        Self::new(package, simple_name, TypeKind::Class)
    }

    pub fn interface(package: Option<&str>, simple_name: impl Into<String>) -> Self {
        Self::new(package, simple_name, TypeKind::Interface)
    }

    pub fn nested_in(mut self, enclosing: impl Into<String>) -> Self {
        self.enclosing = Some(enclosing.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_supertype(mut self, supertype: TypeReference) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: MethodDeclaration) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// `Outer.Inner` for nested types, the simple name otherwise.
    pub fn type_name(&self) -> String {
        match &self.enclosing {
            Some(outer) => format!("{}.{}", outer, self.simple_name),
            None => self.simple_name.clone(),
        }
    }

    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName {
            package: self.package.clone(),
            type_name: self.type_name(),
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.kind == TypeKind::Interface || self.modifiers.is_abstract
    }
}
