//! Serializable type descriptions.
//!
//! Every type can be turned into an [`Ast`] and compiled back with
//! [`Compiler`](crate::Compiler). Coercion functions appear only as
//! handles into the [`FunctionRegistry`](crate::FunctionRegistry), so an
//! AST is plain data: safe to log, cache and send elsewhere. The encoding
//! is a tagged pair `{tag, payload}`; [`Ast::to_bytes`] writes it as
//! MessagePack.

use serde::{Deserialize, Serialize};
use shapecast_foundation::{Error, Primitive, Result, Value};
use shapecast_logic::Rule;

use crate::default::DefaultValue;
use crate::meta::Meta;
use crate::schema::KeyTransform;
use crate::ty::{Coerce, Type};

/// Options for [`Type::to_ast_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstOptions {
    /// Include type metadata.
    pub meta: bool,
}

impl Default for AstOptions {
    fn default() -> Self {
        Self { meta: true }
    }
}

impl AstOptions {
    /// Options that leave metadata out.
    #[must_use]
    pub fn without_meta() -> Self {
        Self { meta: false }
    }

    /// Sets whether metadata is included.
    #[must_use]
    pub const fn with_meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }
}

/// A type as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "payload", rename_all = "snake_case")]
pub enum Ast {
    /// A nominal type.
    Nominal {
        /// The checked class.
        primitive: Primitive,
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    /// The type accepting everything.
    Any {
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    /// A type with a rule.
    Constrained {
        /// The wrapped type.
        #[serde(rename = "type")]
        ty: Box<Ast>,
        /// The rule, as data.
        rule: Rule,
    },
    /// A type preceded by coercion functions.
    Constructor {
        /// The wrapped type.
        #[serde(rename = "type")]
        ty: Box<Ast>,
        /// Function handles in application order.
        functions: Vec<String>,
    },
    /// A left-biased disjunction.
    Sum {
        /// Tried first.
        left: Box<Ast>,
        /// Tried when the left branch fails.
        right: Box<Ast>,
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    /// A type with a default.
    Default {
        /// The wrapped type.
        #[serde(rename = "type")]
        ty: Box<Ast>,
        /// Where the default comes from.
        value: DefaultAst,
    },
    /// A fixed value set over a constrained type.
    Enum {
        /// The constrained type.
        #[serde(rename = "type")]
        ty: Box<Ast>,
        /// Members in order.
        values: Vec<Value>,
    },
    /// An array with a member type.
    Array {
        /// The member type.
        member: Box<Ast>,
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    /// A hash with key and value types.
    Map {
        /// The key type.
        key: Box<Ast>,
        /// The value type.
        value: Box<Ast>,
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    /// A hash with declared keys.
    Schema {
        /// Keys in declaration order.
        keys: Vec<KeyAst>,
        /// Reject undeclared keys.
        strict: bool,
        /// Fill in defaults regardless of apply options.
        #[serde(default)]
        always_resolve_defaults: bool,
        /// Input key transform.
        #[serde(default)]
        transform: TransformAst,
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
    /// The safe wrapper.
    Safe {
        /// The wrapped type.
        #[serde(rename = "type")]
        ty: Box<Ast>,
    },
    /// The lax wrapper.
    Lax {
        /// The wrapped type, constraints already stripped.
        #[serde(rename = "type")]
        ty: Box<Ast>,
    },
    /// The maybe wrapper.
    Maybe {
        /// The wrapped type.
        #[serde(rename = "type")]
        ty: Box<Ast>,
    },
    /// A registry entry, looked up by identifier.
    Named {
        /// The registry identifier.
        identifier: String,
        /// Metadata.
        #[serde(default, skip_serializing_if = "Meta::is_empty")]
        meta: Meta,
    },
}

/// A schema key as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyAst {
    /// The key name.
    pub name: Value,
    /// Whether the key must be present.
    pub required: bool,
    /// The key type.
    #[serde(rename = "type")]
    pub ty: Ast,
}

/// A default value as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAst {
    /// A fixed value.
    Literal(Value),
    /// A function handle.
    Callable(String),
}

/// A key transform as data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformAst {
    /// Keys are used as given.
    #[default]
    Identity,
    /// String keys become symbols.
    Symbolize,
    /// Symbol keys become strings.
    Stringify,
    /// A function handle.
    Custom(String),
}

impl Ast {
    /// Returns the node tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Nominal { .. } => "nominal",
            Self::Any { .. } => "any",
            Self::Constrained { .. } => "constrained",
            Self::Constructor { .. } => "constructor",
            Self::Sum { .. } => "sum",
            Self::Default { .. } => "default",
            Self::Enum { .. } => "enum",
            Self::Array { .. } => "array",
            Self::Map { .. } => "map",
            Self::Schema { .. } => "schema",
            Self::Safe { .. } => "safe",
            Self::Lax { .. } => "lax",
            Self::Maybe { .. } => "maybe",
            Self::Named { .. } => "named",
        }
    }

    /// Encodes the AST as MessagePack.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Decodes an AST from MessagePack.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the bytes are not a valid AST.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
    }
}

fn boxed(ty: &Type, options: AstOptions) -> Box<Ast> {
    Box::new(ty.to_ast_with(options))
}

impl Type {
    /// Describes the type as data, metadata included.
    #[must_use]
    pub fn to_ast(&self) -> Ast {
        self.to_ast_with(AstOptions::default())
    }

    /// Describes the type as data.
    #[must_use]
    pub fn to_ast_with(&self, options: AstOptions) -> Ast {
        let meta = |meta: &Meta| if options.meta { meta.clone() } else { Meta::new() };
        match self {
            Self::Nominal(t) if t.primitive() == Primitive::Any => Ast::Any {
                meta: meta(t.meta()),
            },
            Self::Nominal(t) => Ast::Nominal {
                primitive: t.primitive(),
                meta: meta(t.meta()),
            },
            Self::Constrained(t) => Ast::Constrained {
                ty: boxed(t.inner(), options),
                rule: t.rule().clone(),
            },
            Self::Constructor(t) => Ast::Constructor {
                ty: boxed(t.inner(), options),
                functions: t.functions().iter().map(|f| f.handle().to_string()).collect(),
            },
            Self::Sum(t) => Ast::Sum {
                left: boxed(t.left(), options),
                right: boxed(t.right(), options),
                meta: meta(t.meta()),
            },
            Self::Default(t) => Ast::Default {
                ty: boxed(t.inner(), options),
                value: match t.value() {
                    DefaultValue::Literal(value) => DefaultAst::Literal(value.clone()),
                    DefaultValue::Callable(func) => DefaultAst::Callable(func.handle().to_string()),
                },
            },
            Self::Enum(t) => Ast::Enum {
                ty: boxed(t.inner(), options),
                values: t.values().to_vec(),
            },
            Self::Array(t) => Ast::Array {
                member: boxed(t.member(), options),
                meta: meta(t.meta()),
            },
            Self::Map(t) => Ast::Map {
                key: boxed(t.key_type(), options),
                value: boxed(t.value_type(), options),
                meta: meta(t.meta()),
            },
            Self::Schema(t) => Ast::Schema {
                keys: t
                    .keys()
                    .iter()
                    .map(|k| KeyAst {
                        name: k.name().clone(),
                        required: k.is_required(),
                        ty: k.ty().to_ast_with(options),
                    })
                    .collect(),
                strict: t.is_strict(),
                always_resolve_defaults: t.always_resolves_defaults(),
                transform: match t.key_transform() {
                    KeyTransform::Identity => TransformAst::Identity,
                    KeyTransform::Symbolize => TransformAst::Symbolize,
                    KeyTransform::Stringify => TransformAst::Stringify,
                    KeyTransform::Custom(func) => TransformAst::Custom(func.handle().to_string()),
                },
                meta: meta(t.meta()),
            },
            Self::Safe(t) => Ast::Safe {
                ty: boxed(t.inner(), options),
            },
            Self::Lax(t) => Ast::Lax {
                ty: boxed(t.inner(), options),
            },
            Self::Maybe(t) => Ast::Maybe {
                ty: boxed(t.inner(), options),
            },
            Self::Reference(t) => Ast::Named {
                identifier: t.identifier().to_string(),
                meta: meta(t.meta()),
            },
        }
    }
}
