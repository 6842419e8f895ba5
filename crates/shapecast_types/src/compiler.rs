//! Compiles [`Ast`] nodes back into types.

use shapecast_foundation::{Error, Primitive, Result, Value};
use shapecast_logic::Rule;
use tracing::debug;

use crate::array::{ArrayType, MapType};
use crate::ast::{Ast, DefaultAst, KeyAst, TransformAst};
use crate::constructor::Constructor;
use crate::default::{DefaultType, DefaultValue};
use crate::enumeration::Enum;
use crate::func::{Func, FunctionRegistry};
use crate::meta::Meta;
use crate::nominal::Nominal;
use crate::registry::Registry;
use crate::schema::{Key, KeyTransform, Schema};
use crate::sum::Sum;
use crate::ty::Type;
use crate::wrappers::{Lax, Maybe, Safe};

/// Visits AST nodes and rebuilds the types they describe.
///
/// Named nodes become references into the registry; constraint rules are
/// checked against the registry's predicate set; function handles are
/// looked up in the global [`FunctionRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r Registry,
}

impl<'r> Compiler<'r> {
    /// Creates a compiler resolving names through `registry`.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Compiles one AST.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown predicates or function handles, and
    /// for structurally invalid nodes.
    pub fn compile(&self, ast: &Ast) -> Result<Type> {
        match ast {
            Ast::Nominal { primitive, meta } => Ok(Self::visit_nominal(*primitive, meta)),
            Ast::Any { meta } => Ok(Self::visit_nominal(Primitive::Any, meta)),
            Ast::Constrained { ty, rule } => self.visit_constrained(ty, rule),
            Ast::Constructor { ty, functions } => self.visit_constructor(ty, functions),
            Ast::Sum { left, right, meta } => Ok(Type::Sum(
                Sum::new(self.compile(left)?, self.compile(right)?).with_meta(meta.clone()),
            )),
            Ast::Default { ty, value } => self.visit_default(ty, value),
            Ast::Enum { ty, values } => self.visit_enum(ty, values),
            Ast::Array { member, meta } => Ok(Type::Array(ArrayType::new(
                self.compile(member)?,
                meta.clone(),
            ))),
            Ast::Map { key, value, meta } => Ok(Type::Map(MapType::new(
                self.compile(key)?,
                self.compile(value)?,
                meta.clone(),
            ))),
            Ast::Schema {
                keys,
                strict,
                always_resolve_defaults,
                transform,
                meta,
            } => self.visit_schema(keys, *strict, *always_resolve_defaults, transform, meta),
            Ast::Safe { ty } => Ok(Type::Safe(Safe::new(self.compile(ty)?))),
            Ast::Lax { ty } => Ok(Type::Lax(Lax::new(self.compile(ty)?))),
            Ast::Maybe { ty } => Ok(Type::Maybe(Maybe::new(self.compile(ty)?))),
            Ast::Named { identifier, meta } => Ok(self.visit_named(identifier, meta)),
        }
    }

    fn visit_nominal(primitive: Primitive, meta: &Meta) -> Type {
        Type::Nominal(Nominal::new(primitive, meta.clone()))
    }

    fn visit_constrained(&self, ty: &Ast, rule: &Rule) -> Result<Type> {
        let predicates = self.registry.predicates();
        for predicate in rule.predicates() {
            let arg = predicate.args.first().cloned().unwrap_or(Value::Bool(true));
            predicates.compile(&predicate.name, &arg)?;
        }
        Ok(self.compile(ty)?.constrained_by(rule.clone(), predicates.clone()))
    }

    fn visit_constructor(&self, ty: &Ast, handles: &[String]) -> Result<Type> {
        if handles.is_empty() {
            return Err(Error::invalid_ast("constructor without functions"));
        }
        let functions = handles
            .iter()
            .map(|handle| FunctionRegistry::global().get(handle))
            .collect::<Result<Vec<Func>>>()?;
        Ok(Type::Constructor(Constructor::from_parts(
            self.compile(ty)?,
            functions,
        )))
    }

    fn visit_default(&self, ty: &Ast, value: &DefaultAst) -> Result<Type> {
        let value = match value {
            DefaultAst::Literal(value) => DefaultValue::Literal(value.clone()),
            DefaultAst::Callable(handle) => {
                DefaultValue::Callable(FunctionRegistry::global().get(handle)?)
            }
        };
        Ok(Type::Default(DefaultType::new(self.compile(ty)?, value)))
    }

    fn visit_enum(&self, ty: &Ast, values: &[Value]) -> Result<Type> {
        if values.is_empty() {
            return Err(Error::invalid_ast("enum without values"));
        }
        Ok(Type::Enum(Enum::new(self.compile(ty)?, values.to_vec())))
    }

    fn visit_schema(
        &self,
        keys: &[KeyAst],
        strict: bool,
        always_resolve_defaults: bool,
        transform: &TransformAst,
        meta: &Meta,
    ) -> Result<Type> {
        let keys = keys
            .iter()
            .map(|key| {
                Ok(Key::new(key.name.clone(), self.compile(&key.ty)?).required(key.required))
            })
            .collect::<Result<Vec<Key>>>()?;
        let transform = match transform {
            TransformAst::Identity => KeyTransform::Identity,
            TransformAst::Symbolize => KeyTransform::Symbolize,
            TransformAst::Stringify => KeyTransform::Stringify,
            TransformAst::Custom(handle) => {
                KeyTransform::Custom(FunctionRegistry::global().get(handle)?)
            }
        };
        let schema = Schema::new(keys)
            .with_strict(strict)
            .with_always_resolve_defaults(always_resolve_defaults)
            .with_key_transform(transform)
            .with_meta(meta.clone());
        Ok(Type::Schema(schema))
    }

    fn visit_named(&self, identifier: &str, meta: &Meta) -> Type {
        self.registry.reference(identifier).merge_meta(meta)
    }
}

impl Registry {
    /// Compiles `ast`, resolving names through this registry.
    ///
    /// # Errors
    ///
    /// See [`Compiler::compile`].
    pub fn compile(&self, ast: &Ast) -> Result<Type> {
        debug!(tag = ast.tag(), "compiling ast");
        Compiler::new(self).compile(ast)
    }
}
