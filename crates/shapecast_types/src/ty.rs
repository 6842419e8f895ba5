//! The [`Type`] enum, the [`Coerce`] capability and the fluent builder.

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use shapecast_foundation::{Error, Outcome, Primitive, Result, Value};
use shapecast_logic::{PredicateSet, Rule, compile_options};

use crate::array::{ArrayType, MapType};
use crate::builder;
use crate::constrained::Constrained;
use crate::constructor::Constructor;
use crate::default::{DefaultType, DefaultValue};
use crate::enumeration::Enum;
use crate::func::Func;
use crate::meta::{Meta, OMITTABLE};
use crate::nominal::Nominal;
use crate::reference::Reference;
use crate::schema::{ApplyOptions, Key, KeyTransform, Schema};
use crate::sum::Sum;
use crate::wrappers::{Lax, Maybe, Safe};

/// The operations every type supports.
pub trait Coerce {
    /// Coerces and validates `input`, raising on failure.
    ///
    /// # Errors
    ///
    /// Returns the most specific error kind for the failure.
    fn call(&self, input: Value) -> Result<Value>;

    /// Coerces and validates `input` without raising.
    fn try_call(&self, input: Value) -> Outcome;

    /// Returns true if `input` would be accepted.
    fn is_valid(&self, input: &Value) -> bool {
        self.try_call(input.clone()).is_success()
    }

    /// Human-readable type name.
    fn name(&self) -> String;

    /// The raw-value class this type ultimately expects.
    fn primitive(&self) -> Primitive;
}

/// A composable type.
///
/// Types are immutable; every builder returns a new type. Equality is
/// structural and ignores metadata.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    /// Class check against a primitive; `call` passes input through.
    Nominal(Nominal),
    /// A type plus a rule evaluated on its coerced output.
    Constrained(Constrained),
    /// A type preceded by a chain of coercion functions.
    Constructor(Constructor),
    /// Left-biased disjunction.
    Sum(Sum),
    /// A type with a fallback for absent input.
    Default(DefaultType),
    /// A constrained type accepting a fixed set of values or their indexes.
    Enum(Enum),
    /// An array with a member type.
    Array(ArrayType),
    /// A hash with key and value types.
    Map(MapType),
    /// A hash with declared keys.
    Schema(Schema),
    /// Returns the original input instead of raising.
    Safe(Safe),
    /// Safe, with every constraint stripped.
    Lax(Lax),
    /// Nil and undefined become nil; anything else goes through the type.
    Maybe(Maybe),
    /// A registry entry resolved on use.
    Reference(Reference),
}

macro_rules! dispatch {
    ($value:expr, $ty:ident => $body:expr) => {
        match $value {
            Type::Nominal($ty) => $body,
            Type::Constrained($ty) => $body,
            Type::Constructor($ty) => $body,
            Type::Sum($ty) => $body,
            Type::Default($ty) => $body,
            Type::Enum($ty) => $body,
            Type::Array($ty) => $body,
            Type::Map($ty) => $body,
            Type::Schema($ty) => $body,
            Type::Safe($ty) => $body,
            Type::Lax($ty) => $body,
            Type::Maybe($ty) => $body,
            Type::Reference($ty) => $body,
        }
    };
}

impl Coerce for Type {
    fn call(&self, input: Value) -> Result<Value> {
        dispatch!(self, t => t.call(input))
    }

    fn try_call(&self, input: Value) -> Outcome {
        dispatch!(self, t => t.try_call(input))
    }

    fn is_valid(&self, input: &Value) -> bool {
        dispatch!(self, t => t.is_valid(input))
    }

    fn name(&self) -> String {
        dispatch!(self, t => t.name())
    }

    fn primitive(&self) -> Primitive {
        dispatch!(self, t => t.primitive())
    }
}

fn collect_options<K, V>(options: impl IntoIterator<Item = (K, V)>) -> Vec<(String, Value)>
where
    K: Into<String>,
    V: Into<Value>,
{
    options
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl Type {
    // -------------------------------------------------------------------------
    // Application helpers
    // -------------------------------------------------------------------------

    /// Runs `try_call` and hands a failure to `on_failure`, whose result
    /// replaces it.
    pub fn try_or_else(&self, input: Value, on_failure: impl FnOnce(Outcome) -> Outcome) -> Outcome {
        match self.try_call(input) {
            success @ Outcome::Success(_) => success,
            failure => on_failure(failure),
        }
    }

    /// Runs `call`, mapping a failure's best-effort value through `fallback`
    /// instead of raising.
    pub fn call_or_else(&self, input: Value, fallback: impl FnOnce(Value) -> Value) -> Value {
        match self.try_call(input) {
            Outcome::Success(value) => value,
            Outcome::Failure { input, .. } => fallback(input),
        }
    }

    /// Applies a schema with explicit missing-key handling.
    ///
    /// Types other than schemas ignore `options` and behave like `call`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as `call`.
    pub fn apply(&self, input: Value, options: ApplyOptions) -> Result<Value> {
        match self {
            Self::Schema(schema) => schema.apply(input, options),
            other => other.call(input),
        }
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    /// Returns the wrapped type of a decorator.
    #[must_use]
    pub fn inner(&self) -> Option<&Type> {
        match self {
            Self::Constrained(t) => Some(t.inner()),
            Self::Constructor(t) => Some(t.inner()),
            Self::Default(t) => Some(t.inner()),
            Self::Enum(t) => Some(t.inner()),
            Self::Safe(t) => Some(t.inner()),
            Self::Lax(t) => Some(t.inner()),
            Self::Maybe(t) => Some(t.inner()),
            Self::Nominal(_)
            | Self::Sum(_)
            | Self::Array(_)
            | Self::Map(_)
            | Self::Schema(_)
            | Self::Reference(_) => None,
        }
    }

    /// Replaces the wrapped type of a decorator, keeping everything else.
    ///
    /// Non-decorators return `inner` itself.
    #[must_use]
    pub fn rewrap(&self, inner: Type) -> Type {
        match self {
            Self::Constrained(t) => Self::Constrained(t.with_inner(inner)),
            Self::Constructor(t) => Self::Constructor(t.with_inner(inner)),
            Self::Default(t) => Self::Default(t.with_inner(inner)),
            Self::Enum(t) => Self::Enum(t.with_inner(inner)),
            Self::Safe(_) => Self::Safe(Safe::new(inner)),
            Self::Lax(_) => Self::Lax(Lax::new(inner)),
            Self::Maybe(_) => Self::Maybe(Maybe::new(inner)),
            _ => inner,
        }
    }

    /// Forwards a type-valued operation through a decorator and re-wraps
    /// the result. Returns `None` for non-decorators.
    fn forward(&self, op: impl FnOnce(&Type) -> Result<Type>) -> Option<Result<Type>> {
        let inner = self.inner()?;
        Some(op(inner).map(|t| self.rewrap(t)))
    }

    /// Returns the metadata of this type.
    ///
    /// Decorators report the metadata of the type they wrap; optional sums
    /// report the metadata of their non-nil branch.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        match self {
            Self::Nominal(t) => t.meta(),
            Self::Sum(t) if t.is_optional() => t.right().meta(),
            Self::Sum(t) => t.meta(),
            Self::Array(t) => t.meta(),
            Self::Map(t) => t.meta(),
            Self::Schema(t) => t.meta(),
            Self::Reference(t) => t.meta(),
            Self::Constrained(t) => t.inner().meta(),
            Self::Constructor(t) => t.inner().meta(),
            Self::Default(t) => t.inner().meta(),
            Self::Enum(t) => t.inner().meta(),
            Self::Safe(t) => t.inner().meta(),
            Self::Lax(t) => t.inner().meta(),
            Self::Maybe(t) => t.inner().meta(),
        }
    }

    /// Returns a copy with one metadata entry set.
    #[must_use]
    pub fn with_meta(&self, key: impl Into<String>, value: impl Into<Value>) -> Type {
        self.merge_meta(&Meta::new().with(key, value))
    }

    /// Returns a copy with every entry of `meta` merged into its metadata.
    #[must_use]
    pub fn merge_meta(&self, meta: &Meta) -> Type {
        match self {
            Self::Nominal(t) => Self::Nominal(t.clone().with_meta(t.meta().merge(meta))),
            Self::Sum(t) if t.is_optional() => Self::Sum(t.with_right(t.right().merge_meta(meta))),
            Self::Sum(t) => Self::Sum(t.clone().with_meta(t.meta().merge(meta))),
            Self::Array(t) => Self::Array(t.clone().with_meta(t.meta().merge(meta))),
            Self::Map(t) => Self::Map(t.clone().with_meta(t.meta().merge(meta))),
            Self::Schema(t) => Self::Schema(t.clone().with_meta(t.meta().merge(meta))),
            Self::Reference(t) => Self::Reference(t.clone().with_meta(t.meta().merge(meta))),
            decorator => decorator.rewrap(decorator.inner().map_or_else(
                || decorator.clone(),
                |inner| inner.merge_meta(meta),
            )),
        }
    }

    /// Returns a copy with all metadata removed, recursively through
    /// decorators.
    #[must_use]
    pub fn without_meta(&self) -> Type {
        match self {
            Self::Nominal(t) => Self::Nominal(t.clone().with_meta(Meta::new())),
            Self::Sum(t) => Self::Sum(
                Sum::new(t.left().without_meta(), t.right().without_meta()),
            ),
            Self::Array(t) => Self::Array(t.clone().with_meta(Meta::new())),
            Self::Map(t) => Self::Map(t.clone().with_meta(Meta::new())),
            Self::Schema(t) => Self::Schema(t.clone().with_meta(Meta::new())),
            Self::Reference(t) => Self::Reference(t.clone().with_meta(Meta::new())),
            decorator => decorator.rewrap(
                decorator
                    .inner()
                    .map_or_else(|| decorator.clone(), Type::without_meta),
            ),
        }
    }

    /// Marks the type omittable: schema keys of this type are not required.
    #[must_use]
    pub fn omittable(&self) -> Type {
        self.with_meta(OMITTABLE, true)
    }

    /// Returns true if the type accepts nil by construction
    /// (maybe types and sums whose left branch is the nil class).
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Maybe(_) => true,
            Self::Sum(t) => t.is_optional(),
            Self::Constrained(_) | Self::Constructor(_) | Self::Default(_) | Self::Safe(_) | Self::Lax(_) => {
                self.inner().is_some_and(Type::is_optional)
            }
            _ => false,
        }
    }

    /// Returns true if the type fills in a default for absent input.
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            Self::Default(_) => true,
            Self::Constrained(_) | Self::Constructor(_) | Self::Safe(_) | Self::Lax(_) => {
                self.inner().is_some_and(Type::is_default)
            }
            _ => false,
        }
    }

    /// Returns true if the outermost layer is a constraint.
    #[must_use]
    pub const fn is_constrained(&self) -> bool {
        matches!(self, Self::Constrained(_))
    }

    /// Returns the rule of a constrained type, or the disjunction of both
    /// branch rules for a sum of two constrained types.
    #[must_use]
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Self::Constrained(t) => Some(t.rule().clone()),
            Self::Sum(t) => t.rule(),
            _ => None,
        }
    }

    /// Returns the schema if this is one.
    #[must_use]
    pub const fn as_schema(&self) -> Option<&Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    /// Adds constraints compiled by the standard predicate set.
    ///
    /// On a constrained type the new rule is ANDed with the existing one.
    /// On an optional sum only the non-nil branch is constrained.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are empty or do not compile.
    pub fn constrained<K, V>(&self, options: impl IntoIterator<Item = (K, V)>) -> Result<Type>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.constrain(collect_options(options), None)
    }

    /// Adds constraints compiled by `predicates`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are empty or do not compile.
    pub fn constrained_with<K, V>(
        &self,
        predicates: Arc<dyn PredicateSet>,
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Type>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.constrain(collect_options(options), Some(predicates))
    }

    /// Wraps the type in an already compiled rule.
    #[must_use]
    pub fn constrained_by(&self, rule: Rule, predicates: Arc<dyn PredicateSet>) -> Type {
        Self::Constrained(Constrained::new(self.clone(), rule, predicates))
    }

    fn constrain(
        &self,
        options: Vec<(String, Value)>,
        predicates: Option<Arc<dyn PredicateSet>>,
    ) -> Result<Type> {
        match self {
            Self::Constrained(t) => {
                let set = predicates.unwrap_or_else(|| t.predicates().clone());
                let rule = compile_options(&*set, &options)?;
                Ok(Self::Constrained(t.and(rule)))
            }
            Self::Sum(t) if t.is_optional() => {
                Ok(Self::Sum(t.with_right(t.right().constrain(options, predicates)?)))
            }
            Self::Default(t) => Ok(self.rewrap(t.inner().constrain(options, predicates)?)),
            Self::Maybe(t) => Ok(self.rewrap(t.inner().constrain(options, predicates)?)),
            _ => {
                let set = predicates.unwrap_or_else(shapecast_logic::standard);
                let rule = compile_options(&*set, &options)?;
                Ok(self.constrained_by(rule, set))
            }
        }
    }

    /// Appends a coercion function: existing functions run first.
    #[must_use]
    pub fn constructor(&self, func: Func) -> Type {
        match self {
            Self::Constructor(t) => Self::Constructor(t.append(func)),
            other => Self::Constructor(Constructor::new(other.clone(), func)),
        }
    }

    /// Appends an anonymous coercion function.
    ///
    /// Each call registers a new [`Func`] for the life of the process. For
    /// types built over and over, pass a [`Func::named`] to
    /// [`Type::constructor`] instead.
    #[must_use]
    pub fn constructor_fn(
        &self,
        body: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Type {
        self.constructor(Func::new(body))
    }

    /// Prepends a coercion function: it runs before existing functions.
    #[must_use]
    pub fn prepend(&self, func: Func) -> Type {
        match self {
            Self::Constructor(t) => Self::Constructor(t.prepend(func)),
            other => Self::Constructor(Constructor::new(other.clone(), func)),
        }
    }

    /// Adds a literal default used for undefined or nil input.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error for a nil default on an optional
    /// or maybe type, and a constraint error if the type rejects `value`.
    pub fn default(&self, value: impl Into<Value>) -> Result<Type> {
        let value = value.into();
        if value.is_nil() && self.is_optional() {
            return Err(Error::invalid_argument(format!(
                "nil cannot be used as a default of optional type {}",
                self.name()
            )));
        }
        if !self.is_valid(&value) {
            return Err(Error::constraint(
                value,
                format!("default value is not a valid {}", self.name()),
            ));
        }
        Ok(Self::Default(DefaultType::new(
            self.clone(),
            DefaultValue::Literal(value),
        )))
    }

    /// Adds a default computed on demand by `func` (called with undefined).
    #[must_use]
    pub fn default_with(&self, func: Func) -> Type {
        Self::Default(DefaultType::new(self.clone(), DefaultValue::Callable(func)))
    }

    /// Restricts the type to `values`; integer input in range is also
    /// accepted as an index into them.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` is empty.
    pub fn enumeration<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Result<Type> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(Error::invalid_argument("an enum needs at least one value"));
        }
        let constrained =
            self.constrained([("included_in", Value::array_of(values.iter().cloned()))])?;
        Ok(Self::Enum(Enum::new(constrained, values)))
    }

    /// Returns `strict.nil | self`.
    #[must_use]
    pub fn optional(&self) -> Type {
        builder::strict(Primitive::Nil) | self.clone()
    }

    /// Wraps the type so nil and undefined input yield nil.
    #[must_use]
    pub fn maybe(&self) -> Type {
        match self {
            Self::Maybe(_) => self.clone(),
            other => Self::Maybe(Maybe::new(other.clone())),
        }
    }

    /// Wraps the type so `call` returns the original input instead of
    /// raising. Idempotent.
    #[must_use]
    pub fn safe(&self) -> Type {
        match self {
            Self::Safe(_) | Self::Lax(_) => self.clone(),
            other => Self::Safe(Safe::new(other.clone())),
        }
    }

    /// Strips every constraint and wraps the result like [`Type::safe`].
    /// Idempotent.
    #[must_use]
    pub fn lax(&self) -> Type {
        match self {
            Self::Lax(_) => self.clone(),
            other => Self::Lax(Lax::new(other.clone())),
        }
    }

    /// Returns the type with every constraint layer removed, recursively.
    #[must_use]
    pub fn strip_constraints(&self) -> Type {
        match self {
            Self::Constrained(t) => t.inner().strip_constraints(),
            Self::Enum(t) => t.inner().strip_constraints(),
            Self::Sum(t) => Self::Sum(
                Sum::new(t.left().strip_constraints(), t.right().strip_constraints())
                    .with_meta(t.meta().clone()),
            ),
            Self::Array(t) => Self::Array(t.with_member(t.member().strip_constraints())),
            Self::Map(t) => Self::Map(MapType::new(
                t.key_type().strip_constraints(),
                t.value_type().strip_constraints(),
                t.meta().clone(),
            )),
            Self::Schema(t) => Self::Schema(t.map_key_types(Type::strip_constraints)),
            Self::Lax(t) => t.inner().clone(),
            Self::Constructor(_) | Self::Default(_) | Self::Safe(_) | Self::Maybe(_) => self.rewrap(
                self.inner()
                    .map_or_else(|| self.clone(), Type::strip_constraints),
            ),
            Self::Nominal(_) | Self::Reference(_) => self.clone(),
        }
    }

    /// Gives an array type a member type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not an array type.
    pub fn of(&self, member: Type) -> Result<Type> {
        match self {
            Self::Nominal(t) if t.primitive() == Primitive::Array => {
                Ok(Self::Array(ArrayType::new(member, t.meta().clone())))
            }
            Self::Array(t) => Ok(Self::Array(t.with_member(member))),
            other => other.forward(|inner| inner.of(member)).unwrap_or_else(|| {
                Err(Error::invalid_argument(format!(
                    "{} is not an array type",
                    other.name()
                )))
            }),
        }
    }

    /// Gives a hash type key and value types.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a hash type.
    pub fn map(&self, key_type: Type, value_type: Type) -> Result<Type> {
        match self {
            Self::Nominal(t) if t.primitive() == Primitive::Hash => Ok(Self::Map(MapType::new(
                key_type,
                value_type,
                t.meta().clone(),
            ))),
            Self::Map(t) => Ok(Self::Map(MapType::new(key_type, value_type, t.meta().clone()))),
            other => other
                .forward(|inner| inner.map(key_type, value_type))
                .unwrap_or_else(|| {
                    Err(Error::invalid_argument(format!(
                        "{} is not a hash type",
                        other.name()
                    )))
                }),
        }
    }

    /// Declares schema keys on a hash type, or merges keys into an
    /// existing schema (new keys win on conflict).
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a hash type.
    pub fn schema<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Result<Type> {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        self.with_schema(|base| match base {
            Some(schema) => schema.merge(keys),
            None => Schema::new(keys),
        })
    }

    /// Declares a strict schema: undeclared input keys are an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a hash type.
    pub fn strict_schema<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Result<Type> {
        self.schema(keys)?.strict()
    }

    /// Declares a strict schema whose defaults are always resolved, even
    /// when the caller asks not to.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a hash type.
    pub fn strict_with_defaults<K: Into<Key>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<Type> {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        self.with_schema(|base| {
            base.map_or_else(|| Schema::new(Vec::new()), Clone::clone)
                .merge(keys)
                .with_strict(true)
                .with_always_resolve_defaults(true)
        })
    }

    /// Declares a schema whose keys are safe-wrapped and omittable.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a hash type.
    pub fn weak<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Result<Type> {
        let keys: Vec<Key> = keys.into_iter().map(|k| k.into().weakened()).collect();
        self.with_schema(|base| match base {
            Some(schema) => schema.merge(keys),
            None => Schema::new(keys),
        })
    }

    /// Declares a weak schema that symbolizes string input keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a hash type.
    pub fn symbolized<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Result<Type> {
        self.weak(keys)?.with_key_transform(KeyTransform::Symbolize)
    }

    /// Flips a schema into strict mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a schema.
    pub fn strict(&self) -> Result<Type> {
        self.on_schema(|schema| schema.with_strict(true))
    }

    /// Replaces the input key transform of a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not a schema.
    pub fn with_key_transform(&self, transform: KeyTransform) -> Result<Type> {
        self.on_schema(|schema| schema.with_key_transform(transform))
    }

    fn with_schema(&self, build: impl FnOnce(Option<&Schema>) -> Schema) -> Result<Type> {
        match self {
            Self::Nominal(t) if t.primitive() == Primitive::Hash => {
                Ok(Self::Schema(build(None).with_meta(t.meta().clone())))
            }
            Self::Schema(t) => Ok(Self::Schema(build(Some(t)))),
            other => other
                .forward(|inner| inner.with_schema(build))
                .unwrap_or_else(|| {
                    Err(Error::invalid_argument(format!(
                        "{} is not a hash type",
                        other.name()
                    )))
                }),
        }
    }

    fn on_schema(&self, op: impl FnOnce(&Schema) -> Schema) -> Result<Type> {
        match self {
            Self::Schema(t) => Ok(Self::Schema(op(t))),
            other => other.forward(|inner| inner.on_schema(op)).unwrap_or_else(|| {
                Err(Error::invalid_argument(format!(
                    "{} is not a schema",
                    other.name()
                )))
            }),
        }
    }
}

impl BitOr for Type {
    type Output = Type;

    fn bitor(self, rhs: Type) -> Type {
        Type::Sum(Sum::new(self, rhs))
    }
}

impl BitOr for &Type {
    type Output = Type;

    fn bitor(self, rhs: &Type) -> Type {
        Type::Sum(Sum::new(self.clone(), rhs.clone()))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
