//! Argument-shape validation.

use crate::value::{ParamType, Value};
use thiserror::Error;

/// The declared parameters of a function.
///
/// A schema is a fixed prefix of parameter types followed by an optional
/// variadic tail. The tail's type is the *element* type of zero or more
/// trailing arguments; a single trailing [`Value::List`] whose elements all
/// match is accepted as the whole tail.
///
/// An empty schema performs no validation at all and accepts every argument
/// list.
///
/// # Example
///
/// ```rust
/// use hookline_core::{ParamType, ParameterSchema, Value};
///
/// let schema = ParameterSchema::new()
///     .param(ParamType::Str)
///     .variadic(ParamType::Int);
///
/// assert!(schema.validate(&[Value::from("sum"), Value::from(1), Value::from(2)]));
/// assert!(schema.validate(&[Value::from("sum"), Value::from(vec![1, 2])]));
/// assert!(!schema.validate(&[Value::from("sum"), Value::from("1")]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSchema {
    fixed: Vec<ParamType>,
    variadic: Option<ParamType>,
}

impl ParameterSchema {
    /// An empty, permissive schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// A schema with the given fixed parameters and no variadic tail.
    pub fn of(params: impl IntoIterator<Item = ParamType>) -> Self {
        Self {
            fixed: params.into_iter().collect(),
            variadic: None,
        }
    }

    /// Append a fixed parameter. Fixed parameters always precede the variadic tail.
    pub fn param(mut self, ty: ParamType) -> Self {
        self.fixed.push(ty);
        self
    }

    /// Set the variadic tail's element type, replacing any previous tail.
    pub fn variadic(mut self, element: ParamType) -> Self {
        self.variadic = Some(element);
        self
    }

    /// The fixed parameter prefix.
    pub fn fixed(&self) -> &[ParamType] {
        &self.fixed
    }

    /// The element type of the variadic tail, if any.
    pub fn variadic_tail(&self) -> Option<&ParamType> {
        self.variadic.as_ref()
    }

    /// Whether this schema declares no parameters (and so validates nothing).
    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.variadic.is_none()
    }

    /// Number of declared entries, the variadic tail counting as one.
    pub fn len(&self) -> usize {
        self.fixed.len() + usize::from(self.variadic.is_some())
    }

    /// Whether `arguments` match this schema.
    pub fn validate(&self, arguments: &[Value]) -> bool {
        self.check(arguments).is_ok()
    }

    /// Match `arguments` against this schema, reporting the first mismatch.
    pub fn check(&self, arguments: &[Value]) -> Result<(), SchemaMismatch> {
        if self.is_empty() {
            return Ok(());
        }

        let prefix = self.fixed.len();
        match self.variadic {
            None if arguments.len() != prefix => {
                return Err(SchemaMismatch::Arity {
                    expected: prefix,
                    found: arguments.len(),
                });
            }
            Some(_) if arguments.len() < prefix => {
                return Err(SchemaMismatch::TooFewArguments {
                    minimum: prefix,
                    found: arguments.len(),
                });
            }
            _ => {}
        }

        for (position, (ty, argument)) in self.fixed.iter().zip(arguments).enumerate() {
            if !ty.accepts(argument) {
                return Err(SchemaMismatch::Type {
                    position,
                    expected: ty.clone(),
                    found: argument.type_name(),
                });
            }
        }

        let Some(element) = &self.variadic else {
            return Ok(());
        };

        let tail = &arguments[prefix..];
        // A single pre-built list stands in for the whole tail.
        if let [Value::List(items)] = tail {
            if items.iter().all(|item| element.accepts(item)) {
                return Ok(());
            }
        }

        for (offset, argument) in tail.iter().enumerate() {
            if !element.accepts(argument) {
                return Err(SchemaMismatch::Type {
                    position: prefix + offset,
                    expected: element.clone(),
                    found: argument.type_name(),
                });
            }
        }

        Ok(())
    }
}

/// The reason an argument list was rejected by a [`ParameterSchema`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaMismatch {
    /// Wrong number of arguments for a schema without variadic tail.
    #[error("expected {expected} argument(s), found {found}")]
    Arity {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// Not enough arguments to fill the fixed prefix of a variadic schema.
    #[error("expected at least {minimum} argument(s), found {found}")]
    TooFewArguments {
        /// Length of the fixed prefix.
        minimum: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// An argument is not assignable to the declared type at its position.
    #[error("argument {position} must be {expected}, found {found}")]
    Type {
        /// Zero-based argument position.
        position: usize,
        /// The declared type.
        expected: ParamType,
        /// The runtime type of the offending argument.
        found: &'static str,
    },
}
