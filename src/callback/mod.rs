mod function;
mod method;

use std::any::TypeId;
use std::fmt;

pub use function::Function;
pub use function::FunctionBinding;
pub use method::Method;
pub use method::MethodBinding;

/// Value used to recognise "the same subscription" when deduplicating or
/// removing a binding.
///
/// Method identity deliberately leaves the bound object out: two bindings of
/// the same method on different objects are the same subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Function(usize),
    Method { owner: TypeId, method: usize },
}

/// A registered subscriber: either a free function or an object's method.
///
/// Both variants share the single capability [`Callback::invoke`], so the
/// dispatcher never needs to know which kind of target it is calling.
pub enum Callback<E, P> {
    Function(FunctionBinding<E, P>),
    Method(MethodBinding<E, P>),
}

impl<E, P> Callback<E, P> {
    /// Calls the bound target with `event` and `params`.
    ///
    /// A panic inside the target is not caught here.
    pub fn invoke(&self, event: E, params: P) {
        match self {
            Callback::Function(binding) => binding.invoke(event, params),
            Callback::Method(binding) => binding.invoke(event, params),
        }
    }

    pub fn identity(&self) -> Identity {
        match self {
            Callback::Function(binding) => binding.identity(),
            Callback::Method(binding) => binding.identity(),
        }
    }

    /// True if this is a function binding for `function`.
    pub fn matches_function(&self, function: Function<E, P>) -> bool {
        match self {
            Callback::Function(binding) => *binding == function,
            Callback::Method(_) => false,
        }
    }

    /// True if this is a method binding for `method` on any object of type `T`.
    pub fn matches_method<T: 'static>(&self, method: Method<T, E, P>) -> bool {
        match self {
            Callback::Function(_) => false,
            Callback::Method(binding) => binding.matches(method),
        }
    }
}

impl<E, P> From<FunctionBinding<E, P>> for Callback<E, P> {
    fn from(binding: FunctionBinding<E, P>) -> Self {
        Callback::Function(binding)
    }
}

impl<E, P> From<MethodBinding<E, P>> for Callback<E, P> {
    fn from(binding: MethodBinding<E, P>) -> Self {
        Callback::Method(binding)
    }
}

impl<E, P> fmt::Debug for Callback<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Function(binding) => write!(f, "Function({:#x})", binding.address()),
            Callback::Method(binding) => write!(
                f,
                "Method({}::{:#x} on {:#x})",
                binding.owner_name(),
                binding.address(),
                binding.object_address()
            ),
        }
    }
}
