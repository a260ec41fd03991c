use super::Identity;

/// Signature every free-function subscriber must have.
pub type Function<E, P> = fn(E, P);

/// Binding for a free (or associated, non-method) function.
pub struct FunctionBinding<E, P> {
    func: Function<E, P>,
}

impl<E, P> FunctionBinding<E, P> {
    pub fn new(func: Function<E, P>) -> Self {
        FunctionBinding { func }
    }

    pub fn invoke(&self, event: E, params: P) {
        (self.func)(event, params)
    }

    pub fn address(&self) -> usize {
        self.func as usize
    }

    pub fn identity(&self) -> Identity {
        Identity::Function(self.address())
    }
}

// fn pointers are compared by address; `==` on them trips a lint on newer compilers.
impl<E, P> PartialEq<Function<E, P>> for FunctionBinding<E, P> {
    fn eq(&self, other: &Function<E, P>) -> bool {
        self.address() == *other as usize
    }
}
