use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::Identity;

/// Signature every method subscriber must have on its object type `T`.
pub type Method<T, E, P> = fn(&mut T, E, P);

/// Binding for a method on a shared object.
///
/// The object is held through a [`Weak`] reference, so a binding never keeps
/// its object alive. The concrete type is captured inside `call` when the
/// binding is built; nothing is re-cast at invocation time.
pub struct MethodBinding<E, P> {
    call: Box<dyn Fn(E, P) -> bool>,
    owner: TypeId,
    owner_name: &'static str,
    method: usize,
    object: usize,
}

impl<E: 'static, P: 'static> MethodBinding<E, P> {
    pub fn new<T: 'static>(object: &Rc<RefCell<T>>, method: Method<T, E, P>) -> Self {
        let target: Weak<RefCell<T>> = Rc::downgrade(object);
        let call = move |event: E, params: P| match target.upgrade() {
            Some(object) => {
                method(&mut object.borrow_mut(), event, params);
                true
            }
            None => false,
        };
        MethodBinding {
            call: Box::new(call),
            owner: TypeId::of::<T>(),
            owner_name: type_name::<T>(),
            method: method as usize,
            object: Rc::as_ptr(object) as *const () as usize,
        }
    }
}

impl<E, P> MethodBinding<E, P> {
    /// Calls the method on the bound object.
    ///
    /// Skips the call if the object has already been dropped.
    ///
    /// # Panics
    ///
    /// Panics if the object is already mutably borrowed, or if the method
    /// itself panics.
    pub fn invoke(&self, event: E, params: P) {
        if !(self.call)(event, params) {
            log::trace!(
                "skip {}::{:#x}, object {:#x} is gone",
                self.owner_name,
                self.method,
                self.object
            );
        }
    }

    pub fn matches<T: 'static>(&self, method: Method<T, E, P>) -> bool {
        self.owner == TypeId::of::<T>() && self.method == method as usize
    }

    pub fn identity(&self) -> Identity {
        Identity::Method {
            owner: self.owner,
            method: self.method,
        }
    }

    pub fn address(&self) -> usize {
        self.method
    }

    /// Address of the bound object. Informational only, not part of identity.
    pub fn object_address(&self) -> usize {
        self.object
    }

    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }
}
