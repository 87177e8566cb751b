//! Camera navigation collaborator

use std::cell::RefCell;
use std::rc::Rc;

/// Pointer-driven camera movement that the lasso tool must silence while active.
///
/// Implementations must be idempotent: suspending twice or resuming while not
/// suspended is allowed and has no further effect.
pub trait NavigationControl {
    fn suspend(&mut self);
    fn resume(&mut self);
}

impl<T: NavigationControl + ?Sized> NavigationControl for Rc<RefCell<T>> {
    fn suspend(&mut self) {
        self.borrow_mut().suspend()
    }

    fn resume(&mut self) {
        self.borrow_mut().resume()
    }
}
