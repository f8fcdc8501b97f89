use core::fmt;
use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

/// Something in the world whose position can be read at search time, such as an agent's
/// transform.
pub trait Anchor {
    fn position(&self) -> Vec3;
}

impl Anchor for Cell<Vec3> {
    fn position(&self) -> Vec3 {
        self.get()
    }
}

/// Where a search starts or ends: a fixed world position, or an anchor re-read on every search.
#[derive(Clone)]
pub enum Endpoint {
    Position(Vec3),
    Anchored(Rc<dyn Anchor>),
}

impl Default for Endpoint {
    fn default() -> Endpoint {
        Endpoint::Position(Vec3::ZERO)
    }
}

impl Endpoint {
    pub fn position(&self) -> Vec3 {
        match self {
            Endpoint::Position(p) => *p,
            Endpoint::Anchored(anchor) => anchor.position(),
        }
    }
}

impl From<Vec3> for Endpoint {
    fn from(position: Vec3) -> Endpoint {
        Endpoint::Position(position)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Position(p) => f.debug_tuple("Position").field(p).finish(),
            Endpoint::Anchored(anchor) => f.debug_tuple("Anchored").field(&anchor.position()).finish(),
        }
    }
}
