use serde::{Deserialize, Serialize};

/// One of the two code states a transition moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Prev,
    Next,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Prev, Side::Next];
}

/// A value that may exist in the previous state, the next state, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tween<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<T>,
}

impl<T> Default for Tween<T> {
    fn default() -> Self {
        Tween {
            prev: None,
            next: None,
        }
    }
}

impl<T> Tween<T> {
    pub fn new(prev: Option<T>, next: Option<T>) -> Self {
        Tween { prev, next }
    }

    pub fn prev_only(prev: T) -> Self {
        Tween {
            prev: Some(prev),
            next: None,
        }
    }

    pub fn next_only(next: T) -> Self {
        Tween {
            prev: None,
            next: Some(next),
        }
    }

    pub fn both(prev: T, next: T) -> Self {
        Tween {
            prev: Some(prev),
            next: Some(next),
        }
    }

    pub fn get(&self, side: Side) -> Option<&T> {
        match side {
            Side::Prev => self.prev.as_ref(),
            Side::Next => self.next.as_ref(),
        }
    }

    pub fn as_ref(&self) -> Tween<&T> {
        Tween {
            prev: self.prev.as_ref(),
            next: self.next.as_ref(),
        }
    }

    pub fn map<U, F: FnMut(T, Side) -> U>(self, mut f: F) -> Tween<U> {
        Tween {
            prev: self.prev.map(|v| f(v, Side::Prev)),
            next: self.next.map(|v| f(v, Side::Next)),
        }
    }
}

/// A value that exists in both states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FullTween<T> {
    pub prev: T,
    pub next: T,
}

impl<T> FullTween<T> {
    pub fn new(prev: T, next: T) -> Self {
        FullTween { prev, next }
    }

    pub fn from_fn<F: FnMut(Side) -> T>(mut f: F) -> Self {
        FullTween {
            prev: f(Side::Prev),
            next: f(Side::Next),
        }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Prev => &self.prev,
            Side::Next => &self.next,
        }
    }

    pub fn as_ref(&self) -> FullTween<&T> {
        FullTween {
            prev: &self.prev,
            next: &self.next,
        }
    }

    pub fn map<U, F: FnMut(T, Side) -> U>(self, mut f: F) -> FullTween<U> {
        FullTween {
            prev: f(self.prev, Side::Prev),
            next: f(self.next, Side::Next),
        }
    }

    pub fn try_map<U, E, F: FnMut(T, Side) -> Result<U, E>>(
        self,
        mut f: F,
    ) -> Result<FullTween<U>, E> {
        Ok(FullTween {
            prev: f(self.prev, Side::Prev)?,
            next: f(self.next, Side::Next)?,
        })
    }
}

impl<T> From<FullTween<T>> for Tween<T> {
    fn from(full: FullTween<T>) -> Self {
        Tween::both(full.prev, full.next)
    }
}
