use std::fmt;

use crate::source::ImageRef;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Grid,
    Detail(ImageRef),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Grid => write!(f, "/"),
            Route::Detail(image) => write!(f, "/detail ({})", image),
        }
    }
}

/// Navigation stack. The grid is always at the bottom.
#[derive(Debug)]
pub struct Router {
    stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            stack: vec![Route::Grid],
        }
    }
}

impl Router {
    pub fn current(&self) -> &Route {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        log::info!("Navigate to {}", route);
        self.stack.push(route);
    }

    /// Pop to the previous route. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        log::info!("Back to {}", self.current());
        true
    }
}
