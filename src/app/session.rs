use tracing::debug;

use crate::app::AppContext;
use crate::app::controller::{DashboardController, Effect};
use crate::app::runtime::Runtime;
use crate::domain::AppError;

/// A mounted controller paired with the runtime that performs its effects.
pub struct Session {
    controller: DashboardController,
    runtime: Runtime,
}

impl Session {
    /// Mount and wait for the startup loads.
    pub fn start(ctx: &AppContext) -> Self {
        let mut session = Self { controller: ctx.controller(), runtime: ctx.runtime() };
        let effects = session.controller.mount();
        session.runtime.dispatch_all(effects);
        session.settle();
        session
    }

    /// Like [`Session::start`], but a failed startup load is an error.
    pub fn start_loaded(ctx: &AppContext) -> Result<Self, AppError> {
        let session = Self::start(ctx);
        session.check()?;
        Ok(session)
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DashboardController {
        &mut self.controller
    }

    /// Dispatch `effect`, if any, and wait for everything it leads to.
    pub fn run(&mut self, effect: Option<Effect>) {
        if let Some(effect) = effect {
            self.runtime.dispatch(effect);
        }
        self.settle();
    }

    /// Queue `effect` without waiting.
    pub fn spawn(&mut self, effect: Option<Effect>) {
        if let Some(effect) = effect {
            self.runtime.dispatch(effect);
        }
    }

    pub fn settle(&mut self) {
        self.runtime.settle(&mut self.controller);
    }

    /// Apply completions that already arrived.
    pub fn pump(&mut self) -> usize {
        self.runtime.pump(&mut self.controller)
    }

    /// The current banner as an error.
    pub fn check(&self) -> Result<(), AppError> {
        match self.controller.state().api_error() {
            Some(message) => Err(AppError::Request(message.to_string())),
            None => Ok(()),
        }
    }

    /// Stop accepting completions. Anything still in flight is discarded.
    pub fn close(mut self) {
        debug!(in_flight = self.runtime.in_flight(), "closing session");
        self.controller.unmount();
    }
}
