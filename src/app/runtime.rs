//! Runs controller effects on worker threads and hands their outcomes back.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::app::controller::{Completion, DashboardController, Effect};
use crate::domain::form_resources;
use crate::ports::UserRepository;

/// Effect executor. One thread per effect; completions arrive in finish order.
pub struct Runtime {
    repository: Arc<dyn UserRepository>,
    resource_delay: Duration,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    in_flight: usize,
}

impl Runtime {
    pub fn new(repository: Arc<dyn UserRepository>, resource_delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { repository, resource_delay, sender, receiver, in_flight: 0 }
    }

    /// Number of effects whose completion has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    pub fn dispatch(&mut self, effect: Effect) {
        debug!(effect = effect.name(), "dispatching");
        self.in_flight += 1;

        let repository = Arc::clone(&self.repository);
        let sender = self.sender.clone();
        let delay = self.resource_delay;
        thread::spawn(move || {
            let completion = perform(repository.as_ref(), effect, delay);
            if sender.send(completion).is_err() {
                debug!("runtime dropped before completion arrived");
            }
        });
    }

    pub fn dispatch_all(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// A completion that has already arrived, without waiting.
    pub fn try_next(&mut self) -> Option<Completion> {
        let completion = self.receiver.try_recv().ok()?;
        self.in_flight -= 1;
        Some(completion)
    }

    /// Block until the next completion, or `None` when nothing is in flight.
    pub fn wait_next(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.receiver.recv().ok()?;
        self.in_flight -= 1;
        Some(completion)
    }

    /// Apply whatever has arrived so far. Follow-up effects are dispatched.
    pub fn pump(&mut self, controller: &mut DashboardController) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.try_next() {
            self.apply(controller, completion);
            applied += 1;
        }
        applied
    }

    /// Apply completions until nothing is left in flight, follow-ups included.
    pub fn settle(&mut self, controller: &mut DashboardController) {
        while let Some(completion) = self.wait_next() {
            self.apply(controller, completion);
        }
    }

    fn apply(&mut self, controller: &mut DashboardController, completion: Completion) {
        debug!(completion = completion.name(), "applying");
        if let Some(follow_up) = controller.apply(completion) {
            self.dispatch(follow_up);
        }
    }
}

/// Perform one effect synchronously.
pub fn perform(repository: &dyn UserRepository, effect: Effect, resource_delay: Duration) -> Completion {
    match effect {
        Effect::LoadRoles => Completion::RolesLoaded(repository.list_roles()),
        Effect::LoadUsers => Completion::UsersLoaded(repository.list_users()),
        Effect::CreateUser(draft) => Completion::UserCreated(repository.create_user(&draft)),
        Effect::UpdateUser { id, patch } => {
            Completion::UserUpdated { id, result: repository.update_user(id, &patch) }
        }
        Effect::DeleteUser(id) => Completion::UserDeleted { id, result: repository.delete_user(id) },
        Effect::LookupResources { ticket, role_name } => {
            if !resource_delay.is_zero() {
                thread::sleep(resource_delay);
            }
            Completion::ResourcesResolved { ticket, resources: form_resources(&role_name) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiError, FormField, Role, RoleContentCatalog, RoleId, User, UserId};
    use crate::testing::{FakeUserRepository, ScriptedConfirm};

    fn repository() -> FakeUserRepository {
        FakeUserRepository::new(
            vec![Role::new(RoleId::new(1), "Engineer"), Role::new(RoleId::new(2), "HR")],
            vec![User {
                user_id: UserId::new(1),
                first_name: "Maple".into(),
                last_name: "Stack".into(),
                email: "maple@waffle.tech".into(),
                hire_date: "2023-01-09".into(),
                role_id: RoleId::new(1),
                bio: None,
            }],
        )
    }

    fn mounted(repo: &FakeUserRepository) -> (DashboardController, Runtime) {
        let mut controller = DashboardController::new(RoleContentCatalog::default());
        let mut runtime = Runtime::new(Arc::new(repo.clone()), Duration::ZERO);
        runtime.dispatch_all(controller.mount());
        runtime.settle(&mut controller);
        (controller, runtime)
    }

    #[test]
    fn mount_loads_roles_and_users() {
        let repo = repository();
        let (controller, runtime) = mounted(&repo);

        assert!(runtime.is_idle());
        assert_eq!(controller.state().roles().len(), 2);
        assert_eq!(controller.state().users().len(), 1);
        assert_eq!(controller.state().welcome_name(), Some("Maple"));

        let mut calls = repo.get_calls();
        calls.sort();
        assert_eq!(calls, vec!["list_roles", "list_users"]);
    }

    #[test]
    fn failing_server_sets_banner() {
        let repo = repository();
        repo.fail_with(ApiError::fetch("load", "connection refused"));
        let (controller, _) = mounted(&repo);

        let banner = controller.state().api_error().unwrap();
        assert!(banner.starts_with("Failed to load"), "{banner}");
        assert!(controller.state().users().is_empty());
    }

    #[test]
    fn role_selection_resolves_resources() {
        let repo = repository();
        let (mut controller, mut runtime) = mounted(&repo);

        let effect = controller.edit_field(FormField::RoleId, "1").unwrap();
        runtime.dispatch(effect);
        runtime.settle(&mut controller);

        let names: Vec<_> = controller.state().resources().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Codebase Overview", "Engineering Handbook"]);
    }

    #[test]
    fn create_then_delete_round_trip() {
        let repo = repository();
        let (mut controller, mut runtime) = mounted(&repo);

        controller.edit_field(FormField::FirstName, "Honey");
        controller.edit_field(FormField::LastName, "Grid");
        controller.edit_field(FormField::Email, "honey@waffle.tech");
        controller.edit_field(FormField::HireDate, "2024-05-01");
        if let Some(lookup) = controller.edit_field(FormField::RoleId, "2") {
            runtime.dispatch(lookup);
        }
        let create = controller.submit().unwrap();
        runtime.dispatch(create);
        runtime.settle(&mut controller);

        assert_eq!(controller.state().users().len(), 2);
        let created = controller.state().users().last().unwrap().user_id;
        assert_eq!(created, UserId::new(2));
        assert!(controller.state().form().state().is_blank());

        let delete = controller.request_delete(created, &ScriptedConfirm::answering(true)).unwrap();
        runtime.dispatch(delete.unwrap());
        runtime.settle(&mut controller);
        assert_eq!(controller.state().users().len(), 1);
        assert_eq!(repo.list_users().unwrap().len(), 1);
    }

    #[test]
    fn pump_does_not_wait() {
        let repo = repository();
        let mut controller = DashboardController::new(RoleContentCatalog::default());
        let mut runtime = Runtime::new(Arc::new(repo), Duration::from_millis(200));
        controller.mount();
        runtime.dispatch(Effect::LookupResources { ticket: 0, role_name: "HR".into() });

        assert_eq!(runtime.pump(&mut controller), 0);
        assert_eq!(runtime.in_flight(), 1);
        runtime.settle(&mut controller);
        assert!(runtime.is_idle());
    }

    #[test]
    fn perform_maps_each_effect() {
        let repo = repository();
        match perform(&repo, Effect::DeleteUser(UserId::new(9)), Duration::ZERO) {
            Completion::UserDeleted { id, result } => {
                assert_eq!(id, UserId::new(9));
                assert_eq!(result, Err(ApiError::rejected(404, "User not found")));
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }
}
