use crate::adapters::in_memory::in_memory_assignment_repository::InMemoryAssignmentRepository;
use crate::adapters::in_memory::in_memory_notification_outbox::InMemoryNotificationOutbox;
use crate::application::command_handlers::create_handler::CreateAssignmentHandler;
use crate::application::command_handlers::delete_handler::DeleteAssignmentHandler;
use crate::application::command_handlers::update_handler::RescheduleAssignmentHandler;
use crate::application::query_handlers::assignment_queries::AssignmentQueries;
use crate::application::query_handlers::schedule_grid_queries::ScheduleGridQueries;
use crate::core::schedule::config::ScheduleConfig;
use std::sync::Arc;

pub const NOTIFICATION_TOPIC: &str = "schedule-assignments";

type Repository = InMemoryAssignmentRepository;
type Outbox = InMemoryNotificationOutbox;

#[derive(Clone)]
pub struct AppState {
    pub create_handler: Arc<CreateAssignmentHandler<Repository, Outbox>>,
    pub reschedule_handler: Arc<RescheduleAssignmentHandler<Repository, Outbox>>,
    pub delete_handler: Arc<DeleteAssignmentHandler<Repository, Outbox>>,
    pub assignment_queries: Arc<AssignmentQueries<Repository, Repository>>,
    pub grid_queries: Arc<ScheduleGridQueries<Repository>>,
}

impl AppState {
    pub fn new(repository: Arc<Repository>, outbox: Arc<Outbox>, config: &ScheduleConfig) -> Self {
        let policy = config.conflict_policy;
        Self {
            create_handler: Arc::new(CreateAssignmentHandler::new(
                NOTIFICATION_TOPIC,
                repository.clone(),
                outbox.clone(),
                policy,
            )),
            reschedule_handler: Arc::new(RescheduleAssignmentHandler::new(
                NOTIFICATION_TOPIC,
                repository.clone(),
                outbox.clone(),
                policy,
            )),
            delete_handler: Arc::new(DeleteAssignmentHandler::new(
                NOTIFICATION_TOPIC,
                repository.clone(),
                outbox,
            )),
            assignment_queries: Arc::new(AssignmentQueries::new(
                repository.clone(),
                repository.clone(),
            )),
            grid_queries: Arc::new(ScheduleGridQueries::new(repository, config.clone())),
        }
    }

    pub fn in_memory(config: &ScheduleConfig) -> Self {
        let repository = Arc::new(InMemoryAssignmentRepository::new(config.clone()));
        let outbox = Arc::new(InMemoryNotificationOutbox::new());
        Self::new(repository, outbox, config)
    }
}
