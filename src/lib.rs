// Crate entry point. Declare and expose modules so tests and the binary can import them.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.

pub mod core {
    pub mod ports;
    pub mod schedule;
}

pub mod application {
    pub mod errors;
    pub mod command_handlers {
        pub mod create_handler;
        pub mod delete_handler;
        pub mod related_assignments;
        pub mod update_handler;
    }
    pub mod query_handlers {
        pub mod assignment_queries;
        pub mod schedule_grid_queries;
    }
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_assignment_repository;
        pub mod in_memory_notification_outbox;
    }
    pub mod inbound {
        pub mod http;
    }
    pub mod outbound {
        pub mod notification_dispatch;
    }
}

pub mod shell;

#[cfg(test)]
pub mod test_support {
    pub mod fixtures {
        pub mod assignments;
    }
}
