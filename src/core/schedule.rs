// Weekly class schedule domain.
//
// Structure
// - assignment.rs: scheduled class occurrences and their conflict records
// - config.rs: grid resolution, shift window, day set and conflict policy
// - quantizer.rs: time range to fixed-length bucket conversion
// - conflicts.rs: resource overlap detection
// - grid.rs: day x bucket matrix with merged multi-bucket cells
// - grid_view.rs: interactive per-cell state machine and emitted intents
// - active_now.rs: periodic "class in progress" recomputation
// - export.rs: printable document layout with row spans, html and csv output
// - intents.rs: notifications requested by accepted writes
// - decider/: pure create and reschedule decisions
//
// Boundaries
// - Nothing in here performs input or output. Ports describe what the outside provides.

pub mod active_now;
pub mod assignment;
pub mod config;
pub mod conflicts;
pub mod export;
pub mod grid;
pub mod grid_view;
pub mod intents;
pub mod quantizer;
pub mod decider {
    pub mod decision;
    pub mod create {
        pub mod command;
        pub mod decide;
    }
    pub mod reschedule {
        pub mod command;
        pub mod decide;
    }
}
