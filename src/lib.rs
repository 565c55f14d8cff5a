pub mod shared {
    pub mod core {
        pub mod clock;
    }
    pub mod infrastructure {
        pub mod tick_scheduler;
    }
}

pub mod modules {
    pub mod time_tracking {
        pub mod core {
            pub mod duration;
            pub mod events;
            pub mod session;
            pub mod timesheet_entry;
        }
        pub mod use_cases {
            pub mod track_time {
                pub mod handler;
                pub mod observer;
                pub mod registry;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod submit_timesheet_entry {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
            }
            pub mod list_timesheet_entries {
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod observer_tracing;
                pub mod timesheet_store;
                pub mod timesheet_store_in_memory;
                pub mod timesheet_store_rest;
            }
        }
    }
}

pub mod shell;
