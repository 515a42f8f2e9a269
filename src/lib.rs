pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod tasks;

pub use config::Config;
pub use data::{embedded_dataset, load_dataset};
pub use error::{AppError, AppResult};
pub use report::{Dump, LocalSupplier, OutputFormat, Reporter};
pub use tasks::{run_all, run_task, Task, TaskParams};
